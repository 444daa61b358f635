//! Domain Layer
//!
//! The packaging rules, free of process spawning and disk access.
//!
//! ## Structure
//!
//! - `entities/` - Parameters, groups, certificate candidates, validation errors
//! - `value_objects/` - Frameworks, processor architectures, certificate hashes
//! - `services/` - Certificate resolution and descriptor transformers
//! - `ports/` - Interfaces implemented by infrastructure

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
