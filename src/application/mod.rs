//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `PackageUseCase` - Generate, rewrite and sign both descriptors, then stage the payload

pub mod package;

pub use package::{PackageReport, PackageUseCase};
