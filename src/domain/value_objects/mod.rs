//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod cert_hash;
pub mod framework;
mod processor;

pub use cert_hash::CertHash;
pub use framework::{resolve_compatible, FrameworkRuntime, TargetFramework, UnknownFramework};
pub use processor::ProcessorArchitecture;
