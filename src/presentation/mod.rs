//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Logging setup and output rendering
//!
//! ## Structure
//!
//! - `cli` - Command-line definition and merging with configuration
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `logging` - `tracing-subscriber` initialisation
//! - `output` - Error, warning and summary rendering

pub mod cli;
pub mod factory;
pub mod logging;
pub mod output;

pub use cli::{Cli, PROGRAM_NAME};
pub use factory::create_package_use_case;
pub use logging::init_logging;
