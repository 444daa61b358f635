//! Package Module
//!
//! Builds a signed deployment package from validated parameters.
//!
//! ## Structure
//!
//! - `result` - What was produced (`PackageReport`)
//! - `use_case` - The pipeline (`PackageUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use clickonce::application::package::PackageUseCase;
//!
//! let use_case = PackageUseCase::new(tool, certificate_store, fs);
//! let report = use_case.execute(&params)?;
//! ```

mod result;
mod use_case;

pub use result::PackageReport;
pub use use_case::PackageUseCase;
