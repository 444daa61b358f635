//! Property tests for clickonce.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants of framework and certificate resolution.
//!
//! Run with: `cargo test --test properties`

#[path = "properties/framework_resolution.rs"]
mod framework_resolution;

#[path = "properties/certificate_resolution.rs"]
mod certificate_resolution;
