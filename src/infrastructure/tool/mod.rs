//! The external descriptor generator and signer

mod locator;
mod mage;

pub use locator::{MageLocator, MAGE_PROGRAM};
pub use mage::MageTool;
