//! Utility modules.
//!
//! Layout constants and the cluster colour palette.

pub mod layout_config;
pub mod palette;

pub use layout_config::ChartConfig;
