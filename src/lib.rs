//! Propscope - an animated, terminal-based scatter plot for housing market data.
//!
//! Propscope plots house prices against a second attribute (distance to the
//! central business district, or land size), colouring each point by its
//! k-means cluster. Switching between the two datasets animates points into
//! place, and hovering a point shows its values in a tooltip.
//!
//! # Features
//!
//! - Linear scales fitted to the data extent
//! - Positional enter/update/exit reconciliation with eased transitions
//! - Hover and click inspection with tooltips
//! - Resize-aware layout
//! - Gruvbox color themes
//!
//! # Example
//!
//! ```ignore
//! use propscope::chart::ScatterChart;
//! use propscope::data::DataReader;
//! use propscope::scale::PixelArea;
//! use propscope::switcher::DatasetId;
//! use propscope::util::ChartConfig;
//! use std::time::Instant;
//!
//! let mut chart = ScatterChart::mount(
//!     DataReader::sample_cbd()?,
//!     DataReader::sample_landsize()?,
//!     DatasetId::Cbd,
//!     ChartConfig::default(),
//! );
//! chart.resize(PixelArea::new(700.0, 510.0), Instant::now())?;
//! println!("{}", chart.scene(Instant::now()).to_json()?);
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod chart;
pub mod data;
pub mod error;
pub mod interaction;
pub mod reconcile;
pub mod scale;
pub mod switcher;
pub mod ui;
pub mod util;
pub mod viewport;

pub use error::{Result, ScatterError};
