//! Data reading and representation.
//!
//! This module handles reading the pre-supplied JSON record collections and
//! projecting them onto a field pair.

mod dataset;
mod reader;

pub use dataset::{Dataset, FieldMapping, Record, DEFAULT_CLUSTER_FIELD};
pub use reader::DataReader;
