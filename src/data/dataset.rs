//! Dataset and record types.

use serde::Serialize;

/// Default name of the cluster label field in the source JSON.
pub const DEFAULT_CLUSTER_FIELD: &str = "kmeans_3";

/// A single house, projected onto the active field pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Record {
    /// Value of the x field (distance to CBD or land size).
    pub x: f64,
    /// Value of the y field (price).
    pub y: f64,
    /// Precomputed cluster label, used for colour grouping.
    pub cluster: i32,
}

impl Record {
    /// Create a new record.
    pub fn new(x: f64, y: f64, cluster: i32) -> Self {
        Self { x, y, cluster }
    }
}

/// Names of the source fields a dataset is projected from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    /// Field plotted on the x axis.
    pub x_field: String,
    /// Field plotted on the y axis.
    pub y_field: String,
    /// Field holding the cluster label.
    pub cluster_field: String,
}

impl FieldMapping {
    /// Create a mapping using the default cluster field.
    pub fn new(x_field: impl Into<String>, y_field: impl Into<String>) -> Self {
        Self {
            x_field: x_field.into(),
            y_field: y_field.into(),
            cluster_field: DEFAULT_CLUSTER_FIELD.to_string(),
        }
    }

    /// Override the cluster field name.
    pub fn with_cluster_field(mut self, cluster_field: impl Into<String>) -> Self {
        self.cluster_field = cluster_field.into();
        self
    }
}

/// One field-pair configuration: a record collection plus the names of its axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Name of the x field, used as the x axis title.
    pub x_field: String,
    /// Name of the y field, used as the y axis title.
    pub y_field: String,
    /// Records in source order. Position is identity.
    pub records: Vec<Record>,
}

impl Dataset {
    /// Create a new dataset.
    pub fn new(x_field: impl Into<String>, y_field: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            x_field: x_field.into(),
            y_field: y_field.into(),
            records,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get a record by position.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }
}
