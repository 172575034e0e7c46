//! Switching between the two field-pair configurations.

use crate::chart::ChartState;
use crate::data::Dataset;
use crate::error::Result;
use crate::reconcile::SyncReport;
use serde::Serialize;
use std::time::Instant;

/// Identifies one of the two known configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetId {
    /// Price against distance to the CBD.
    #[default]
    Cbd,
    /// Price against land size.
    Landsize,
}

impl DatasetId {
    /// The other configuration.
    pub fn other(self) -> Self {
        match self {
            DatasetId::Cbd => DatasetId::Landsize,
            DatasetId::Landsize => DatasetId::Cbd,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            DatasetId::Cbd => "CBD",
            DatasetId::Landsize => "Landsize",
        }
    }

    fn slot(self) -> usize {
        match self {
            DatasetId::Cbd => 0,
            DatasetId::Landsize => 1,
        }
    }
}

/// Owns both configurations and which one is active.
#[derive(Debug)]
pub struct DatasetSwitcher {
    datasets: [Dataset; 2],
    active: DatasetId,
}

impl DatasetSwitcher {
    /// Create a switcher with `start` active. Nothing is drawn yet.
    pub fn new(cbd: Dataset, landsize: Dataset, start: DatasetId) -> Self {
        Self {
            datasets: [cbd, landsize],
            active: start,
        }
    }

    /// Currently active configuration.
    pub fn active(&self) -> DatasetId {
        self.active
    }

    /// Dataset of the active configuration.
    pub fn active_dataset(&self) -> &Dataset {
        self.dataset(self.active)
    }

    /// Dataset of any configuration.
    pub fn dataset(&self, id: DatasetId) -> &Dataset {
        &self.datasets[id.slot()]
    }

    /// Make `id` active and run a full scale + reconcile cycle for it.
    ///
    /// Any tooltip is dismissed first, whatever the outcome. If the dataset is
    /// malformed the cycle is aborted and the previous configuration stays
    /// active and drawn. Returns `None` when there is no layout to draw into
    /// yet; the cycle then runs on the first usable resize.
    pub fn toggle(
        &mut self,
        id: DatasetId,
        state: &mut ChartState,
        now: Instant,
    ) -> Result<Option<SyncReport>> {
        state.dismiss_inspection(now);
        let dataset = &self.datasets[id.slot()];
        match state.render_cycle(dataset, now) {
            Ok(report) => {
                tracing::info!(
                    "Switched to {} ({} records)",
                    id.name(),
                    dataset.len()
                );
                self.active = id;
                Ok(report)
            }
            Err(e) => {
                tracing::warn!("Switch to {} aborted: {}", id.name(), e);
                Err(e)
            }
        }
    }

    /// Switch to whichever configuration is not active.
    pub fn toggle_next(&mut self, state: &mut ChartState, now: Instant) -> Result<Option<SyncReport>> {
        self.toggle(self.active.other(), state, now)
    }
}
