//! Value-space to pixel-space mapping.
//!
//! A [`ScaleState`] is derived from the active dataset and the usable pixel
//! area. Domains always cover the full extent of the dataset; ranges follow
//! the viewport and are the only part a resize touches.

use crate::data::{Dataset, Record};
use crate::error::{Result, ScatterError};
use serde::Serialize;

/// Padding applied on both sides of a domain whose min equals its max.
pub const DOMAIN_EPSILON: f64 = 0.5;

/// Usable drawing area in pixels, after margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelArea {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl PixelArea {
    /// Create a new pixel area.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Pixel area covered by a block of terminal cells drawn with braille
    /// markers (2 dots per column, 4 per row).
    pub fn from_cells(cols: u16, rows: u16) -> Self {
        Self::new(f64::from(cols) * 2.0, f64::from(rows) * 4.0)
    }

    /// Whether either side has no usable length.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// A linear, monotonic mapping from a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    /// Source-unit extent, `[min, max]`.
    pub domain: (f64, f64),
    /// Pixel interval the domain maps onto. May be descending.
    pub range: (f64, f64),
}

impl LinearScale {
    /// Create a new scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value to a pixel coordinate.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    /// Whether `value` lies inside the domain.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.domain.0 && value <= self.domain.1
    }

    /// Round tick values inside the domain, spaced 1, 2 or 5 times a power of ten.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = self.domain;
        if !(lo.is_finite() && hi.is_finite()) || count == 0 {
            return Vec::new();
        }
        if lo == hi {
            return vec![lo];
        }

        let step = tick_step(lo, hi, count);
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|k| k as f64 * step).collect()
    }
}

fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo).abs() / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    if error >= 50f64.sqrt() {
        power * 10.0
    } else if error >= 10f64.sqrt() {
        power * 5.0
    } else if error >= 2f64.sqrt() {
        power * 2.0
    } else {
        power
    }
}

/// Both axis scales of a mounted chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleState {
    /// Horizontal scale; range is `[0, width]`.
    pub x: LinearScale,
    /// Vertical scale; range is `[height, 0]` so larger values sit higher.
    pub y: LinearScale,
}

impl ScaleState {
    /// Pixel position of a record.
    pub fn project(&self, record: &Record) -> (f64, f64) {
        (self.x.map(record.x), self.y.map(record.y))
    }

    /// Replace the pixel ranges, keeping domains.
    pub fn set_area(&mut self, area: PixelArea) {
        self.x.range = (0.0, area.width);
        self.y.range = (area.height, 0.0);
    }

    /// The pixel area the ranges currently span.
    pub fn area(&self) -> PixelArea {
        PixelArea::new(self.x.range.1, self.y.range.0)
    }
}

/// Derives a [`ScaleState`] from a dataset and a pixel area.
#[derive(Debug)]
pub struct ScaleComputer;

impl ScaleComputer {
    /// Compute domains from the dataset extent and ranges from `area`.
    ///
    /// Fails with `MalformedDataset` when there is nothing to measure.
    pub fn compute(dataset: &Dataset, area: PixelArea) -> Result<ScaleState> {
        let (x_domain, y_domain) = Self::domains(dataset)?;

        let mut state = ScaleState {
            x: LinearScale::new(x_domain, (0.0, 0.0)),
            y: LinearScale::new(y_domain, (0.0, 0.0)),
        };
        state.set_area(area);

        tracing::debug!(
            "Scale computed: {} {:?}, {} {:?}, area {}x{}",
            dataset.x_field,
            x_domain,
            dataset.y_field,
            y_domain,
            area.width,
            area.height
        );
        Ok(state)
    }

    /// Padded x and y domains of a dataset, without any pixel range.
    pub fn domains(dataset: &Dataset) -> Result<((f64, f64), (f64, f64))> {
        let x_domain = extent(dataset.records.iter().map(|r| r.x), &dataset.x_field)?;
        let y_domain = extent(dataset.records.iter().map(|r| r.y), &dataset.y_field)?;
        Ok((x_domain, y_domain))
    }
}

fn extent(values: impl Iterator<Item = f64>, field: &str) -> Result<(f64, f64)> {
    let mut bounds: Option<(f64, f64)> = None;
    for v in values {
        if !v.is_finite() {
            return Err(ScatterError::malformed(format!(
                "non-finite value {} in field '{}'",
                v, field
            )));
        }
        bounds = Some(match bounds {
            Some((min, max)) => (min.min(v), max.max(v)),
            None => (v, v),
        });
    }

    match bounds {
        Some((min, max)) if min == max => Ok((min - DOMAIN_EPSILON, max + DOMAIN_EPSILON)),
        Some(b) => Ok(b),
        None => Err(ScatterError::malformed("dataset is empty")),
    }
}
