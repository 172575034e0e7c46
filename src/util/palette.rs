//! Categorical colours for cluster labels.

use ratatui::style::Color;
use serde::Serialize;

/// An RGB colour that can be interpolated and serialised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.0, c.1, c.2)
    }
}

/// Ten-colour categorical scheme (the familiar "category10").
const CATEGORY10: [Rgb; 10] = [
    Rgb(0x1f, 0x77, 0xb4),
    Rgb(0xff, 0x7f, 0x0e),
    Rgb(0x2c, 0xa0, 0x2c),
    Rgb(0xd6, 0x27, 0x28),
    Rgb(0x94, 0x67, 0xbd),
    Rgb(0x8c, 0x56, 0x4b),
    Rgb(0xe3, 0x77, 0xc2),
    Rgb(0x7f, 0x7f, 0x7f),
    Rgb(0xbc, 0xbd, 0x22),
    Rgb(0x17, 0xbe, 0xcf),
];

/// Colour for a cluster label. Labels wrap around the palette, negatives included.
pub fn cluster_color(label: i32) -> Rgb {
    CATEGORY10[label.rem_euclid(CATEGORY10.len() as i32) as usize]
}
