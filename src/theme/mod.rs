// Theme module - Color palette and status lookups
//
// The palette is shared by every panel. `status` maps job/vertex states
// and vertex kinds onto colors and tag text.

pub mod status;

use ratatui::style::Color;

/// Primary accent - borders, titles, idle edges
pub const ACCENT_PURPLE: Color = Color::Rgb(187, 154, 247);

/// Warning - transitional states, rates
pub const AMBER: Color = Color::Rgb(255, 158, 100);

/// Failure states and error text
pub const CRIMSON: Color = Color::Rgb(247, 118, 142);

/// Healthy / running
pub const LIME: Color = Color::Rgb(158, 206, 106);

/// Completed states
pub const SKY: Color = Color::Rgb(125, 207, 255);

/// Neutral text
pub const MIST: Color = Color::Rgb(169, 177, 214);

/// Selected row / cursor background
pub const SELECTION_BG: Color = Color::Rgb(47, 51, 77);

pub use status::*;
