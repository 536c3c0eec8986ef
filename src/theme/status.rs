// Status and vertex-kind lookups
//
// Tag colors for job/vertex states, node colors for vertex kinds, and the
// color helpers shared by the animated edges and the status bar.

use ratatui::style::Color;

use super::{ACCENT_PURPLE, AMBER, CRIMSON, LIME, MIST, SKY};
use crate::job::{JobStatus, VertexType};

/// Tag color for a job or vertex status
pub fn status_color(status: JobStatus) -> Color {
    match status {
        JobStatus::Running => LIME,
        JobStatus::Finished | JobStatus::SavepointDone => SKY,
        JobStatus::Failed | JobStatus::Failing => CRIMSON,
        JobStatus::Canceled | JobStatus::Canceling => AMBER,
        JobStatus::Initializing
        | JobStatus::Created
        | JobStatus::Pending
        | JobStatus::Scheduled
        | JobStatus::DoingSavepoint => ACCENT_PURPLE,
        JobStatus::Unknowable | JobStatus::Unknown => MIST,
    }
}

/// Single-glyph status marker drawn next to node labels
pub fn status_icon(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Running => "●",
        JobStatus::Finished | JobStatus::SavepointDone => "✔",
        JobStatus::Failed | JobStatus::Failing => "✖",
        JobStatus::Canceled | JobStatus::Canceling => "■",
        JobStatus::Unknowable | JobStatus::Unknown => "?",
        _ => "◌",
    }
}

/// Border color of a node by vertex kind
pub fn kind_color(kind: VertexType) -> Color {
    match kind {
        VertexType::Source => SKY,
        VertexType::Sink => AMBER,
        VertexType::Transform => ACCENT_PURPLE,
        VertexType::Other => MIST,
    }
}

/// Interpolate between two RGB colors based on a ratio (0.0 ~ 1.0)
pub fn interpolate_color(color1: (u8, u8, u8), color2: (u8, u8, u8), ratio: f32) -> Color {
    let ratio = ratio.clamp(0.0, 1.0);
    let r = (color1.0 as f32 + (color2.0 as f32 - color1.0 as f32) * ratio) as u8;
    let g = (color1.1 as f32 + (color2.1 as f32 - color1.1 as f32) * ratio) as u8;
    let b = (color1.2 as f32 + (color2.2 as f32 - color1.2 as f32) * ratio) as u8;
    Color::Rgb(r, g, b)
}

/// Get color for refresh interval based on its value relative to default
///
/// Green at or above the default, amber when faster, red when more than
/// twice as fast. A recently changed value is brightened by 20%.
pub fn refresh_color(interval_ms: u64, default_ms: u64, recently_changed: bool) -> Color {
    let base_color = if interval_ms >= default_ms {
        LIME
    } else if (default_ms - interval_ms) as f32 / default_ms as f32 > 0.5 {
        CRIMSON
    } else {
        AMBER
    };

    match (recently_changed, base_color) {
        (true, Color::Rgb(r, g, b)) => Color::Rgb(
            (r as f32 * 1.2).min(255.0) as u8,
            (g as f32 * 1.2).min(255.0) as u8,
            (b as f32 * 1.2).min(255.0) as u8,
        ),
        _ => base_color,
    }
}
