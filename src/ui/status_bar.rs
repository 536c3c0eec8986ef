// Status Bar rendering module
//
// Renders the bottom status bar with keyboard shortcuts and view indicators.

use crate::app::{config::DEFAULT_REFRESH_MS, AppState};
use crate::theme::{refresh_color, ACCENT_PURPLE, AMBER, CRIMSON, MIST};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

struct Hint {
    priority: u8,
    key: &'static str,
    desc: &'static str,
    color: Color,
}

const HINT_COUNT: usize = 7;

static HINTS: [Hint; HINT_COUNT] = [
    Hint { priority: 1, key: "Q:", desc: "Quit | ", color: Color::Red },
    Hint { priority: 1, key: "←↑↓→:", desc: "Move | ", color: ACCENT_PURPLE },
    Hint { priority: 1, key: "Enter:", desc: "Inspect | ", color: ACCENT_PURPLE },
    Hint { priority: 2, key: "Tab:", desc: "View | ", color: ACCENT_PURPLE },
    Hint { priority: 2, key: "Esc:", desc: "Close | ", color: ACCENT_PURPLE },
    Hint { priority: 2, key: "R:", desc: "Reload | ", color: ACCENT_PURPLE },
    Hint { priority: 3, key: "+/-:", desc: "Speed | ", color: ACCENT_PURPLE },
];

/// Keys that fit in `available_width` columns, highest priority first
///
/// Hints keep their declared order within the bar.
fn visible_hints(available_width: usize) -> Vec<&'static Hint> {
    let mut used = 0;
    let mut shown = [false; HINT_COUNT];
    for priority in 1..=3 {
        for (idx, hint) in HINTS.iter().enumerate() {
            if hint.priority != priority {
                continue;
            }
            let len = hint.key.chars().count() + hint.desc.len();
            if used + len <= available_width {
                shown[idx] = true;
                used += len;
            }
        }
    }
    HINTS.iter().zip(shown).filter(|(_, s)| *s).map(|(h, _)| h).collect()
}

pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let indicators = build_indicators(app);
    let indicator_width: usize = indicators.iter().map(|s| s.width()).sum();
    let available_width = (area.width as usize).saturating_sub(4 + indicator_width);

    let mut spans = vec![Span::styled(" ◆ ", Style::default().fg(ACCENT_PURPLE))];
    for hint in visible_hints(available_width) {
        spans.push(Span::styled(
            hint.key,
            Style::default().fg(hint.color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(hint.desc));
    }
    spans.extend(indicators);

    let status_bar = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(ACCENT_PURPLE)),
        )
        .alignment(Alignment::Left);

    f.render_widget(status_bar, area);
}

/// Indicator spans: simulation marker, refresh interval, last fetch error
pub fn build_indicators(app: &AppState) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    if app.simulated {
        // The animation timer is dropped once there is nothing left to play
        let label = if app.has_animation_timer() {
            "[SIMULATED] "
        } else {
            "[SIMULATED:idle] "
        };
        spans.push(Span::styled(
            label,
            Style::default().fg(AMBER).add_modifier(Modifier::BOLD),
        ));
    }

    let refresh_ms = app.refresh_config.refresh_ms;
    spans.push(Span::styled("[", Style::default().fg(MIST)));
    spans.push(Span::styled(
        format!("{}ms", refresh_ms),
        Style::default()
            .fg(refresh_color(refresh_ms, DEFAULT_REFRESH_MS, app.refresh_config.recently_changed()))
            .add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled("] ", Style::default().fg(MIST)));

    if app.state.loaded && app.state.fetch_error.is_some() {
        spans.push(Span::styled(
            "[STALE] ",
            Style::default().fg(CRIMSON).add_modifier(Modifier::BOLD),
        ));
    }

    spans
}
