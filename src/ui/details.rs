// Exception and configuration tab rendering

use crate::app::AppState;
use crate::theme::{ACCENT_PURPLE, CRIMSON, LIME, MIST};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use serde_json::{Map, Value};

/// Flatten nested env options into dotted `key = value` pairs
///
/// Keys come out sorted; strings are shown without quotes, arrays and
/// scalars in their JSON form.
pub fn flatten_options(options: &Map<String, Value>) -> Vec<(String, String)> {
    let mut out = Vec::new();
    flatten_into("", options, &mut out);
    out.sort_by(|a, b| a.0.cmp(&b.0));
    out
}

fn flatten_into(prefix: &str, options: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, value) in options {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(nested) if !nested.is_empty() => flatten_into(&path, nested, out),
            Value::String(s) => out.push((path, s.clone())),
            other => out.push((path, other.to_string())),
        }
    }
}

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_PURPLE))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(ACCENT_PURPLE).add_modifier(Modifier::BOLD),
        ))
}

pub fn render_exception(f: &mut Frame, area: Rect, app: &AppState) {
    let text: Vec<Line> = match app.state.job.error_msg.as_deref() {
        Some(msg) if !msg.trim().is_empty() => msg
            .lines()
            .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(CRIMSON))))
            .collect(),
        _ => vec![Line::from(Span::styled(
            "No exception reported for this job.",
            Style::default().fg(LIME).add_modifier(Modifier::ITALIC),
        ))],
    };

    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(panel("Exception"));
    f.render_widget(paragraph, area);
}

pub fn render_configuration(f: &mut Frame, area: Rect, app: &AppState) {
    let job = &app.state.job;
    let options = flatten_options(&job.env_options);

    let jar_height = (job.plugin_jars_urls.len().max(1) as u16).saturating_add(2).min(area.height / 2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(jar_height)])
        .split(area);

    let key_width = options.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let option_items: Vec<ListItem> = if options.is_empty() {
        vec![ListItem::new(Span::styled(
            " (no environment options)",
            Style::default().fg(MIST).add_modifier(Modifier::ITALIC),
        ))]
    } else {
        options
            .into_iter()
            .map(|(key, value)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {:<width$} ", key, width = key_width), Style::default().fg(Color::White)),
                    Span::styled("= ", Style::default().fg(Color::DarkGray)),
                    Span::styled(value, Style::default().fg(MIST)),
                ]))
            })
            .collect()
    };
    f.render_widget(List::new(option_items).block(panel("Environment")), chunks[0]);

    let jar_items: Vec<ListItem> = if job.plugin_jars_urls.is_empty() {
        vec![ListItem::new(Span::styled(
            " (no plugin jars)",
            Style::default().fg(MIST).add_modifier(Modifier::ITALIC),
        ))]
    } else {
        job.plugin_jars_urls
            .iter()
            .map(|url| ListItem::new(Span::styled(format!(" {}", url), Style::default().fg(MIST))))
            .collect()
    };
    f.render_widget(List::new(jar_items).block(panel("Plugin Jars")), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_options() {
        let value = json!({
            "job.mode": "STREAMING",
            "checkpoint": {"interval": 10000, "timeout": {"ms": 60000}},
            "parallelism": 2,
            "tags": ["a", "b"],
            "empty": {}
        });
        let Value::Object(options) = value else {
            panic!("expected object");
        };

        let flat = flatten_options(&options);
        assert_eq!(
            flat,
            vec![
                ("checkpoint.interval".to_string(), "10000".to_string()),
                ("checkpoint.timeout.ms".to_string(), "60000".to_string()),
                ("empty".to_string(), "{}".to_string()),
                ("job.mode".to_string(), "STREAMING".to_string()),
                ("parallelism".to_string(), "2".to_string()),
                ("tags".to_string(), r#"["a","b"]"#.to_string()),
            ]
        );
    }

    #[test]
    fn test_flatten_empty() {
        assert!(flatten_options(&Map::new()).is_empty());
    }
}
