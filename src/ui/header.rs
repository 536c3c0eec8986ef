// Job header and tab bar rendering
//
// The header summarizes the job (name, id, status tag, create time,
// duration); the tab bar below it switches the body view.

use crate::app::{state::format_duration, AppState, Tab};
use crate::theme::{status_color, ACCENT_PURPLE, CRIMSON, MIST};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
    Frame,
};

pub fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let job = &app.state.job;

    let name = if job.job_name.is_empty() {
        "(unnamed job)".to_string()
    } else {
        job.job_name.clone()
    };
    let job_id = if job.job_id.is_empty() { &app.job_id } else { &job.job_id };
    let status = job.job_status;

    let title_line = Line::from(vec![
        Span::styled(
            format!(" {} ", name),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("#{} ", job_id), Style::default().fg(MIST)),
        Span::styled(
            format!(" {} ", status.as_str()),
            Style::default()
                .fg(Color::Black)
                .bg(status_color(status))
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let created = job.create_time.as_deref().unwrap_or("-");
    let duration = app
        .state
        .duration_secs
        .map(format_duration)
        .unwrap_or_else(|| "-".to_string());

    let info_line = Line::from(vec![
        Span::styled(" Created: ", Style::default().fg(Color::DarkGray)),
        Span::styled(created.to_string(), Style::default().fg(MIST)),
        Span::styled(" | Duration: ", Style::default().fg(Color::DarkGray)),
        Span::styled(duration, Style::default().fg(MIST).add_modifier(Modifier::BOLD)),
        Span::styled(
            if app.has_elapsed_timer() { " (live)" } else { "" },
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(" | Vertices: ", Style::default().fg(Color::DarkGray)),
        Span::styled(job.vertices().len().to_string(), Style::default().fg(MIST)),
        Span::styled(" | Edges: ", Style::default().fg(Color::DarkGray)),
        Span::styled(job.edges().edge_count().to_string(), Style::default().fg(MIST)),
    ]);

    let load_line = if app.state.loaded {
        Line::from(Span::styled(
            format!(" Source: {}", app.source_label()),
            Style::default().fg(Color::DarkGray),
        ))
    } else if let Some(ref err) = app.state.fetch_error {
        Line::from(Span::styled(
            format!(" Could not load job: {}", err),
            Style::default().fg(CRIMSON),
        ))
    } else {
        Line::from(Span::styled(
            " Loading job...",
            Style::default().fg(MIST).add_modifier(Modifier::ITALIC),
        ))
    };

    let header = Paragraph::new(vec![title_line, info_line, load_line])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(ACCENT_PURPLE))
                .title(Span::styled(
                    " dagscope ",
                    Style::default().fg(ACCENT_PURPLE).add_modifier(Modifier::BOLD),
                )),
        )
        .alignment(Alignment::Left);

    f.render_widget(header, area);
}

pub fn render_tabs(f: &mut Frame, area: Rect, app: &AppState) {
    let titles = Tab::ALL
        .iter()
        .enumerate()
        .map(|(idx, tab)| format!("{} {}", idx + 1, tab.title()));

    let tabs = Tabs::new(titles)
        .select(app.state.tab.index())
        .style(Style::default().fg(MIST))
        .highlight_style(
            Style::default()
                .fg(ACCENT_PURPLE)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(Span::styled("│", Style::default().fg(Color::DarkGray)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT_PURPLE)),
        );

    f.render_widget(tabs, area);
}
