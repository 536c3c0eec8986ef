// UI rendering module
//
// This module contains all UI rendering components for dagscope.
// The main draw() function orchestrates rendering of all UI panels.

mod dag_view;
mod details;
mod drawer;
mod header;
mod metrics_table;
mod status_bar;
mod text;

use crate::app::{AppState, Tab};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use dag_view::render_dag;
use details::{render_configuration, render_exception};
use drawer::render_drawer;
use header::{render_header, render_tabs};
use metrics_table::render_metrics_table;
use status_bar::render_status_bar;

/// Main UI drawing function
pub fn draw(f: &mut Frame, app: &AppState) {
    let size = f.area();

    // Main layout: header, tabs, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Header
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Status bar
        ])
        .split(size);

    render_header(f, chunks[0], app);
    render_tabs(f, chunks[1], app);

    match app.state.tab {
        Tab::Overview => render_overview(f, chunks[2], app),
        Tab::Exception => render_exception(f, chunks[2], app),
        Tab::Configuration => render_configuration(f, chunks[2], app),
    }

    render_status_bar(f, chunks[3], app);
}

fn render_overview(f: &mut Frame, area: Rect, app: &AppState) {
    // Body: DAG + metrics, with the drawer on the right when a vertex is focused
    let (main, drawer) = if app.state.drawer_open() {
        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area);
        (body_chunks[0], Some(body_chunks[1]))
    } else {
        (area, None)
    };

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(60), // DAG
            Constraint::Percentage(40), // Metrics
        ])
        .split(main);

    render_dag(f, left_chunks[0], app);
    render_metrics_table(f, left_chunks[1], app);

    if let Some(drawer_area) = drawer {
        render_drawer(f, drawer_area, app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppConfig;
    use crate::job::{source::JobSourceError, Job, JobSource};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    struct FixedSource(Result<Job, String>);

    impl JobSource for FixedSource {
        fn fetch_job(&self, job_id: &str) -> Result<Job, JobSourceError> {
            match &self.0 {
                Ok(job) => Ok(job.clone()),
                Err(_) => Err(JobSourceError::NotFound(job_id.to_string())),
            }
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    fn sample_job() -> Job {
        serde_json::from_str(
            r#"{
                "jobId": "42",
                "jobName": "orders_sync",
                "jobStatus": "RUNNING",
                "createTime": "2024-01-01 00:00:00",
                "errorMsg": "java.lang.RuntimeException: boom\n\tat Foo.bar",
                "envOptions": {"job.mode": "STREAMING", "checkpoint": {"interval": 5000}},
                "pluginJarsUrls": ["file:///opt/connector-kafka.jar"],
                "jobDag": {
                    "vertexInfoMap": [
                        {"vertexId": 1, "type": "source", "vertexName": "Kafka-Source", "tablePaths": ["db.orders"]},
                        {"vertexId": 2, "type": "transform", "vertexName": "Sql"},
                        {"vertexId": 3, "type": "sink", "vertexName": "Jdbc-Sink", "tablePaths": ["db.orders"]}
                    ],
                    "pipelineEdges": {"0": [
                        {"inputVertexId": "1", "targetVertexId": "2"},
                        {"inputVertexId": "2", "targetVertexId": "3"}
                    ]}
                },
                "metrics": {"TableSinkWriteCount": {"db.orders": 99}}
            }"#,
        )
        .unwrap()
    }

    fn app(result: Result<Job, String>) -> AppState {
        let mut app = AppState::new(&AppConfig::for_job("42"), Box::new(FixedSource(result)), None);
        app.activate();
        app
    }

    fn render(app: &AppState) -> Buffer {
        let backend = TestBackend::new(160, 48);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    /// Whether any rendered row contains `needle`
    fn contains(buffer: &Buffer, needle: &str) -> bool {
        let width = buffer.area.width as usize;
        let cells: Vec<&str> = buffer.content().iter().map(|c| c.symbol()).collect();
        cells.chunks(width).any(|row| row.concat().contains(needle))
    }

    #[test]
    fn test_overview_renders_job() {
        let app = app(Ok(sample_job()));
        let buffer = render(&app);

        assert!(contains(&buffer, "orders_sync"));
        assert!(contains(&buffer, "RUNNING"));
        assert!(contains(&buffer, "Job DAG"));
        assert!(contains(&buffer, "Metrics (2 vertices)"));
        assert!(contains(&buffer, "Jdbc-Sink"));
    }

    #[test]
    fn test_drawer_renders_focused_vertex() {
        let mut app = app(Ok(sample_job()));
        app.focus_cursor();
        let buffer = render(&app);

        assert!(contains(&buffer, "Vertex 1"));
        assert!(contains(&buffer, "db.orders"));
    }

    #[test]
    fn test_exception_tab() {
        let mut app = app(Ok(sample_job()));
        app.select_tab(Tab::Exception);
        let buffer = render(&app);

        assert!(contains(&buffer, "RuntimeException: boom"));
    }

    #[test]
    fn test_configuration_tab() {
        let mut app = app(Ok(sample_job()));
        app.select_tab(Tab::Configuration);
        let buffer = render(&app);

        assert!(contains(&buffer, "checkpoint.interval"));
        assert!(contains(&buffer, "connector-kafka.jar"));
    }

    #[test]
    fn test_failed_load_renders_placeholder() {
        let app = app(Err("missing".to_string()));
        let buffer = render(&app);

        assert!(contains(&buffer, "Could not load job"));
        assert!(contains(&buffer, "Waiting for job"));
    }
}
