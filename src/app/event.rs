// Keyboard event handling
//
// Maps key presses onto presenter operations.

use super::{AppState, CursorMove, Tab};
use crossterm::event::KeyCode;

/// Handle keyboard events and update application state
///
/// Returns `true` if the application should continue running,
/// `false` if it should exit.
///
/// # Key Bindings
/// - `q`, `Q` - Quit the application
/// - `Esc` - Close the drawer, or quit when it is already closed
/// - Arrow keys - Move the graph cursor
/// - `Enter` - Open the drawer for the vertex under the cursor
/// - `Tab` - Next tab; `1`/`2`/`3` select Overview/Exception/Configuration
/// - `r`, `R` - Re-fetch the job now
/// - `+`, `=` - Slower refresh; `-`, `_` - Faster refresh
pub fn handle_key_event(app: &mut AppState, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.running = false;
            false
        }
        KeyCode::Esc => {
            if app.state.drawer_open() {
                app.clear_focus();
                true
            } else {
                app.running = false;
                false
            }
        }
        KeyCode::Left => {
            app.move_cursor(CursorMove::Left);
            true
        }
        KeyCode::Right => {
            app.move_cursor(CursorMove::Right);
            true
        }
        KeyCode::Up => {
            app.move_cursor(CursorMove::Up);
            true
        }
        KeyCode::Down => {
            app.move_cursor(CursorMove::Down);
            true
        }
        KeyCode::Enter => {
            app.focus_cursor();
            true
        }
        KeyCode::Tab => {
            app.next_tab();
            true
        }
        KeyCode::Char('1') => {
            app.select_tab(Tab::Overview);
            true
        }
        KeyCode::Char('2') => {
            app.select_tab(Tab::Exception);
            true
        }
        KeyCode::Char('3') => {
            app.select_tab(Tab::Configuration);
            true
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.fetch_job();
            true
        }
        // + = slower refresh (increase interval)
        // - = faster refresh (decrease interval)
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.decrease_refresh_rate();
            true
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            app.increase_refresh_rate();
            true
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{state::NO_FOCUS, AppConfig};
    use crate::job::{source::JobSourceError, Job, JobSource};

    struct FixedSource(Job);

    impl JobSource for FixedSource {
        fn fetch_job(&self, _job_id: &str) -> Result<Job, JobSourceError> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    fn app() -> AppState {
        let job: Job = serde_json::from_str(
            r#"{
                "jobId": "1",
                "jobStatus": "FINISHED",
                "jobDag": {
                    "vertexInfoMap": [
                        {"vertexId": 1, "type": "source", "vertexName": "src"},
                        {"vertexId": 2, "type": "sink", "vertexName": "out"}
                    ],
                    "pipelineEdges": {"0": [{"inputVertexId": "1", "targetVertexId": "2"}]}
                }
            }"#,
        )
        .unwrap();
        let mut app = AppState::new(&AppConfig::for_job("1"), Box::new(FixedSource(job)), None);
        app.activate();
        app
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();

        assert!(app.running);
        let result = handle_key_event(&mut app, KeyCode::Char('q'));
        assert!(!result);
        assert!(!app.running);

        app.running = true;
        let result = handle_key_event(&mut app, KeyCode::Char('Q'));
        assert!(!result);
        assert!(!app.running);
    }

    #[test]
    fn test_esc_closes_drawer_before_quitting() {
        let mut app = app();

        handle_key_event(&mut app, KeyCode::Enter);
        assert_eq!(app.state.focus, 1);

        assert!(handle_key_event(&mut app, KeyCode::Esc));
        assert_eq!(app.state.focus, NO_FOCUS);
        assert!(app.running);

        assert!(!handle_key_event(&mut app, KeyCode::Esc));
        assert!(!app.running);
    }

    #[test]
    fn test_arrow_keys_move_cursor() {
        let mut app = app();

        handle_key_event(&mut app, KeyCode::Right);
        assert_eq!(app.state.cursor, Some(1));
        handle_key_event(&mut app, KeyCode::Right);
        assert_eq!(app.state.cursor, Some(2));
        handle_key_event(&mut app, KeyCode::Left);
        assert_eq!(app.state.cursor, Some(1));

        handle_key_event(&mut app, KeyCode::Right);
        handle_key_event(&mut app, KeyCode::Enter);
        assert_eq!(app.state.focus, 2);
    }

    #[test]
    fn test_tab_keys() {
        let mut app = app();

        handle_key_event(&mut app, KeyCode::Tab);
        assert_eq!(app.state.tab, Tab::Exception);
        handle_key_event(&mut app, KeyCode::Char('3'));
        assert_eq!(app.state.tab, Tab::Configuration);
        handle_key_event(&mut app, KeyCode::Char('1'));
        assert_eq!(app.state.tab, Tab::Overview);
    }

    #[test]
    fn test_refresh_rate_controls() {
        let mut app = app();
        let initial_rate = app.refresh_config.refresh_ms;

        handle_key_event(&mut app, KeyCode::Char('-'));
        assert!(app.refresh_config.refresh_ms < initial_rate);

        handle_key_event(&mut app, KeyCode::Char('+'));
        assert_eq!(app.refresh_config.refresh_ms, initial_rate);
    }

    #[test]
    fn test_manual_refetch_keeps_state() {
        let mut app = app();
        handle_key_event(&mut app, KeyCode::Char('r'));
        assert!(app.state.loaded);
        assert_eq!(app.scene.nodes.len(), 2);
    }
}
