// Application state management
//
// `AppState` is the job detail presenter: it owns the job source, the
// derived DAG scene, the scoped timers and the current `DetailState`.
// Every state change is dispatched through `state::reduce`.

pub mod animator;
pub mod config;
pub mod event;
pub mod state;
pub mod timer;

pub use animator::{AnimatorTick, StatusAnimator};
pub use config::{AppConfig, RefreshConfig};
pub use state::{Action, DetailState, Tab};

use crate::dag::{build_job_scene, Scene, SceneNode};
use crate::job::JobSource;
use crate::metrics::{metrics_rows, VertexMetricsRow};
use chrono::{DateTime, Local};
use config::{ELAPSED_TICK, PULSE_STEP, PULSE_TICK, STATUS_ANIMATION_TICK};
use std::time::{Duration, Instant};
use timer::IntervalTimer;
use tracing::{info, warn};

/// Cursor movement over the graph grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Up,
    Down,
}

/// Main application state
pub struct AppState {
    /// Whether the application is running
    pub running: bool,

    /// Id of the displayed job
    pub job_id: String,

    /// Presenter state, replaced wholesale by `dispatch`
    pub state: DetailState,

    /// Drawable DAG, rebuilt for every loaded job
    pub scene: Scene,

    /// Pulse phase for running-edge animation (0.0 ~ 1.0)
    pub pulse_phase: f32,

    /// Refresh interval configuration
    pub refresh_config: RefreshConfig,

    /// Whether vertex statuses come from the demo animator
    pub simulated: bool,

    source: Box<dyn JobSource>,
    animator: Option<StatusAnimator>,
    poll_interval: Option<Duration>,

    last_pulse: Instant,
    elapsed_timer: Option<IntervalTimer>,
    animation_timer: Option<IntervalTimer>,
    poll_timer: Option<IntervalTimer>,
}

impl AppState {
    /// Create the presenter; nothing is fetched until `activate`
    pub fn new(config: &AppConfig, source: Box<dyn JobSource>, animator: Option<StatusAnimator>) -> Self {
        Self {
            running: true,
            job_id: config.job_id.clone(),
            state: DetailState::default(),
            scene: Scene::default(),
            pulse_phase: 0.0,
            refresh_config: RefreshConfig::new(config.refresh_ms),
            simulated: animator.is_some(),
            source,
            animator,
            poll_interval: config.poll_interval,
            last_pulse: Instant::now(),
            elapsed_timer: None,
            animation_timer: None,
            poll_timer: None,
        }
    }

    /// Fetch the job and acquire the view's timers
    pub fn activate(&mut self) {
        let now = Instant::now();
        self.last_pulse = now;
        self.fetch_job();

        if self.animator.is_some() {
            self.animation_timer = Some(IntervalTimer::start("status-animation", STATUS_ANIMATION_TICK, now));
        }
        if let Some(interval) = self.poll_interval {
            self.poll_timer = Some(IntervalTimer::start("job-poll", interval, now));
        }
    }

    /// Release every timer owned by the view
    pub fn teardown(&mut self) {
        self.elapsed_timer = None;
        self.animation_timer = None;
        self.poll_timer = None;
    }

    pub fn has_elapsed_timer(&self) -> bool {
        self.elapsed_timer.is_some()
    }

    pub fn has_animation_timer(&self) -> bool {
        self.animation_timer.is_some()
    }

    pub fn source_label(&self) -> String {
        self.source.describe()
    }

    /// Apply an action to the presenter state
    pub fn dispatch(&mut self, action: Action) {
        let current = std::mem::take(&mut self.state);
        self.state = state::reduce(current, action);
    }

    /// Fetch the job snapshot and rebuild the scene on success
    pub fn fetch_job(&mut self) {
        match self.source.fetch_job(&self.job_id) {
            Ok(job) => {
                self.scene = build_job_scene(&job);
                let running = job.job_status.is_running();
                self.dispatch(Action::JobLoaded { job, at: Local::now() });

                // The elapsed timer starts only for running jobs and is kept
                // until teardown even if a later snapshot reports otherwise
                if running && self.elapsed_timer.is_none() {
                    self.elapsed_timer = Some(IntervalTimer::start("elapsed", ELAPSED_TICK, Instant::now()));
                }
            }
            Err(e) => {
                warn!(job_id = %self.job_id, error = %e, "Failed to fetch job");
                self.dispatch(Action::FetchFailed(e.to_string()));
            }
        }
    }

    /// Update state on each loop iteration
    pub fn on_tick(&mut self) {
        self.on_tick_at(Instant::now(), Local::now());
    }

    /// Tick with explicit clocks: `now` drives timers, `wall` the duration
    pub fn on_tick_at(&mut self, now: Instant, wall: DateTime<Local>) {
        if now.saturating_duration_since(self.last_pulse) >= PULSE_TICK {
            self.last_pulse = now;
            self.pulse_phase += PULSE_STEP;
            if self.pulse_phase >= 1.0 {
                self.pulse_phase = 0.0;
            }
        }

        if self.elapsed_timer.as_mut().is_some_and(|t| t.poll(now)) {
            self.dispatch(Action::ElapsedTick(wall));
        }

        if self.animation_timer.as_mut().is_some_and(|t| t.poll(now)) {
            self.run_animation_tick();
        }

        if self.poll_timer.as_mut().is_some_and(|t| t.poll(now)) {
            self.fetch_job();
        }
    }

    fn run_animation_tick(&mut self) {
        let Some(animator) = self.animator.as_ref() else {
            self.animation_timer = None;
            return;
        };

        if animator.tick(&mut self.scene, &mut rand::rng()) == AnimatorTick::Finished {
            info!("Status animation finished");
            self.animation_timer = None;
        }
    }

    /// Metrics table rows for the current job
    pub fn metrics_rows(&self) -> Vec<VertexMetricsRow> {
        metrics_rows(&self.state.job)
    }

    /// Scene node under the cursor, defaulting to the first node
    pub fn cursor_node(&self) -> Option<&SceneNode> {
        match self.state.cursor {
            Some(id) => self.scene.node_by_vertex(id).or_else(|| self.scene.nodes.first()),
            None => self.scene.nodes.first(),
        }
    }

    /// Move the graph cursor
    pub fn move_cursor(&mut self, direction: CursorMove) {
        let target = match self.state.cursor.and_then(|id| self.scene.node_by_vertex(id)) {
            Some(current) => neighbor(&self.scene, current, direction).map(|n| n.vertex_id),
            // First move just lands on the first node
            None => self.scene.nodes.first().map(|n| n.vertex_id),
        };
        if let Some(vertex_id) = target {
            self.dispatch(Action::SetCursor(vertex_id));
        }
    }

    /// Open the drawer for the node under the cursor
    pub fn focus_cursor(&mut self) {
        if let Some(vertex_id) = self.cursor_node().map(|n| n.vertex_id) {
            self.dispatch(Action::SetCursor(vertex_id));
            self.dispatch(Action::FocusVertex(vertex_id));
        }
    }

    pub fn clear_focus(&mut self) {
        self.dispatch(Action::ClearFocus);
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.dispatch(Action::SelectTab(tab));
    }

    pub fn next_tab(&mut self) {
        self.dispatch(Action::NextTab);
    }

    /// Increase refresh rate (decrease interval)
    pub fn increase_refresh_rate(&mut self) {
        self.refresh_config.faster();
    }

    /// Decrease refresh rate (increase interval)
    pub fn decrease_refresh_rate(&mut self) {
        self.refresh_config.slower();
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Neighbouring node in the layout grid
///
/// Left/Right stay in the row; Up/Down move one row and keep the column
/// when possible, otherwise land on the row's last node.
fn neighbor<'a>(scene: &'a Scene, current: &SceneNode, direction: CursorMove) -> Option<&'a SceneNode> {
    let in_row = |row: usize| scene.nodes.iter().filter(move |n| n.row == row);

    match direction {
        CursorMove::Left => {
            let column = current.column.checked_sub(1)?;
            in_row(current.row).find(|n| n.column == column)
        }
        CursorMove::Right => in_row(current.row).find(|n| n.column == current.column + 1),
        CursorMove::Up | CursorMove::Down => {
            let row = if direction == CursorMove::Up {
                current.row.checked_sub(1)?
            } else {
                current.row + 1
            };
            in_row(row)
                .find(|n| n.column == current.column)
                .or_else(|| in_row(row).max_by_key(|n| n.column))
        }
    }
}
