// Job detail state and its update function
//
// All presenter state lives in one `DetailState` value. Changes go through
// `reduce`, which takes the current state and an `Action` and returns the
// next state; the views only ever read the current value.

use crate::job::{Job, JobStatus};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use tracing::{debug, info};

/// Drawer focus value meaning "nothing selected"
pub const NO_FOCUS: i64 = 0;

/// Tabs of the job detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Exception,
    Configuration,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Overview, Tab::Exception, Tab::Configuration];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Exception => "Exception",
            Tab::Configuration => "Configuration",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Overview => 0,
            Tab::Exception => 1,
            Tab::Configuration => 2,
        }
    }

    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetailState {
    /// Latest job snapshot (`Job::default()` until a fetch succeeds)
    pub job: Job,
    /// Whether any fetch has succeeded
    pub loaded: bool,
    /// Message of the most recent failed fetch, cleared on success
    pub fetch_error: Option<String>,
    pub tab: Tab,
    /// Vertex shown in the drawer, NO_FOCUS when closed
    pub focus: i64,
    /// Vertex under the graph cursor
    pub cursor: Option<i64>,
    /// Displayed job duration in whole seconds
    pub duration_secs: Option<i64>,
}

impl DetailState {
    pub fn drawer_open(&self) -> bool {
        self.focus != NO_FOCUS
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A fetch returned a job snapshot at wall-clock time `at`
    JobLoaded { job: Job, at: DateTime<Local> },
    /// A fetch failed
    FetchFailed(String),
    /// The elapsed-time timer fired
    ElapsedTick(DateTime<Local>),
    SelectTab(Tab),
    NextTab,
    /// Move the graph cursor onto a vertex
    SetCursor(i64),
    /// Open the drawer for a vertex (NO_FOCUS closes it)
    FocusVertex(i64),
    ClearFocus,
}

/// Compute the next state
pub fn reduce(state: DetailState, action: Action) -> DetailState {
    match action {
        Action::JobLoaded { job, at } => {
            info!(
                job_id = %job.job_id,
                status = job.job_status.as_str(),
                vertices = job.vertices().len(),
                "Job snapshot loaded"
            );
            let duration_secs = job_duration(&job, at);
            // Keep focus/cursor only if the vertex still exists
            let focus = if job.vertex(state.focus).is_some() { state.focus } else { NO_FOCUS };
            let cursor = state.cursor.filter(|id| job.vertex(*id).is_some());

            DetailState {
                job,
                loaded: true,
                fetch_error: None,
                focus,
                cursor,
                duration_secs,
                ..state
            }
        }
        Action::FetchFailed(message) => DetailState {
            fetch_error: Some(message),
            ..state
        },
        Action::ElapsedTick(now) => {
            if !state.job.job_status.is_running() {
                return state;
            }
            let duration_secs = elapsed_secs(state.job.create_time.as_deref(), now);
            DetailState {
                duration_secs,
                ..state
            }
        }
        Action::SelectTab(tab) => DetailState { tab, ..state },
        Action::NextTab => {
            let tab = state.tab.next();
            DetailState { tab, ..state }
        }
        Action::SetCursor(vertex_id) => DetailState {
            cursor: Some(vertex_id),
            ..state
        },
        Action::FocusVertex(vertex_id) => {
            debug!(vertex_id, "Drawer focus");
            DetailState {
                focus: vertex_id,
                ..state
            }
        }
        Action::ClearFocus => DetailState {
            focus: NO_FOCUS,
            ..state
        },
    }
}

/// Duration to display for a freshly loaded job
///
/// Running jobs count up from the create time; other jobs show the span
/// between create and finish time when both are known.
fn job_duration(job: &Job, at: DateTime<Local>) -> Option<i64> {
    let created = job.create_time.as_deref();
    match job.job_status {
        JobStatus::Running => elapsed_secs(created, at),
        _ => {
            let finished = parse_timestamp(job.finish_time.as_deref()?)?;
            elapsed_secs(created, finished)
        }
    }
}

/// Whole seconds between a create-time string and `now` (never negative)
pub fn elapsed_secs(create_time: Option<&str>, now: DateTime<Local>) -> Option<i64> {
    let created = parse_timestamp(create_time?)?;
    Some(now.signed_duration_since(created).num_seconds().max(0))
}

/// Parse a job timestamp
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` in local time, or epoch
/// milliseconds.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Local));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Local.from_local_datetime(&naive).earliest();
    }
    let millis = raw.parse::<i64>().ok()?;
    DateTime::from_timestamp_millis(millis).map(|ts| ts.with_timezone(&Local))
}

/// Format seconds as `1d 2h 3m 4s`, dropping leading zero units
pub fn format_duration(total_secs: i64) -> String {
    let total = total_secs.max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
