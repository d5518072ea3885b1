//! Roster view with one Start/Stop pair per student

use std::fmt::{self, Write as _};

use tokio::task::JoinSet;
use tracing::{info, warn};

use super::{client::LogSink, clock::Clock, format::ClockZone};
use crate::{models::LogEntry, state::{TimerBoard, TimerState}};

/// Result of one user action on the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Selected(String),
    Started(String),
    AlreadyRunning(String),
    Stopped(LogEntry),
    NotRunning(String),
    /// Timestamps could not be rendered, the interval was dropped
    Discarded(String),
    NoSelection,
    UnknownStudent(String),
}

impl fmt::Display for ViewEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewEvent::Selected(name) => write!(f, "Selected Student: {}", name),
            ViewEvent::Started(name) => write!(f, "Timing {}...", name),
            ViewEvent::AlreadyRunning(name) => write!(f, "{} is already being timed", name),
            ViewEvent::Stopped(entry) => write!(
                f,
                "{}: {} {} - {}",
                entry.student(),
                entry.date(),
                entry.start_time(),
                entry.end_time()
            ),
            ViewEvent::NotRunning(name) => write!(f, "{} is not being timed", name),
            ViewEvent::Discarded(name) => write!(f, "Could not record interval for {}", name),
            ViewEvent::NoSelection => write!(f, "Please select a student first."),
            ViewEvent::UnknownStudent(name) => write!(f, "No student named {}", name),
        }
    }
}

/// Client-side state: the roster, the current selection and the timers
pub struct TrackerView<C, S> {
    roster: Vec<String>,
    selected: Option<String>,
    timers: TimerBoard,
    clock: C,
    sink: S,
    zone: ClockZone,
    /// Log requests still in flight
    pending: JoinSet<()>,
}

impl<C: Clock, S: LogSink> TrackerView<C, S> {
    pub fn new(clock: C, sink: S, zone: ClockZone) -> Self {
        Self {
            roster: Vec::new(),
            selected: None,
            timers: TimerBoard::new(),
            clock,
            sink,
            zone,
            pending: JoinSet::new(),
        }
    }

    /// Replace the roster. Running timers are kept; a selection that is no
    /// longer on the roster is dropped.
    pub fn set_roster(&mut self, students: Vec<String>) {
        self.roster = students;
        if let Some(selected) = &self.selected {
            if !self.roster.contains(selected) {
                self.selected = None;
            }
        }
    }

    /// Students with a running timer, in roster order
    pub fn running(&self) -> Vec<&str> {
        self.roster
            .iter()
            .map(String::as_str)
            .filter(|name| self.timers.is_running(name))
            .collect()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn timer(&self, student: &str) -> TimerState {
        self.timers.get(student)
    }

    /// Resolve a roster name, or a 1-based row number when no name matches
    pub fn lookup(&self, token: &str) -> Option<&str> {
        if let Some(name) = self.roster.iter().find(|name| name.as_str() == token) {
            return Some(name.as_str());
        }
        let row: usize = token.parse().ok()?;
        self.roster.get(row.checked_sub(1)?).map(String::as_str)
    }

    fn resolve(&self, token: Option<&str>) -> Result<String, ViewEvent> {
        match token {
            Some(token) => self
                .lookup(token)
                .map(str::to_string)
                .ok_or_else(|| ViewEvent::UnknownStudent(token.to_string())),
            None => self.selected.clone().ok_or(ViewEvent::NoSelection),
        }
    }

    pub fn select(&mut self, token: &str) -> ViewEvent {
        match self.resolve(Some(token)) {
            Ok(name) => {
                self.selected = Some(name.clone());
                ViewEvent::Selected(name)
            }
            Err(event) => event,
        }
    }

    /// Start timing `token` (or the selected student). No network call.
    pub fn start(&mut self, token: Option<&str>) -> ViewEvent {
        let name = match self.resolve(token) {
            Ok(name) => name,
            Err(event) => return event,
        };
        if self.timers.start(&name, self.clock.now_millis()) {
            ViewEvent::Started(name)
        } else {
            ViewEvent::AlreadyRunning(name)
        }
    }

    /// Stop timing `token` (or the selected student) and send the interval.
    ///
    /// Returns as soon as the timer is cleared. The request runs on a
    /// spawned task, so a second stop while it is in flight is a no-op and
    /// a slow server never holds up the other students. A failed send is
    /// only logged. Must be called inside a tokio runtime.
    pub fn stop(&mut self, token: Option<&str>) -> ViewEvent {
        let name = match self.resolve(token) {
            Ok(name) => name,
            Err(event) => return event,
        };
        let Some(started_at) = self.timers.stop(&name) else {
            return ViewEvent::NotRunning(name);
        };
        let ended_at = self.clock.now_millis();

        let Some(entry) = self.zone.log_entry(&name, started_at, ended_at) else {
            warn!("Dropping interval for {}: timestamps out of range", name);
            return ViewEvent::Discarded(name);
        };

        while self.pending.try_join_next().is_some() {}
        let send = self.sink.submit(entry.clone());
        self.pending.spawn(async move {
            match send.await {
                Ok(()) => info!("Logged interval for {}", name),
                Err(e) => warn!("Failed to log behavior for {}: {}", name, e),
            }
        });
        ViewEvent::Stopped(entry)
    }

    /// Number of log requests not yet finished
    pub fn pending_logs(&mut self) -> usize {
        while self.pending.try_join_next().is_some() {}
        self.pending.len()
    }

    /// Wait for every in-flight log request
    pub async fn flush(&mut self) {
        while self.pending.join_next().await.is_some() {}
    }

    /// Plain-text rendering of the roster and timers
    pub fn render(&self) -> String {
        let mut out = String::from("Behavior Tracker\n");
        if self.roster.is_empty() {
            out.push_str("Loading students...\n");
            return out;
        }

        out.push_str("Select a student:\n");
        for (row, name) in self.roster.iter().enumerate() {
            let marker = if self.selected.as_deref() == Some(name.as_str()) {
                '>'
            } else {
                ' '
            };
            let _ = write!(out, "{} {:>2}. {}", marker, row + 1, name);
            if let Some(started_at) = self.timers.get(name).started_at_epoch_millis() {
                match self.zone.format_time(started_at) {
                    Some(time) => {
                        let _ = write!(out, "  [Timing in progress since {}]", time);
                    }
                    None => out.push_str("  [Timing in progress]"),
                }
            }
            out.push('\n');
        }
        if let Some(selected) = &self.selected {
            let _ = writeln!(out, "Selected Student: {}", selected);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use futures::future::{self, BoxFuture};
    use std::sync::{
        atomic::{AtomicI64, Ordering},
        Arc, Mutex,
    };

    #[derive(Clone, Default)]
    struct StepClock(Arc<AtomicI64>);

    impl Clock for StepClock {
        fn now_millis(&self) -> i64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    #[derive(Clone, Default)]
    struct Recorder {
        sent: Arc<Mutex<Vec<LogEntry>>>,
        failing: bool,
    }

    impl LogSink for Recorder {
        fn submit(&self, entry: LogEntry) -> BoxFuture<'static, Result<(), ClientError>> {
            self.sent.lock().unwrap().push(entry);
            let result = if self.failing {
                Err(ClientError::Status {
                    status: 500,
                    message: "Failed to log data".into(),
                })
            } else {
                Ok(())
            };
            Box::pin(future::ready(result))
        }
    }

    /// Server that never answers
    struct Unresponsive;

    impl LogSink for Unresponsive {
        fn submit(&self, _entry: LogEntry) -> BoxFuture<'static, Result<(), ClientError>> {
            Box::pin(future::pending())
        }
    }

    fn view(sink: Recorder) -> (TrackerView<StepClock, Recorder>, StepClock) {
        let clock = StepClock::default();
        let mut view = TrackerView::new(clock.clone(), sink, ClockZone::Utc);
        view.set_roster(vec!["Alice".into(), "Bob".into()]);
        (view, clock)
    }

    #[test]
    fn start_without_selection_asks_for_one() {
        let (mut view, _) = view(Recorder::default());
        assert_eq!(view.start(None), ViewEvent::NoSelection);
    }

    #[test]
    fn rows_can_be_addressed_by_number() {
        let (mut view, _) = view(Recorder::default());
        assert_eq!(view.select("2"), ViewEvent::Selected("Bob".into()));
        assert_eq!(view.select("3"), ViewEvent::UnknownStudent("3".into()));
        assert_eq!(view.select("0"), ViewEvent::UnknownStudent("0".into()));
    }

    #[test]
    fn start_twice_keeps_first_timestamp() {
        let (mut view, clock) = view(Recorder::default());
        clock.0.store(1_000, Ordering::SeqCst);
        assert_eq!(view.start(Some("Alice")), ViewEvent::Started("Alice".into()));
        clock.0.store(2_000, Ordering::SeqCst);
        assert_eq!(view.start(Some("Alice")), ViewEvent::AlreadyRunning("Alice".into()));
        assert_eq!(view.timer("Alice").started_at_epoch_millis(), Some(1_000));
    }

    #[tokio::test]
    async fn stop_when_idle_sends_nothing() {
        let sink = Recorder::default();
        let (mut view, _) = view(sink.clone());

        assert_eq!(view.stop(Some("Bob")), ViewEvent::NotRunning("Bob".into()));
        assert!(sink.sent.lock().unwrap().is_empty());
        assert_eq!(view.pending_logs(), 0);
    }

    #[tokio::test]
    async fn stop_returns_while_the_server_hangs() {
        let clock = StepClock::default();
        let mut view = TrackerView::new(clock.clone(), Unresponsive, ClockZone::Utc);
        view.set_roster(vec!["Alice".into(), "Bob".into()]);

        view.start(Some("Alice"));
        clock.0.store(60_000, Ordering::SeqCst);
        assert!(matches!(view.stop(Some("Alice")), ViewEvent::Stopped(_)));

        assert_eq!(view.start(Some("Bob")), ViewEvent::Started("Bob".into()));
        assert!(matches!(view.stop(Some("Bob")), ViewEvent::Stopped(_)));
        assert_eq!(view.pending_logs(), 2);
        assert!(view.running().is_empty());
    }

    #[tokio::test]
    async fn flush_waits_for_sent_intervals() {
        let sink = Recorder::default();
        let (mut view, _) = view(sink.clone());

        view.start(Some("Bob"));
        view.stop(Some("Bob"));
        view.flush().await;

        assert_eq!(view.pending_logs(), 0);
        assert_eq!(sink.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_send_still_returns_to_idle() {
        let sink = Recorder {
            failing: true,
            ..Recorder::default()
        };
        let (mut view, _) = view(sink.clone());

        view.start(Some("Alice"));
        assert!(matches!(view.stop(Some("Alice")), ViewEvent::Stopped(_)));

        assert_eq!(view.timer("Alice"), TimerState::idle());
        assert_eq!(sink.sent.lock().unwrap().len(), 1);
        assert_eq!(view.stop(Some("Alice")), ViewEvent::NotRunning("Alice".into()));
        assert_eq!(sink.sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn reloading_roster_drops_missing_selection_but_keeps_timers() {
        let (mut view, _) = view(Recorder::default());
        view.select("Bob");
        view.start(Some("Alice"));

        view.set_roster(vec!["Alice".into()]);

        assert_eq!(view.selected(), None);
        assert_eq!(view.running(), vec!["Alice"]);
    }

    #[test]
    fn render_shows_loading_for_empty_roster() {
        let mut view = TrackerView::new(StepClock::default(), Recorder::default(), ClockZone::Utc);
        view.set_roster(Vec::new());
        assert!(view.render().contains("Loading students..."));
    }

    #[test]
    fn render_marks_selection_and_running_rows() {
        let (mut view, clock) = view(Recorder::default());
        // 2024-03-01 11:30 UTC
        clock.0.store(1_709_292_600_000, Ordering::SeqCst);
        view.select("Alice");
        view.start(None);

        let text = view.render();
        assert!(text.contains(">  1. Alice  [Timing in progress since 11:30AM]"));
        assert!(text.contains("   2. Bob\n"));
        assert!(text.contains("Selected Student: Alice"));
    }
}
