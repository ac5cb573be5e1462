use serde::{Deserialize, Serialize};
use std::cell::RefCell;

///
/// EventState
/// Ephemeral, in-memory counters for parse and scan activity.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub(crate) struct EventState {
    pub(crate) ops: EventOps,
}

///
/// EventOps
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Parser entrypoints
    pub parse_calls: u64,
    pub parse_errors: u64,

    // Cursor scans
    pub cursor_calls: u64,
    pub records_scanned: u64,
    pub records_matched: u64,
}

impl EventOps {
    /// Share of scanned records that were accepted, if anything was scanned.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn match_ratio(&self) -> Option<f64> {
        (self.records_scanned > 0)
            .then(|| self.records_matched as f64 / self.records_scanned as f64)
    }
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub ops: EventOps,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

pub(crate) fn report() -> EventReport {
    with_state(|m| EventReport { ops: m.ops })
}

pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}
