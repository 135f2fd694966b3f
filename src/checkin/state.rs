//! Check-in screen state machine.
//!
//! The screen is always in exactly one [`Phase`], so at most one modal is
//! visible. UI interactions and task results arrive as [`Event`]s;
//! [`ScreenState::reduce`] applies them and returns the [`Command`]s to run.

use std::time::Duration;

use tracing::{debug, warn};

use super::roster::{RefreshOutcome, RosterStore};
use crate::error::ErrorKind;
use crate::models::{Guest, RemovalResponse, Verdict};
use crate::scan::CodeMatcher;

/// How an admission lookup was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmitOrigin {
    Scan,
    Manual,
}

/// Which flow produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorOrigin {
    Roster,
    Lookup,
    Removal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckInError {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
}

impl CheckInError {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin) -> Self {
        Self { kind, origin }
    }

    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

/// Current interaction phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    /// Waiting for a QR payload.
    Scanning,
    /// Lookup and admission confirm in flight.
    Pending { guest_id: String, origin: AdmitOrigin },
    /// Verdict on screen.
    Scanned(Verdict),
    /// Verdict closed; kept visible until the dismiss delay elapses.
    Dismissing(Verdict),
    ConfirmAdmit(Guest),
    ConfirmRemove(Guest),
    /// Presence removal in flight.
    Removing(Guest),
    /// Transient acknowledgment.
    Notice(String),
    Error(CheckInError),
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Refresh,
    RosterLoaded {
        generation: u64,
        result: Result<Vec<Guest>, ErrorKind>,
    },
    StartScan,
    CodeDetected(String),
    LookupFinished(Result<Verdict, ErrorKind>),
    ScanAgain,
    Close,
    DismissElapsed,
    SelectGuest(Guest),
    Confirm,
    Cancel,
    RemovalFinished(Result<RemovalResponse, ErrorKind>),
    Acknowledge,
}

/// Side effects requested by the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchRoster { generation: u64 },
    /// Look the guest up, then record the admission.
    Admit { guest_id: String },
    RemovePresence { guest_id: String },
    /// Deliver `event` after `delay`.
    After { delay: Duration, event: Box<Event> },
}

/// Everything the check-in screen shows.
#[derive(Debug, Clone)]
pub struct ScreenState {
    pub roster: RosterStore,
    phase: Phase,
    matcher: CodeMatcher,
    dismiss_delay: Duration,
}

impl ScreenState {
    pub fn new(matcher: CodeMatcher, dismiss_delay: Duration) -> Self {
        Self {
            roster: RosterStore::default(),
            phase: Phase::Idle,
            matcher,
            dismiss_delay,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn scanning(&self) -> bool {
        matches!(self.phase, Phase::Scanning)
    }

    /// A remote admission or removal is in flight.
    pub fn pending(&self) -> bool {
        matches!(self.phase, Phase::Pending { .. } | Phase::Removing(_))
    }

    pub fn scanned(&self) -> bool {
        matches!(self.phase, Phase::Scanned(_))
    }

    /// Whether a new scan session may start.
    pub fn can_start_scan(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    /// Visible error text: the error modal's, else the last roster failure.
    pub fn error_message(&self) -> Option<&'static str> {
        match &self.phase {
            Phase::Error(err) => Some(err.message()),
            _ => self.roster.error().map(|kind| kind.message()),
        }
    }

    /// Apply one event and return the commands it triggers.
    pub fn reduce(&mut self, event: Event) -> Vec<Command> {
        debug!("event {} in phase {:?}", event_name(&event), self.phase);

        match event {
            Event::Refresh => vec![self.refresh()],

            Event::RosterLoaded { generation, result } => {
                match self.roster.finish_refresh(generation, result) {
                    RefreshOutcome::Replaced => {
                        if matches!(&self.phase, Phase::Error(e) if e.origin == ErrorOrigin::Roster) {
                            self.phase = Phase::Idle;
                        }
                    }
                    RefreshOutcome::Failed => {
                        warn!("Roster refresh failed, keeping previous list");
                        // Error wins over display-only phases; in-flight and
                        // scanning phases keep going and the roster shows the banner.
                        if matches!(
                            self.phase,
                            Phase::Idle
                                | Phase::Scanned(_)
                                | Phase::Dismissing(_)
                                | Phase::Notice(_)
                                | Phase::ConfirmAdmit(_)
                                | Phase::ConfirmRemove(_)
                        ) {
                            self.phase = Phase::Error(CheckInError::new(ErrorKind::Connection, ErrorOrigin::Roster));
                        }
                    }
                    RefreshOutcome::Stale => {}
                }
                Vec::new()
            }

            Event::StartScan => {
                if self.can_start_scan() {
                    self.phase = Phase::Scanning;
                }
                Vec::new()
            }

            Event::CodeDetected(payload) => {
                if !self.scanning() {
                    return Vec::new();
                }
                let guest_id = self.matcher.extract_guest_id(&payload);
                if guest_id.is_empty() {
                    warn!("Scanned payload does not look like an admission code");
                }
                self.begin_admit(guest_id, AdmitOrigin::Scan)
            }

            Event::LookupFinished(result) => {
                if !matches!(self.phase, Phase::Pending { .. }) {
                    debug!("Dropping late lookup result");
                    return Vec::new();
                }
                self.phase = match result {
                    Ok(verdict) => Phase::Scanned(verdict),
                    Err(kind) => Phase::Error(CheckInError::new(kind, ErrorOrigin::Lookup)),
                };
                Vec::new()
            }

            Event::ScanAgain => {
                if !self.scanned() {
                    return Vec::new();
                }
                self.phase = Phase::Scanning;
                vec![self.refresh()]
            }

            Event::Close => {
                let Phase::Scanned(verdict) = &self.phase else {
                    return Vec::new();
                };
                self.phase = Phase::Dismissing(verdict.clone());
                vec![
                    self.refresh(),
                    Command::After {
                        delay: self.dismiss_delay,
                        event: Box::new(Event::DismissElapsed),
                    },
                ]
            }

            Event::DismissElapsed => {
                if matches!(self.phase, Phase::Dismissing(_)) {
                    self.phase = Phase::Idle;
                }
                Vec::new()
            }

            Event::SelectGuest(guest) => {
                if !matches!(self.phase, Phase::Idle) {
                    return Vec::new();
                }
                self.phase = if guest.present {
                    Phase::ConfirmRemove(guest)
                } else {
                    Phase::ConfirmAdmit(guest)
                };
                Vec::new()
            }

            Event::Confirm => match std::mem::take(&mut self.phase) {
                Phase::ConfirmAdmit(guest) => self.begin_admit(guest.id, AdmitOrigin::Manual),
                Phase::ConfirmRemove(guest) => {
                    let guest_id = guest.id.clone();
                    self.phase = Phase::Removing(guest);
                    vec![Command::RemovePresence { guest_id }]
                }
                other => {
                    self.phase = other;
                    Vec::new()
                }
            },

            Event::Cancel => {
                if matches!(
                    self.phase,
                    Phase::Scanning | Phase::ConfirmAdmit(_) | Phase::ConfirmRemove(_)
                ) {
                    self.phase = Phase::Idle;
                }
                Vec::new()
            }

            Event::RemovalFinished(result) => {
                let Phase::Removing(guest) = &self.phase else {
                    return Vec::new();
                };
                let name = guest.full_name();
                self.phase = match result {
                    Ok(RemovalResponse { success: true, removed: true }) => {
                        Phase::Notice(format!("Presenza rimossa: {name}"))
                    }
                    Ok(RemovalResponse { success: true, removed: false }) => {
                        Phase::Notice(format!("{name} non risultava presente"))
                    }
                    Ok(RemovalResponse { success: false, .. }) => {
                        Phase::Error(CheckInError::new(ErrorKind::Rejected, ErrorOrigin::Removal))
                    }
                    Err(kind) => Phase::Error(CheckInError::new(kind, ErrorOrigin::Removal)),
                };
                vec![self.refresh()]
            }

            Event::Acknowledge => match self.phase {
                Phase::Error(_) => {
                    self.phase = Phase::Idle;
                    vec![self.refresh()]
                }
                Phase::Notice(_) => {
                    self.phase = Phase::Idle;
                    Vec::new()
                }
                _ => Vec::new(),
            },
        }
    }

    fn refresh(&mut self) -> Command {
        Command::FetchRoster {
            generation: self.roster.begin_refresh(),
        }
    }

    fn begin_admit(&mut self, guest_id: String, origin: AdmitOrigin) -> Vec<Command> {
        self.phase = Phase::Pending {
            guest_id: guest_id.clone(),
            origin,
        };
        vec![Command::Admit { guest_id }]
    }
}

fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Refresh => "Refresh",
        Event::RosterLoaded { .. } => "RosterLoaded",
        Event::StartScan => "StartScan",
        Event::CodeDetected(_) => "CodeDetected",
        Event::LookupFinished(_) => "LookupFinished",
        Event::ScanAgain => "ScanAgain",
        Event::Close => "Close",
        Event::DismissElapsed => "DismissElapsed",
        Event::SelectGuest(_) => "SelectGuest",
        Event::Confirm => "Confirm",
        Event::Cancel => "Cancel",
        Event::RemovalFinished(_) => "RemovalFinished",
        Event::Acknowledge => "Acknowledge",
    }
}
