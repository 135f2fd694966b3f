//! Guest roster split into "not present" and "present" sections.

use chrono::{DateTime, Local};

use crate::error::ErrorKind;
use crate::models::Guest;

pub const NOT_PRESENT_TITLE: &str = "Non presenti";
pub const PRESENT_TITLE: &str = "Presenti";

/// The guest list as last fetched, partitioned by presence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    not_present: Vec<Guest>,
    present: Vec<Guest>,
}

impl Roster {
    /// Split guests by their present flag, keeping the service's order within each section.
    pub fn partition(guests: Vec<Guest>) -> Self {
        let (present, not_present) = guests.into_iter().partition(|g| g.present);
        Self { not_present, present }
    }

    pub fn not_present(&self) -> &[Guest] {
        &self.not_present
    }

    pub fn present(&self) -> &[Guest] {
        &self.present
    }

    /// Sections in display order.
    pub fn sections(&self) -> [(&'static str, &[Guest]); 2] {
        [(NOT_PRESENT_TITLE, &self.not_present), (PRESENT_TITLE, &self.present)]
    }

    pub fn len(&self) -> usize {
        self.not_present.len() + self.present.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of present guests who are marked as paid.
    pub fn paid_present(&self) -> usize {
        self.present.iter().filter(|g| g.paid).count()
    }
}

/// What a finished fetch did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Replaced,
    Failed,
    /// A newer fetch was started after this one; its result was dropped.
    Stale,
}

/// Roster plus refresh bookkeeping.
///
/// Every fetch gets a generation number. Only the newest generation may
/// replace the list, so overlapping refreshes cannot roll it back.
#[derive(Debug, Clone, Default)]
pub struct RosterStore {
    roster: Roster,
    refreshing: bool,
    generation: u64,
    last_refresh: Option<DateTime<Local>>,
    error: Option<ErrorKind>,
}

impl RosterStore {
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn last_refresh(&self) -> Option<DateTime<Local>> {
        self.last_refresh
    }

    /// Failure of the most recent completed fetch, if it failed.
    pub fn error(&self) -> Option<ErrorKind> {
        self.error
    }

    /// Start a fetch and return its generation.
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.refreshing = true;
        self.generation
    }

    /// Apply the result of fetch `generation`.
    ///
    /// On failure the previous list is kept as is.
    pub fn finish_refresh(&mut self, generation: u64, result: Result<Vec<Guest>, ErrorKind>) -> RefreshOutcome {
        if generation != self.generation {
            return RefreshOutcome::Stale;
        }
        self.refreshing = false;

        match result {
            Ok(guests) => {
                self.roster = Roster::partition(guests);
                self.last_refresh = Some(Local::now());
                self.error = None;
                RefreshOutcome::Replaced
            }
            Err(kind) => {
                self.error = Some(kind);
                RefreshOutcome::Failed
            }
        }
    }
}
