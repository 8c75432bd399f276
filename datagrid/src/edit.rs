//! Inline cell editing as a small state machine.
//!
//! ```text
//! Idle --start--> Editing --commit--> Committing --ok--> Idle
//!   ^               |  ^                  |
//!   +----cancel-----+  +----rejected------+
//! ```
//!
//! The persister that validates and stores a value runs outside this crate. `begin_commit` hands
//! out a [`PendingCommit`] carrying a [`CommitTicket`]; the caller reports the outcome through
//! `resolve_commit` whenever it is ready, which keeps the event loop free while a write is in
//! flight.

use core::fmt;

use crate::{CellRef, CommitRejected, GridError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EditPhase {
    #[default]
    Idle,
    Editing,
    Committing,
}

impl fmt::Display for EditPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Editing => "editing",
            Self::Committing => "committing",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditEvent {
    Start,
    Commit,
    CommitSucceeded,
    CommitRejected,
    Cancel,
    Teardown,
}

/// The phase reached by applying `event` in `phase`, or `None` when the event is not legal there.
pub fn transition(phase: EditPhase, event: EditEvent) -> Option<EditPhase> {
    use EditEvent as E;
    use EditPhase as P;
    match (phase, event) {
        (P::Idle, E::Start) => Some(P::Editing),
        (P::Editing, E::Commit) => Some(P::Committing),
        (P::Committing, E::CommitSucceeded) => Some(P::Idle),
        (P::Committing, E::CommitRejected) => Some(P::Editing),
        (P::Editing, E::Cancel) => Some(P::Idle),
        (_, E::Teardown) => Some(P::Idle),
        _ => None,
    }
}

/// Identifies one commit attempt. Outcomes for any other ticket are refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommitTicket(u64);

/// A value handed to the external persister.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingCommit<K, V> {
    pub ticket: CommitTicket,
    pub cell: CellRef<K>,
    pub value: V,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommitResolution<K> {
    /// The value was stored; the transaction is closed.
    Committed(CellRef<K>),
    /// The persister refused the value; the transaction is back in `Editing`.
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EditSnapshot<K, V> {
    pub active_cell: Option<CellRef<K>>,
    pub phase: EditPhase,
    pub pending_value: Option<V>,
    pub error: Option<CommitRejected>,
    pub last_successful_cell: Option<CellRef<K>>,
}

/// The edit transaction for one grid. At most one cell is open at a time.
#[derive(Clone, Debug)]
pub struct EditTransaction<K, V> {
    phase: EditPhase,
    active: Option<CellRef<K>>,
    pending: Option<V>,
    error: Option<CommitRejected>,
    last_successful: Option<CellRef<K>>,
    next_ticket: u64,
    in_flight: Option<CommitTicket>,
}

impl<K, V> Default for EditTransaction<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> EditTransaction<K, V> {
    pub fn new() -> Self {
        Self {
            phase: EditPhase::Idle,
            active: None,
            pending: None,
            error: None,
            last_successful: None,
            next_ticket: 0,
            in_flight: None,
        }
    }

    pub fn phase(&self) -> EditPhase {
        self.phase
    }

    /// `true` while `Editing` or `Committing`.
    pub fn is_open(&self) -> bool {
        self.phase != EditPhase::Idle
    }

    pub fn active_cell(&self) -> Option<&CellRef<K>> {
        self.active.as_ref()
    }

    pub fn pending_value(&self) -> Option<&V> {
        self.pending.as_ref()
    }

    pub fn error(&self) -> Option<&CommitRejected> {
        self.error.as_ref()
    }

    pub fn last_successful_cell(&self) -> Option<&CellRef<K>> {
        self.last_successful.as_ref()
    }

    pub fn in_flight(&self) -> Option<CommitTicket> {
        self.in_flight
    }

    /// Replaces the pending value. Only legal while `Editing`.
    pub fn set_pending_value(&mut self, value: V) -> Result<(), GridError> {
        if self.phase != EditPhase::Editing {
            return Err(self.invalid("set_pending_value"));
        }
        self.pending = Some(value);
        Ok(())
    }

    /// Runs `persist` synchronously and resolves the commit with its outcome.
    pub fn commit_with(
        &mut self,
        persist: impl FnOnce(&CellRef<K>, &V) -> Result<(), CommitRejected>,
    ) -> Result<CommitResolution<K>, GridError>
    where
        K: Clone,
    {
        if self.active.is_none() || self.pending.is_none() {
            return Err(self.invalid("commit"));
        }
        let ticket = self.enter_committing("commit")?;
        let outcome = match (&self.active, &self.pending) {
            (Some(cell), Some(value)) => persist(cell, value),
            _ => Err(CommitRejected::new("nothing to commit")),
        };
        self.resolve_commit(ticket, outcome)
    }

    /// Leaves `Editing`. Returns the abandoned cell, or `None` when there was nothing to cancel.
    ///
    /// While `Committing` this is a no-op: the in-flight commit has to resolve first.
    pub fn cancel(&mut self) -> Option<CellRef<K>> {
        let Some(next) = transition(self.phase, EditEvent::Cancel) else {
            if self.phase == EditPhase::Committing {
                gdebug!("cancel ignored while a commit is in flight");
            }
            return None;
        };
        self.phase = next;
        self.pending = None;
        self.error = None;
        self.active.take()
    }

    /// Closes the transaction from any phase and invalidates an in-flight ticket.
    ///
    /// Used when the backing collection is replaced and the open cell no longer exists.
    pub fn teardown(&mut self) -> Option<CellRef<K>> {
        if self.phase == EditPhase::Idle {
            return None;
        }
        gdebug!(phase = %self.phase, "edit transaction torn down");
        self.phase = EditPhase::Idle;
        self.pending = None;
        self.error = None;
        self.in_flight = None;
        self.active.take()
    }

    fn enter_committing(&mut self, operation: &'static str) -> Result<CommitTicket, GridError> {
        let Some(next) = transition(self.phase, EditEvent::Commit) else {
            return Err(self.invalid(operation));
        };
        let ticket = CommitTicket(self.next_ticket);
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.phase = next;
        self.error = None;
        self.in_flight = Some(ticket);
        Ok(ticket)
    }

    fn invalid(&self, operation: &'static str) -> GridError {
        gwarn!(operation, phase = %self.phase, "edit operation ignored in current phase");
        GridError::InvalidState {
            operation,
            phase: self.phase,
        }
    }
}

impl<K: Clone + PartialEq, V> EditTransaction<K, V> {
    /// Opens `cell` for editing, seeded with its current value.
    ///
    /// Fails with [`GridError::ConcurrentEdit`] when a different cell is open; the open
    /// transaction is left untouched. Starting the already-open cell again is a no-op.
    pub fn start(&mut self, cell: CellRef<K>, initial_value: V) -> Result<(), GridError> {
        if let Some(active) = &self.active {
            if *active == cell {
                return Ok(());
            }
            gwarn!(phase = %self.phase, "start refused: another cell is being edited");
            return Err(GridError::ConcurrentEdit);
        }
        let Some(next) = transition(self.phase, EditEvent::Start) else {
            return Err(self.invalid("start"));
        };
        gdebug!(column = cell.column_id, "edit started");
        self.phase = next;
        self.active = Some(cell);
        self.pending = Some(initial_value);
        self.error = None;
        Ok(())
    }
}

impl<K: Clone, V> EditTransaction<K, V> {
    /// Moves to `Committing` and returns what the persister should store.
    pub fn begin_commit(&mut self) -> Result<PendingCommit<K, V>, GridError>
    where
        V: Clone,
    {
        let (Some(cell), Some(value)) = (self.active.clone(), self.pending.clone()) else {
            return Err(self.invalid("commit"));
        };
        let ticket = self.enter_committing("commit")?;
        Ok(PendingCommit {
            ticket,
            cell,
            value,
        })
    }

    /// Applies the persister's outcome for `ticket`.
    ///
    /// Success closes the transaction and records the cell as the last successful one. Rejection
    /// returns to `Editing` with the error set and the pending value preserved for a retry.
    pub fn resolve_commit(
        &mut self,
        ticket: CommitTicket,
        outcome: Result<(), CommitRejected>,
    ) -> Result<CommitResolution<K>, GridError> {
        if self.in_flight != Some(ticket) {
            gwarn!(?ticket, "stale or unknown commit ticket");
            return Err(self.invalid("resolve_commit"));
        }
        let event = match outcome {
            Ok(()) => EditEvent::CommitSucceeded,
            Err(_) => EditEvent::CommitRejected,
        };
        let Some(next) = transition(self.phase, event) else {
            return Err(self.invalid("resolve_commit"));
        };
        self.in_flight = None;
        self.phase = next;
        match outcome {
            Ok(()) => {
                self.pending = None;
                self.error = None;
                self.last_successful = self.active.take();
                gdebug!("commit succeeded");
                match &self.last_successful {
                    Some(cell) => Ok(CommitResolution::Committed(cell.clone())),
                    None => Err(self.invalid("resolve_commit")),
                }
            }
            Err(rejected) => {
                gdebug!(error = %rejected, "commit rejected");
                self.error = Some(rejected);
                Ok(CommitResolution::Rejected)
            }
        }
    }
}

impl<K: Clone, V: Clone> EditTransaction<K, V> {
    pub fn snapshot(&self) -> EditSnapshot<K, V> {
        EditSnapshot {
            active_cell: self.active.clone(),
            phase: self.phase,
            pending_value: self.pending.clone(),
            error: self.error.clone(),
            last_successful_cell: self.last_successful.clone(),
        }
    }
}
