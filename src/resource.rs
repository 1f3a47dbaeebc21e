use crate::error::FetchError;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use std::time::Duration;

/// ResourceState
///
/// The lifecycle of one asynchronously fetched data set:
/// `Idle -> Loading -> Ready | Failed`. Every page controller instantiates a
/// `Resource` per data set instead of hand-rolling loading/error flags.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(FetchError),
}

/// LoadTicket
///
/// A generation-stamped permission to complete a load. Tickets from a
/// superseded or cancelled load are rejected at completion time, which is
/// what guarantees a fetch settling after unmount mutates nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// Resource
///
/// A single-owner async data slot. The owning controller calls `begin` to
/// enter `Loading` and receives a ticket; whichever future performs the fetch
/// hands the ticket back with the outcome. Only the ticket from the latest
/// `begin` is honored, so:
/// - a newer fetch supersedes an older in-flight one (the older completion
///   is discarded),
/// - `cancel` (unmount) discards every outstanding completion.
#[derive(Debug)]
pub struct Resource<T> {
    state: ResourceState<T>,
    generation: u64,
}

impl<T> Resource<T> {
    pub fn new() -> Self {
        Self {
            state: ResourceState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &ResourceState<T> {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, ResourceState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ResourceState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match &self.state {
            ResourceState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.state {
            ResourceState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// begin
    ///
    /// Enters `Loading` and invalidates every previously issued ticket.
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = ResourceState::Loading;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// complete
    ///
    /// Applies a settled fetch outcome if (and only if) the ticket is still
    /// current. Returns whether the state was mutated; a `false` return means
    /// the load was superseded or the resource cancelled in the meantime.
    pub fn complete(&mut self, ticket: LoadTicket, outcome: Result<T, FetchError>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.state = match outcome {
            Ok(value) => ResourceState::Ready(value),
            Err(err) => ResourceState::Failed(err),
        };
        true
    }

    pub fn succeed(&mut self, ticket: LoadTicket, value: T) -> bool {
        self.complete(ticket, Ok(value))
    }

    pub fn fail(&mut self, ticket: LoadTicket, error: FetchError) -> bool {
        self.complete(ticket, Err(error))
    }

    /// cancel
    ///
    /// The unmount hook: invalidates outstanding tickets and returns to
    /// `Idle`. In-flight requests are not interrupted; their results are
    /// simply discarded when they try to complete.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.state = ResourceState::Idle;
    }
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Debouncer
///
/// Coalesces rapid input changes into at most one fetch per quiet period.
/// Each `input` supersedes the pending ticket; a superseded ticket reports
/// unsettled after its wait and the caller fires nothing. Only the pending
/// timer is cancelled this way; an already-issued request keeps flying and
/// is reconciled by the `Resource` generation check instead.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    version: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            version: Arc::new(AtomicU64::new(0)),
        }
    }

    /// input
    ///
    /// Registers a keystroke (or filter change) and returns the ticket for
    /// the quiet period it starts.
    pub fn input(&self) -> DebounceTicket {
        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        DebounceTicket {
            quiet: self.quiet,
            version,
            current: Arc::clone(&self.version),
        }
    }
}

/// DebounceTicket
///
/// One pending quiet period. `settled` waits it out and reports whether the
/// ticket is still the latest input.
#[derive(Debug)]
pub struct DebounceTicket {
    quiet: Duration,
    version: u64,
    current: Arc<AtomicU64>,
}

impl DebounceTicket {
    /// Waits the quiet period; true when no newer input superseded this one.
    pub async fn settled(self) -> bool {
        tokio::time::sleep(self.quiet).await;
        self.is_current()
    }

    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.version
    }
}
