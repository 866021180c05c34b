//! Data source seam and last-request-wins bookkeeping

use crate::error::AnalyticsResult;
use crate::request::FetchRequest;
use alumni_core::{EntityKind, EntityListItem, ResultPage};
use async_trait::async_trait;

/// Anything that can answer a fetch request for an entity kind
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    /// Fetch one page of `kind` rows
    async fn fetch_page(
        &self,
        kind: EntityKind,
        request: &FetchRequest,
    ) -> AnalyticsResult<ResultPage<EntityListItem>>;

    /// Source name for logs
    fn name(&self) -> &str;
}

/// Handle for a fetch that has been started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    request: FetchRequest,
    sequence: u64,
}

impl FetchTicket {
    /// Request this ticket was issued for
    #[must_use]
    pub const fn request(&self) -> &FetchRequest {
        &self.request
    }

    /// Monotonic issue number
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Decides which completed fetches may update the visible state
///
/// A response is applied only when its request still equals the request the
/// dashboard would issue now, and nothing newer has been applied. Fetches are
/// never cancelled; stale ones are simply dropped on arrival.
#[derive(Debug, Default)]
pub struct RequestTracker {
    issued: u64,
    applied: u64,
    in_flight: usize,
}

impl RequestTracker {
    /// New tracker with nothing issued
    #[must_use]
    pub const fn new() -> Self {
        Self {
            issued: 0,
            applied: 0,
            in_flight: 0,
        }
    }

    /// Issue a ticket for `request`
    pub fn begin(&mut self, request: FetchRequest) -> FetchTicket {
        self.issued += 1;
        self.in_flight += 1;
        FetchTicket {
            request,
            sequence: self.issued,
        }
    }

    /// Settle `ticket`; true when its response should be applied
    pub fn settle(&mut self, ticket: &FetchTicket, current: &FetchRequest) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        let fresh = ticket.request == *current && ticket.sequence > self.applied;
        if fresh {
            self.applied = ticket.sequence;
        }
        fresh
    }

    /// Fetches issued but not yet settled
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }
}

/// What a dashboard currently knows about its data
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Waiting for the current request
    Loading,
    /// Page for the current request
    Ready(ResultPage<EntityListItem>),
    /// The current request failed
    Failed {
        /// Error message
        message: String,
        /// Whether retrying could help
        retryable: bool,
    },
}

impl FetchState {
    /// True while the current request is outstanding
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Page, if one is loaded
    #[must_use]
    pub const fn page(&self) -> Option<&ResultPage<EntityListItem>> {
        match self {
            Self::Ready(page) => Some(page),
            _ => None,
        }
    }
}
