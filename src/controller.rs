//! List view controller.
//!
//! Owns the fetch lifecycle of one paginated view: `Idle -> Loading ->
//! {Success, Failure}`, re-entering `Loading` on every page or resource
//! change. Completions are settled against generation-tagged tickets so a
//! superseded request can never overwrite newer state.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::ClientError;
use crate::models::Page;
use crate::notify::Notify;
use crate::pagination::PageWindow;

/// A source of pages for one resource collection. `R` is the resource
/// identity (for example, the event id an attendee list belongs to).
#[async_trait]
pub trait PageSource<R>: Send + Sync {
    type Item;

    async fn fetch_page(
        &self,
        resource: &R,
        offset: u64,
        limit: u64,
    ) -> Result<Page<Self::Item>, ClientError>;
}

/// What the view should currently display. Exactly one variant holds.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState<T> {
    Idle,
    Loading,
    Success(Page<T>),
    Failure(String),
}

/// Resource identity plus 1-based page number: the tuple that uniquely
/// determines what data should be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchParams<R> {
    pub resource: R,
    pub page: u64,
}

/// Handle for one outstanding fetch. A completion is only applied when the
/// generation captured here still matches the controller's.
#[derive(Debug, Clone)]
pub struct FetchTicket<R> {
    pub params: FetchParams<R>,
    pub offset: u64,
    pub limit: u64,
    generation: u64,
}

pub struct ListController<T, R> {
    label: &'static str,
    limit: u64,
    params: FetchParams<R>,
    state: ListState<T>,
    window: Option<PageWindow>,
    generation: u64,
    notifier: Option<Arc<dyn Notify>>,
}

impl<T, R: Clone> ListController<T, R> {
    /// Create an idle controller for `resource`, starting at page 1.
    /// `label` names the collection in notifications ("events", "attendees").
    pub fn new(resource: R, limit: u64, label: &'static str) -> Self {
        Self {
            label,
            limit: limit.max(1),
            params: FetchParams { resource, page: 1 },
            state: ListState::Idle,
            window: None,
            generation: 0,
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notify>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Choose the initial page before the first fetch.
    pub fn starting_at(mut self, page: u64) -> Self {
        self.params.page = page.max(1);
        self
    }

    pub fn state(&self) -> &ListState<T> {
        &self.state
    }

    pub fn params(&self) -> &FetchParams<R> {
        &self.params
    }

    /// Pagination display fields from the most recent successful fetch.
    pub fn window(&self) -> Option<&PageWindow> {
        self.window.as_ref()
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Enter `Loading` and issue a fetch for the current parameters. Used on
    /// mount and for unconditional refresh.
    pub fn start(&mut self) -> FetchTicket<R> {
        self.issue()
    }

    /// Navigate to `page`. Once the total is known, pages outside
    /// `[1, total_pages]` are a no-op; the same page may be re-requested to
    /// refresh it.
    pub fn go_to_page(&mut self, page: u64) -> Option<FetchTicket<R>> {
        if page == 0 {
            return None;
        }
        if let Some(window) = &self.window
            && !window.contains_page(page)
        {
            debug!(page, total_pages = window.total_pages, "page out of range");
            return None;
        }
        self.params.page = page;
        Some(self.issue())
    }

    /// Navigate forward when a next page exists.
    pub fn next_page(&mut self) -> Option<FetchTicket<R>> {
        match &self.window {
            Some(window) if window.has_next => self.go_to_page(self.params.page + 1),
            _ => None,
        }
    }

    /// Navigate backward when a previous page exists.
    pub fn prev_page(&mut self) -> Option<FetchTicket<R>> {
        match &self.window {
            Some(window) if window.has_prev => self.go_to_page(self.params.page - 1),
            _ => None,
        }
    }

    /// Point the view at a different resource; resets to page 1 and discards
    /// the stale window.
    pub fn set_resource(&mut self, resource: R) -> FetchTicket<R> {
        self.params = FetchParams { resource, page: 1 };
        self.window = None;
        self.issue()
    }

    /// Manual retry from `Failure`, with unchanged parameters.
    pub fn retry(&mut self) -> Option<FetchTicket<R>> {
        match self.state {
            ListState::Failure(_) => Some(self.issue()),
            _ => None,
        }
    }

    /// Apply a completed fetch. Returns `false` when the completion was
    /// stale (its parameters were superseded) and state was left untouched.
    pub fn settle(
        &mut self,
        ticket: FetchTicket<R>,
        result: Result<Page<T>, ClientError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "ignoring superseded fetch completion"
            );
            return false;
        }

        match result {
            Ok(page) => {
                self.window = Some(PageWindow::compute(page.total, self.limit, self.params.page));
                self.state = ListState::Success(page);
            }
            Err(err) => {
                let message = err.to_string();
                if let Some(notifier) = &self.notifier {
                    notifier.error(&format!("Failed to load {}", self.label));
                }
                // Prior data is discarded; the view never shows stale items
                // behind an error.
                self.state = ListState::Failure(message);
            }
        }
        true
    }

    /// Run the fetch a ticket stands for and settle the result.
    pub async fn fulfill<S>(&mut self, ticket: FetchTicket<R>, source: &S) -> bool
    where
        S: PageSource<R, Item = T> + ?Sized,
    {
        let result = source
            .fetch_page(&ticket.params.resource, ticket.offset, ticket.limit)
            .await;
        self.settle(ticket, result)
    }

    /// Issue a fetch for the current parameters and drive it to completion.
    pub async fn load<S>(&mut self, source: &S) -> bool
    where
        S: PageSource<R, Item = T> + ?Sized,
    {
        let ticket = self.start();
        self.fulfill(ticket, source).await
    }

    fn issue(&mut self) -> FetchTicket<R> {
        self.generation += 1;
        self.state = ListState::Loading;
        FetchTicket {
            params: self.params.clone(),
            offset: (self.params.page - 1) * self.limit,
            limit: self.limit,
            generation: self.generation,
        }
    }
}
