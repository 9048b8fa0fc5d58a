//! The list-synchronization state machine.
//!
//! One `ListSync` value owns everything the original scattered across ad-hoc
//! mutable fields: the post set, the page window, the search term, and the
//! load/error phase. Every trigger is an explicit transition that returns the
//! [`FetchPlan`] it requires (or `None` when the trigger is inert); a session
//! driver executes exactly one pending fetch at a time and feeds the outcome
//! back through [`ListSync::apply`].
//!
//! Overlap policy is cancel-latest-wins: each plan bumps a generation
//! counter, and a completion carrying a stale generation is dropped, so an
//! out-of-order page-1 response can never overwrite newer page-2 state.

use foglio_api_types::{BlogPage, PageLink};
use url::Url;

use crate::application::collection::CollectionError;
use crate::domain::posts::Post;

/// Load phase of the synchronized list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// The client's view of server-side pagination metadata.
///
/// Once a page has loaded, `current_page` is always within
/// `[1, last_page]`. A link with a `None` url is non-actionable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub current_page: u32,
    pub last_page: u32,
    pub links: Vec<PageLink>,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            current_page: 1,
            last_page: 1,
            links: Vec::new(),
        }
    }
}

/// The one fetch a transition requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    pub page: u32,
    pub search: String,
    pub generation: u64,
}

/// State machine for one server-paginated, server-searched list.
#[derive(Debug)]
pub struct ListSync {
    phase: Phase,
    posts: Vec<Post>,
    window: PageWindow,
    search: String,
    generation: u64,
}

impl Default for ListSync {
    fn default() -> Self {
        Self::new()
    }
}

impl ListSync {
    pub fn new() -> Self {
        Self::with_query(1, String::new())
    }

    /// Start at an arbitrary page and search term, e.g. when resuming a view.
    pub fn with_query(page: u32, search: impl Into<String>) -> Self {
        Self {
            phase: Phase::Idle,
            posts: Vec::new(),
            window: PageWindow {
                current_page: page.max(1),
                ..PageWindow::default()
            },
            search: search.into(),
            generation: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn window(&self) -> &PageWindow {
        &self.window
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Fetch whatever page is current with the current search term.
    pub fn initial_load(&mut self) -> FetchPlan {
        self.plan(self.window.current_page)
    }

    /// Record a new search term.
    ///
    /// Search is server-authoritative: the already-fetched page is never
    /// filtered locally. Changing the term resets pagination to page 1, since
    /// a page index from a different filter has no meaning against the new
    /// collection. An unchanged term is inert.
    pub fn set_search(&mut self, term: impl Into<String>) -> Option<FetchPlan> {
        let term = term.into();
        if term == self.search {
            return None;
        }
        self.search = term;
        self.window.current_page = 1;
        Some(self.plan(1))
    }

    /// Navigate to `page`. Inert unless `1 <= page <= last_page`.
    pub fn paginate(&mut self, page: u32) -> Option<FetchPlan> {
        if page == 0 || page > self.window.last_page {
            return None;
        }
        self.window.current_page = page;
        Some(self.plan(page))
    }

    /// Navigate via a pagination link from the server envelope.
    pub fn follow_link(&mut self, link: &PageLink) -> Option<FetchPlan> {
        let target = self.resolve_link(link)?;
        self.paginate(target)
    }

    /// Resolve a navigation link to its target page.
    ///
    /// In order: a `page` query parameter on the link url; a label meaning
    /// "previous" while not on the first page; a label meaning "next" while
    /// not on the last. A `None` url, or a resolution outside
    /// `[1, last_page]`, yields `None`.
    pub fn resolve_link(&self, link: &PageLink) -> Option<u32> {
        let raw = link.url.as_deref()?;

        if let Some(page) = page_query_param(raw) {
            return (page >= 1 && page <= self.window.last_page).then_some(page);
        }

        let label = link.label.to_lowercase();
        if label.contains("prev") && self.window.current_page > 1 {
            return Some(self.window.current_page - 1);
        }
        if label.contains("next") && self.window.current_page < self.window.last_page {
            return Some(self.window.current_page + 1);
        }

        None
    }

    /// Re-fetch the current page with the current search term, e.g. after a
    /// successful create or update. New items never change which page is
    /// displayed.
    pub fn refresh(&mut self) -> FetchPlan {
        self.plan(self.window.current_page)
    }

    /// Plan the fetch that follows a successful delete.
    ///
    /// Deleting the sole item of a page beyond page 1 moves the view to the
    /// previous page; anything else re-fetches the current page unchanged.
    /// This keeps the view off a now-empty trailing page.
    pub fn after_delete(&mut self) -> FetchPlan {
        if self.posts.len() == 1 && self.window.current_page > 1 {
            self.window.current_page -= 1;
        }
        self.plan(self.window.current_page)
    }

    /// Feed the outcome of a planned fetch back into the machine.
    ///
    /// Returns `false` when the outcome was dropped because a newer plan has
    /// superseded it. A failure becomes the `Error` phase with a user-facing
    /// message embedding the cause; the post set from the last good fetch is
    /// left intact. The next applied success clears the error.
    pub fn apply(
        &mut self,
        generation: u64,
        result: Result<BlogPage, CollectionError>,
    ) -> bool {
        if generation != self.generation {
            tracing::warn!(
                stale = generation,
                current = self.generation,
                "dropping stale fetch outcome"
            );
            return false;
        }

        match result {
            Ok(page) => {
                let last_page = page.last_page.max(1);
                self.posts = page.data.into_iter().map(Post::from_record).collect();
                self.window.current_page = page.current_page.clamp(1, last_page);
                self.window.last_page = last_page;
                self.window.links = page.links;
                self.phase = Phase::Ready;
                tracing::debug!(
                    page = self.window.current_page,
                    last_page = self.window.last_page,
                    posts = self.posts.len(),
                    "list synchronized"
                );
            }
            Err(err) => {
                let message = format!("failed to load posts: {err}");
                tracing::debug!(%message, "list fetch failed");
                self.phase = Phase::Error(message);
            }
        }

        true
    }

    fn plan(&mut self, page: u32) -> FetchPlan {
        self.generation += 1;
        self.phase = Phase::Loading;
        tracing::debug!(
            page,
            search = %self.search,
            generation = self.generation,
            "planned list fetch"
        );
        FetchPlan {
            page,
            search: self.search.clone(),
            generation: self.generation,
        }
    }
}

fn page_query_param(raw: &str) -> Option<u32> {
    let url = Url::parse(raw).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}
