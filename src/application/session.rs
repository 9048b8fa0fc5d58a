//! Session drivers: one engine, instantiated twice.
//!
//! [`ListSession`] is the read-only public listing; [`AdminSession`] wraps it
//! and adds the form lifecycle and mutations. Both funnel every trigger
//! through the state machine and execute exactly one planned fetch before
//! applying its outcome, so triggers and completions can never interleave
//! within a session. Dropping a session drops any notion of its outstanding
//! work with it.
//!
//! Error surfaces differ deliberately: a fetch failure replaces the list with
//! the `Error` phase, while a mutation failure only sets a [`Notice`] and
//! leaves both the list and the draft intact.

use std::sync::Arc;

use crate::application::collection::CollectionClient;
use crate::application::form::{FormMode, FormState};
use crate::application::list_sync::{FetchPlan, ListSync};

/// A user-facing status line produced by mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::Info(message) | Self::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Read-only driver over one synchronized list.
pub struct ListSession {
    client: Arc<dyn CollectionClient>,
    list: ListSync,
}

impl ListSession {
    pub fn new(client: Arc<dyn CollectionClient>) -> Self {
        Self {
            client,
            list: ListSync::new(),
        }
    }

    /// Open the session at an arbitrary page and search term.
    pub fn with_query(
        client: Arc<dyn CollectionClient>,
        page: u32,
        search: impl Into<String>,
    ) -> Self {
        Self {
            client,
            list: ListSync::with_query(page, search),
        }
    }

    pub fn list(&self) -> &ListSync {
        &self.list
    }

    /// Initial load of the current page with the current search term.
    pub async fn load(&mut self) {
        let plan = self.list.initial_load();
        self.run(plan).await;
    }

    /// Apply a new search term and fetch with it; inert if unchanged.
    pub async fn search(&mut self, term: impl Into<String>) {
        if let Some(plan) = self.list.set_search(term) {
            self.run(plan).await;
        }
    }

    /// Navigate to a page number; inert outside the window.
    pub async fn go_to_page(&mut self, page: u32) {
        if let Some(plan) = self.list.paginate(page) {
            self.run(plan).await;
        }
    }

    /// Navigate via the pagination link at `index`; inert links do nothing.
    pub async fn follow_link(&mut self, index: usize) {
        let Some(link) = self.list.window().links.get(index).cloned() else {
            return;
        };
        if let Some(plan) = self.list.follow_link(&link) {
            self.run(plan).await;
        }
    }

    async fn run(&mut self, plan: FetchPlan) {
        let result = self.client.list(plan.page, &plan.search).await;
        self.list.apply(plan.generation, result);
    }
}

/// Editable driver: the list session plus form state and mutations.
pub struct AdminSession {
    session: ListSession,
    form: FormState,
    notice: Option<Notice>,
    pending_delete: Option<i64>,
}

impl AdminSession {
    pub fn new(client: Arc<dyn CollectionClient>) -> Self {
        Self::from_session(ListSession::new(client))
    }

    pub fn with_query(
        client: Arc<dyn CollectionClient>,
        page: u32,
        search: impl Into<String>,
    ) -> Self {
        Self::from_session(ListSession::with_query(client, page, search))
    }

    fn from_session(session: ListSession) -> Self {
        Self {
            session,
            form: FormState::new(),
            notice: None,
            pending_delete: None,
        }
    }

    pub fn list(&self) -> &ListSync {
        self.session.list()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    pub async fn load(&mut self) {
        self.session.load().await;
    }

    pub async fn search(&mut self, term: impl Into<String>) {
        self.session.search(term).await;
    }

    pub async fn go_to_page(&mut self, page: u32) {
        self.session.go_to_page(page).await;
    }

    pub async fn follow_link(&mut self, index: usize) {
        self.session.follow_link(index).await;
    }

    /// Begin editing the listed post with `id`. Returns `false` when the id
    /// is not on the current page.
    pub fn edit_post(&mut self, id: i64) -> bool {
        let Some(post) = self
            .session
            .list
            .posts()
            .iter()
            .find(|post| post.id == id)
            .cloned()
        else {
            return false;
        };
        self.form.start_edit(&post);
        self.notice = None;
        true
    }

    pub fn cancel_edit(&mut self) {
        self.form.cancel_edit();
        self.notice = None;
    }

    /// Validate and dispatch the draft as a create or update.
    ///
    /// On success the draft is cleared, an info notice is set, and the
    /// current page is re-fetched with the current search term. On failure
    /// the draft is retained and the failure becomes an error notice; the
    /// list is never touched.
    pub async fn submit(&mut self) -> bool {
        self.notice = None;

        let request = match self.form.prepare_submit() {
            Ok(request) => request,
            Err(err) => {
                self.notice = Some(Notice::Error(err.to_string()));
                return false;
            }
        };

        let saved = match self.form.mode() {
            FormMode::Create => self
                .session
                .client
                .create(&request)
                .await
                .map(|_| "post created"),
            FormMode::Editing(id) => self
                .session
                .client
                .update(id, &request)
                .await
                .map(|_| "post updated"),
        };

        match saved {
            Ok(message) => {
                self.form.clear();
                self.notice = Some(Notice::Info(message.to_string()));
                let plan = self.session.list.refresh();
                self.session.run(plan).await;
                true
            }
            Err(err) => {
                tracing::debug!(error = %err, "save failed, draft retained");
                self.notice = Some(Notice::Error(format!("failed to save post: {err}")));
                false
            }
        }
    }

    /// Arm the confirmation gate for a destructive delete. Nothing is sent
    /// until [`AdminSession::confirm_delete`] runs.
    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    /// Disarm a pending delete without issuing anything.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Issue the armed delete. On success the post-deletion page plan runs
    /// (stepping back one page when the sole item of a page beyond the first
    /// was removed); on failure only the notice changes.
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.pending_delete.take() else {
            return false;
        };
        self.notice = None;

        match self.session.client.delete(id).await {
            Ok(()) => {
                self.notice = Some(Notice::Info("post deleted".to_string()));
                let plan = self.session.list.after_delete();
                self.session.run(plan).await;
                true
            }
            Err(err) => {
                self.notice = Some(Notice::Error(format!("failed to delete post: {err}")));
                false
            }
        }
    }
}
