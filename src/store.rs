// File: src/store.rs
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::model::{Task, ViewMode};

/// In-memory mirror of the remote todo collection, plus the single item
/// currently being inspected.
///
/// One instance per session is the single source of truth for the
/// presentation layer. Create and toggle resynchronize through a full list
/// re-fetch; delete removes locally without a re-fetch. That asymmetry is
/// deliberate: a delete whose server-side effect is lost without an error
/// leaves a stale row until the next refresh, which is the accepted
/// trade-off for its lower latency.
///
/// No operation lets a network or server failure escape: each one is caught
/// where it happens, logged, recorded in [`error_msg`](Self::error_msg), and
/// the operation's state changes are abandoned (delete excepted, where the
/// local removal only happens after the request succeeded).
pub struct TaskStore {
    client: ApiClient,
    items: Vec<Task>,
    selected: Option<Task>,
    view_mode: ViewMode,
    draft: String,
    error_msg: Option<String>,
}

impl TaskStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            items: Vec::new(),
            selected: None,
            view_mode: ViewMode::List,
            draft: String::new(),
            error_msg: None,
        }
    }

    // --- ACCESSORS ---

    pub fn items(&self) -> &[Task] {
        &self.items
    }

    pub fn selected(&self) -> Option<&Task> {
        self.selected.as_ref()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    /// Last reported failure, if any. Cleared by the next successful
    /// operation.
    pub fn error_msg(&self) -> Option<&str> {
        self.error_msg.as_deref()
    }

    // --- OPERATIONS ---

    /// Replace the whole list with the server's current collection, in
    /// server order. Leaves everything untouched on failure.
    pub async fn refresh(&mut self) {
        match self.client.list_todos().await {
            Ok(todos) => {
                self.items = todos;
                self.selected = None;
                self.view_mode = ViewMode::List;
                self.error_msg = None;
            }
            Err(e) => self.report("refresh", e),
        }
    }

    /// Submit the draft as a new todo. A draft that trims to empty is
    /// dropped locally without a network call. The draft is cleared whether
    /// or not the request succeeded; only a successful create triggers the
    /// follow-up refresh.
    pub async fn create(&mut self) {
        let title = self.draft.trim().to_string();
        if title.is_empty() {
            return;
        }

        let result = self.client.create_todo(&title).await;
        self.draft.clear();
        match result {
            Ok(_) => self.refresh().await,
            Err(e) => self.report("create", e),
        }
    }

    /// Flip `completed` for `id`, where `completed` is the value currently
    /// shown for that row. Resynchronizes through a full refresh; on failure
    /// the list stays at its pre-toggle state until the next refresh.
    pub async fn toggle_complete(&mut self, id: &str, completed: bool) {
        match self.client.set_completed(id, !completed).await {
            Ok(_) => self.refresh().await,
            Err(e) => self.report("toggle", e),
        }
    }

    /// Fetch a fresh snapshot of one todo and switch to the detail screen.
    /// The list is not touched, and a failure leaves the current screen up.
    pub async fn view_detail(&mut self, id: &str) {
        match self.client.get_todo(id).await {
            Ok(task) => {
                self.selected = Some(task);
                self.view_mode = ViewMode::Detail;
                self.error_msg = None;
            }
            Err(e) => self.report("view", e),
        }
    }

    /// Back to the list. The previously fetched snapshot is kept; it is
    /// simply no longer shown.
    pub fn exit_detail(&mut self) {
        self.view_mode = ViewMode::List;
    }

    /// Delete `id` remotely and, on success, drop the matching rows locally.
    /// No follow-up re-fetch. An empty id never reaches the network.
    pub async fn remove(&mut self, id: &str) {
        if id.is_empty() {
            self.report("remove", ApiError::InvalidArgument("missing todo id".to_string()));
            return;
        }

        match self.client.delete_todo(id).await {
            Ok(()) => {
                self.items.retain(|t| t.id != id);
                self.error_msg = None;
            }
            Err(e) => self.report("remove", e),
        }
    }

    fn report(&mut self, operation: &str, error: ApiError) {
        if error.is_network_or_server() {
            tracing::warn!(operation, %error, "request failed");
        } else {
            tracing::warn!(operation, %error, "rejected locally");
        }
        self.error_msg = Some(error.to_string());
    }
}
