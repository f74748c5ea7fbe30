use crate::model::Task;
use crate::store::TaskStore;
use ratatui::widgets::ListState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Creating,
}

/// UI-local state. Everything about the collection itself lives in the
/// store; this only tracks the cursor, the input mode and the status line.
pub struct AppState {
    pub store: TaskStore,
    pub list_state: ListState,
    pub mode: InputMode,
    pub cursor_position: usize,
    pub message: String,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(store: TaskStore) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            store,
            list_state,
            mode: InputMode::Normal,
            cursor_position: 0,
            message: String::new(),
            should_quit: false,
        }
    }

    pub fn highlighted_task(&self) -> Option<&Task> {
        self.store.items().get(self.list_state.selected()?)
    }

    pub fn move_up(&mut self) {
        let i = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some(i.saturating_sub(1)));
    }

    pub fn move_down(&mut self) {
        let len = self.store.items().len();
        let i = self.list_state.selected().unwrap_or(0);
        if i + 1 < len {
            self.list_state.select(Some(i + 1));
        }
    }

    /// Keep the highlight inside the list after the store shrank or was
    /// replaced.
    pub fn clamp_selection(&mut self) {
        let len = self.store.items().len();
        let i = self.list_state.selected().unwrap_or(0);
        if len == 0 {
            self.list_state.select(Some(0));
        } else if i >= len {
            self.list_state.select(Some(len - 1));
        }
    }

    /// Pull the store's failure report (if any) into the status line.
    pub fn sync_message(&mut self, ok_text: &str) {
        self.message = match self.store.error_msg() {
            Some(e) => format!("Error: {}", e),
            None => ok_text.to_string(),
        };
    }
}
