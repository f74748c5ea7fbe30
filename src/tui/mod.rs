// File: src/tui/mod.rs
pub mod state;
pub mod view;

use crate::model::ViewMode;
use crate::store::TaskStore;
use state::{AppState, InputMode};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// Run the interactive loop until the user quits. Each key press drives at
/// most one store operation, awaited to completion before the next event is
/// read.
pub async fn run(store: TaskStore) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppState::new(store);
    app.store.refresh().await;
    app.sync_message("Synced.");
    app.clamp_selection();

    let result = event_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| view::draw(f, app))?;

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key).await;
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

async fn handle_key(app: &mut AppState, key: KeyEvent) {
    match app.mode {
        InputMode::Creating => handle_creating_key(app, key).await,
        InputMode::Normal => handle_normal_key(app, key).await,
    }
}

async fn handle_normal_key(app: &mut AppState, key: KeyEvent) {
    if app.store.view_mode() == ViewMode::Detail {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Backspace => {
                app.store.exit_detail();
            }
            KeyCode::Char('q') => app.should_quit = true,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('r') => {
            app.store.refresh().await;
            app.sync_message("Synced.");
            app.clamp_selection();
        }
        KeyCode::Char('a') => {
            app.mode = InputMode::Creating;
            app.cursor_position = app.store.draft().chars().count();
        }
        KeyCode::Char(' ') => {
            if let Some((id, completed)) =
                app.highlighted_task().map(|t| (t.id.clone(), t.completed))
            {
                app.store.toggle_complete(&id, completed).await;
                app.sync_message("Updated.");
                app.clamp_selection();
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = app.highlighted_task().map(|t| t.id.clone()) {
                app.store.remove(&id).await;
                app.sync_message("Deleted.");
                app.clamp_selection();
            }
        }
        KeyCode::Enter | KeyCode::Char('v') => {
            if let Some(id) = app.highlighted_task().map(|t| t.id.clone()) {
                app.store.view_detail(&id).await;
                app.sync_message("");
            }
        }
        _ => {}
    }
}

async fn handle_creating_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.store.create().await;
            app.sync_message("Created.");
            app.cursor_position = 0;
            app.mode = InputMode::Normal;
            app.clamp_selection();
        }
        KeyCode::Esc => {
            app.store.draft_mut().clear();
            app.cursor_position = 0;
            app.mode = InputMode::Normal;
        }
        KeyCode::Char(c) => {
            let byte_idx = byte_index(app.store.draft(), app.cursor_position);
            app.store.draft_mut().insert(byte_idx, c);
            app.cursor_position += 1;
        }
        KeyCode::Backspace => {
            if app.cursor_position > 0 {
                app.cursor_position -= 1;
                let byte_idx = byte_index(app.store.draft(), app.cursor_position);
                app.store.draft_mut().remove(byte_idx);
            }
        }
        KeyCode::Left => app.cursor_position = app.cursor_position.saturating_sub(1),
        KeyCode::Right => {
            let len = app.store.draft().chars().count();
            if app.cursor_position < len {
                app.cursor_position += 1;
            }
        }
        _ => {}
    }
}

fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
