// File: src/tui/view.rs
use crate::model::ViewMode;
use crate::tui::state::{AppState, InputMode};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    match state.store.view_mode() {
        ViewMode::Detail => draw_detail(f, state, v_chunks[0]),
        ViewMode::List => draw_list(f, state, v_chunks[0]),
    }

    // Footer
    let footer_area = v_chunks[1];
    f.render_widget(Clear, footer_area);

    match state.mode {
        InputMode::Creating => {
            let prefix = "> ";
            let input_text = format!("{}{}", prefix, state.store.draft());
            let input = Paragraph::new(input_text)
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL).title(" Create Todo "))
                .wrap(Wrap { trim: false });
            f.render_widget(input, footer_area);

            let cursor_x =
                footer_area.x + 1 + prefix.chars().count() as u16 + state.cursor_position as u16;
            let max_x = footer_area.x + footer_area.width - 2;
            if cursor_x <= max_x {
                f.set_cursor_position((cursor_x, footer_area.y + 1));
            }
        }
        InputMode::Normal => {
            let f_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(footer_area);
            let status = Paragraph::new(state.message.clone())
                .style(Style::default().fg(Color::Cyan))
                .block(
                    Block::default()
                        .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                        .title(" Status "),
                );
            let help_str = match state.store.view_mode() {
                ViewMode::Detail => "Esc:Back q:Quit",
                ViewMode::List => "a:Add Spc:Done Ret:View d:Del r:Refresh q:Quit",
            };
            let help = Paragraph::new(help_str)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Right)
                .block(
                    Block::default()
                        .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                        .title(" Actions "),
                );
            f.render_widget(status, f_chunks[0]);
            f.render_widget(help, f_chunks[1]);
        }
    }
}

fn draw_list(f: &mut Frame, state: &mut AppState, area: ratatui::layout::Rect) {
    let task_items: Vec<ListItem> = state
        .store
        .items()
        .iter()
        .map(|t| {
            let checkbox = if t.completed { "[x]" } else { "[ ]" };
            let style = if t.completed {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(
                format!("{} {}", checkbox, t.title),
                style,
            )))
        })
        .collect();

    let title = format!(" Todos ({}) ", state.store.items().len());
    let task_list = List::new(task_items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::Blue),
        );
    f.render_stateful_widget(task_list, area, &mut state.list_state);
}

fn draw_detail(f: &mut Frame, state: &AppState, area: ratatui::layout::Rect) {
    let lines = match state.store.selected() {
        Some(task) => {
            let (status_text, status_color) = if task.completed {
                ("Completed", Color::Green)
            } else {
                ("Incomplete", Color::Red)
            };
            vec![
                Line::from(Span::styled(
                    task.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::raw("Status: "),
                    Span::styled(status_text, Style::default().fg(status_color)),
                ]),
            ]
        }
        None => vec![Line::from("No details.")],
    };

    let details = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" View Todo "));
    f.render_widget(details, area);
}
