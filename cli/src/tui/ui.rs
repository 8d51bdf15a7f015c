use chrono::{Local, NaiveDate};
use nextup_core::{display_label, is_overdue, Field, List, Task, TaskState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table, Tabs},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InputMode};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let editing = app.input_mode != InputMode::Normal;

    let constraints: Vec<Constraint> = if editing {
        vec![
            Constraint::Length(3), // Tabs
            Constraint::Min(1),    // Board
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer
        ]
    } else {
        vec![
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    draw_tabs(f, app, chunks[0]);
    draw_board(f, app, chunks[1]);
    if editing {
        draw_input(f, app, chunks[2]);
    }
    let footer_area = if editing { chunks[3] } else { chunks[2] };
    draw_footer(f, app, footer_area);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = List::ALL.iter().map(|l| Line::from(l.title())).collect();
    let selected = List::ALL.iter().position(|l| *l == app.list).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(" NEXTUP ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    f.render_widget(tabs, area);
}

fn state_icon(task: &Task) -> &'static str {
    match task.state {
        TaskState::Done => "✔",
        TaskState::Todo => "☐",
    }
}

fn date_span(task: &Task, today: NaiveDate) -> Span<'static> {
    let label = display_label(&task.date, today);
    let style = if is_overdue(&task.date, today) {
        Style::default().fg(Color::Red)
    } else if label == "Today" {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else if label == "Tomorrow" {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Span::styled(label, style)
}

fn row_style(task: &Task) -> Style {
    match task.state {
        TaskState::Done => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT),
        TaskState::Todo => Style::default(),
    }
}

fn draw_board(f: &mut Frame, app: &mut App, area: Rect) {
    let today = Local::now().date_naive();
    let tasks = app.board.tasks(app.list);
    let header_style = Style::default().fg(Color::Yellow);

    let table = match app.list {
        List::NextActions => {
            let rows: Vec<Row> = tasks
                .iter()
                .map(|task| {
                    Row::new(vec![
                        Span::raw(state_icon(task)),
                        date_span(task, today),
                        Span::styled(
                            task.text.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(task.time.clone()),
                        Span::raw(task.project.clone()),
                    ])
                    .style(row_style(task))
                })
                .collect();
            Table::new(
                rows,
                [
                    Constraint::Length(3),
                    Constraint::Length(12),
                    Constraint::Min(20),
                    Constraint::Length(10),
                    Constraint::Length(14),
                ],
            )
            .header(Row::new(vec!["St", "Date", "Task", "Time", "Project"]).style(header_style))
        }
        List::WaitingOn => {
            let rows: Vec<Row> = tasks
                .iter()
                .map(|task| {
                    Row::new(vec![
                        Span::raw(state_icon(task)),
                        date_span(task, today),
                        Span::styled(
                            task.text.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(task.notes.clone()),
                    ])
                    .style(row_style(task))
                })
                .collect();
            Table::new(
                rows,
                [
                    Constraint::Length(3),
                    Constraint::Length(12),
                    Constraint::Min(20),
                    Constraint::Min(16),
                ],
            )
            .header(Row::new(vec!["St", "Follow Up", "Task", "Notes"]).style(header_style))
        }
        List::SomedayMaybe => {
            let rows: Vec<Row> = tasks
                .iter()
                .map(|task| {
                    Row::new(vec![
                        Span::raw(state_icon(task)),
                        Span::styled(
                            task.text.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(task.notes.clone()),
                    ])
                    .style(row_style(task))
                })
                .collect();
            Table::new(
                rows,
                [
                    Constraint::Length(3),
                    Constraint::Min(20),
                    Constraint::Min(16),
                ],
            )
            .header(Row::new(vec!["St", "Task", "Notes"]).style(header_style))
        }
    };

    let table = table
        .block(
            Block::default()
                .title(format!(" {} ", app.list.title()))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let title = match app.input_mode {
        InputMode::Capturing => format!(" New task in {} ", app.list.title()),
        InputMode::Editing(field) => format!(" Edit {} ", field_title(app.list, field)),
        InputMode::Normal => String::new(),
    };

    let input = Paragraph::new(app.input.as_str()).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(input, area);

    let prefix: String = app.input.chars().take(app.cursor_position).collect();
    f.set_cursor_position((area.x + prefix.width() as u16 + 1, area.y + 1));
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.input_mode {
        InputMode::Normal => match app.list {
            List::NextActions => {
                "←/→: Lists | j/k: Rows | Enter: Toggle | a: Add | e: Task | d: Date | t: Time | p: Project | q: Quit"
            }
            List::WaitingOn => {
                "←/→: Lists | j/k: Rows | Enter: Toggle | a: Add | e: Task | d: Follow Up | n: Notes | q: Quit"
            }
            List::SomedayMaybe => {
                "←/→: Lists | j/k: Rows | Enter: Toggle | a: Add | e: Task | n: Notes | m: To Actions | q: Quit"
            }
        },
        _ => "Enter: Save | Esc: Cancel",
    };

    let footer = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn field_title(list: List, field: Field) -> &'static str {
    match field {
        Field::Date => {
            if list == List::WaitingOn {
                "Follow Up"
            } else {
                "Date"
            }
        }
        Field::Text => "Task",
        Field::Time => "Time",
        Field::Project => "Project",
        Field::Notes => "Notes",
    }
}
