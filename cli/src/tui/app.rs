use anyhow::Result;
use chrono::{Local, NaiveDate};
use nextup_core::{display_label, Board, BoardService, Field, FileBoardRepository, List};
use ratatui::widgets::TableState;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Capturing,
    Editing(Field),
}

pub struct App {
    pub service: BoardService<FileBoardRepository>,
    pub board: Board,
    pub list: List,
    pub state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl App {
    pub fn new() -> Result<App> {
        let repo = FileBoardRepository::new(None)?;
        let service = BoardService::new(repo);
        let board = service.board()?;

        let mut state = TableState::default();
        if !board.next_actions.is_empty() {
            state.select(Some(0));
        }

        Ok(App {
            service,
            board,
            list: List::NextActions,
            state,
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
        })
    }

    fn tasks_len(&self) -> usize {
        self.board.tasks(self.list).len()
    }

    fn reload(&mut self) {
        if let Ok(board) = self.service.board() {
            self.board = board;
        }
    }

    /// Clamp the selection after the list shrank or the tab changed.
    fn fix_selection(&mut self) {
        let len = self.tasks_len();
        if len == 0 {
            self.state.select(None);
        } else {
            match self.state.selected() {
                Some(i) if i >= len => self.state.select(Some(len - 1)),
                Some(_) => {}
                None => self.state.select(Some(0)),
            }
        }
    }

    pub fn next(&mut self) {
        if self.tasks_len() == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.tasks_len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.tasks_len() == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.tasks_len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn next_list(&mut self) {
        let pos = List::ALL.iter().position(|l| *l == self.list).unwrap_or(0);
        self.list = List::ALL[(pos + 1) % List::ALL.len()];
        self.state = TableState::default();
        self.fix_selection();
    }

    pub fn previous_list(&mut self) {
        let pos = List::ALL.iter().position(|l| *l == self.list).unwrap_or(0);
        self.list = List::ALL[(pos + List::ALL.len() - 1) % List::ALL.len()];
        self.state = TableState::default();
        self.fix_selection();
    }

    pub fn toggle_selected(&mut self) {
        if let Some(i) = self.state.selected() {
            let _ = self.service.toggle(self.list, i);
            self.reload();
            self.fix_selection();
        }
    }

    pub fn promote_selected(&mut self) {
        if self.list != List::SomedayMaybe {
            return;
        }
        if let Some(i) = self.state.selected() {
            let _ = self.service.promote(i);
            self.reload();
            self.fix_selection();
        }
    }

    pub fn enter_capture_mode(&mut self) {
        self.input_mode = InputMode::Capturing;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Starts an inline edit of `field` on the selected task. The input is
    /// prefilled with the cell as displayed, so an untouched "Today" label
    /// survives the round trip back to its stored form.
    pub fn enter_edit_mode(&mut self, field: Field) {
        if !self.list.fields().contains(&field) {
            return;
        }
        let Some(i) = self.state.selected() else {
            return;
        };
        let Some(task) = self.board.tasks(self.list).get(i) else {
            return;
        };

        self.input = match field {
            Field::Date => display_label(&task.date, today()),
            Field::Text => task.text.clone(),
            Field::Time => task.time.clone(),
            Field::Project => task.project.clone(),
            Field::Notes => task.notes.clone(),
        };
        self.cursor_position = self.input.chars().count();
        self.input_mode = InputMode::Editing(field);
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn submit(&mut self) {
        match self.input_mode {
            InputMode::Capturing => {
                if !self.input.trim().is_empty() {
                    let _ = self.service.capture(self.list, &self.input, today());
                    self.reload();
                    let len = self.tasks_len();
                    if len > 0 {
                        self.state.select(Some(len - 1));
                    }
                }
            }
            InputMode::Editing(field) => {
                // An emptied cell is a valid edit, it clears the value.
                if let Some(i) = self.state.selected() {
                    let _ = self.service.edit(self.list, i, field, &self.input, today());
                    self.reload();
                }
            }
            InputMode::Normal => {}
        }
        self.cancel_input();
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self
            .input
            .chars()
            .take(self.cursor_position)
            .map(|c| c.len_utf8())
            .sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self
                .input
                .chars()
                .take(self.cursor_position - 1)
                .map(|c| c.len_utf8())
                .sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }
}
