use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use crate::input::extract;
use crate::model::task::{Board, Field, List, Task, TaskState};
use crate::repository::BoardRepository;
use crate::time::stored_from_label;

pub struct BoardService<R: BoardRepository> {
    repo: R,
}

impl<R: BoardRepository> BoardService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn board(&self) -> Result<Board> {
        self.repo.load()
    }

    /// Runs the schedule extractor over raw input and files the task under
    /// `list`. Only Next Actions keeps a time; Someday Maybe keeps neither,
    /// though schedule words are still stripped from the text.
    pub fn capture(&self, list: List, text: &str, now: NaiveDate) -> Result<Task> {
        let parsed = extract(text, now);
        let mut task = Task::new(parsed.remaining);
        match list {
            List::NextActions => {
                task.date = parsed.date.unwrap_or_default();
                task.time = parsed.time.unwrap_or_default();
            }
            List::WaitingOn => {
                task.date = parsed.date.unwrap_or_default();
            }
            List::SomedayMaybe => {}
        }

        let mut board = self.repo.load()?;
        board.tasks_mut(list).push(task.clone());
        self.repo.save(&board)?;
        Ok(task)
    }

    /// Overwrites one cell. Date cells accept the literal labels "Today"
    /// and "Tomorrow", which convert back to stored `MM/DD` form.
    pub fn edit(
        &self,
        list: List,
        index: usize,
        field: Field,
        value: &str,
        now: NaiveDate,
    ) -> Result<()> {
        let mut board = self.repo.load()?;
        let task = board
            .tasks_mut(list)
            .get_mut(index)
            .ok_or_else(|| anyhow!("No task at position {} in {}", index + 1, list.title()))?;

        let value = value.trim();
        match field {
            Field::Date => task.date = stored_from_label(value, now),
            Field::Text => task.text = value.to_string(),
            Field::Time => task.time = value.to_string(),
            Field::Project => task.project = value.to_string(),
            Field::Notes => task.notes = value.to_string(),
        }
        self.repo.save(&board)
    }

    /// First toggle marks a task done; toggling a done task removes it.
    pub fn toggle(&self, list: List, index: usize) -> Result<()> {
        let mut board = self.repo.load()?;
        let tasks = board.tasks_mut(list);
        let task = tasks
            .get_mut(index)
            .ok_or_else(|| anyhow!("No task at position {} in {}", index + 1, list.title()))?;

        match task.state {
            TaskState::Todo => task.state = TaskState::Done,
            TaskState::Done => {
                tasks.remove(index);
            }
        }
        self.repo.save(&board)
    }

    /// Moves a Someday Maybe task into Next Actions as a fresh todo with a
    /// blank schedule. Notes do not follow; they belong to the incubation
    /// stage.
    pub fn promote(&self, index: usize) -> Result<Task> {
        let mut board = self.repo.load()?;
        if index >= board.someday_maybe.len() {
            return Err(anyhow!(
                "No task at position {} in {}",
                index + 1,
                List::SomedayMaybe.title()
            ));
        }
        let source = board.someday_maybe.remove(index);
        let task = Task::new(source.text);
        board.next_actions.push(task.clone());
        self.repo.save(&board)?;
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct MemoryBoardRepository {
        board: RefCell<Board>,
    }

    impl MemoryBoardRepository {
        fn new() -> Self {
            Self {
                board: RefCell::new(Board::default()),
            }
        }
    }

    impl BoardRepository for MemoryBoardRepository {
        fn load(&self) -> Result<Board> {
            Ok(self.board.borrow().clone())
        }

        fn save(&self, board: &Board) -> Result<()> {
            *self.board.borrow_mut() = board.clone();
            Ok(())
        }
    }

    fn service() -> BoardService<MemoryBoardRepository> {
        BoardService::new(MemoryBoardRepository::new())
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_capture_routes_schedule_fields_by_list() {
        let svc = service();
        let input = "call Bob at 3pm tomorrow";

        svc.capture(List::NextActions, input, monday()).unwrap();
        svc.capture(List::WaitingOn, input, monday()).unwrap();
        svc.capture(List::SomedayMaybe, input, monday()).unwrap();

        let board = svc.board().unwrap();
        let next = &board.next_actions[0];
        assert_eq!(next.text, "call Bob");
        assert_eq!(next.date, "01/02");
        assert_eq!(next.time, "3:00 PM");

        let waiting = &board.waiting_on[0];
        assert_eq!(waiting.text, "call Bob");
        assert_eq!(waiting.date, "01/02");
        assert_eq!(waiting.time, "");

        let someday = &board.someday_maybe[0];
        assert_eq!(someday.text, "call Bob");
        assert_eq!(someday.date, "");
        assert_eq!(someday.time, "");
    }

    #[test]
    fn test_capture_without_schedule_words() {
        let svc = service();
        let task = svc
            .capture(List::NextActions, "water the plants", monday())
            .unwrap();
        assert_eq!(task.text, "water the plants");
        assert_eq!(task.date, "");
        assert_eq!(task.time, "");
        assert_eq!(task.state, TaskState::Todo);
    }

    #[test]
    fn test_edit_date_cell_converts_labels() {
        let svc = service();
        svc.capture(List::NextActions, "pay rent", monday()).unwrap();

        svc.edit(List::NextActions, 0, Field::Date, "Today", monday())
            .unwrap();
        assert_eq!(svc.board().unwrap().next_actions[0].date, "01/01");

        svc.edit(List::NextActions, 0, Field::Date, "Tomorrow", monday())
            .unwrap();
        assert_eq!(svc.board().unwrap().next_actions[0].date, "01/02");

        svc.edit(List::NextActions, 0, Field::Date, "12/25", monday())
            .unwrap();
        assert_eq!(svc.board().unwrap().next_actions[0].date, "12/25");
    }

    #[test]
    fn test_edit_trims_and_stores_verbatim() {
        let svc = service();
        svc.capture(List::WaitingOn, "legal review", monday()).unwrap();

        svc.edit(List::WaitingOn, 0, Field::Notes, "  pinged on Monday  ", monday())
            .unwrap();
        assert_eq!(
            svc.board().unwrap().waiting_on[0].notes,
            "pinged on Monday"
        );
    }

    #[test]
    fn test_toggle_cycles_todo_done_gone() {
        let svc = service();
        svc.capture(List::NextActions, "ship release", monday()).unwrap();

        svc.toggle(List::NextActions, 0).unwrap();
        assert_eq!(
            svc.board().unwrap().next_actions[0].state,
            TaskState::Done
        );

        svc.toggle(List::NextActions, 0).unwrap();
        assert!(svc.board().unwrap().next_actions.is_empty());
    }

    #[test]
    fn test_promote_carries_text_only() {
        let svc = service();
        svc.capture(List::SomedayMaybe, "learn sailing", monday()).unwrap();
        svc.edit(List::SomedayMaybe, 0, Field::Notes, "start with a course", monday())
            .unwrap();

        let promoted = svc.promote(0).unwrap();
        assert_eq!(promoted.text, "learn sailing");
        assert_eq!(promoted.notes, "");
        assert_eq!(promoted.state, TaskState::Todo);

        let board = svc.board().unwrap();
        assert!(board.someday_maybe.is_empty());
        assert_eq!(board.next_actions.len(), 1);
        assert_eq!(board.next_actions[0].date, "");
    }

    #[test]
    fn test_out_of_range_positions_error() {
        let svc = service();
        assert!(svc.toggle(List::NextActions, 0).is_err());
        assert!(svc
            .edit(List::WaitingOn, 3, Field::Text, "x", monday())
            .is_err());
        assert!(svc.promote(0).is_err());
    }
}
