pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use input::{extract, ParseResult};
pub use model::task::{Board, Field, List, Task, TaskState};
pub use repository::{BoardRepository, FileBoardRepository};
pub use service::board_service::BoardService;
pub use time::{display_label, format_stored, is_overdue, stored_from_label};
