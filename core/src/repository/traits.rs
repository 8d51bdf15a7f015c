use crate::model::task::Board;
use anyhow::Result;

/// Storage for the whole board. Loads and saves are whole-document so a
/// save can never leave two lists out of step with each other.
pub trait BoardRepository {
    fn load(&self) -> Result<Board>;
    fn save(&self, board: &Board) -> Result<()>;
}
