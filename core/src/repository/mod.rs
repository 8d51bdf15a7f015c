pub mod file;
pub mod traits;

pub use file::FileBoardRepository;
pub use traits::BoardRepository;
