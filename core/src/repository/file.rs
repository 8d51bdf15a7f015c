use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::model::task::Board;
use crate::repository::traits::BoardRepository;

const DEFAULT_FILE_NAME: &str = "tasks.json";

#[derive(Clone)]
pub struct FileBoardRepository {
    file_path: PathBuf,
}

impl FileBoardRepository {
    /// Opens the board under `base_dir`, defaulting to `~/.nextup`. A
    /// missing file is seeded with an empty board so first runs behave
    /// the same as later ones.
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(".nextup")
            }
        };
        fs::create_dir_all(&path)?;
        path.push(DEFAULT_FILE_NAME);

        if !path.exists() {
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &Board::default())?;
            writer.flush()?;
        }

        Ok(FileBoardRepository { file_path: path })
    }
}

impl BoardRepository for FileBoardRepository {
    fn load(&self) -> Result<Board> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let board = serde_json::from_reader(reader)?;
        Ok(board)
    }

    fn save(&self, board: &Board) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, board)?;
        writer.flush()?;
        Ok(())
    }
}
