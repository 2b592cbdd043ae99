use crate::domain::{ColorMap, DomainError, GridManager};
use log::info;
use std::fmt;
use std::fs;
use std::path::Path;

/// Default name of an exported drawing.
pub const DEFAULT_EXPORT_FILE: &str = "kleurplaat.json";

#[derive(Debug)]
pub enum PersistenceError {
    Io(std::io::Error),
    Domain(DomainError),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Io(e) => write!(f, "{}", e),
            PersistenceError::Domain(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<std::io::Error> for PersistenceError {
    fn from(e: std::io::Error) -> Self {
        PersistenceError::Io(e)
    }
}

impl From<DomainError> for PersistenceError {
    fn from(e: DomainError) -> Self {
        PersistenceError::Domain(e)
    }
}

pub struct ColorMapRepository;

impl ColorMapRepository {
    /// Writes the grid's color map to `filename` and returns the name written.
    pub fn export_grid(grid: &GridManager, filename: &str) -> Result<String, PersistenceError> {
        let json = grid.export_to_json()?;
        fs::write(filename, json)?;
        info!("exported {} cells to {}", grid.len(), filename);
        Ok(filename.to_string())
    }

    /// Reads and validates a color map; the grid is not touched here.
    pub fn import_color_map(filename: &str) -> Result<(ColorMap, String), PersistenceError> {
        let content = fs::read_to_string(Path::new(filename))?;
        let map = ColorMap::from_json(&content)?;
        Ok((map, filename.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CellPos, CellSize};
    use tempfile::tempdir;

    #[test]
    fn test_export_then_import_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_FILE);
        let filename = path.to_str().unwrap();

        let mut grid = GridManager::new(CellSize::square(30));
        grid.initialize_grid(3, 3);
        grid.set_color("#ff0000");
        grid.color_cell(CellPos::new(2, 1));

        assert_eq!(ColorMapRepository::export_grid(&grid, filename).unwrap(), filename);

        let (map, name) = ColorMapRepository::import_color_map(filename).unwrap();
        assert_eq!(name, filename);
        assert_eq!(map.len(), 9);
        assert_eq!(map.get(CellPos::new(2, 1)), Some("#ff0000"));
    }

    #[test]
    fn test_import_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let result = ColorMapRepository::import_color_map(path.to_str().unwrap());
        assert!(matches!(result, Err(PersistenceError::Io(_))));
    }

    #[test]
    fn test_import_invalid_documents() {
        let dir = tempdir().unwrap();

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{not json").unwrap();
        let result = ColorMapRepository::import_color_map(broken.to_str().unwrap());
        assert!(matches!(result, Err(PersistenceError::Domain(DomainError::ParseError(_)))));

        let bad_key = dir.path().join("bad_key.json");
        fs::write(&bad_key, r##"{"x,1": "#ffffff"}"##).unwrap();
        let result = ColorMapRepository::import_color_map(bad_key.to_str().unwrap());
        assert!(matches!(result, Err(PersistenceError::Domain(DomainError::SchemaError(_)))));
    }
}
