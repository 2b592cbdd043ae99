//! Application state for the terminal color grid.
//!
//! [`App`] is the controller: it wires the color picker, reset, export and
//! import prompts and container resizes to the [`GridManager`], and turns
//! screen coordinates into cell positions for the paint protocol.

use crate::domain::{CellPos, ColorMap, GridManager, PointerButton, Viewport};
use crate::infrastructure::{Config, PersistenceError};
use log::info;

/// Represents the current mode of the application.
///
/// The mode decides how key presses are interpreted and which prompt the
/// status bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Painting with the mouse, shortcuts available
    Normal,
    /// Help screen is displayed
    Help,
    /// User is typing a color string
    ColorInput,
    /// Export filename prompt is open
    ExportAs,
    /// Import filename prompt is open
    ImportFile,
}

/// Main application state containing the grid and UI state.
///
/// # Examples
///
/// ```
/// use kleurplaat::application::App;
/// use kleurplaat::domain::Viewport;
///
/// let mut app = App::default();
/// app.update_grid_size(Viewport::new(1, 2, 20, 5));
/// assert_eq!((app.grid.rows(), app.grid.cols()), (5, 10));
/// ```
#[derive(Debug)]
pub struct App {
    /// The grid model
    pub grid: GridManager,
    /// Current application mode
    pub mode: AppMode,
    /// Text buffer for the active prompt
    pub input: String,
    /// Cursor position within the input buffer, counted in chars
    pub cursor_position: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Colors reachable with the number keys
    pub palette: Vec<String>,
    /// Filename offered by the export prompt
    pub export_file: String,
    /// File most recently exported or imported
    pub filename: Option<String>,
    /// Screen area that hosts the grid
    pub container: Viewport,
}

impl Default for App {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl App {
    pub fn new(config: &Config) -> Self {
        let mut grid = GridManager::new(config.cell_size());
        grid.set_color(config.paint_color.as_str());

        Self {
            grid,
            mode: AppMode::Normal,
            input: String::new(),
            cursor_position: 0,
            status_message: None,
            help_scroll: 0,
            palette: config.palette.clone(),
            export_file: config.export_file.clone(),
            filename: None,
            container: Viewport::default(),
        }
    }

    /// Called whenever the grid container changes size; keeps painted colors.
    pub fn update_grid_size(&mut self, container: Viewport) {
        self.container = container;
        self.grid.update_grid_size(container.width, container.height);
    }

    /// Destructive reset: every cell goes back to white.
    pub fn reset_grid(&mut self) {
        let cell_size = self.grid.cell_size();
        let rows = (self.container.height / cell_size.height) as usize;
        let cols = (self.container.width / cell_size.width) as usize;
        self.grid.initialize_grid(rows, cols);
        self.status_message = Some("Grid reset".to_string());
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        let color = color.into();
        info!("paint color set to {}", color);
        self.grid.set_color(color);
    }

    /// Picks the palette entry at `index` (zero-based). Out-of-range indices
    /// are ignored.
    pub fn select_palette(&mut self, index: usize) {
        if let Some(color) = self.palette.get(index).cloned() {
            self.set_color(color);
        }
    }

    /// Maps a screen position to the cell drawn there, if any.
    pub fn screen_to_cell(&self, column: u16, row: u16) -> Option<CellPos> {
        let (x, y) = self.container.to_local(column, row)?;
        self.grid.cell_at(x, y)
    }

    pub fn pointer_down(&mut self, column: u16, row: u16, button: PointerButton) {
        let target = self.screen_to_cell(column, row);
        self.grid.pointer_down(target, button);
    }

    pub fn pointer_move(&mut self, column: u16, row: u16) {
        let target = self.screen_to_cell(column, row);
        self.grid.pointer_move(target);
    }

    /// Releases end the stroke wherever they happen.
    pub fn pointer_up(&mut self) {
        self.grid.pointer_up();
    }

    fn open_prompt(&mut self, mode: AppMode, initial: String) {
        // A prompt steals the mouse; never leave a stroke half open behind it.
        self.grid.pointer_up();
        self.mode = mode;
        self.input = initial;
        self.cursor_position = self.input.chars().count();
        self.status_message = None;
    }

    /// Clears the prompt buffer and returns to normal mode.
    pub fn close_prompt(&mut self) {
        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Byte offset in `input` of the char at `cursor`.
    fn byte_offset(&self, cursor: usize) -> usize {
        self.input
            .char_indices()
            .nth(cursor)
            .map(|(offset, _)| offset)
            .unwrap_or(self.input.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let offset = self.byte_offset(self.cursor_position);
        self.input.insert(offset, c);
        self.cursor_position += 1;
    }

    /// Removes the char before the cursor (Backspace).
    pub fn delete_char_before_cursor(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let offset = self.byte_offset(self.cursor_position);
            self.input.remove(offset);
        }
    }

    /// Removes the char under the cursor (Delete).
    pub fn delete_char_at_cursor(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            let offset = self.byte_offset(self.cursor_position);
            self.input.remove(offset);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.input.chars().count();
    }

    /// Opens the color prompt, prefilled with the current paint color.
    pub fn start_color_input(&mut self) {
        let current = self.grid.current_color().to_string();
        self.open_prompt(AppMode::ColorInput, current);
    }

    /// Applies the typed color. An empty buffer keeps the current color.
    pub fn finish_color_input(&mut self) {
        let color = self.input.trim().to_string();
        if !color.is_empty() {
            self.status_message = Some(format!("Color set to {}", color));
            self.set_color(color);
        }
        self.close_prompt();
    }

    pub fn start_export(&mut self) {
        let initial = self.filename.clone().unwrap_or_else(|| self.export_file.clone());
        self.open_prompt(AppMode::ExportAs, initial);
    }

    pub fn start_import(&mut self) {
        let initial = self.filename.clone().unwrap_or_else(|| self.export_file.clone());
        self.open_prompt(AppMode::ImportFile, initial);
    }

    /// Returns the filename typed into the prompt, or the configured export
    /// file when the prompt is empty.
    pub fn get_prompt_filename(&self) -> String {
        let typed = self.input.trim();
        if typed.is_empty() {
            self.export_file.clone()
        } else {
            typed.to_string()
        }
    }

    pub fn set_export_result(&mut self, result: Result<String, PersistenceError>) {
        match result {
            Ok(filename) => {
                self.status_message = Some(format!("Exported to {}", filename));
                self.filename = Some(filename);
            }
            Err(error) => {
                self.status_message = Some(format!("Export failed: {}", error));
            }
        }
        self.close_prompt();
    }

    /// Replaces the grid with the imported map. On failure the grid is
    /// left exactly as it was.
    pub fn set_import_result(&mut self, result: Result<(ColorMap, String), PersistenceError>) {
        match result {
            Ok((map, filename)) => {
                let count = map.len();
                self.grid.import_from_json(map);
                self.status_message = Some(format!("Imported {} cells from {}", count, filename));
                self.filename = Some(filename);
            }
            Err(error) => {
                self.status_message = Some(format!("Import failed: {}", error));
            }
        }
        self.close_prompt();
    }

    pub fn show_help(&mut self) {
        self.grid.pointer_up();
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, DEFAULT_CELL_COLOR};

    fn create_test_app() -> App {
        let mut app = App::default();
        // Grid container at (1, 2), 20 columns by 10 rows: a 10x10 grid of 2x1 cells.
        app.update_grid_size(Viewport::new(1, 2, 20, 10));
        app
    }

    #[test]
    fn test_app_default() {
        let app = App::default();
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.input.is_empty());
        assert_eq!(app.cursor_position, 0);
        assert!(app.status_message.is_none());
        assert!(app.filename.is_none());
        assert_eq!(app.grid.current_color(), "#000000");
        assert_eq!(app.export_file, "kleurplaat.json");
        assert!(app.grid.is_empty());
    }

    #[test]
    fn test_app_from_config() {
        let config = Config::parse("cell_width = 3\npaint_color = \"red\"").unwrap();
        let mut app = App::new(&config);
        app.update_grid_size(Viewport::new(0, 0, 10, 4));

        assert_eq!(app.grid.current_color(), "red");
        assert_eq!((app.grid.rows(), app.grid.cols()), (4, 3));
    }

    #[test]
    fn test_screen_to_cell() {
        let app = create_test_app();
        assert_eq!(app.screen_to_cell(1, 2), Some(CellPos::new(0, 0)));
        assert_eq!(app.screen_to_cell(4, 3), Some(CellPos::new(1, 1)));
        assert_eq!(app.screen_to_cell(0, 2), None);
        assert_eq!(app.screen_to_cell(21, 2), None);
        assert_eq!(app.screen_to_cell(1, 12), None);
    }

    #[test]
    fn test_drag_paints_stroke() {
        let mut app = create_test_app();
        app.set_color("#ff0000");

        app.pointer_down(1, 2, PointerButton::Primary);
        app.pointer_move(3, 2);
        app.pointer_move(5, 2);
        app.pointer_up();
        app.pointer_move(7, 2);

        for col in 0..3 {
            assert_eq!(app.grid.color_at(CellPos::new(0, col)), "#ff0000");
        }
        assert_eq!(app.grid.color_at(CellPos::new(0, 3)), DEFAULT_CELL_COLOR);
    }

    #[test]
    fn test_release_off_grid_ends_stroke() {
        let mut app = create_test_app();
        app.pointer_down(1, 2, PointerButton::Primary);
        app.pointer_move(40, 40);
        app.pointer_up();
        assert!(!app.grid.is_painting());
    }

    #[test]
    fn test_reset_uses_container() {
        let mut app = create_test_app();
        app.set_color("#ff0000");
        app.pointer_down(1, 2, PointerButton::Primary);
        app.pointer_up();

        app.reset_grid();

        assert_eq!(app.grid.len(), 100);
        assert_eq!(app.grid.color_at(CellPos::new(0, 0)), DEFAULT_CELL_COLOR);
        assert_eq!(app.status_message.as_deref(), Some("Grid reset"));
    }

    #[test]
    fn test_resize_keeps_paint() {
        let mut app = create_test_app();
        app.set_color("#ff0000");
        app.grid.color_cell(CellPos::new(2, 3));

        app.update_grid_size(Viewport::new(1, 2, 30, 12));
        assert_eq!((app.grid.rows(), app.grid.cols()), (12, 15));
        assert_eq!(app.grid.color_at(CellPos::new(2, 3)), "#ff0000");
    }

    #[test]
    fn test_select_palette() {
        let mut app = create_test_app();
        app.select_palette(2);
        assert_eq!(app.grid.current_color(), "#ff0000");

        app.select_palette(99);
        assert_eq!(app.grid.current_color(), "#ff0000");
    }

    #[test]
    fn test_color_input() {
        let mut app = create_test_app();
        app.start_color_input();
        assert_eq!(app.mode, AppMode::ColorInput);
        assert_eq!(app.input, "#000000");
        assert_eq!(app.cursor_position, 7);

        app.input = " teal ".to_string();
        app.finish_color_input();

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.grid.current_color(), "teal");
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_prompt_editing_non_ascii_prefill() {
        let config = Config::parse("paint_color = \"röd\"").unwrap();
        let mut app = App::new(&config);
        app.start_color_input();
        assert_eq!(app.cursor_position, 3);

        app.move_cursor_left();
        app.move_cursor_left();
        app.insert_char('x');
        assert_eq!(app.input, "rxöd");

        app.delete_char_at_cursor();
        assert_eq!(app.input, "rxd");
        app.delete_char_before_cursor();
        assert_eq!(app.input, "rd");

        app.move_cursor_end();
        app.insert_char('é');
        assert_eq!(app.input, "rdé");
        assert_eq!(app.cursor_position, 3);
    }

    #[test]
    fn test_empty_color_input_keeps_color() {
        let mut app = create_test_app();
        app.start_color_input();
        app.input.clear();
        app.finish_color_input();
        assert_eq!(app.grid.current_color(), "#000000");
    }

    #[test]
    fn test_prompt_interrupts_stroke() {
        let mut app = create_test_app();
        app.pointer_down(1, 2, PointerButton::Primary);
        app.start_export();
        assert!(!app.grid.is_painting());
    }

    #[test]
    fn test_start_export_and_import() {
        let mut app = create_test_app();
        app.start_export();
        assert_eq!(app.mode, AppMode::ExportAs);
        assert_eq!(app.input, "kleurplaat.json");

        app.close_prompt();
        app.filename = Some("drawing.json".to_string());
        app.start_import();
        assert_eq!(app.mode, AppMode::ImportFile);
        assert_eq!(app.input, "drawing.json");
    }

    #[test]
    fn test_get_prompt_filename() {
        let mut app = create_test_app();
        app.input.clear();
        assert_eq!(app.get_prompt_filename(), "kleurplaat.json");
        app.input = "other.json".to_string();
        assert_eq!(app.get_prompt_filename(), "other.json");
    }

    #[test]
    fn test_set_export_result() {
        let mut app = create_test_app();
        app.start_export();
        app.set_export_result(Ok("out.json".to_string()));
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.filename.as_deref(), Some("out.json"));
        assert!(app.status_message.unwrap().contains("Exported to out.json"));

        let mut app = create_test_app();
        app.start_export();
        let error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        app.set_export_result(Err(PersistenceError::Io(error)));
        assert!(app.filename.is_none());
        assert!(app.status_message.unwrap().contains("Export failed: Permission denied"));
    }

    #[test]
    fn test_set_import_result_success() {
        let mut app = create_test_app();
        let map = ColorMap::from_json(r##"{"0,0":"#ff0000","1,1":"#00ff00"}"##).unwrap();

        app.start_import();
        app.set_import_result(Ok((map, "in.json".to_string())));

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.grid.len(), 2);
        assert_eq!(app.grid.color_at(CellPos::new(1, 1)), "#00ff00");
        assert_eq!((app.grid.rows(), app.grid.cols()), (10, 10));
        assert!(app.status_message.unwrap().contains("Imported 2 cells from in.json"));
    }

    #[test]
    fn test_set_import_result_failure_leaves_grid() {
        let mut app = create_test_app();
        app.set_color("#ff0000");
        app.grid.color_cell(CellPos::new(0, 0));

        app.start_import();
        let error = DomainError::SchemaError("invalid cell key `x`".to_string());
        app.set_import_result(Err(PersistenceError::Domain(error)));

        assert_eq!(app.grid.len(), 100);
        assert_eq!(app.grid.color_at(CellPos::new(0, 0)), "#ff0000");
        assert!(app.status_message.unwrap().contains("Import failed"));
    }
}
