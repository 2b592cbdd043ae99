//! Headless grid model for the painting widget.
//!
//! [`GridManager`] owns every cell, regenerates them when the container is
//! resized, runs the press-drag-release paint protocol and converts the grid
//! to and from its serialized [`ColorMap`] form. Nothing here knows about the
//! terminal; the presentation layer draws whatever state it finds.

use std::collections::BTreeMap;
use log::{debug, info, warn};

use super::errors::DomainResult;
use super::models::{Cell, CellPos, CellSize, ColorMap, DEFAULT_CELL_COLOR};

/// State of the paint session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintState {
    /// No button is held; pointer movement does nothing.
    #[default]
    Idle,
    /// The primary button went down over a cell and has not been released.
    Painting,
}

/// Which pointer button triggered a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Owner of the grid state.
///
/// # Examples
///
/// ```
/// use kleurplaat::domain::{CellPos, CellSize, GridManager, PointerButton};
///
/// let mut grid = GridManager::new(CellSize::square(30));
/// grid.update_grid_size(300, 90);
/// assert_eq!((grid.rows(), grid.cols()), (3, 10));
///
/// grid.set_color("#ff0000");
/// grid.pointer_down(Some(CellPos::new(0, 0)), PointerButton::Primary);
/// grid.pointer_move(Some(CellPos::new(0, 1)));
/// grid.pointer_up();
///
/// assert_eq!(grid.color_at(CellPos::new(0, 1)), "#ff0000");
/// ```
#[derive(Debug, Clone)]
pub struct GridManager {
    cells: BTreeMap<CellPos, Cell>,
    rows: usize,
    cols: usize,
    cell_size: CellSize,
    current_color: String,
    paint_state: PaintState,
}

impl Default for GridManager {
    fn default() -> Self {
        Self::new(CellSize::default())
    }
}

impl GridManager {
    /// Creates an empty 0×0 grid. The paint color starts out white.
    pub fn new(cell_size: CellSize) -> Self {
        Self {
            cells: BTreeMap::new(),
            rows: 0,
            cols: 0,
            cell_size,
            current_color: DEFAULT_CELL_COLOR.to_string(),
            paint_state: PaintState::Idle,
        }
    }

    /// Discards every cell and builds a fresh `rows`×`cols` grid of white
    /// cells.
    pub fn initialize_grid(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        self.cells.clear();
        self.render_grid();
        info!("grid initialized to {}x{}", rows, cols);
    }

    /// Recomputes the grid bounds from the container size and rebuilds.
    ///
    /// Painted colors survive for every key still inside the new bounds;
    /// cells that fall outside are dropped. Returns the new `(rows, cols)`.
    pub fn update_grid_size(&mut self, container_width: u16, container_height: u16) -> (usize, usize) {
        let rows = (container_height / self.cell_size.height) as usize;
        let cols = (container_width / self.cell_size.width) as usize;

        if (rows, cols) != (self.rows, self.cols) {
            info!(
                "grid resized from {}x{} to {}x{} (container {}x{})",
                self.rows, self.cols, rows, cols, container_width, container_height
            );
        }

        self.rows = rows;
        self.cols = cols;
        self.render_grid();
        (rows, cols)
    }

    /// Regenerates one cell per in-bounds position, keeping whatever color
    /// the previous grid held for that key, and drops everything else.
    pub fn render_grid(&mut self) {
        let mut previous = std::mem::take(&mut self.cells);

        for row in 0..self.rows {
            for col in 0..self.cols {
                let pos = CellPos::new(row, col);
                let cell = match previous.remove(&pos) {
                    Some(existing) => Cell::with_color(row, col, existing.color()),
                    None => Cell::new(row, col),
                };
                self.cells.insert(pos, cell);
            }
        }

        if !previous.is_empty() {
            debug!("dropped {} cells outside {}x{}", previous.len(), self.rows, self.cols);
        }
    }

    /// Primary press over a cell starts a paint session and paints it.
    ///
    /// `target` is `None` when the press landed outside the grid.
    pub fn pointer_down(&mut self, target: Option<CellPos>, button: PointerButton) -> Option<CellPos> {
        if button != PointerButton::Primary {
            return None;
        }
        let pos = target?;

        self.paint_state = PaintState::Painting;
        self.color_cell(pos)
    }

    /// While painting, colors whichever cell the pointer is over.
    pub fn pointer_move(&mut self, target: Option<CellPos>) -> Option<CellPos> {
        if self.paint_state != PaintState::Painting {
            return None;
        }
        self.color_cell(target?)
    }

    /// Ends the paint session. Called for every release, on or off the grid.
    pub fn pointer_up(&mut self) {
        self.paint_state = PaintState::Idle;
    }

    /// Paints `pos` with the current color.
    ///
    /// Positions outside `rows`×`cols` are refused. A cell missing from the
    /// map (possible after an import) is created on the spot.
    pub fn color_cell(&mut self, pos: CellPos) -> Option<CellPos> {
        if !self.in_bounds(pos) {
            warn!("refusing to paint {} outside {}x{}", pos, self.rows, self.cols);
            return None;
        }

        let color = self.current_color.clone();
        self.cells
            .entry(pos)
            .and_modify(|cell| cell.set_color(color.as_str()))
            .or_insert_with(|| Cell::with_color(pos.row, pos.col, color.as_str()));

        if color == DEFAULT_CELL_COLOR {
            debug!("cell {} is white", pos);
        } else {
            debug!("cell {} painted {}", pos, color);
        }
        Some(pos)
    }

    /// Sets the color used by subsequent paint operations.
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.current_color = color.into();
    }

    pub fn current_color(&self) -> &str {
        &self.current_color
    }

    /// Snapshot of every cell currently held, keyed by position.
    pub fn color_map(&self) -> ColorMap {
        self.cells
            .values()
            .map(|cell| (cell.position(), cell.color().to_string()))
            .collect()
    }

    /// Serializes the full grid as a `{"row,col": color}` JSON document.
    pub fn export_to_json(&self) -> DomainResult<String> {
        self.color_map().to_json()
    }

    /// Replaces the whole grid with the imported cells.
    ///
    /// `rows`/`cols` are left alone, so keys outside the current bounds are
    /// kept but not drawn until a rebuild with large enough bounds.
    pub fn import_from_json(&mut self, data: ColorMap) {
        self.cells = data
            .iter()
            .map(|(pos, color)| (pos, Cell::with_color(pos.row, pos.col, color)))
            .collect();

        let outside = self.cells.keys().filter(|pos| !self.in_bounds(**pos)).count();
        if outside > 0 {
            warn!("{} imported cells lie outside the current {}x{} grid", outside, self.rows, self.cols);
        }
        info!("imported {} cells", self.cells.len());
    }

    /// Maps a container-relative position in surface units to a cell.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<CellPos> {
        let pos = CellPos::new(
            (y / self.cell_size.height) as usize,
            (x / self.cell_size.width) as usize,
        );
        self.in_bounds(pos).then_some(pos)
    }

    pub fn in_bounds(&self, pos: CellPos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn get(&self, pos: CellPos) -> Option<&Cell> {
        self.cells.get(&pos)
    }

    /// Color to draw at `pos`; white when the map has no entry for it.
    pub fn color_at(&self, pos: CellPos) -> &str {
        self.cells.get(&pos).map(Cell::color).unwrap_or(DEFAULT_CELL_COLOR)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_size(&self) -> CellSize {
        self.cell_size
    }

    /// Size of the drawn surface in surface units, `(width, height)`.
    pub fn surface_size(&self) -> (usize, usize) {
        (
            self.cols * self.cell_size.width as usize,
            self.rows * self.cell_size.height as usize,
        )
    }

    pub fn paint_state(&self) -> PaintState {
        self.paint_state
    }

    pub fn is_painting(&self) -> bool {
        self.paint_state == PaintState::Painting
    }
}
