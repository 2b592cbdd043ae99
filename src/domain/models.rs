use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use super::errors::{DomainError, DomainResult};

/// Color of a cell nobody has painted yet.
pub const DEFAULT_CELL_COLOR: &str = "#ffffff";

/// Composite grid key. Ordered row-major, so maps keyed by it iterate
/// top-left to bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for CellPos {
    type Err = DomainError;

    /// Parses the `"row,col"` key used by exported color maps.
    ///
    /// # Examples
    ///
    /// ```
    /// use kleurplaat::domain::CellPos;
    ///
    /// let pos: CellPos = "2,3".parse().unwrap();
    /// assert_eq!(pos, CellPos::new(2, 3));
    /// assert!("2;3".parse::<CellPos>().is_err());
    /// ```
    fn from_str(key: &str) -> DomainResult<Self> {
        let invalid = || DomainError::SchemaError(format!("invalid cell key `{}`", key));

        let (row, col) = key.split_once(',').ok_or_else(invalid)?;
        let row = row.trim().parse::<usize>().map_err(|_| invalid())?;
        let col = col.trim().parse::<usize>().map_err(|_| invalid())?;

        Ok(Self { row, col })
    }
}

/// A single grid unit. Its position is fixed at construction; only the
/// color changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pos: CellPos,
    color: String,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self::with_color(row, col, DEFAULT_CELL_COLOR)
    }

    pub fn with_color(row: usize, col: usize, color: impl Into<String>) -> Self {
        Self {
            pos: CellPos::new(row, col),
            color: color.into(),
        }
    }

    pub fn row(&self) -> usize {
        self.pos.row
    }

    pub fn col(&self) -> usize {
        self.pos.col
    }

    pub fn position(&self) -> CellPos {
        self.pos
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Any string is accepted; interpretation is left to the renderer.
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }
}

/// Size of one cell in surface units (terminal columns and rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSize {
    pub width: u16,
    pub height: u16,
}

impl CellSize {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn square(size: u16) -> Self {
        Self::new(size, size)
    }
}

impl Default for CellSize {
    fn default() -> Self {
        // Two columns by one row is roughly square in most terminal fonts.
        Self::new(2, 1)
    }
}

/// Screen rectangle of the grid container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Translates a screen position into container-relative coordinates.
    pub fn to_local(&self, column: u16, row: u16) -> Option<(u16, u16)> {
        let x = column.checked_sub(self.x)?;
        let y = row.checked_sub(self.y)?;
        if x < self.width && y < self.height {
            Some((x, y))
        } else {
            None
        }
    }
}

/// Serialized form of a grid: a flat `"row,col" -> color` mapping.
///
/// On the wire this is a one-level JSON object; in memory it is keyed by
/// [`CellPos`] so nothing downstream parses strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorMap(BTreeMap<CellPos, String>);

impl ColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pos: CellPos, color: impl Into<String>) {
        self.0.insert(pos, color.into());
    }

    pub fn get(&self, pos: CellPos) -> Option<&str> {
        self.0.get(&pos).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellPos, &str)> {
        self.0.iter().map(|(pos, color)| (*pos, color.as_str()))
    }

    /// Parses an exported document.
    ///
    /// Syntax problems become [`DomainError::ParseError`]; well-formed JSON
    /// with bad keys or non-string colors becomes [`DomainError::SchemaError`].
    pub fn from_json(content: &str) -> DomainResult<Self> {
        let value: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| DomainError::ParseError(e.to_string()))?;

        ColorMap::deserialize(value).map_err(|e| DomainError::SchemaError(e.to_string()))
    }

    pub fn to_json(&self) -> DomainResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DomainError::SchemaError(e.to_string()))
    }
}

impl FromIterator<(CellPos, String)> for ColorMap {
    fn from_iter<I: IntoIterator<Item = (CellPos, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for ColorMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (pos, color) in &self.0 {
            map.serialize_entry(&pos.to_string(), color)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ColorMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{Error, MapAccess, Visitor};

        struct ColorMapVisitor;

        impl<'de> Visitor<'de> for ColorMapVisitor {
            type Value = ColorMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object mapping \"row,col\" keys to color strings")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut cells = BTreeMap::new();
                while let Some((key, color)) = access.next_entry::<String, String>()? {
                    let pos = key
                        .parse::<CellPos>()
                        .map_err(|_| A::Error::custom(format!("invalid cell key `{}`", key)))?;
                    if cells.insert(pos, color).is_some() {
                        return Err(A::Error::custom(format!("duplicate cell key `{}` for {}", key, pos)));
                    }
                }
                Ok(ColorMap(cells))
            }
        }

        deserializer.deserialize_map(ColorMapVisitor)
    }
}
