// src/models/course.rs

//! Timetable grid and the course entries it holds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A course linked from the timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseEntry {
    /// Path segment following `course.php/` in the course link
    pub id: String,

    /// Course name as shown in the timetable cell
    pub display_name: String,
}

impl CourseEntry {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

impl fmt::Display for CourseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

/// Fixed-size weekly timetable, indexed by `(column, row)`.
///
/// Columns are weekdays and rows are periods. The dimensions never change
/// after construction; every accessor is bounds-checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct TimetableGrid {
    columns: usize,
    rows: usize,
    cells: Vec<Vec<Option<CourseEntry>>>,
}

/// Unchecked serialized form of [`TimetableGrid`].
#[derive(Deserialize)]
struct RawGrid {
    columns: usize,
    rows: usize,
    cells: Vec<Vec<Option<CourseEntry>>>,
}

impl TryFrom<RawGrid> for TimetableGrid {
    type Error = String;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        if raw.cells.len() != raw.columns {
            return Err(format!(
                "grid declares {} columns but has {}",
                raw.columns,
                raw.cells.len()
            ));
        }
        if let Some((column, cells)) = raw
            .cells
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != raw.rows)
        {
            return Err(format!(
                "grid declares {} rows but column {column} has {}",
                raw.rows,
                cells.len()
            ));
        }
        Ok(Self {
            columns: raw.columns,
            rows: raw.rows,
            cells: raw.cells,
        })
    }
}

impl TimetableGrid {
    /// Number of weekday columns on the portal timetable.
    pub const COLUMNS: usize = 6;

    /// Number of period rows on the portal timetable.
    pub const ROWS: usize = 8;

    /// Empty 6×8 grid.
    pub fn new() -> Self {
        Self::with_dimensions(Self::COLUMNS, Self::ROWS)
    }

    pub fn with_dimensions(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![vec![None; rows]; columns],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Course at a position, `None` when absent or out of bounds.
    pub fn get(&self, column: usize, row: usize) -> Option<&CourseEntry> {
        self.cells.get(column)?.get(row)?.as_ref()
    }

    /// Store a course at a position.
    ///
    /// Returns `false` and leaves the grid untouched when the position lies
    /// outside the grid.
    pub fn set(&mut self, column: usize, row: usize, entry: Option<CourseEntry>) -> bool {
        match self.cells.get_mut(column).and_then(|col| col.get_mut(row)) {
            Some(cell) => {
                *cell = entry;
                true
            }
            None => false,
        }
    }

    /// Populated cells as `(column, row, entry)`, column by column.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &CourseEntry)> {
        self.cells.iter().enumerate().flat_map(|(column, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(row, cell)| cell.as_ref().map(|entry| (column, row, entry)))
        })
    }

    /// Number of populated cells.
    pub fn populated(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.populated() == 0
    }
}

impl Default for TimetableGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TimetableGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (column, cells) in self.cells.iter().enumerate() {
            write!(f, "{column}")?;
            for cell in cells {
                match cell {
                    Some(entry) => write!(f, ", {entry}")?,
                    None => write!(f, ", None")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
