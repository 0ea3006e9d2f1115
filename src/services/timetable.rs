// src/services/timetable.rs

//! Timetable page extraction.
//!
//! The schedule table is read as a flat, row-major list of `<td>` cells.
//! Every row starts with a header cell (the period label) followed by one
//! cell per weekday, so flat index `i` maps to column `i % 7 - 1` and row
//! `i / 7`. Header cells map to column `-1` and are dropped, as are rows
//! past the end of the grid.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::models::{CourseEntry, TimetableGrid};
use crate::services::Unmatched;
use crate::utils::markup::{capture, compile_regex, parse_selector, text_without};

const CELL_SELECTOR: &str = "table.schedule-table td";

/// Cells per table row: the header cell plus one per weekday.
const CELLS_PER_ROW: usize = TimetableGrid::COLUMNS + 1;

/// Maps timetable markup into a [`TimetableGrid`].
#[derive(Debug, Clone)]
pub struct TimetableExtractor {
    cell_sel: Selector,
    anchor_sel: Selector,
    /// Marker the portal nests in the link of a cancelled course
    marker_sel: Selector,
    course_id: Regex,
    display_name: Regex,
}

impl TimetableExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            cell_sel: parse_selector(CELL_SELECTOR)?,
            anchor_sel: parse_selector("a")?,
            marker_sel: parse_selector("div")?,
            course_id: compile_regex(r"/webclass/course\.php/(.*?)/")?,
            display_name: compile_regex(r"» (.*)")?,
        })
    }

    /// Extract the timetable. Cells that cannot be read stay absent.
    pub fn extract(&self, markup: &str) -> TimetableGrid {
        let document = Html::parse_document(markup);
        let mut grid = TimetableGrid::new();

        for (i, cell) in document.select(&self.cell_sel).enumerate() {
            let entry = match self.read_cell(cell) {
                Ok(entry) => entry,
                Err(Unmatched::NoAnchor) => continue,
                Err(reason) => {
                    log::debug!("Timetable cell {i} left empty: {reason}");
                    continue;
                }
            };

            let row = i / CELLS_PER_ROW;
            let Some(column) = (i % CELLS_PER_ROW).checked_sub(1) else {
                log::debug!("Timetable cell {i} is a header cell, dropping {}", entry.id);
                continue;
            };
            if !grid.set(column, row, Some(entry)) {
                log::debug!("Timetable cell {i} maps outside the grid ({column}, {row})");
            }
        }

        grid
    }

    fn read_cell(&self, cell: ElementRef<'_>) -> std::result::Result<CourseEntry, Unmatched> {
        let anchor = cell.select(&self.anchor_sel).next().ok_or(Unmatched::NoAnchor)?;
        let marker = anchor.select(&self.marker_sel).next();

        let href = anchor.value().attr("href").ok_or(Unmatched::NoLink)?;
        let id = capture(&self.course_id, href).ok_or(Unmatched::Identifier)?;

        let text = text_without(anchor, marker);
        let display_name = capture(&self.display_name, &text).ok_or(Unmatched::DisplayName)?;

        Ok(CourseEntry::new(id, display_name))
    }
}
