//! Room-table decoding from XLSX workbooks.
//!
//! The organizational room list is maintained as a spreadsheet: AOID in the
//! first column, room name and area in the next two, one header row. Blank
//! first columns are skipped.

use calamine::{open_workbook_auto, Data, Reader};
use plan_check_core::{ParseError, RoomRecord, RoomTable, RoomTableParser};
use std::path::Path;
use tracing::debug;

/// [`RoomTableParser`] backed by the `calamine` workbook reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxRoomTableParser;

impl XlsxRoomTableParser {
    /// Creates a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RoomTableParser for XlsxRoomTableParser {
    fn parse_room_table(&self, path: &Path) -> Result<RoomTable, ParseError> {
        let mut workbook =
            open_workbook_auto(path).map_err(|e| ParseError::Malformed(e.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| {
                ParseError::Malformed("Arbeitsmappe enthält kein Tabellenblatt".to_string())
            })?
            .map_err(|e| ParseError::Malformed(e.to_string()))?;

        let mut table = RoomTable::new();
        for row in range.rows().skip(1) {
            let aoid = row.first().map(cell_text).unwrap_or_default();
            if aoid.is_empty() {
                continue;
            }
            let name = row.get(1).map(cell_text).filter(|s| !s.is_empty());
            let area = row.get(2).and_then(cell_number);
            table.insert(RoomRecord { aoid, name, area });
        }

        debug!(
            "Loaded {} room record(s) from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }
}

/// Cell content as trimmed text; empty cells yield an empty string.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

/// Cell content as a number, tolerating numeric text.
fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
