//! Collaborator capabilities: drawing and room-table decoding.
//!
//! All file I/O happens behind these traits, before the engine runs. The
//! production implementations live in `plan-check-io`; tests use in-memory
//! fixtures.

use crate::document::DrawingDocument;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Failure of an external decoding collaborator.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The converter subprocess exited with a failure status.
    #[error("converter exited with status {status}: {stderr}")]
    Tool {
        /// Exit status code, `-1` when terminated by a signal.
        status: i32,
        /// Captured standard error output.
        stderr: String,
    },

    /// The converter subprocess exceeded its deadline and was killed.
    #[error("converter timed out after {seconds}s")]
    Timeout {
        /// Deadline in seconds.
        seconds: u64,
    },

    /// The decoded content did not match the expected structure.
    #[error("{0}")]
    Malformed(String),
}

/// Capability to decode a drawing file into the normalized document.
pub trait DrawingParser: Send + Sync {
    /// Decodes the drawing at `path`.
    ///
    /// # Errors
    ///
    /// Fails for unreadable files, converter failures or timeouts, and
    /// malformed converter output.
    fn parse_drawing(&self, path: &Path) -> Result<DrawingDocument, ParseError>;
}

/// Capability to decode a spreadsheet into AOID-keyed room records.
pub trait RoomTableParser: Send + Sync {
    /// Decodes the room table at `path`.
    ///
    /// # Errors
    ///
    /// Fails for unreadable or malformed spreadsheet files.
    fn parse_room_table(&self, path: &Path) -> Result<RoomTable, ParseError>;
}

/// One row of the external room table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    /// Room identifier; key of the table.
    pub aoid: String,
    /// Room name, when the column is filled.
    pub name: Option<String>,
    /// Room area in square meters, when the column is filled.
    pub area: Option<f64>,
}

/// The external room table, keyed by AOID.
///
/// Backed by a `BTreeMap` so iteration order, and with it reconciliation
/// finding order, is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomTable {
    rooms: BTreeMap<String, RoomRecord>,
}

impl RoomTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, replacing any previous row with the same AOID.
    pub fn insert(&mut self, record: RoomRecord) {
        self.rooms.insert(record.aoid.clone(), record);
    }

    /// Looks up a record by AOID.
    #[must_use]
    pub fn get(&self, aoid: &str) -> Option<&RoomRecord> {
        self.rooms.get(aoid)
    }

    /// Whether the table contains the AOID.
    #[must_use]
    pub fn contains(&self, aoid: &str) -> bool {
        self.rooms.contains_key(aoid)
    }

    /// Iterates the AOID keys in sorted order.
    pub fn aoids(&self) -> impl Iterator<Item = &str> {
        self.rooms.keys().map(String::as_str)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl FromIterator<RoomRecord> for RoomTable {
    fn from_iter<I: IntoIterator<Item = RoomRecord>>(iter: I) -> Self {
        let mut table = Self::new();
        for record in iter {
            table.insert(record);
        }
        table
    }
}
