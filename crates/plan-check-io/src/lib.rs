//! # plan-check-io
//!
//! External decoding collaborators for plan-check.
//!
//! The core engine only consumes the normalized drawing document and the
//! AOID-keyed room table; this crate provides the production implementations
//! of the two decoding capabilities:
//!
//! - [`LibreDwgParser`] — DWG → normalized JSON document via the LibreDWG
//!   `dwgread` CLI, run as a bounded subprocess
//! - [`XlsxRoomTableParser`] — XLSX room list → [`RoomTable`] via `calamine`
//!
//! [`RoomTable`]: plan_check_core::RoomTable

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod libredwg;
mod xlsx;

pub use libredwg::LibreDwgParser;
pub use xlsx::XlsxRoomTableParser;
