//! Turn a spreadsheet of team shout-outs into a set of cards.
//!
//! The pipeline is linear: [`validate`] checks the file name, [`decode`]
//! hands the bytes to calamine and yields header-keyed rows, [`projector`]
//! maps each row to a [`CardRecord`], and [`render`] lays the cards out.
//! [`session::ReaderSession`] owns the current file, cards and error the way
//! the upload page does.

pub mod cell;
pub mod cli;
pub mod config;
pub mod decode;
pub mod error;
pub mod projector;
pub mod render;
pub mod sample;
pub mod session;
pub mod validate;

pub use cell::{CellValue, RawRow};
pub use error::ShoutoutError;
pub use projector::{CardRecord, ColumnIntents, ColumnMatcher, PhotoTable, Projector};
pub use session::ReaderSession;
