use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::decode::decode_workbook;
use crate::error::ShoutoutError;
use crate::projector::{CardRecord, Projector};
use crate::validate::validate_path;

/// Handle for one in-flight read. Only the most recently issued ticket may
/// update the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadTicket {
    pub id: u64,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The read produced this many cards.
    Cards(usize),
    /// The read or decode failed; the error banner is set.
    Failed,
    /// A newer read was started; the result was dropped.
    Stale,
}

/// What a renderer needs from the session.
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    pub cards: &'a [CardRecord],
    pub error: Option<&'a str>,
    /// The upload control shows whenever no cards are loaded.
    pub show_upload: bool,
}

/// Current file, cards and error for one reader.
#[derive(Debug, Default)]
pub struct ReaderSession {
    projector: Projector,
    file: Option<PathBuf>,
    cards: Vec<CardRecord>,
    error: Option<String>,
    latest_request: u64,
}

impl ReaderSession {
    pub fn new(projector: Projector) -> Self {
        Self {
            projector,
            ..Self::default()
        }
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            cards: &self.cards,
            error: self.error.as_deref(),
            show_upload: self.cards.is_empty(),
        }
    }

    /// Pick a new file (or none). Loaded cards are always dropped and any
    /// read still in flight goes stale; an invalid name sets the banner and
    /// leaves the previous file selected.
    pub fn select_file(&mut self, file: Option<PathBuf>) {
        self.cards.clear();
        self.latest_request += 1;
        let Some(path) = file else {
            debug!("file selection cleared");
            self.file = None;
            return;
        };

        match validate_path(&path) {
            Ok(format) => {
                info!(path = %path.display(), ?format, "file selected");
                self.file = Some(path);
                self.error = None;
            }
            Err(err) => {
                warn!(path = %path.display(), "rejected file: {err}");
                self.error = Some(err.user_message());
            }
        }
    }

    /// Start reading the selected file. Each call supersedes every earlier
    /// ticket.
    pub fn begin_read(&mut self) -> Result<ReadTicket, ShoutoutError> {
        let Some(path) = self.file.clone() else {
            let err = ShoutoutError::NoFileSelected;
            self.error = Some(err.user_message());
            return Err(err);
        };
        self.error = None;
        self.latest_request += 1;
        debug!(id = self.latest_request, path = %path.display(), "read started");
        Ok(ReadTicket {
            id: self.latest_request,
            path,
        })
    }

    /// Apply the outcome of a read started with `ticket`.
    pub fn complete_read(&mut self, ticket: &ReadTicket, bytes: io::Result<Vec<u8>>) -> Applied {
        if ticket.id != self.latest_request {
            debug!(
                id = ticket.id,
                latest = self.latest_request,
                "discarding stale read"
            );
            return Applied::Stale;
        }

        let result = bytes
            .map_err(|source| ShoutoutError::Read {
                path: ticket.path.clone(),
                source,
            })
            .and_then(|bytes| self.decode_cards(bytes));

        match result {
            Ok(cards) => {
                info!(path = %ticket.path.display(), cards = cards.len(), "cards loaded");
                let count = cards.len();
                self.cards = cards;
                Applied::Cards(count)
            }
            Err(err) => {
                warn!(path = %ticket.path.display(), "failed to load cards: {err}");
                self.error = Some(err.user_message());
                Applied::Failed
            }
        }
    }

    /// Read the selected file from disk and apply it.
    pub fn load(&mut self) -> Result<Applied, ShoutoutError> {
        let ticket = self.begin_read()?;
        let bytes = fs::read(&ticket.path);
        Ok(self.complete_read(&ticket, bytes))
    }

    /// Drop the loaded cards so the upload control shows again.
    pub fn import_again(&mut self) {
        debug!(cards = self.cards.len(), "import again");
        self.cards.clear();
    }

    fn decode_cards(&self, bytes: Vec<u8>) -> Result<Vec<CardRecord>, ShoutoutError> {
        let workbook = decode_workbook(bytes)?;
        let rows = workbook.first_sheet()?.rows();
        Ok(self.projector.project_sheet(&rows))
    }
}
