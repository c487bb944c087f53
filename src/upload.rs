use log::info;

use crate::error::{CoreError, Result};

// ---------------------------------------------------------------------------
// UploadSlot – the single in-flight file read
// ---------------------------------------------------------------------------

/// Text of a picked file, as delivered by the background read.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    /// MIME type when the source knows it; desktop pickers usually don't.
    pub mime: Option<String>,
    pub text: String,
}

impl Upload {
    /// Decode raw file bytes. Anything that is not UTF-8 is not delimited
    /// text as far as the loader is concerned.
    pub fn from_bytes(file_name: &str, mime: Option<&str>, bytes: Vec<u8>) -> Result<Self> {
        let text = String::from_utf8(bytes).map_err(|e| CoreError::UnsupportedFileType {
            detail: format!("'{file_name}' is not UTF-8 text: {e}"),
        })?;
        Ok(Upload {
            file_name: file_name.to_string(),
            mime: mime.map(str::to_string),
            text,
        })
    }
}

/// Identifies one started upload. Only the most recent ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UploadTicket(u64);

/// Tracks which upload is current. Starting a new one supersedes the
/// previous; a superseded result is dropped when it arrives.
#[derive(Debug, Default)]
pub struct UploadSlot {
    issued: u64,
    pending: Option<UploadTicket>,
}

impl UploadSlot {
    /// Start a new upload, superseding any in flight.
    pub fn begin(&mut self) -> UploadTicket {
        if let Some(old) = self.pending {
            info!("Upload {} superseded", old.0);
        }
        self.issued += 1;
        let ticket = UploadTicket(self.issued);
        self.pending = Some(ticket);
        ticket
    }

    /// Hand back `payload` if `ticket` is still the pending upload. Each
    /// ticket yields its payload at most once.
    pub fn finish<T>(&mut self, ticket: UploadTicket, payload: T) -> Option<T> {
        if self.pending == Some(ticket) {
            self.pending = None;
            Some(payload)
        } else {
            info!("Discarding result of superseded upload {}", ticket.0);
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
