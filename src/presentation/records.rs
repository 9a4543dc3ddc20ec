use std::sync::Arc;

use log::debug;

use crate::clients::entities::MusicRecord;

/// Identifies one search issued against a [`RecordList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// The record sequence backing one list-like surface.
///
/// The sequence is replaced wholesale on every search and never edited in place.
#[derive(Debug, Clone, Default)]
pub struct RecordList {
    records: Arc<[MusicRecord]>,
    latest: u64,
    term: Option<String>,
    last_error: Option<String>,
}

impl RecordList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`.
    ///
    /// # Panics
    ///
    /// If `index >= count()`. Asking for a row the list does not have is a
    /// caller bug, not a recoverable condition.
    pub fn record_at(&self, index: usize) -> &MusicRecord {
        match self.records.get(index) {
            Some(record) => record,
            None => panic!(
                "record index {index} out of range for list of {} records",
                self.records.len()
            ),
        }
    }

    pub fn get(&self, index: usize) -> Option<&MusicRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[MusicRecord] {
        &self.records
    }

    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn replace(&mut self, records: Vec<MusicRecord>) {
        self.records = records.into();
        self.last_error = None;
    }

    pub fn clear(&mut self) {
        self.records = Arc::from(Vec::new());
    }

    /// Start a search for `term`; only the newest ticket may complete.
    pub fn begin_search(&mut self, term: &str) -> SearchTicket {
        self.latest += 1;
        self.term = Some(term.to_owned());
        self.last_error = None;
        SearchTicket(self.latest)
    }

    pub fn is_latest(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Store the results of a finished search. Superseded searches are ignored.
    pub fn complete(&mut self, ticket: SearchTicket, records: Vec<MusicRecord>) -> bool {
        if !self.is_latest(ticket) {
            debug!(
                "Ignoring superseded search {} (latest is {})",
                ticket.0, self.latest
            );
            return false;
        }
        self.replace(records);
        true
    }

    /// Note a failed search. The records on display stay as they are.
    pub fn fail(&mut self, ticket: SearchTicket, message: String) -> bool {
        if !self.is_latest(ticket) {
            return false;
        }
        self.last_error = Some(message);
        true
    }
}
