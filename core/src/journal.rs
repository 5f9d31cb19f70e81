//! In-memory event journal.
//!
//! Append-only record of every DispatchEvent, in emission order. The
//! journal is the determinism witness: two dispatchers fed the same
//! call sequence must hold byte-identical journals. Durable storage is
//! a concern for drivers outside the core.

use crate::{
    error::DispatchResult,
    event::{event_type_name, DispatchEvent},
    types::Tick,
};
use serde::{Deserialize, Serialize};

/// One journal row: the event's JSON payload plus indexing fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub seq:        u64,
    pub tick:       Tick,
    pub event_type: String,
    pub payload:    String, // JSON-serialized DispatchEvent
}

#[derive(Debug, Default, Clone)]
pub struct EventJournal {
    entries: Vec<JournalEntry>,
}

impl EventJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, tick: Tick, event: &DispatchEvent) -> DispatchResult<()> {
        let payload = serde_json::to_string(event)?;
        self.entries.push(JournalEntry {
            seq: self.entries.len() as u64,
            tick,
            event_type: event_type_name(event).to_string(),
            payload,
        });
        Ok(())
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn entries_for_tick(&self, tick: Tick) -> Vec<JournalEntry> {
        self.entries
            .iter()
            .filter(|e| e.tick == tick)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
