//! Operation journal
//!
//! Every treasury operation opens a [`JournalCollection`], appends notes while
//! it runs and commits the collection to the instance's [`Journal`], whether
//! the operation succeeded or not. The journal lives in stable memory and is
//! pruned to the most recent [`JOURNAL_CAPACITY`] collections.

use std::borrow::Cow;

use candid::{CandidType, Decode, Encode};
use ic_stable_structures::{storable::Bound, BTreeMap as StableBTreeMap, DefaultMemoryImpl, Storable};
use serde::Deserialize;

use crate::{
    constants::JOURNAL_CAPACITY,
    types::ExecutionContext,
    utils::error::TreasuryResult,
};

/// Log type
#[derive(Clone, CandidType, Debug, Deserialize, PartialEq)]
pub enum LogType {
    Info,
    /// Outcome of an operation
    Operation,
    /// A record emitted by an operation
    Event,
    /// Best-effort oracle refresh
    OracleRefresh,
    /// Governance change
    Governance,
}

/// Journal entry
#[derive(Clone, CandidType, Debug, Deserialize)]
pub struct JournalEntry {
    pub timestamp: u64,
    pub entry: TreasuryResult<()>,
    pub log_type: LogType,
    pub note: Option<String>,
}

/// All journal entries of one operation
#[derive(Clone, CandidType, Debug, Deserialize)]
pub struct JournalCollection {
    pub operation: String,
    pub caller: String,
    pub slot: u64,
    pub timestamp: u64,
    pub entries: Vec<JournalEntry>,
}

impl JournalCollection {
    /// Opens a new collection for `operation` executed under `ctx`
    pub fn open<S: AsRef<str>>(operation: S, ctx: &ExecutionContext) -> Self {
        Self {
            operation: operation.as_ref().to_string(),
            caller: ctx.caller.to_string(),
            slot: ctx.slot,
            timestamp: ctx.now,
            entries: vec![],
        }
    }

    /// Appends a note to the collection
    pub fn append_note<S: AsRef<str>>(
        &mut self,
        entry: TreasuryResult<()>,
        log_type: LogType,
        note: S,
    ) -> &mut Self {
        self.entries.push(JournalEntry {
            timestamp: self.timestamp,
            entry,
            log_type,
            note: Some(note.as_ref().to_string()),
        });
        self
    }

    /// Returns `true` if any entry of the collection carries an error
    pub fn has_failure(&self) -> bool {
        self.entries.iter().any(|entry| entry.entry.is_err())
    }

    /// Returns the entries of the given type
    pub fn entries_of(&self, log_type: LogType) -> impl Iterator<Item = &JournalEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.log_type == log_type)
    }
}

impl Storable for JournalCollection {
    fn to_bytes(&self) -> std::borrow::Cow<[u8]> {
        Cow::Owned(Encode!(self).unwrap())
    }

    fn from_bytes(bytes: std::borrow::Cow<[u8]>) -> Self {
        Decode!(bytes.as_ref(), Self).unwrap()
    }

    const BOUND: Bound = Bound::Unbounded;
}

/// Stable-memory journal owned by one treasury instance
pub struct Journal {
    collections: StableBTreeMap<u64, JournalCollection, DefaultMemoryImpl>,
    next_key: u64,
}

impl Default for Journal {
    fn default() -> Self {
        Self::init(DefaultMemoryImpl::default())
    }
}

impl Journal {
    /// Loads (or creates) a journal in the given memory
    pub fn init(memory: DefaultMemoryImpl) -> Self {
        let collections = StableBTreeMap::init(memory);
        let next_key = collections
            .iter()
            .last()
            .map_or(0, |(key, _)| key + 1);
        Self {
            collections,
            next_key,
        }
    }

    /// Commits a collection and prunes the oldest ones beyond the capacity
    pub fn commit(&mut self, collection: JournalCollection) {
        self.collections.insert(self.next_key, collection);
        self.next_key += 1;
        self.prune();
    }

    /// Number of collections currently stored
    pub fn len(&self) -> u64 {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Returns the stored collections, oldest first
    pub fn collections(&self) -> Vec<JournalCollection> {
        self.collections
            .iter()
            .map(|(_, collection)| collection)
            .collect()
    }

    /// Returns the most recent collection
    pub fn last(&self) -> Option<JournalCollection> {
        self.collections
            .iter()
            .last()
            .map(|(_, collection)| collection)
    }

    fn prune(&mut self) {
        while self.collections.len() > JOURNAL_CAPACITY {
            let oldest = self.collections.iter().next().map(|(key, _)| key);
            match oldest {
                Some(key) => {
                    self.collections.remove(&key);
                }
                None => break,
            }
        }
    }
}
