//! The treasury: bonds, seigniorage allocation and governance
//!
//! ```text
//!            +-----------------+      failure      +------------------+
//!  call ---> | staged = state  | ----------------> | rollback ledgers |
//!            | checkpoint all  |                   | discard staged   |
//!            +-----------------+                   +------------------+
//!                    |                                      |
//!                    | success                              |
//!                    v                                      v
//!            +-----------------+                   +------------------+
//!            | state = staged  | ----------------> | commit journal   |
//!            | commit ledgers  |                   +------------------+
//!            +-----------------+
//! ```
//!
//! Every operation either applies all of its effects or none of them. The
//! guard slot is part of the staged state, so a failed call does not consume
//! its slot.

mod bonds;
mod governance;
mod seigniorage;
pub mod settings;

pub use seigniorage::{compute_seigniorage, split_seigniorage, SeigniorageSplit};

use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};

use crate::{
    access::AccessGate,
    collaborators::{Collaborators, IndexOracle, PriceOracle},
    epoch::EpochScheduler,
    events::TreasuryEvent,
    journal::{Journal, JournalCollection, LogType},
    lifecycle::Lifecycle,
    oracle::OraclePriceSource,
    state::TreasuryState,
    types::{ExecutionContext, TreasuryQueryData},
    utils::{common::u256_to_nat, error::TreasuryResult},
};

use self::settings::TreasurySettings;

pub struct Treasury {
    settings: TreasurySettings,
    state: TreasuryState,
    collaborators: Collaborators,
    oracle: OraclePriceSource,
    access: AccessGate,
    journal: Journal,
}

impl Treasury {
    /// Creates an uninitialized treasury over the given collaborators.
    pub fn new(
        settings: TreasurySettings,
        collaborators: Collaborators,
        price_oracle: Box<dyn PriceOracle>,
        index_oracle: Box<dyn IndexOracle>,
    ) -> TreasuryResult<Self> {
        settings.validate()?;
        let scheduler = EpochScheduler::new(settings.period, settings.start_time)?;
        let state = TreasuryState::new(
            settings.governance,
            settings.fund_allocation_rate,
            scheduler,
        );
        let oracle = OraclePriceSource::new(collaborators.peg.address(), price_oracle, index_oracle);

        Ok(Self {
            access: AccessGate::new(settings.address),
            settings,
            state,
            collaborators,
            oracle,
            journal: Journal::default(),
        })
    }

    /// Replaces the in-memory journal, e.g. with one loaded from stable memory.
    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }

    /// Runs `body` against a staged copy of the state. The staged state and
    /// all collaborator changes are kept only if `body` succeeds.
    fn execute<F>(
        &mut self,
        operation: &str,
        ctx: &ExecutionContext,
        body: F,
    ) -> TreasuryResult<Vec<TreasuryEvent>>
    where
        F: FnOnce(
            &mut Self,
            &mut TreasuryState,
            &mut JournalCollection,
        ) -> TreasuryResult<Vec<TreasuryEvent>>,
    {
        let mut journal = JournalCollection::open(operation, ctx);
        let mut staged = self.state.clone();

        self.collaborators.checkpoint();
        let result = body(self, &mut staged, &mut journal);

        match &result {
            Ok(events) => {
                self.collaborators.commit();
                self.state = staged;
                for event in events {
                    journal.append_note(
                        Ok(()),
                        LogType::Event,
                        format!("{} {}", event, event.encoded_payload()),
                    );
                }
                journal.append_note(Ok(()), LogType::Operation, format!("{} succeeded.", operation));
            }
            Err(err) => {
                self.collaborators.rollback();
                let note = if err.is_permanent() {
                    format!("{} can never succeed on this instance.", operation)
                } else {
                    format!("{} failed. No change was applied.", operation)
                };
                journal.append_note(Err(err.clone()), LogType::Operation, note);
            }
        }

        self.journal.commit(journal);
        result
    }

    // Queries

    /// Address of the treasury itself
    pub fn address(&self) -> Address {
        self.settings.address
    }

    pub fn reserve(&self) -> U256 {
        self.state.reserve
    }

    pub fn fund_allocation_rate(&self) -> u8 {
        self.state.fund_allocation_rate
    }

    pub fn governance(&self) -> Address {
        self.state.governance
    }

    /// Address of the community fund currently in use
    pub fn fund(&self) -> Address {
        self.collaborators.fund.address()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.state.lifecycle
    }

    pub fn is_initialized(&self) -> bool {
        self.state.lifecycle.is_initialized()
    }

    pub fn is_migrated(&self) -> bool {
        self.state.lifecycle.is_migrated()
    }

    pub fn current_epoch(&self, now: u64) -> u64 {
        self.state.scheduler.current_epoch(now)
    }

    pub fn next_epoch_point(&self) -> u64 {
        self.state.scheduler.next_epoch_point()
    }

    /// Epoch length in seconds
    pub fn period(&self) -> u64 {
        self.state.scheduler.period()
    }

    pub fn start_time(&self) -> u64 {
        self.state.scheduler.start_time()
    }

    pub fn consulted_price(&self) -> TreasuryResult<U256> {
        self.oracle.consulted_price()
    }

    pub fn target_price(&self) -> TreasuryResult<U256> {
        self.oracle.target_price()
    }

    pub fn price_ceiling(&self) -> TreasuryResult<U256> {
        self.oracle.price_ceiling()
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Snapshot of the treasury at time `now`. Oracle failures leave the
    /// price fields empty instead of failing the query.
    pub fn query(&self, now: u64) -> TreasuryQueryData {
        let next_epoch_point = self.next_epoch_point();
        let next_epoch_at = i64::try_from(next_epoch_point)
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .map(|time| time.to_rfc3339());

        TreasuryQueryData {
            treasury: self.address().to_string(),
            governance: self.governance().to_string(),
            fund: self.fund().to_string(),
            lifecycle: self.lifecycle().to_string(),
            reserve: u256_to_nat(&self.reserve()),
            fund_allocation_rate: self.fund_allocation_rate(),
            current_epoch: self.current_epoch(now),
            next_epoch_point,
            next_epoch_at,
            period: self.period(),
            start_time: self.start_time(),
            consulted_price: self.consulted_price().ok().as_ref().map(u256_to_nat),
            target_price: self.target_price().ok().as_ref().map(u256_to_nat),
        }
    }

    /// Guard, lifecycle, schedule and capability checks shared by the bond
    /// operations.
    fn enter_market(&self, staged: &mut TreasuryState, ctx: &ExecutionContext) -> TreasuryResult<()> {
        staged.guard.try_enter(ctx.slot)?;
        staged.lifecycle.ensure_not_migrated()?;
        staged.scheduler.ensure_started(ctx.now)?;
        self.access.require_managed(&self.collaborators)
    }
}
