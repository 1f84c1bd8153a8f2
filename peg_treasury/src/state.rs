//! Mutable state of a treasury instance

use alloy_primitives::{Address, U256};

use crate::{epoch::EpochScheduler, guard::SlotGuard, lifecycle::Lifecycle};

/// Everything a treasury operation may change, apart from the collaborators.
///
/// Operations run against a staged clone of this struct that replaces the
/// live state only once the whole operation succeeded.
#[derive(Clone, Debug, PartialEq)]
pub struct TreasuryState {
    /// Peg asset notionally set aside to back outstanding bonds
    pub reserve: U256,
    /// Share of new seigniorage routed to the community fund, in percent
    pub fund_allocation_rate: u8,
    /// Governance account
    pub governance: Address,
    pub lifecycle: Lifecycle,
    pub scheduler: EpochScheduler,
    pub guard: SlotGuard,
}

impl TreasuryState {
    pub fn new(governance: Address, fund_allocation_rate: u8, scheduler: EpochScheduler) -> Self {
        Self {
            reserve: U256::ZERO,
            fund_allocation_rate,
            governance,
            lifecycle: Lifecycle::default(),
            scheduler,
            guard: SlotGuard::default(),
        }
    }
}
