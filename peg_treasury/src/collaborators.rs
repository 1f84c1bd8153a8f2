//! Interfaces of the external collaborators driven by the treasury.
//!
//! The treasury never implements token accounting, oracle smoothing or reward
//! distribution itself. It only talks to these boundaries:
//! - [`ManagedToken`]: the peg, bond and share ledgers
//! - [`PriceOracle`]: the smoothed price feed of the peg asset
//! - [`IndexOracle`]: the reference index the target price is derived from
//! - [`SeigniorageDistributor`]: the staking distributor ("boardroom")
//! - [`CommunityFund`]: the community fund
//!
//! Every mutating call receives the address of the caller so that the
//! collaborator can enforce its own access control.

use alloy_primitives::{Address, U256};

use crate::utils::error::TreasuryResult;

/// Rollback support for a collaborator mutated during an operation.
///
/// The treasury checkpoints every mutable collaborator before its first call,
/// then either commits or rolls back all of them together.
pub trait Checkpoint {
    /// Opens a checkpoint of the current state.
    fn checkpoint(&mut self);
    /// Discards the latest checkpoint and keeps the current state.
    fn commit(&mut self);
    /// Restores the state captured by the latest checkpoint.
    fn rollback(&mut self);
}

/// Operator and owner capabilities of a collaborator.
pub trait Operated {
    /// The address of the collaborator
    fn address(&self) -> Address;
    /// The current holder of the operator capability
    fn operator(&self) -> Address;
    /// The current holder of the owner capability, if the collaborator has one
    fn owner(&self) -> Option<Address>;
}

/// Mintable and burnable ledger with a two-role access control.
pub trait ManagedToken: Operated + Checkpoint {
    fn total_supply(&self) -> U256;
    fn balance_of(&self, holder: Address) -> U256;
    fn mint(&mut self, caller: Address, to: Address, amount: U256) -> TreasuryResult<()>;
    fn burn(&mut self, caller: Address, amount: U256) -> TreasuryResult<()>;
    /// Burns `amount` from `holder`, consuming the allowance granted to `caller`.
    fn burn_from(&mut self, caller: Address, holder: Address, amount: U256) -> TreasuryResult<()>;
    fn transfer(&mut self, caller: Address, to: Address, amount: U256) -> TreasuryResult<()>;
    fn approve(&mut self, caller: Address, spender: Address, amount: U256) -> TreasuryResult<()>;
    fn transfer_operator(&mut self, caller: Address, new_operator: Address) -> TreasuryResult<()>;
    fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> TreasuryResult<()>;
}

/// Smoothed price feed of the peg asset.
#[cfg_attr(test, mockall::automock)]
pub trait PriceOracle {
    /// Returns how much of the quote asset `amount_in` of `token` is worth.
    /// Fails while the feed cannot produce a value, e.g. before its observation window filled up.
    fn consult(&self, token: Address, amount_in: U256) -> TreasuryResult<U256>;
    /// Runs the feed's own update step.
    fn update(&mut self) -> TreasuryResult<()>;
}

/// Reference index feed, reported with 8 decimals.
#[cfg_attr(test, mockall::automock)]
pub trait IndexOracle {
    fn latest_value(&self) -> TreasuryResult<U256>;
}

/// Staking distributor that receives seigniorage through a pre-approved transfer.
pub trait SeigniorageDistributor: Operated + Checkpoint {
    fn allocate_seigniorage(&mut self, caller: Address, amount: U256) -> TreasuryResult<()>;
}

/// Community fund that receives seigniorage through a pre-approved transfer.
pub trait CommunityFund: Checkpoint {
    fn address(&self) -> Address;
    fn deposit(
        &mut self,
        caller: Address,
        token: Address,
        amount: U256,
        memo: &str,
    ) -> TreasuryResult<()>;
}

/// The managed ledgers and the seigniorage sinks of one treasury.
pub struct Collaborators {
    pub peg: Box<dyn ManagedToken>,
    pub bond: Box<dyn ManagedToken>,
    pub share: Box<dyn ManagedToken>,
    pub distributor: Box<dyn SeigniorageDistributor>,
    pub fund: Box<dyn CommunityFund>,
}

impl Collaborators {
    /// Opens a checkpoint on every mutable collaborator.
    pub fn checkpoint(&mut self) {
        self.peg.checkpoint();
        self.bond.checkpoint();
        self.share.checkpoint();
        self.distributor.checkpoint();
        self.fund.checkpoint();
    }

    /// Keeps every change made since the last checkpoint.
    pub fn commit(&mut self) {
        self.peg.commit();
        self.bond.commit();
        self.share.commit();
        self.distributor.commit();
        self.fund.commit();
    }

    /// Reverts every collaborator to its last checkpoint.
    pub fn rollback(&mut self) {
        self.peg.rollback();
        self.bond.rollback();
        self.share.rollback();
        self.distributor.rollback();
        self.fund.rollback();
    }
}
