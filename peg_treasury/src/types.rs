use alloy_primitives::Address;
use candid::{CandidType, Nat};
use serde::Deserialize;

use crate::utils::error::{TreasuryError, TreasuryResult};

/// Caller, execution slot and wall-clock time of one call into the treasury
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExecutionContext {
    /// The account invoking the operation
    pub caller: Address,
    /// Indivisible execution slot (e.g. the block number)
    pub slot: u64,
    /// Current time in seconds
    pub now: u64,
}

impl ExecutionContext {
    pub fn new(caller: Address, slot: u64, now: u64) -> Self {
        Self { caller, slot, now }
    }
}

/// Deployment arguments of a treasury
#[derive(CandidType, Clone, Debug, Deserialize)]
pub struct InitArgs {
    /// Address of the treasury itself
    pub treasury: String,
    /// Governance account allowed to reconfigure and migrate the treasury
    pub governance: String,
    /// Timestamp in seconds at which the epoch schedule starts
    pub start_time: u64,
    /// Epoch length in seconds
    pub period_secs: u64,
    /// Initial fund allocation rate in percent
    pub fund_allocation_rate: u8,
}

impl InitArgs {
    /// Parses the deployment arguments from JSON
    pub fn from_json(json: &str) -> TreasuryResult<Self> {
        serde_json::from_str(json).map_err(|err| {
            TreasuryError::DecodingError(format!("Could not decode the init arguments: {}", err))
        })
    }
}

/// Snapshot of the treasury state returned by queries
#[derive(CandidType, Clone, Debug, Deserialize, PartialEq)]
pub struct TreasuryQueryData {
    pub treasury: String,
    pub governance: String,
    pub fund: String,
    pub lifecycle: String,
    pub reserve: Nat,
    pub fund_allocation_rate: u8,
    pub current_epoch: u64,
    pub next_epoch_point: u64,
    /// `next_epoch_point` rendered as RFC 3339
    pub next_epoch_at: Option<String>,
    pub period: u64,
    pub start_time: u64,
    /// `None` if the price oracle can currently not be consulted
    pub consulted_price: Option<Nat>,
    /// `None` if the reference index can currently not be read
    pub target_price: Option<Nat>,
}
