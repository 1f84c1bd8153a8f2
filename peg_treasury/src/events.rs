//! Records emitted by treasury operations

use std::fmt;

use alloy_primitives::{Address, LogData, U256};
use alloy_sol_types::{sol, SolEvent};

sol!(
    // Treasury lifecycle
    event Initialized(address indexed executor, uint256 at);
    event Migrated(address indexed target);

    // Governance
    event FundChanged(address indexed executor, address newFund);
    event FundRateChanged(address indexed executor, uint256 newRate);
    event GovernanceTransferred(address indexed previousGovernance, address indexed newGovernance);

    // Bonds
    event BoughtBonds(address indexed from, uint256 amount);
    event RedeemedBonds(address indexed from, uint256 amount);

    // Seigniorage
    event TreasuryFunded(uint256 timestamp, uint256 seigniorage);
    event FundFunded(uint256 timestamp, uint256 seigniorage);
    event BoardroomFunded(uint256 timestamp, uint256 seigniorage);
);

/// A record emitted by a successful treasury operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreasuryEvent {
    Initialized { caller: Address, slot: u64 },
    Migrated { successor: Address },
    FundChanged { caller: Address, new_fund: Address },
    FundRateChanged { caller: Address, new_rate: u8 },
    GovernanceTransferred { previous: Address, new: Address },
    BondsBought { caller: Address, amount: U256 },
    BondsRedeemed { caller: Address, amount: U256 },
    TreasuryFunded { time: u64, amount: U256 },
    FundFunded { time: u64, amount: U256 },
    BoardroomFunded { time: u64, amount: U256 },
}

impl TreasuryEvent {
    /// Encodes the record as EVM log data (topics and ABI-encoded payload)
    pub fn encode_log_data(&self) -> LogData {
        match self {
            TreasuryEvent::Initialized { caller, slot } => Initialized {
                executor: *caller,
                at: U256::from(*slot),
            }
            .encode_log_data(),
            TreasuryEvent::Migrated { successor } => Migrated { target: *successor }.encode_log_data(),
            TreasuryEvent::FundChanged { caller, new_fund } => FundChanged {
                executor: *caller,
                newFund: *new_fund,
            }
            .encode_log_data(),
            TreasuryEvent::FundRateChanged { caller, new_rate } => FundRateChanged {
                executor: *caller,
                newRate: U256::from(*new_rate),
            }
            .encode_log_data(),
            TreasuryEvent::GovernanceTransferred { previous, new } => GovernanceTransferred {
                previousGovernance: *previous,
                newGovernance: *new,
            }
            .encode_log_data(),
            TreasuryEvent::BondsBought { caller, amount } => BoughtBonds {
                from: *caller,
                amount: *amount,
            }
            .encode_log_data(),
            TreasuryEvent::BondsRedeemed { caller, amount } => RedeemedBonds {
                from: *caller,
                amount: *amount,
            }
            .encode_log_data(),
            TreasuryEvent::TreasuryFunded { time, amount } => TreasuryFunded {
                timestamp: U256::from(*time),
                seigniorage: *amount,
            }
            .encode_log_data(),
            TreasuryEvent::FundFunded { time, amount } => FundFunded {
                timestamp: U256::from(*time),
                seigniorage: *amount,
            }
            .encode_log_data(),
            TreasuryEvent::BoardroomFunded { time, amount } => BoardroomFunded {
                timestamp: U256::from(*time),
                seigniorage: *amount,
            }
            .encode_log_data(),
        }
    }

    /// ABI payload of the log as a `0x` prefixed hex string
    pub fn encoded_payload(&self) -> String {
        format!("0x{}", hex::encode(&self.encode_log_data().data))
    }
}

impl fmt::Display for TreasuryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreasuryEvent::Initialized { caller, slot } => {
                write!(f, "Initialized(caller: {}, slot: {})", caller, slot)
            }
            TreasuryEvent::Migrated { successor } => write!(f, "Migrated(successor: {})", successor),
            TreasuryEvent::FundChanged { caller, new_fund } => {
                write!(f, "FundChanged(caller: {}, new_fund: {})", caller, new_fund)
            }
            TreasuryEvent::FundRateChanged { caller, new_rate } => {
                write!(f, "FundRateChanged(caller: {}, new_rate: {})", caller, new_rate)
            }
            TreasuryEvent::GovernanceTransferred { previous, new } => {
                write!(f, "GovernanceTransferred(previous: {}, new: {})", previous, new)
            }
            TreasuryEvent::BondsBought { caller, amount } => {
                write!(f, "BondsBought(caller: {}, amount: {})", caller, amount)
            }
            TreasuryEvent::BondsRedeemed { caller, amount } => {
                write!(f, "BondsRedeemed(caller: {}, amount: {})", caller, amount)
            }
            TreasuryEvent::TreasuryFunded { time, amount } => {
                write!(f, "TreasuryFunded(time: {}, amount: {})", time, amount)
            }
            TreasuryEvent::FundFunded { time, amount } => {
                write!(f, "FundFunded(time: {}, amount: {})", time, amount)
            }
            TreasuryEvent::BoardroomFunded { time, amount } => {
                write!(f, "BoardroomFunded(time: {}, amount: {})", time, amount)
            }
        }
    }
}
