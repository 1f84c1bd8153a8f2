mod access;
mod collaborators;
mod constants;
mod epoch;
mod events;
mod guard;
mod journal;
mod lifecycle;
mod oracle;
mod state;
mod treasury;
mod types;
mod utils;

#[cfg(test)]
mod testing;

pub use access::{AccessGate, Capabilities};
pub use collaborators::{
    Checkpoint, Collaborators, CommunityFund, IndexOracle, ManagedToken, Operated, PriceOracle,
    SeigniorageDistributor,
};
pub use constants::{scale, FUND_DEPOSIT_MEMO, JOURNAL_CAPACITY, MAX_FUND_ALLOCATION_RATE, SCALE};
pub use epoch::EpochScheduler;
pub use events::TreasuryEvent;
pub use guard::SlotGuard;
pub use journal::{Journal, JournalCollection, JournalEntry, LogType};
pub use lifecycle::Lifecycle;
pub use oracle::OraclePriceSource;
pub use state::TreasuryState;
pub use treasury::{
    compute_seigniorage, settings::TreasurySettings, split_seigniorage, SeigniorageSplit, Treasury,
};
pub use types::{ExecutionContext, InitArgs, TreasuryQueryData};
pub use utils::error::{TreasuryError, TreasuryResult};
