use candid::CandidType;
use serde::Deserialize;

/// Treasury Result
pub type TreasuryResult<T> = Result<T, TreasuryError>;

/// Treasury Errors
#[derive(Clone, CandidType, Debug, Deserialize, PartialEq)]
pub enum TreasuryError {
    /// `initialize` was already executed on this instance
    AlreadyInitialized,
    /// `migrate` was already executed on this instance
    AlreadyMigrated,
    /// The instance was migrated and is permanently inert
    MigratedInstance,
    /// The treasury does not hold the operator (or owner) capability of a collaborator
    InsufficientPermission { entity: String },
    /// The caller is not the governance account
    Unauthorized,
    /// The epoch schedule has not started yet
    EpochNotStarted { start_time: u64 },
    /// The next epoch point has not been reached yet
    EpochNotDue { next_epoch_point: u64 },
    /// The consulted price differs from the price quoted by the caller
    PriceMoved { expected: String, actual: String },
    /// Bonds can only be bought below the target price
    AboveTarget { price: String, target: String },
    /// Bonds can only be redeemed above the price ceiling
    BelowCeiling { price: String, ceiling: String },
    /// A zero amount was supplied
    ZeroAmount,
    /// The treasury does not hold enough of the peg asset to pay out
    InsufficientBudget { requested: String, available: String },
    /// A mutating operation already ran in this execution slot
    ReentrantSlot { slot: u64 },
    /// The price oracle could not produce a consulted price
    OracleConsult(String),
    /// The reference index oracle could not be read
    OracleRead(String),
    /// The fund allocation rate is above 100 percent
    InvalidFundAllocationRate(u8),
    /// The epoch schedule parameters are unusable
    InvalidSchedule(String),
    /// A managed ledger, the fund or the distributor rejected a call
    Collaborator(String),
    /// Decoding issue
    DecodingError(String),
    /// Arithmetic error
    Arithmetic(String),
}

impl TreasuryError {
    /// Returns `true` for errors of tripped one-way latches that can never succeed on retry.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            TreasuryError::AlreadyInitialized
                | TreasuryError::AlreadyMigrated
                | TreasuryError::MigratedInstance
        )
    }
}

pub fn arithmetic_err<S: AsRef<str>>(s: S) -> TreasuryError {
    TreasuryError::Arithmetic(format!("{:#?}", s.as_ref()))
}

pub fn collaborator_err<S: AsRef<str>>(s: S) -> TreasuryError {
    TreasuryError::Collaborator(s.as_ref().to_string())
}
