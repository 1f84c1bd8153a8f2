//! Treasury Constants
// The index alignment and target divisor are bound to the reference index oracle's
// reporting format and must be revisited if the index feed changes.

use alloy_primitives::U256;

/// Scale used for fixed point arithmetic
pub const SCALE: u128 = 1_000_000_000_000_000_000; // e18
pub fn scale() -> U256 {
    U256::from(SCALE)
}

/// Numerator of the price ceiling band (target * 105 / 100)
pub const PRICE_CEILING_NUMERATOR: u64 = 105;

/// Denominator of the price ceiling band
pub const PRICE_CEILING_DENOMINATOR: u64 = 100;

/// Factor lifting the reference index from its 8 decimals to the 18 decimals used across the treasury
const INDEX_DECIMALS_ALIGNMENT_RAW: u128 = 10_000_000_000; // e10
pub fn index_decimals_alignment() -> U256 {
    U256::from(INDEX_DECIMALS_ALIGNMENT_RAW)
}

/// Divisor turning the aligned reference index into the peg target price
const TARGET_PRICE_DIVISOR_RAW: u128 = 1_000_000_000_000; // e12
pub fn target_price_divisor() -> U256 {
    U256::from(TARGET_PRICE_DIVISOR_RAW)
}

/// Upper bound of the fund allocation rate, in percent
pub const MAX_FUND_ALLOCATION_RATE: u8 = 100;

/// Memo attached to every community fund deposit
pub const FUND_DEPOSIT_MEMO: &str = "Treasury: Seigniorage Allocation";

/// Number of journal collections kept before the oldest ones are pruned
pub const JOURNAL_CAPACITY: u64 = 300;
