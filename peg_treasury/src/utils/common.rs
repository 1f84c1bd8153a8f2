//! Common utility and helper functions that are used across the project

use std::str::FromStr;

use alloy_primitives::{Address, U256};
use candid::Nat;
use num_bigint::BigUint;

use super::error::*;

/// Returns Err if the `caller` is not the governance account
pub fn only_governance(caller: Address, governance: Address) -> TreasuryResult<()> {
    if caller != governance {
        // only governance should be able to call this function
        return Err(TreasuryError::Unauthorized);
    }
    Ok(())
}

/// Converts String to Address and returns TreasuryError on failure
pub fn string_to_address(input: String) -> TreasuryResult<Address> {
    Address::from_str(&input).map_err(|err| TreasuryError::DecodingError(format!("{:#?}", err)))
}

/// Converts values of type `U256` to `Nat`
pub fn u256_to_nat(value: &U256) -> Nat {
    Nat(BigUint::from_bytes_be(&value.to_be_bytes::<32>()))
}

/// Computes `a * b / denominator` with overflow and division-by-zero checks.
/// `context` names the quantity for the error message.
pub fn mul_div(a: U256, b: U256, denominator: U256, context: &str) -> TreasuryResult<U256> {
    a.checked_mul(b)
        .ok_or_else(|| arithmetic_err(format!("{} overflowed.", context)))?
        .checked_div(denominator)
        .ok_or_else(|| arithmetic_err(format!("{} has a zero denominator.", context)))
}
