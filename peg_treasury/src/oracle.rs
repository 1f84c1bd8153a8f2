//! Price source of the treasury
//!
//! Wraps the two oracle adapters behind two different error contracts:
//! reads are fail-hard, the price feed refresh is fail-soft.

use alloy_primitives::{Address, U256};

use crate::{
    collaborators::{IndexOracle, PriceOracle},
    constants::{
        index_decimals_alignment, scale, target_price_divisor, PRICE_CEILING_DENOMINATOR,
        PRICE_CEILING_NUMERATOR,
    },
    journal::{JournalCollection, LogType},
    utils::{
        common::mul_div,
        error::{TreasuryError, TreasuryResult},
    },
};

pub struct OraclePriceSource {
    /// The peg asset whose price is consulted
    peg: Address,
    price_oracle: Box<dyn PriceOracle>,
    index_oracle: Box<dyn IndexOracle>,
}

impl OraclePriceSource {
    pub fn new(
        peg: Address,
        price_oracle: Box<dyn PriceOracle>,
        index_oracle: Box<dyn IndexOracle>,
    ) -> Self {
        Self {
            peg,
            price_oracle,
            index_oracle,
        }
    }

    /// Price of one peg asset (1e18 units), as reported by the price feed.
    pub fn consulted_price(&self) -> TreasuryResult<U256> {
        self.price_oracle
            .consult(self.peg, scale())
            .map_err(|err| TreasuryError::OracleConsult(format!("{:?}", err)))
    }

    /// Target price derived from the reference index.
    pub fn target_price(&self) -> TreasuryResult<U256> {
        let index = self
            .index_oracle
            .latest_value()
            .map_err(|err| TreasuryError::OracleRead(format!("{:?}", err)))?;

        mul_div(
            index,
            index_decimals_alignment(),
            target_price_divisor(),
            "Target price",
        )
    }

    /// Target price plus the 5% band, truncated.
    pub fn price_ceiling(&self) -> TreasuryResult<U256> {
        Self::ceiling_of(self.target_price()?)
    }

    /// Applies the ceiling band to an already read target price.
    pub fn ceiling_of(target: U256) -> TreasuryResult<U256> {
        mul_div(
            target,
            U256::from(PRICE_CEILING_NUMERATOR),
            U256::from(PRICE_CEILING_DENOMINATOR),
            "Price ceiling",
        )
    }

    /// Best-effort update of the price feed. A failure is journaled and swallowed.
    /// Returns `true` if the feed accepted the update.
    pub fn refresh(&mut self, journal: &mut JournalCollection) -> bool {
        match self.price_oracle.update() {
            Ok(()) => true,
            Err(err) => {
                journal.append_note(
                    Err(err),
                    LogType::OracleRefresh,
                    "The price oracle refresh failed. Continuing without it.",
                );
                false
            }
        }
    }
}
