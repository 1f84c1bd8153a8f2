use alloy_primitives::U256;

use crate::{
    constants::scale,
    events::TreasuryEvent,
    journal::LogType,
    types::ExecutionContext,
    utils::{
        common::mul_div,
        error::{TreasuryError, TreasuryResult},
    },
};

use super::Treasury;

impl Treasury {
    /// Burns `amount` peg asset of the caller in exchange for bonds, while the
    /// peg trades below its target price.
    ///
    /// `expected_price` must equal the currently consulted price.
    pub fn buy_bonds(
        &mut self,
        ctx: &ExecutionContext,
        amount: U256,
        expected_price: U256,
    ) -> TreasuryResult<Vec<TreasuryEvent>> {
        self.execute("buy_bonds", ctx, |treasury, staged, journal| {
            treasury.enter_market(staged, ctx)?;
            if amount.is_zero() {
                return Err(TreasuryError::ZeroAmount);
            }

            let price = treasury.oracle.consulted_price()?;
            let target = treasury.oracle.target_price()?;
            if price != expected_price {
                return Err(TreasuryError::PriceMoved {
                    expected: expected_price.to_string(),
                    actual: price.to_string(),
                });
            }
            if price >= target {
                return Err(TreasuryError::AboveTarget {
                    price: price.to_string(),
                    target: target.to_string(),
                });
            }

            let bond_price = mul_div(price, scale(), target, "Bond price")?;
            let bonds = mul_div(amount, scale(), bond_price, "Bond amount")?;

            let address = treasury.settings.address;
            treasury
                .collaborators
                .peg
                .burn_from(address, ctx.caller, amount)?;
            treasury.collaborators.bond.mint(address, ctx.caller, bonds)?;
            treasury.oracle.refresh(journal);

            journal.append_note(
                Ok(()),
                LogType::Info,
                format!(
                    "Burned {} peg for {} bonds at price {} against target {}.",
                    amount, bonds, price, target
                ),
            );

            Ok(vec![TreasuryEvent::BondsBought {
                caller: ctx.caller,
                amount,
            }])
        })
    }

    /// Redeems `amount` bonds of the caller 1:1 for peg asset held by the
    /// treasury, while the peg trades above the price ceiling.
    ///
    /// `expected_price` must equal the currently consulted price.
    pub fn redeem_bonds(
        &mut self,
        ctx: &ExecutionContext,
        amount: U256,
        expected_price: U256,
    ) -> TreasuryResult<Vec<TreasuryEvent>> {
        self.execute("redeem_bonds", ctx, |treasury, staged, journal| {
            treasury.enter_market(staged, ctx)?;
            if amount.is_zero() {
                return Err(TreasuryError::ZeroAmount);
            }

            let price = treasury.oracle.consulted_price()?;
            if price != expected_price {
                return Err(TreasuryError::PriceMoved {
                    expected: expected_price.to_string(),
                    actual: price.to_string(),
                });
            }
            let ceiling = treasury.oracle.price_ceiling()?;
            if price <= ceiling {
                return Err(TreasuryError::BelowCeiling {
                    price: price.to_string(),
                    ceiling: ceiling.to_string(),
                });
            }

            let address = treasury.settings.address;
            let available = treasury.collaborators.peg.balance_of(address);
            if available < amount {
                return Err(TreasuryError::InsufficientBudget {
                    requested: amount.to_string(),
                    available: available.to_string(),
                });
            }

            staged.reserve -= staged.reserve.min(amount);
            treasury
                .collaborators
                .bond
                .burn_from(address, ctx.caller, amount)?;
            treasury.collaborators.peg.transfer(address, ctx.caller, amount)?;
            treasury.oracle.refresh(journal);

            journal.append_note(
                Ok(()),
                LogType::Info,
                format!(
                    "Redeemed {} bonds at price {} against ceiling {}. Reserve is now {}.",
                    amount, price, ceiling, staged.reserve
                ),
            );

            Ok(vec![TreasuryEvent::BondsRedeemed {
                caller: ctx.caller,
                amount,
            }])
        })
    }
}
