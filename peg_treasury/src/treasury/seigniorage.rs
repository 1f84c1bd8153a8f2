use alloy_primitives::U256;

use crate::{
    constants::{scale, FUND_DEPOSIT_MEMO, MAX_FUND_ALLOCATION_RATE},
    events::TreasuryEvent,
    journal::LogType,
    oracle::OraclePriceSource,
    types::ExecutionContext,
    utils::{
        common::mul_div,
        error::{arithmetic_err, TreasuryResult},
    },
};

use super::Treasury;

/// Destination of freshly minted seigniorage
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeigniorageSplit {
    pub fund: U256,
    pub treasury: U256,
    pub boardroom: U256,
}

/// Seigniorage owed for an epoch: circulating supply times the relative
/// excess of `price` over `target`. The circulating supply floors at zero
/// when the reserve exceeds the peg supply.
pub fn compute_seigniorage(
    peg_supply: U256,
    reserve: U256,
    price: U256,
    target: U256,
) -> TreasuryResult<U256> {
    let circulating = peg_supply.saturating_sub(reserve);
    let excess = mul_div(price, scale(), target, "Price ratio")?
        .checked_sub(scale())
        .ok_or_else(|| arithmetic_err("The price is below its target."))?;

    mul_div(circulating, excess, scale(), "Seigniorage")
}

/// Splits `seigniorage` between the community fund, the bond reserve and the
/// boardroom. The reserve never grows beyond `bond_supply`.
pub fn split_seigniorage(
    seigniorage: U256,
    fund_allocation_rate: u8,
    bond_supply: U256,
    reserve: U256,
) -> TreasuryResult<SeigniorageSplit> {
    let fund = mul_div(
        seigniorage,
        U256::from(fund_allocation_rate),
        U256::from(MAX_FUND_ALLOCATION_RATE),
        "Fund reserve",
    )?;
    let remaining = seigniorage
        .checked_sub(fund)
        .ok_or_else(|| arithmetic_err("The fund reserve exceeds the seigniorage."))?;
    let treasury = remaining.min(bond_supply.saturating_sub(reserve));

    Ok(SeigniorageSplit {
        fund,
        treasury,
        boardroom: remaining - treasury,
    })
}

impl Treasury {
    /// Advances the epoch and, if the peg trades above its ceiling, mints
    /// seigniorage and distributes it.
    ///
    /// A due epoch below the ceiling is consumed without minting.
    pub fn allocate_seigniorage(
        &mut self,
        ctx: &ExecutionContext,
    ) -> TreasuryResult<Vec<TreasuryEvent>> {
        self.execute("allocate_seigniorage", ctx, |treasury, staged, journal| {
            staged.guard.try_enter(ctx.slot)?;
            staged.lifecycle.ensure_not_migrated()?;
            let epoch = staged.scheduler.try_advance(ctx.now)?;
            treasury.access.require_managed(&treasury.collaborators)?;

            treasury.oracle.refresh(journal);
            let price = treasury.oracle.consulted_price()?;
            let target = treasury.oracle.target_price()?;
            let ceiling = OraclePriceSource::ceiling_of(target)?;
            if price <= ceiling {
                journal.append_note(
                    Ok(()),
                    LogType::Info,
                    format!(
                        "Epoch {}: price {} is not above the ceiling {}. Nothing to allocate.",
                        epoch, price, ceiling
                    ),
                );
                return Ok(vec![]);
            }

            let address = treasury.settings.address;
            let peg_supply = treasury.collaborators.peg.total_supply();
            let seigniorage = compute_seigniorage(peg_supply, staged.reserve, price, target)?;
            if seigniorage.is_zero() {
                journal.append_note(
                    Ok(()),
                    LogType::Info,
                    format!("Epoch {}: no circulating supply to expand.", epoch),
                );
                return Ok(vec![]);
            }
            treasury.collaborators.peg.mint(address, address, seigniorage)?;

            let bond_supply = treasury.collaborators.bond.total_supply();
            let split = split_seigniorage(
                seigniorage,
                staged.fund_allocation_rate,
                bond_supply,
                staged.reserve,
            )?;

            let mut events = vec![];
            if !split.fund.is_zero() {
                let fund = treasury.collaborators.fund.address();
                let peg = treasury.collaborators.peg.address();
                treasury.collaborators.peg.approve(address, fund, split.fund)?;
                treasury
                    .collaborators
                    .fund
                    .deposit(address, peg, split.fund, FUND_DEPOSIT_MEMO)?;
                events.push(TreasuryEvent::FundFunded {
                    time: ctx.now,
                    amount: split.fund,
                });
            }

            if !split.treasury.is_zero() {
                staged.reserve += split.treasury;
                events.push(TreasuryEvent::TreasuryFunded {
                    time: ctx.now,
                    amount: split.treasury,
                });
            }

            if !split.boardroom.is_zero() {
                let distributor = treasury.collaborators.distributor.address();
                treasury
                    .collaborators
                    .peg
                    .approve(address, distributor, split.boardroom)?;
                treasury
                    .collaborators
                    .distributor
                    .allocate_seigniorage(address, split.boardroom)?;
                events.push(TreasuryEvent::BoardroomFunded {
                    time: ctx.now,
                    amount: split.boardroom,
                });
            }

            journal.append_note(
                Ok(()),
                LogType::Info,
                format!(
                    "Epoch {}: minted {} at price {} (fund {}, reserve {}, boardroom {}).",
                    epoch, seigniorage, price, split.fund, split.treasury, split.boardroom
                ),
            );

            Ok(events)
        })
    }
}
