use alloy_primitives::Address;

use crate::{
    collaborators::{CommunityFund, ManagedToken},
    constants::MAX_FUND_ALLOCATION_RATE,
    events::TreasuryEvent,
    journal::{JournalCollection, LogType},
    types::ExecutionContext,
    utils::{
        common::only_governance,
        error::{TreasuryError, TreasuryResult},
    },
};

use super::Treasury;

impl Treasury {
    /// One-time activation. Burns the peg balance the treasury holds and
    /// books the burned amount as reserve, bounded by the bond supply.
    pub fn initialize(&mut self, ctx: &ExecutionContext) -> TreasuryResult<Vec<TreasuryEvent>> {
        self.execute("initialize", ctx, |treasury, staged, journal| {
            staged.lifecycle.ensure_not_migrated()?;
            treasury.access.require_managed(&treasury.collaborators)?;
            staged.lifecycle.initialize(ctx.slot)?;

            let address = treasury.settings.address;
            let balance = treasury.collaborators.peg.balance_of(address);
            if !balance.is_zero() {
                treasury.collaborators.peg.burn(address, balance)?;
            }

            let bond_supply = treasury.collaborators.bond.total_supply();
            staged.reserve = balance.min(bond_supply);
            if staged.reserve < balance {
                journal.append_note(
                    Ok(()),
                    LogType::Info,
                    format!(
                        "Burned {} peg. The reserve is bounded by the bond supply of {}.",
                        balance, bond_supply
                    ),
                );
            }

            Ok(vec![TreasuryEvent::Initialized {
                caller: ctx.caller,
                slot: ctx.slot,
            }])
        })
    }

    /// Hands operator role, ownership and balances of the peg, bond and share
    /// ledgers to `successor`. Permanent.
    pub fn migrate(
        &mut self,
        ctx: &ExecutionContext,
        successor: Address,
    ) -> TreasuryResult<Vec<TreasuryEvent>> {
        self.execute("migrate", ctx, |treasury, staged, journal| {
            only_governance(ctx.caller, staged.governance)?;
            if staged.lifecycle.is_migrated() {
                return Err(TreasuryError::AlreadyMigrated);
            }
            treasury.access.require_managed(&treasury.collaborators)?;
            staged.lifecycle.migrate(successor, ctx.slot)?;

            let address = treasury.settings.address;
            let collaborators = &mut treasury.collaborators;
            for (name, token) in [
                ("peg", &mut collaborators.peg),
                ("bond", &mut collaborators.bond),
                ("share", &mut collaborators.share),
            ] {
                hand_over(name, &mut **token, address, successor, journal)?;
            }

            Ok(vec![TreasuryEvent::Migrated { successor }])
        })
    }

    /// Replaces the community fund.
    pub fn set_fund(
        &mut self,
        ctx: &ExecutionContext,
        fund: Box<dyn CommunityFund>,
    ) -> TreasuryResult<Vec<TreasuryEvent>> {
        self.govern("set_fund", ctx, |treasury| {
            let new_fund = fund.address();
            treasury.collaborators.fund = fund;
            Ok(vec![TreasuryEvent::FundChanged {
                caller: ctx.caller,
                new_fund,
            }])
        })
    }

    /// Sets the share of seigniorage routed to the community fund, in percent.
    pub fn set_fund_allocation_rate(
        &mut self,
        ctx: &ExecutionContext,
        rate: u8,
    ) -> TreasuryResult<Vec<TreasuryEvent>> {
        self.govern("set_fund_allocation_rate", ctx, |treasury| {
            if rate > MAX_FUND_ALLOCATION_RATE {
                return Err(TreasuryError::InvalidFundAllocationRate(rate));
            }
            treasury.state.fund_allocation_rate = rate;
            Ok(vec![TreasuryEvent::FundRateChanged {
                caller: ctx.caller,
                new_rate: rate,
            }])
        })
    }

    /// Hands the governance role to `new_governance`.
    pub fn transfer_governance(
        &mut self,
        ctx: &ExecutionContext,
        new_governance: Address,
    ) -> TreasuryResult<Vec<TreasuryEvent>> {
        self.govern("transfer_governance", ctx, |treasury| {
            let previous = treasury.state.governance;
            treasury.state.governance = new_governance;
            Ok(vec![TreasuryEvent::GovernanceTransferred {
                previous,
                new: new_governance,
            }])
        })
    }

    /// Applies a governance-only change. These changes touch no ledger, so
    /// they skip the collaborator checkpoints.
    fn govern<F>(
        &mut self,
        operation: &str,
        ctx: &ExecutionContext,
        change: F,
    ) -> TreasuryResult<Vec<TreasuryEvent>>
    where
        F: FnOnce(&mut Self) -> TreasuryResult<Vec<TreasuryEvent>>,
    {
        let mut journal = JournalCollection::open(operation, ctx);
        let result = only_governance(ctx.caller, self.state.governance).and_then(|_| change(self));

        match &result {
            Ok(events) => {
                for event in events {
                    journal.append_note(
                        Ok(()),
                        LogType::Governance,
                        format!("{} {}", event, event.encoded_payload()),
                    );
                }
            }
            Err(err) => {
                journal.append_note(
                    Err(err.clone()),
                    LogType::Governance,
                    format!("{} rejected.", operation),
                );
            }
        }

        self.journal.commit(journal);
        result
    }
}

fn hand_over(
    name: &str,
    token: &mut dyn ManagedToken,
    treasury: Address,
    successor: Address,
    journal: &mut JournalCollection,
) -> TreasuryResult<()> {
    token.transfer_operator(treasury, successor)?;
    token.transfer_ownership(treasury, successor)?;

    let balance = token.balance_of(treasury);
    if !balance.is_zero() {
        token.transfer(treasury, successor, balance)?;
    }

    journal.append_note(
        Ok(()),
        LogType::Info,
        format!("Handed the {} ledger and {} of its units to {}.", name, balance, successor),
    );
    Ok(())
}
