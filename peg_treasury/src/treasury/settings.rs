//! Deployment settings of a treasury

use alloy_primitives::Address;
use chrono::Duration;

use crate::{
    constants::MAX_FUND_ALLOCATION_RATE,
    types::InitArgs,
    utils::{
        common::string_to_address,
        error::{TreasuryError, TreasuryResult},
    },
};

/// Settings fixed at construction time, apart from the governance account and
/// the fund allocation rate that governance may change later on.
#[derive(Clone, Debug)]
pub struct TreasurySettings {
    /// Address of the treasury itself
    pub address: Address,
    /// Governance account
    pub governance: Address,
    /// Timestamp in seconds at which the epoch schedule starts
    pub start_time: u64,
    /// Epoch length
    pub period: Duration,
    /// Initial fund allocation rate in percent
    pub fund_allocation_rate: u8,
}

impl Default for TreasurySettings {
    fn default() -> Self {
        Self {
            address: Address::ZERO,
            governance: Address::ZERO,
            start_time: 0,
            period: Duration::days(1),
            fund_allocation_rate: 0,
        }
    }
}

impl TreasurySettings {
    /// Sets the address of the treasury.
    pub fn address(&mut self, address: Address) -> &mut Self {
        self.address = address;
        self
    }

    /// Sets the governance account.
    pub fn governance(&mut self, governance: Address) -> &mut Self {
        self.governance = governance;
        self
    }

    /// Sets the start time of the epoch schedule, in seconds.
    pub fn start_time(&mut self, start_time: u64) -> &mut Self {
        self.start_time = start_time;
        self
    }

    /// Sets the epoch length.
    pub fn period(&mut self, period: Duration) -> &mut Self {
        self.period = period;
        self
    }

    /// Sets the initial fund allocation rate, in percent.
    pub fn fund_allocation_rate(&mut self, fund_allocation_rate: u8) -> &mut Self {
        self.fund_allocation_rate = fund_allocation_rate;
        self
    }

    /// Validates the settings that are not enforced by their types.
    pub fn validate(&self) -> TreasuryResult<()> {
        if self.fund_allocation_rate > MAX_FUND_ALLOCATION_RATE {
            return Err(TreasuryError::InvalidFundAllocationRate(
                self.fund_allocation_rate,
            ));
        }
        if self.period <= Duration::zero() {
            return Err(TreasuryError::InvalidSchedule(
                "The epoch period must be positive.".to_string(),
            ));
        }
        Ok(())
    }
}

impl TryFrom<InitArgs> for TreasurySettings {
    type Error = TreasuryError;

    fn try_from(value: InitArgs) -> Result<Self, Self::Error> {
        let period = i64::try_from(value.period_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| {
                TreasuryError::InvalidSchedule(format!(
                    "The epoch period of {} seconds is out of range.",
                    value.period_secs
                ))
            })?;

        let mut settings = TreasurySettings::default();
        settings
            .address(string_to_address(value.treasury)?)
            .governance(string_to_address(value.governance)?)
            .start_time(value.start_time)
            .period(period)
            .fund_allocation_rate(value.fund_allocation_rate);
        settings.validate()?;
        Ok(settings)
    }
}
