//! Epoch scheduler
//!
//! Tracks a fixed-length recurring period driven by wall-clock time rather
//! than a timer. Epochs can only be caught up one at a time: each successful
//! [`EpochScheduler::try_advance`] moves the counter by exactly one.

use candid::CandidType;
use chrono::Duration;
use serde::Deserialize;

use crate::utils::error::{TreasuryError, TreasuryResult};

/// Skip-free epoch counter.
#[derive(Clone, Debug, PartialEq, CandidType, Deserialize)]
pub struct EpochScheduler {
    /// Timestamp in seconds at which epoch 0 becomes due
    start_time: u64,
    /// Epoch length in seconds
    period: u64,
    /// Index of the next epoch to be allocated, i.e. the number of epochs advanced so far
    epoch: u64,
}

impl EpochScheduler {
    /// Creates a scheduler starting at `start_time` (seconds).
    /// Fails if `period` is not a positive number of whole seconds.
    pub fn new(period: Duration, start_time: u64) -> TreasuryResult<Self> {
        let period = u64::try_from(period.num_seconds())
            .ok()
            .filter(|seconds| *seconds > 0)
            .ok_or_else(|| {
                TreasuryError::InvalidSchedule(format!(
                    "The epoch period must be at least one second, got {}.",
                    period
                ))
            })?;

        Ok(Self {
            start_time,
            period,
            epoch: 0,
        })
    }

    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    pub fn period(&self) -> u64 {
        self.period
    }

    /// Returns `true` once `now` reached the start time.
    pub fn has_started(&self, now: u64) -> bool {
        now >= self.start_time
    }

    /// Current epoch as seen at `now`.
    /// Zero before the start; otherwise the number of elapsed periods, capped by the
    /// number of epochs that were explicitly advanced.
    pub fn current_epoch(&self, now: u64) -> u64 {
        if !self.has_started(now) {
            return 0;
        }
        let elapsed = (now - self.start_time) / self.period;
        // An epoch is only reported once it was allocated; the first allocation is due at `start_time`.
        elapsed.saturating_add(1).min(self.epoch)
    }

    /// Timestamp at which the next epoch becomes due.
    pub fn next_epoch_point(&self) -> u64 {
        self.start_time
            .saturating_add(self.epoch.saturating_mul(self.period))
    }

    /// Ensures the schedule started.
    pub fn ensure_started(&self, now: u64) -> TreasuryResult<()> {
        if !self.has_started(now) {
            return Err(TreasuryError::EpochNotStarted {
                start_time: self.start_time,
            });
        }
        Ok(())
    }

    /// Advances to the next epoch if it is due at `now`.
    /// Returns the index of the epoch that was just allocated.
    pub fn try_advance(&mut self, now: u64) -> TreasuryResult<u64> {
        self.ensure_started(now)?;

        let next_epoch_point = self.next_epoch_point();
        if now < next_epoch_point {
            return Err(TreasuryError::EpochNotDue { next_epoch_point });
        }

        let allocated = self.epoch;
        self.epoch += 1;
        Ok(allocated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const START: u64 = 1_700_000_000;
    const PERIOD: i64 = 86_400;

    fn scheduler() -> EpochScheduler {
        EpochScheduler::new(Duration::seconds(PERIOD), START).unwrap()
    }

    #[test]
    fn test_rejects_empty_period() {
        assert!(matches!(
            EpochScheduler::new(Duration::zero(), START),
            Err(TreasuryError::InvalidSchedule(_))
        ));
        assert!(matches!(
            EpochScheduler::new(Duration::seconds(-5), START),
            Err(TreasuryError::InvalidSchedule(_))
        ));
    }

    #[test]
    fn test_not_started() {
        let mut scheduler = scheduler();
        assert!(!scheduler.has_started(START - 1));
        assert_eq!(scheduler.current_epoch(START - 1), 0);
        assert_eq!(
            scheduler.try_advance(START - 1),
            Err(TreasuryError::EpochNotStarted { start_time: START })
        );
    }

    #[test]
    fn test_first_epoch_is_due_at_start() {
        let mut scheduler = scheduler();
        assert_eq!(scheduler.next_epoch_point(), START);
        assert_eq!(scheduler.try_advance(START), Ok(0));
        assert_eq!(scheduler.current_epoch(START), 1);
        assert_eq!(scheduler.next_epoch_point(), START + PERIOD as u64);
    }

    #[test]
    fn test_cannot_advance_twice_in_one_period() {
        let mut scheduler = scheduler();
        scheduler.try_advance(START).unwrap();
        assert_eq!(
            scheduler.try_advance(START + 10),
            Err(TreasuryError::EpochNotDue {
                next_epoch_point: START + PERIOD as u64
            })
        );
        assert_eq!(scheduler.current_epoch(START + 10), 1);
    }

    #[test]
    fn test_missed_epochs_are_caught_up_one_at_a_time() {
        let mut scheduler = scheduler();
        let late = START + 3 * PERIOD as u64;

        assert_eq!(scheduler.current_epoch(late), 0);
        assert_eq!(scheduler.try_advance(late), Ok(0));
        assert_eq!(scheduler.try_advance(late), Ok(1));
        assert_eq!(scheduler.try_advance(late), Ok(2));
        assert_eq!(scheduler.try_advance(late), Ok(3));
        assert!(matches!(
            scheduler.try_advance(late),
            Err(TreasuryError::EpochNotDue { .. })
        ));
        assert_eq!(scheduler.current_epoch(late), 4);
    }

    proptest! {
        #[test]
        fn test_epoch_increases_by_one_per_advance(
            period in 1u64..1_000_000,
            offsets in proptest::collection::vec(0u64..5_000_000, 1..40),
        ) {
            let mut scheduler = EpochScheduler::new(Duration::seconds(period as i64), START).unwrap();
            let mut now = START;
            let mut advanced = 0u64;

            for offset in offsets {
                now += offset;
                let before = scheduler.current_epoch(now);
                match scheduler.try_advance(now) {
                    Ok(allocated) => {
                        prop_assert_eq!(allocated, advanced);
                        advanced += 1;
                        prop_assert_eq!(scheduler.current_epoch(now), before + 1);
                    }
                    Err(TreasuryError::EpochNotDue { next_epoch_point }) => {
                        prop_assert!(now < next_epoch_point);
                        prop_assert_eq!(scheduler.current_epoch(now), before);
                    }
                    Err(other) => prop_assert!(false, "unexpected error {:?}", other),
                }
                prop_assert!(scheduler.next_epoch_point() > START || advanced == 0);
            }
        }
    }
}
