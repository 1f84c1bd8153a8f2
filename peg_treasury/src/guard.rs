//! Slot Guard
//!
//! A per-instance mutual exclusion that allows at most one mutating economic
//! operation per indivisible execution slot (e.g. a block). All economic
//! operations read an external price and act on it; a second entry in the
//! same slot could observe a price and front-run within the same window.
//!
//! ```plain
//! Guard State Machine:
//!
//!                   ┌──────────────┐
//!              ┌────► Open (slot n)│
//!              │    └──────────────┘
//!              │           │
//!  try_enter   │       try_enter(n)
//!  (slot > n)  │           │
//!              │           ▼
//!              │    ┌──────────────┐   try_enter(n)
//!              └────┤ Entered (n)  ├──────────────► Err(ReentrantSlot)
//!                   └──────────────┘
//! ```
//!
//! The guard lives inside the staged treasury state: a slot is only recorded
//! once the operation that entered it commits.

use candid::CandidType;
use serde::Deserialize;

use crate::utils::error::{TreasuryError, TreasuryResult};

/// Slot-exclusive guard.
#[derive(Clone, Debug, Default, PartialEq, CandidType, Deserialize)]
pub struct SlotGuard {
    /// Last slot in which a mutating operation entered
    pub last_entered_slot: Option<u64>,
}

impl SlotGuard {
    /// Attempts to enter `slot`.
    ///
    /// # Returns
    /// * `Ok(())` - No mutating operation entered this slot before
    /// * `Err(TreasuryError::ReentrantSlot)` - The slot is already taken
    pub fn try_enter(&mut self, slot: u64) -> TreasuryResult<()> {
        if self.last_entered_slot == Some(slot) {
            return Err(TreasuryError::ReentrantSlot { slot });
        }
        self.last_entered_slot = Some(slot);
        Ok(())
    }
}
