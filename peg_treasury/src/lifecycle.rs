//! One-way lifecycle of a treasury instance

use std::fmt;

use alloy_primitives::Address;

use crate::utils::error::{TreasuryError, TreasuryResult};

/// Lifecycle enum determining the stage the treasury is at.
///
/// ```plain
///  Uninitialized ──initialize──► Active
///        │                         │
///        └───────migrate───────────┴──migrate──► Migrated
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Lifecycle {
    /// Constructed, the pre-existing peg balance was not absorbed yet
    #[default]
    Uninitialized,
    /// Initialized and serving economic operations
    Active {
        /// Slot in which `initialize` was executed
        initialized_at: u64,
    },
    /// Capabilities and balances were handed to a successor. Permanently inert.
    Migrated {
        /// The successor treasury
        successor: Address,
        /// Slot in which `migrate` was executed
        migrated_at: u64,
    },
}

impl Lifecycle {
    /// Returns `true` once `initialize` succeeded on this instance.
    pub fn is_initialized(&self) -> bool {
        matches!(self, Lifecycle::Active { .. })
    }

    /// Returns `true` if the instance was migrated.
    pub fn is_migrated(&self) -> bool {
        matches!(self, Lifecycle::Migrated { .. })
    }

    /// Fails with `MigratedInstance` once the instance is inert.
    pub fn ensure_not_migrated(&self) -> TreasuryResult<()> {
        if self.is_migrated() {
            return Err(TreasuryError::MigratedInstance);
        }
        Ok(())
    }

    /// `Uninitialized -> Active`
    pub fn initialize(&mut self, slot: u64) -> TreasuryResult<()> {
        match self {
            Lifecycle::Uninitialized => {
                *self = Lifecycle::Active {
                    initialized_at: slot,
                };
                Ok(())
            }
            Lifecycle::Active { .. } => Err(TreasuryError::AlreadyInitialized),
            Lifecycle::Migrated { .. } => Err(TreasuryError::MigratedInstance),
        }
    }

    /// `Uninitialized | Active -> Migrated`
    pub fn migrate(&mut self, successor: Address, slot: u64) -> TreasuryResult<()> {
        if self.is_migrated() {
            return Err(TreasuryError::AlreadyMigrated);
        }
        *self = Lifecycle::Migrated {
            successor,
            migrated_at: slot,
        };
        Ok(())
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifecycle::Uninitialized => write!(f, "Uninitialized"),
            Lifecycle::Active { initialized_at } => {
                write!(f, "Active (initialized at slot {})", initialized_at)
            }
            Lifecycle::Migrated {
                successor,
                migrated_at,
            } => write!(
                f,
                "Migrated to {} at slot {}",
                successor, migrated_at
            ),
        }
    }
}
