//! Capability checks over the collaborators the treasury mutates.
//!
//! Capabilities can be revoked externally between two calls, so the gate is
//! evaluated on every operation and nothing is cached.

use alloy_primitives::Address;

use crate::{
    collaborators::{Collaborators, Operated},
    utils::error::{TreasuryError, TreasuryResult},
};

/// Capabilities of one collaborator as read at the time of the check.
#[derive(Clone, Debug, PartialEq)]
pub struct Capabilities {
    pub name: &'static str,
    pub address: Address,
    pub operator: Address,
    pub owner: Option<Address>,
}

impl Capabilities {
    /// Reads the current capabilities of `entity`.
    pub fn of<T: Operated + ?Sized>(name: &'static str, entity: &T) -> Self {
        Self {
            name,
            address: entity.address(),
            operator: entity.operator(),
            owner: entity.owner(),
        }
    }
}

/// Read-only capability gate for one treasury address.
pub struct AccessGate {
    treasury: Address,
}

impl AccessGate {
    pub fn new(treasury: Address) -> Self {
        Self { treasury }
    }

    /// Fails with `InsufficientPermission` naming the first entity whose operator,
    /// or owner where the entity has one, is not the treasury.
    pub fn require_operator_of(&self, entities: &[Capabilities]) -> TreasuryResult<()> {
        for entity in entities {
            let owner_held = entity.owner.map_or(true, |owner| owner == self.treasury);
            if entity.operator != self.treasury || !owner_held {
                return Err(TreasuryError::InsufficientPermission {
                    entity: format!("{} ({})", entity.name, entity.address),
                });
            }
        }
        Ok(())
    }

    /// Checks the peg, bond and share ledgers and the distributor.
    pub fn require_managed(&self, collaborators: &Collaborators) -> TreasuryResult<()> {
        self.require_operator_of(&[
            Capabilities::of("peg", &*collaborators.peg),
            Capabilities::of("bond", &*collaborators.bond),
            Capabilities::of("share", &*collaborators.share),
            Capabilities::of("distributor", &*collaborators.distributor),
        ])
    }
}
