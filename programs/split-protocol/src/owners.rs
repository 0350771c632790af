use anchor_lang::prelude::*;

use crate::constants::{MAX_OWNERS, SENTINEL_OWNERS};
use crate::error::{ErrorCode, SplitResult};

/// Ordered owner list stored inline in the split account.
///
/// Order is significant: `swap_owner` identifies a slot by its predecessor, with
/// `SENTINEL_OWNERS` standing in for the head of the list. Membership is a linear
/// scan over at most `MAX_OWNERS` keys.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct OwnerRegistry {
    #[max_len(MAX_OWNERS)]
    owners: Vec<Pubkey>,
}

impl OwnerRegistry {
    pub fn new(owners: Vec<Pubkey>) -> SplitResult<Self> {
        let mut registry = Self::default();
        registry.setup(owners)?;
        Ok(registry)
    }

    /// Install the initial owner set. Only valid on an empty registry.
    pub fn setup(&mut self, owners: Vec<Pubkey>) -> SplitResult<()> {
        if !self.owners.is_empty() {
            return Err(ErrorCode::AlreadyInitialized);
        }
        if owners.is_empty() {
            return Err(ErrorCode::NoOwnersProvided);
        }
        if owners.len() > MAX_OWNERS {
            return Err(ErrorCode::TooManyOwners);
        }

        for (i, owner) in owners.iter().enumerate() {
            ensure_assignable(owner)?;
            if owners[..i].contains(owner) {
                return Err(ErrorCode::DuplicateOwner);
            }
        }

        self.owners = owners;
        Ok(())
    }

    pub fn is_owner(&self, account: &Pubkey) -> bool {
        self.owners.contains(account)
    }

    pub fn owners(&self) -> &[Pubkey] {
        &self.owners
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Replace `old_owner` with `new_owner` in place.
    ///
    /// `prev_owner` must be the owner listed immediately before `old_owner`, or
    /// `SENTINEL_OWNERS` when `old_owner` is first.
    pub fn swap_owner(
        &mut self,
        caller: &Pubkey,
        prev_owner: &Pubkey,
        old_owner: &Pubkey,
        new_owner: &Pubkey,
    ) -> SplitResult<()> {
        if !self.is_owner(caller) {
            return Err(ErrorCode::NotAnOwner);
        }
        ensure_assignable(new_owner)?;
        if self.is_owner(new_owner) {
            return Err(ErrorCode::DuplicateOwner);
        }

        let slot = self
            .owners
            .iter()
            .position(|owner| owner == old_owner)
            .ok_or(ErrorCode::NotAnOwner)?;

        let expected_prev = match slot {
            0 => SENTINEL_OWNERS,
            _ => self.owners[slot - 1],
        };
        if *prev_owner != expected_prev {
            return Err(ErrorCode::InvalidPrevOwner);
        }

        self.owners[slot] = *new_owner;
        Ok(())
    }
}

fn ensure_assignable(owner: &Pubkey) -> SplitResult<()> {
    if *owner == Pubkey::default() || *owner == SENTINEL_OWNERS {
        return Err(ErrorCode::InvalidOwner);
    }
    Ok(())
}
