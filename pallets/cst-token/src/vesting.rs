//! Vesting grants with a cliff and linear release.
//!
//! A grant moves through `Unvested -> PartiallyVested -> FullyVested` as time
//! passes. A revocable grant can be revoked before it is fully vested: the
//! vested-but-unreleased part goes to the beneficiary and the rest returns to
//! unallocated supply.

use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*, traits::UnixTime};
use sp_runtime::{helpers_128bit::multiply_by_rational_with_rounding, Rounding};

use crate::{Config, Error, Event, Operation, Pallet, VestingGrants, LOG_TARGET};

#[derive(
    Encode, Decode, Clone, Copy, PartialEq, Eq, Default, RuntimeDebug, TypeInfo, MaxEncodedLen,
)]
pub struct VestingGrant {
    pub fully_vested_amount: u128,
    /// Seconds since the unix epoch.
    pub start_time: u64,
    /// Seconds after `start_time` before anything vests.
    pub cliff_duration: u64,
    /// Seconds after `start_time` at which everything has vested.
    pub vesting_duration: u64,
    pub revocable: bool,
    pub released: u128,
    pub revoked: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum VestingStatus {
    Unvested,
    PartiallyVested,
    FullyVested,
    Revoked,
}

impl VestingGrant {
    /// Amount vested at `now`. A revoked grant stays at what it had released.
    pub fn vested_amount(&self, now: u64) -> u128 {
        if self.revoked {
            return self.released;
        }
        let cliff = self.start_time.saturating_add(self.cliff_duration);
        if now < cliff {
            return 0;
        }
        // now >= cliff >= start_time
        let elapsed = now - self.start_time;
        if elapsed >= self.vesting_duration {
            return self.fully_vested_amount;
        }
        multiply_by_rational_with_rounding(
            self.fully_vested_amount,
            elapsed as u128,
            self.vesting_duration as u128,
            Rounding::Down,
        )
        .unwrap_or(self.fully_vested_amount)
    }

    pub fn releasable(&self, now: u64) -> u128 {
        self.vested_amount(now).saturating_sub(self.released)
    }

    pub fn status(&self, now: u64) -> VestingStatus {
        if self.revoked {
            return VestingStatus::Revoked;
        }
        match self.vested_amount(now) {
            0 => VestingStatus::Unvested,
            v if v >= self.fully_vested_amount => VestingStatus::FullyVested,
            _ => VestingStatus::PartiallyVested,
        }
    }

    /// Still holding tokens in the vesting pool.
    pub fn is_active(&self) -> bool {
        !self.revoked && self.released < self.fully_vested_amount
    }
}

impl<T: Config> Pallet<T> {
    /// Current time in seconds.
    pub(crate) fn now() -> u64 {
        T::TimeProvider::now().as_secs()
    }

    pub fn vested_amount(beneficiary: &T::AccountId) -> u128 {
        VestingGrants::<T>::get(beneficiary)
            .map(|grant| grant.vested_amount(Self::now()))
            .unwrap_or_default()
    }

    pub fn releasable_amount(beneficiary: &T::AccountId) -> u128 {
        VestingGrants::<T>::get(beneficiary)
            .map(|grant| grant.releasable(Self::now()))
            .unwrap_or_default()
    }

    pub(crate) fn do_grant_vested_tokens(
        beneficiary: &T::AccountId,
        fully_vested_amount: u128,
        start_time: u64,
        cliff_duration: u64,
        vesting_duration: u64,
        revocable: bool,
    ) -> DispatchResult {
        Self::ensure_allowed(beneficiary, Operation::Grant)?;
        ensure!(
            fully_vested_amount > 0 && vesting_duration >= cliff_duration,
            Error::<T>::InvalidSchedule
        );
        if let Some(existing) = VestingGrants::<T>::get(beneficiary) {
            ensure!(!existing.is_active(), Error::<T>::DuplicateGrant);
        }
        Self::ensure_within_circulation_cap(fully_vested_amount)?;

        let start_time = if start_time == 0 { Self::now() } else { start_time };

        Self::mint_shortfall(fully_vested_amount)?;
        Self::reserve_for_vesting(fully_vested_amount)?;
        VestingGrants::<T>::insert(
            beneficiary,
            VestingGrant {
                fully_vested_amount,
                start_time,
                cliff_duration,
                vesting_duration,
                revocable,
                released: 0,
                revoked: false,
            },
        );

        log::debug!(
            target: LOG_TARGET,
            "granted {fully_vested_amount} vesting to {beneficiary:?} from {start_time}"
        );
        Self::deposit_event(Event::VestedTokenGrant {
            beneficiary: beneficiary.clone(),
            fully_vested_amount,
            start_time,
            cliff_duration,
            vesting_duration,
            revocable,
        });
        Ok(())
    }

    pub(crate) fn do_release(beneficiary: &T::AccountId) -> Result<u128, DispatchError> {
        Self::ensure_allowed(beneficiary, Operation::Release)?;
        let mut grant = VestingGrants::<T>::get(beneficiary).ok_or(Error::<T>::NoGrant)?;

        let amount = grant.releasable(Self::now());
        ensure!(amount > 0, Error::<T>::NothingToRelease);
        grant.released = grant.released.checked_add(amount).ok_or(Error::<T>::Overflow)?;

        Self::release_from_vesting(beneficiary, amount)?;
        VestingGrants::<T>::insert(beneficiary, grant);

        Self::deposit_event(Event::VestedTokensReleased {
            beneficiary: beneficiary.clone(),
            amount,
        });
        Ok(amount)
    }

    /// Returns `(released_now, returned_to_supply)`.
    ///
    /// Freezes are only checked when vested tokens are still owed to the
    /// beneficiary.
    pub(crate) fn do_revoke(beneficiary: &T::AccountId) -> Result<(u128, u128), DispatchError> {
        let mut grant = VestingGrants::<T>::get(beneficiary).ok_or(Error::<T>::NoGrant)?;
        ensure!(!grant.revoked, Error::<T>::GrantRevoked);
        ensure!(grant.revocable, Error::<T>::NotRevocable);

        let vested = grant.vested_amount(Self::now());
        ensure!(vested < grant.fully_vested_amount, Error::<T>::AlreadyFullyVested);

        let released = vested.saturating_sub(grant.released);
        let returned = grant.fully_vested_amount - vested;

        if released > 0 {
            Self::ensure_allowed(beneficiary, Operation::Release)?;
            Self::release_from_vesting(beneficiary, released)?;
        }
        Self::unreserve_from_vesting(returned)?;
        grant.released = vested;
        grant.revoked = true;
        VestingGrants::<T>::insert(beneficiary, grant);

        log::debug!(
            target: LOG_TARGET,
            "revoked grant of {beneficiary:?}: released {released}, returned {returned}"
        );
        Self::deposit_event(Event::VestingRevoked {
            beneficiary: beneficiary.clone(),
            released,
            returned,
        });
        Ok((released, returned))
    }
}
