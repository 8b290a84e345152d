//! Balance and supply accounting.
//!
//! Every helper validates before it writes, so a helper that returns an
//! error has left storage untouched.

use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*};

use crate::{
    Balances, CirculationCap, Config, Error, Pallet, TotalInCirculation, TotalTokens,
    TotalUnvestedAndUnreleased, LOG_TARGET,
};

/// Validated new values for an issuance into circulation.
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub(crate) struct Issuance {
    pub(crate) minted: u128,
    pub(crate) total_tokens: u128,
    pub(crate) balance: u128,
    pub(crate) circulation: u128,
}

impl<T: Config> Pallet<T> {
    /// Minted tokens that are neither circulating nor reserved for vesting.
    pub fn tokens_available() -> u128 {
        TotalTokens::<T>::get()
            .saturating_sub(TotalInCirculation::<T>::get())
            .saturating_sub(TotalUnvestedAndUnreleased::<T>::get())
    }

    /// Tokens counted against the circulation cap.
    pub fn outstanding() -> u128 {
        TotalInCirculation::<T>::get().saturating_add(TotalUnvestedAndUnreleased::<T>::get())
    }

    pub(crate) fn ensure_within_circulation_cap(amount: u128) -> DispatchResult {
        let outstanding = Self::outstanding().checked_add(amount).ok_or(Error::<T>::Overflow)?;
        ensure!(outstanding <= CirculationCap::<T>::get(), Error::<T>::CirculationCapExceeded);
        Ok(())
    }

    /// Increase the minted supply, returning the new total.
    pub(crate) fn mint(amount: u128) -> Result<u128, DispatchError> {
        let total = TotalTokens::<T>::get().checked_add(amount).ok_or(Error::<T>::Overflow)?;
        TotalTokens::<T>::put(total);
        log::debug!(target: LOG_TARGET, "minted {amount}, total tokens {total}");
        Ok(total)
    }

    /// Mint just enough for `amount` more tokens to leave the unallocated pool.
    pub(crate) fn mint_shortfall(amount: u128) -> DispatchResult {
        let available = Self::tokens_available();
        if available < amount {
            Self::mint(amount - available)?;
        }
        Ok(())
    }

    /// Move `amount` from the unallocated pool into `who`'s balance.
    pub(crate) fn credit(who: &T::AccountId, amount: u128) -> DispatchResult {
        ensure!(amount <= Self::tokens_available(), Error::<T>::InsufficientSupply);
        let balance = Balances::<T>::get(who).checked_add(amount).ok_or(Error::<T>::Overflow)?;
        let circulation =
            TotalInCirculation::<T>::get().checked_add(amount).ok_or(Error::<T>::Overflow)?;

        Balances::<T>::insert(who, balance);
        TotalInCirculation::<T>::put(circulation);
        Ok(())
    }

    /// Compute the storage values for issuing `amount` new tokens to `who`,
    /// minting any shortfall, without writing anything.
    pub(crate) fn prepare_issue(who: &T::AccountId, amount: u128) -> Result<Issuance, DispatchError> {
        let minted = amount.saturating_sub(Self::tokens_available());
        let total_tokens =
            TotalTokens::<T>::get().checked_add(minted).ok_or(Error::<T>::Overflow)?;
        let balance = Balances::<T>::get(who).checked_add(amount).ok_or(Error::<T>::Overflow)?;
        let circulation =
            TotalInCirculation::<T>::get().checked_add(amount).ok_or(Error::<T>::Overflow)?;
        Ok(Issuance { minted, total_tokens, balance, circulation })
    }

    /// Write an issuance computed by [`Self::prepare_issue`].
    pub(crate) fn apply_issue(who: &T::AccountId, issuance: Issuance) {
        if issuance.minted > 0 {
            TotalTokens::<T>::put(issuance.total_tokens);
            log::debug!(
                target: LOG_TARGET,
                "minted {}, total tokens {}",
                issuance.minted,
                issuance.total_tokens
            );
        }
        Balances::<T>::insert(who, issuance.balance);
        TotalInCirculation::<T>::put(issuance.circulation);
    }

    /// Move `amount` from `who`'s balance back into the unallocated pool.
    pub(crate) fn debit(who: &T::AccountId, amount: u128) -> DispatchResult {
        let balance =
            Balances::<T>::get(who).checked_sub(amount).ok_or(Error::<T>::InsufficientBalance)?;
        let circulation =
            TotalInCirculation::<T>::get().checked_sub(amount).ok_or(Error::<T>::Overflow)?;

        Balances::<T>::insert(who, balance);
        TotalInCirculation::<T>::put(circulation);
        Ok(())
    }

    /// Transfer between accounts; circulation is unchanged.
    pub(crate) fn move_balance(from: &T::AccountId, to: &T::AccountId, amount: u128) -> DispatchResult {
        let from_balance =
            Balances::<T>::get(from).checked_sub(amount).ok_or(Error::<T>::InsufficientBalance)?;
        if from == to {
            return Ok(());
        }
        let to_balance = Balances::<T>::get(to).checked_add(amount).ok_or(Error::<T>::Overflow)?;

        Balances::<T>::insert(from, from_balance);
        Balances::<T>::insert(to, to_balance);
        Ok(())
    }

    /// Reserve `amount` of unallocated supply for a vesting grant.
    pub(crate) fn reserve_for_vesting(amount: u128) -> DispatchResult {
        ensure!(amount <= Self::tokens_available(), Error::<T>::InsufficientSupply);
        let pool = TotalUnvestedAndUnreleased::<T>::get()
            .checked_add(amount)
            .ok_or(Error::<T>::Overflow)?;
        TotalUnvestedAndUnreleased::<T>::put(pool);
        Ok(())
    }

    /// Return `amount` from the vesting pool to unallocated supply.
    pub(crate) fn unreserve_from_vesting(amount: u128) -> DispatchResult {
        let pool = TotalUnvestedAndUnreleased::<T>::get()
            .checked_sub(amount)
            .ok_or(Error::<T>::InsufficientSupply)?;
        TotalUnvestedAndUnreleased::<T>::put(pool);
        Ok(())
    }

    /// Move `amount` out of the vesting pool into `who`'s balance.
    pub(crate) fn release_from_vesting(who: &T::AccountId, amount: u128) -> DispatchResult {
        Self::unreserve_from_vesting(amount)?;
        Self::credit(who, amount)
    }

    /// Check the ledger invariant:
    /// `sum(balances) == total_in_circulation` and
    /// `total_in_circulation + vesting pool <= total_tokens`.
    #[cfg(any(feature = "try-runtime", test))]
    pub fn do_try_state() -> Result<(), sp_runtime::TryRuntimeError> {
        let sum = Balances::<T>::iter_values()
            .try_fold(0u128, |acc, balance| acc.checked_add(balance))
            .ok_or(sp_runtime::TryRuntimeError::Other("balance sum overflows"))?;

        ensure!(
            sum == TotalInCirculation::<T>::get(),
            "sum of balances differs from total in circulation"
        );
        ensure!(
            Self::outstanding() <= TotalTokens::<T>::get(),
            "outstanding tokens exceed total tokens"
        );
        Ok(())
    }
}
