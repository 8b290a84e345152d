//! Per-account and token-wide freezing of balance-mutating operations.

use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*};

use crate::{Config, Error, Event, FrozenAccounts, Pallet, TokenFrozen, LOG_TARGET};

/// Balance-mutating operations subject to freezing.
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum Operation {
    Buy,
    Sell,
    Send,
    Receive,
    Mint,
    Grant,
    Release,
}

impl<T: Config> Pallet<T> {
    /// Whether `operation` may touch `account` right now. Read-only queries
    /// are never gated.
    pub fn is_operation_allowed(account: &T::AccountId, operation: Operation) -> bool {
        Self::ensure_allowed(account, operation).is_ok()
    }

    /// Token freeze is checked before the account freeze.
    pub(crate) fn ensure_allowed(account: &T::AccountId, operation: Operation) -> DispatchResult {
        Self::ensure_token_not_frozen(operation)?;
        if FrozenAccounts::<T>::get(account) {
            log::debug!(target: LOG_TARGET, "{operation:?} rejected: {account:?} is frozen");
            return Err(Error::<T>::AccountFrozen.into());
        }
        Ok(())
    }

    pub(crate) fn ensure_token_not_frozen(operation: Operation) -> DispatchResult {
        let frozen = TokenFrozen::<T>::get();
        if frozen {
            log::debug!(target: LOG_TARGET, "{operation:?} rejected: token is frozen");
        }
        ensure!(!frozen, Error::<T>::TokenFrozen);
        Ok(())
    }

    pub(crate) fn set_account_freeze(target: T::AccountId, frozen: bool) {
        if frozen {
            FrozenAccounts::<T>::insert(&target, true);
        } else {
            FrozenAccounts::<T>::remove(&target);
        }
        Self::deposit_event(Event::FrozenFunds { target, frozen });
    }

    pub(crate) fn set_token_freeze(frozen: bool) {
        TokenFrozen::<T>::put(frozen);
        log::debug!(target: LOG_TARGET, "token frozen: {frozen}");
        Self::deposit_event(Event::FrozenToken { frozen });
    }
}
