//! Fixed-price buy and sell against the custody account.

use frame_support::{
    ensure,
    pallet_prelude::*,
    traits::{
        fungible::{Inspect, Mutate},
        tokens::{Fortitude, Preservation},
    },
};
use sp_runtime::traits::AccountIdConversion;

use crate::{
    Balances, BuyPrice, Config, Configured, Error, Event, MaxBalance, Operation, Pallet,
    LOG_TARGET,
};

/// Whole tokens purchasable with `value`; the remainder is not spent.
pub(crate) fn tokens_for_value(value: u128, price: u128) -> u128 {
    value.checked_div(price).unwrap_or_default()
}

/// Currency owed for `tokens`, in either direction.
pub(crate) fn cost_of(tokens: u128, price: u128) -> Option<u128> {
    tokens.checked_mul(price)
}

impl<T: Config> Pallet<T> {
    /// Account holding currency received from buyers.
    pub fn custody_account() -> T::AccountId {
        T::PalletId::get().into_account_truncating()
    }

    /// Currency custody can pay out right now.
    pub fn custody_balance() -> u128 {
        T::Currency::reducible_balance(
            &Self::custody_account(),
            Preservation::Expendable,
            Fortitude::Polite,
        )
    }

    pub(crate) fn do_buy(buyer: &T::AccountId, value: u128) -> Result<u128, DispatchError> {
        Self::ensure_allowed(buyer, Operation::Buy)?;
        ensure!(Configured::<T>::get(), Error::<T>::NotConfigured);

        let price = BuyPrice::<T>::get();
        let tokens = tokens_for_value(value, price);
        ensure!(tokens > 0, Error::<T>::ZeroPurchase);
        Self::ensure_within_circulation_cap(tokens)?;

        let issuance = Self::prepare_issue(buyer, tokens)?;
        ensure!(issuance.balance <= MaxBalance::<T>::get(), Error::<T>::BalanceCapExceeded);
        let cost = cost_of(tokens, price).ok_or(Error::<T>::Overflow)?;

        // Last fallible step; the ledger writes below cannot fail.
        T::Currency::transfer(buyer, &Self::custody_account(), cost, Preservation::Expendable)?;
        Self::apply_issue(buyer, issuance);

        log::debug!(target: LOG_TARGET, "{buyer:?} bought {tokens} for {cost}");
        Self::deposit_event(Event::Bought { buyer: buyer.clone(), tokens, cost });
        Ok(tokens)
    }

    pub(crate) fn do_sell(seller: &T::AccountId, amount: u128) -> Result<u128, DispatchError> {
        Self::ensure_allowed(seller, Operation::Sell)?;
        ensure!(Configured::<T>::get(), Error::<T>::NotConfigured);
        ensure!(Balances::<T>::get(seller) >= amount, Error::<T>::InsufficientBalance);

        let payout = cost_of(amount, BuyPrice::<T>::get()).ok_or(Error::<T>::Overflow)?;
        ensure!(Self::custody_balance() >= payout, Error::<T>::InsufficientContractFunds);

        Self::debit(seller, amount)?;
        if payout > 0 {
            T::Currency::transfer(
                &Self::custody_account(),
                seller,
                payout,
                Preservation::Expendable,
            )?;
        }

        log::debug!(target: LOG_TARGET, "{seller:?} sold {amount} for {payout}");
        Self::deposit_event(Event::Sold { seller: seller.clone(), tokens: amount, payout });
        Ok(payout)
    }
}
