#![cfg_attr(not(feature = "std"), no_std)]
// Storage getters stay until the pallet moves to explicit accessor functions
#![allow(deprecated)]
#![allow(clippy::let_unit_value)]

//! # CST Token Pallet
//!
//! A controlled-supply token pegged to a fixed price in the runtime's native
//! currency. Accounts buy tokens from the pallet's custody account and can
//! sell them back at the same price. On top of the ledger the pallet offers:
//!
//! - tiered administration (owner, super-admins, admins)
//! - per-account and token-wide freezing of balance-mutating operations
//! - vesting grants with a cliff, linear release and optional revocation
//!
//! Ledger invariant, checked by [`Pallet::do_try_state`]:
//! `sum(balances) == total_in_circulation` and
//! `total_in_circulation + vesting pool <= total_tokens`.

use frame_support::{
    dispatch::DispatchResult,
    ensure,
    pallet_prelude::*,
    traits::{fungible, UnixTime},
    PalletId,
};
use frame_system::{ensure_signed, pallet_prelude::*};
use sp_std::prelude::*;

pub use freeze::Operation;
pub use pallet::*;
pub use roles::Role;
pub use vesting::{VestingGrant, VestingStatus};
pub use weights::WeightInfo;

mod freeze;
mod ledger;
mod pricing;
mod roles;
mod vesting;
pub mod weights;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

pub(crate) const LOG_TARGET: &str = "runtime::cst-token";

/// Maximum length of the token name in bytes.
pub type MaxNameLen = ConstU32<64>;
/// Maximum length of the token symbol in bytes.
pub type MaxSymbolLen = ConstU32<16>;

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        /// Native currency paid in on `buy` and paid out on `sell`.
        type Currency: fungible::Mutate<Self::AccountId, Balance = u128>;

        /// Wall clock used for vesting schedules.
        type TimeProvider: UnixTime;

        /// Derives the custody account that holds currency received from buyers.
        #[pallet::constant]
        type PalletId: Get<PalletId>;

        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Token name (e.g., "CardStack Token")
    #[pallet::storage]
    #[pallet::getter(fn token_name)]
    pub type TokenName<T> = StorageValue<_, BoundedVec<u8, MaxNameLen>, ValueQuery>;

    /// Token symbol (e.g., "CST")
    #[pallet::storage]
    #[pallet::getter(fn token_symbol)]
    pub type TokenSymbol<T> = StorageValue<_, BoundedVec<u8, MaxSymbolLen>, ValueQuery>;

    /// Price of one token in the smallest unit of the native currency
    #[pallet::storage]
    #[pallet::getter(fn buy_price)]
    pub type BuyPrice<T> = StorageValue<_, u128, ValueQuery>;

    /// Maximum number of tokens outstanding (circulating plus unreleased vesting)
    #[pallet::storage]
    #[pallet::getter(fn circulation_cap)]
    pub type CirculationCap<T> = StorageValue<_, u128, ValueQuery>;

    /// Maximum balance a single account may reach through `buy`
    #[pallet::storage]
    #[pallet::getter(fn max_balance)]
    pub type MaxBalance<T> = StorageValue<_, u128, ValueQuery>;

    /// Foundation account, if one was configured
    #[pallet::storage]
    #[pallet::getter(fn foundation)]
    pub type Foundation<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    /// Set once the token has been configured; configuration is write-once
    #[pallet::storage]
    #[pallet::getter(fn is_configured)]
    pub type Configured<T> = StorageValue<_, bool, ValueQuery>;

    /// Tokens minted so far
    #[pallet::storage]
    #[pallet::getter(fn total_tokens)]
    pub type TotalTokens<T> = StorageValue<_, u128, ValueQuery>;

    /// Tokens held by accounts
    #[pallet::storage]
    #[pallet::getter(fn total_in_circulation)]
    pub type TotalInCirculation<T> = StorageValue<_, u128, ValueQuery>;

    /// Tokens reserved by vesting grants and not yet released
    #[pallet::storage]
    #[pallet::getter(fn total_unvested_and_unreleased)]
    pub type TotalUnvestedAndUnreleased<T> = StorageValue<_, u128, ValueQuery>;

    /// Account balances
    #[pallet::storage]
    #[pallet::getter(fn balance_of)]
    pub type Balances<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, u128, ValueQuery>;

    /// Token-wide freeze flag
    #[pallet::storage]
    #[pallet::getter(fn is_token_frozen)]
    pub type TokenFrozen<T> = StorageValue<_, bool, ValueQuery>;

    /// Frozen accounts (cannot send, receive, buy, sell or be granted tokens)
    #[pallet::storage]
    #[pallet::getter(fn is_frozen)]
    pub type FrozenAccounts<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, bool, ValueQuery>;

    /// Immutable owner, set at genesis
    #[pallet::storage]
    #[pallet::getter(fn owner)]
    pub type Owner<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    #[pallet::storage]
    #[pallet::getter(fn is_super_admin)]
    pub type SuperAdmins<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, bool, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn is_admin)]
    pub type Admins<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, bool, ValueQuery>;

    /// Vesting grant per beneficiary; revoked and fully released grants stay as records
    #[pallet::storage]
    #[pallet::getter(fn vesting_grant)]
    pub type VestingGrants<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, VestingGrant, OptionQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Token metadata and trading parameters set
        Configured {
            name: Vec<u8>,
            symbol: Vec<u8>,
            buy_price: u128,
            circulation_cap: u128,
            max_balance: u128,
            foundation: Option<T::AccountId>,
        },
        /// Tokens bought from custody
        Bought { buyer: T::AccountId, tokens: u128, cost: u128 },
        /// Tokens sold back to custody
        Sold { seller: T::AccountId, tokens: u128, payout: u128 },
        /// Tokens transferred from one account to another
        Transferred { from: T::AccountId, to: T::AccountId, amount: u128 },
        /// Supply increased; `total_tokens` is the new total
        Minted { amount: u128, total_tokens: u128 },
        /// Tokens credited directly to an account
        Granted { recipient: T::AccountId, amount: u128 },
        /// Vesting grant created
        VestedTokenGrant {
            beneficiary: T::AccountId,
            fully_vested_amount: u128,
            start_time: u64,
            cliff_duration: u64,
            vesting_duration: u64,
            revocable: bool,
        },
        /// Vested tokens moved into the beneficiary's balance
        VestedTokensReleased { beneficiary: T::AccountId, amount: u128 },
        /// Grant revoked; `released` went to the beneficiary, `returned` back to supply
        VestingRevoked { beneficiary: T::AccountId, released: u128, returned: u128 },
        /// Account freeze flag set (emitted even if unchanged)
        FrozenFunds { target: T::AccountId, frozen: bool },
        /// Token freeze flag set (emitted even if unchanged)
        FrozenToken { frozen: bool },
        SuperAdminAdded { account: T::AccountId },
        SuperAdminRemoved { account: T::AccountId },
        AdminAdded { account: T::AccountId },
        AdminRemoved { account: T::AccountId },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// Caller lacks the role required for this call
        Unauthorized,
        /// The token is frozen
        TokenFrozen,
        /// An account involved in the call is frozen
        AccountFrozen,
        InsufficientBalance,
        /// Custody cannot cover the sell payout
        InsufficientContractFunds,
        CirculationCapExceeded,
        BalanceCapExceeded,
        /// Currency sent buys less than one token
        ZeroPurchase,
        /// Vesting duration shorter than the cliff, or zero amount
        InvalidSchedule,
        /// Beneficiary already has an active grant
        DuplicateGrant,
        NothingToRelease,
        NotRevocable,
        AlreadyFullyVested,
        AlreadyConfigured,
        NotConfigured,
        /// Zero buy price or zero maximum balance
        InvalidConfiguration,
        MetadataTooLong,
        NoGrant,
        GrantRevoked,
        CannotDemoteOwner,
        /// Not enough minted tokens outside circulation and vesting
        InsufficientSupply,
        Overflow,
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        #[cfg(feature = "try-runtime")]
        fn try_state(_n: BlockNumberFor<T>) -> Result<(), sp_runtime::TryRuntimeError> {
            Self::do_try_state()
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Set token metadata and trading parameters. Write-once.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::configure())]
        pub fn configure(
            origin: OriginFor<T>,
            name: Vec<u8>,
            symbol: Vec<u8>,
            buy_price: u128,
            circulation_cap: u128,
            max_balance: u128,
            foundation: Option<T::AccountId>,
        ) -> DispatchResult {
            let who = Self::ensure_role(origin, Role::SuperAdmin)?;
            ensure!(!Configured::<T>::get(), Error::<T>::AlreadyConfigured);
            ensure!(buy_price > 0 && max_balance > 0, Error::<T>::InvalidConfiguration);

            let bounded_name: BoundedVec<u8, MaxNameLen> =
                name.clone().try_into().map_err(|_| Error::<T>::MetadataTooLong)?;
            let bounded_symbol: BoundedVec<u8, MaxSymbolLen> =
                symbol.clone().try_into().map_err(|_| Error::<T>::MetadataTooLong)?;

            TokenName::<T>::put(bounded_name);
            TokenSymbol::<T>::put(bounded_symbol);
            BuyPrice::<T>::put(buy_price);
            CirculationCap::<T>::put(circulation_cap);
            MaxBalance::<T>::put(max_balance);
            Foundation::<T>::set(foundation.clone());
            Configured::<T>::put(true);

            log::debug!(
                target: LOG_TARGET,
                "configured by {who:?}: price {buy_price}, cap {circulation_cap}, max balance {max_balance}"
            );
            if circulation_cap < TotalInCirculation::<T>::get() {
                log::warn!(target: LOG_TARGET, "circulation cap is below current circulation");
            }

            Self::deposit_event(Event::Configured {
                name,
                symbol,
                buy_price,
                circulation_cap,
                max_balance,
                foundation,
            });
            Ok(())
        }

        /// Buy tokens with `value` units of native currency. Only
        /// `tokens * buy_price` is taken; the remainder stays with the buyer.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::buy())]
        pub fn buy(origin: OriginFor<T>, value: u128) -> DispatchResult {
            let buyer = ensure_signed(origin)?;
            Self::do_buy(&buyer, value).map(|_| ())
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::sell())]
        pub fn sell(origin: OriginFor<T>, amount: u128) -> DispatchResult {
            let seller = ensure_signed(origin)?;
            Self::do_sell(&seller, amount).map(|_| ())
        }

        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::transfer())]
        pub fn transfer(origin: OriginFor<T>, to: T::AccountId, amount: u128) -> DispatchResult {
            let sender = ensure_signed(origin)?;
            Self::ensure_allowed(&sender, Operation::Send)?;
            Self::ensure_allowed(&to, Operation::Receive)?;

            Self::move_balance(&sender, &to, amount)?;
            Self::deposit_event(Event::Transferred { from: sender, to, amount });
            Ok(())
        }

        /// Increase the minted supply. Minted tokens stay outside circulation.
        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::mint_tokens())]
        pub fn mint_tokens(origin: OriginFor<T>, amount: u128) -> DispatchResult {
            Self::ensure_role(origin, Role::SuperAdmin)?;
            Self::ensure_token_not_frozen(Operation::Mint)?;

            let total_tokens = Self::mint(amount)?;
            Self::deposit_event(Event::Minted { amount, total_tokens });
            Ok(())
        }

        /// Credit `amount` tokens directly to `recipient`, minting any shortfall.
        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::grant_tokens())]
        pub fn grant_tokens(
            origin: OriginFor<T>,
            recipient: T::AccountId,
            amount: u128,
        ) -> DispatchResult {
            Self::ensure_role(origin, Role::SuperAdmin)?;
            Self::ensure_allowed(&recipient, Operation::Grant)?;
            Self::ensure_within_circulation_cap(amount)?;

            let issuance = Self::prepare_issue(&recipient, amount)?;
            Self::apply_issue(&recipient, issuance);
            Self::deposit_event(Event::Granted { recipient, amount });
            Ok(())
        }

        /// Create a vesting grant. A `start_time` of zero starts vesting now.
        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::grant_vested_tokens())]
        pub fn grant_vested_tokens(
            origin: OriginFor<T>,
            beneficiary: T::AccountId,
            fully_vested_amount: u128,
            start_time: u64,
            cliff_duration: u64,
            vesting_duration: u64,
            revocable: bool,
        ) -> DispatchResult {
            Self::ensure_role(origin, Role::SuperAdmin)?;
            Self::do_grant_vested_tokens(
                &beneficiary,
                fully_vested_amount,
                start_time,
                cliff_duration,
                vesting_duration,
                revocable,
            )
        }

        /// Release everything vested so far to `beneficiary`. Any signed
        /// account may submit this; tokens only ever go to the beneficiary.
        #[pallet::call_index(7)]
        #[pallet::weight(T::WeightInfo::release())]
        pub fn release(origin: OriginFor<T>, beneficiary: T::AccountId) -> DispatchResult {
            ensure_signed(origin)?;
            Self::do_release(&beneficiary).map(|_| ())
        }

        #[pallet::call_index(8)]
        #[pallet::weight(T::WeightInfo::revoke_vesting())]
        pub fn revoke_vesting(origin: OriginFor<T>, beneficiary: T::AccountId) -> DispatchResult {
            Self::ensure_role(origin, Role::SuperAdmin)?;
            Self::do_revoke(&beneficiary).map(|_| ())
        }

        #[pallet::call_index(9)]
        #[pallet::weight(T::WeightInfo::freeze_account())]
        pub fn freeze_account(
            origin: OriginFor<T>,
            target: T::AccountId,
            frozen: bool,
        ) -> DispatchResult {
            Self::ensure_role(origin, Role::Admin)?;
            Self::set_account_freeze(target, frozen);
            Ok(())
        }

        #[pallet::call_index(10)]
        #[pallet::weight(T::WeightInfo::freeze_token())]
        pub fn freeze_token(origin: OriginFor<T>, frozen: bool) -> DispatchResult {
            Self::ensure_role(origin, Role::Admin)?;
            Self::set_token_freeze(frozen);
            Ok(())
        }

        #[pallet::call_index(11)]
        #[pallet::weight(T::WeightInfo::add_super_admin())]
        pub fn add_super_admin(origin: OriginFor<T>, account: T::AccountId) -> DispatchResult {
            Self::ensure_role(origin, Role::SuperAdmin)?;
            SuperAdmins::<T>::insert(&account, true);
            Self::deposit_event(Event::SuperAdminAdded { account });
            Ok(())
        }

        #[pallet::call_index(12)]
        #[pallet::weight(T::WeightInfo::remove_super_admin())]
        pub fn remove_super_admin(origin: OriginFor<T>, account: T::AccountId) -> DispatchResult {
            Self::ensure_role(origin, Role::Owner)?;
            ensure!(Owner::<T>::get().as_ref() != Some(&account), Error::<T>::CannotDemoteOwner);
            SuperAdmins::<T>::remove(&account);
            Self::deposit_event(Event::SuperAdminRemoved { account });
            Ok(())
        }

        #[pallet::call_index(13)]
        #[pallet::weight(T::WeightInfo::add_admin())]
        pub fn add_admin(origin: OriginFor<T>, account: T::AccountId) -> DispatchResult {
            Self::ensure_role(origin, Role::SuperAdmin)?;
            Admins::<T>::insert(&account, true);
            Self::deposit_event(Event::AdminAdded { account });
            Ok(())
        }

        #[pallet::call_index(14)]
        #[pallet::weight(T::WeightInfo::remove_admin())]
        pub fn remove_admin(origin: OriginFor<T>, account: T::AccountId) -> DispatchResult {
            Self::ensure_role(origin, Role::SuperAdmin)?;
            Admins::<T>::remove(&account);
            Self::deposit_event(Event::AdminRemoved { account });
            Ok(())
        }
    }

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Immutable owner account
        pub owner: Option<T::AccountId>,
        /// Initial super-admins
        pub super_admins: Vec<T::AccountId>,
        /// Initial admins
        pub admins: Vec<T::AccountId>,
        /// Tokens minted at genesis (outside circulation)
        pub initial_supply: u128,
        /// Apply the token parameters below and lock configuration
        pub configured: bool,
        /// Token name
        pub token_name: Vec<u8>,
        /// Token symbol
        pub token_symbol: Vec<u8>,
        pub buy_price: u128,
        pub circulation_cap: u128,
        pub max_balance: u128,
        pub foundation: Option<T::AccountId>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            if let Some(ref owner) = self.owner {
                Owner::<T>::put(owner);
            }
            for account in &self.super_admins {
                SuperAdmins::<T>::insert(account, true);
            }
            for account in &self.admins {
                Admins::<T>::insert(account, true);
            }

            TotalTokens::<T>::put(self.initial_supply);

            if self.configured {
                assert!(self.buy_price > 0, "Buy price must be non-zero");
                assert!(self.max_balance > 0, "Max balance must be non-zero");

                let name: BoundedVec<u8, MaxNameLen> = self
                    .token_name
                    .clone()
                    .try_into()
                    .expect("Token name too long (max 64 bytes)");
                TokenName::<T>::put(name);

                let symbol: BoundedVec<u8, MaxSymbolLen> = self
                    .token_symbol
                    .clone()
                    .try_into()
                    .expect("Token symbol too long (max 16 bytes)");
                TokenSymbol::<T>::put(symbol);

                BuyPrice::<T>::put(self.buy_price);
                CirculationCap::<T>::put(self.circulation_cap);
                MaxBalance::<T>::put(self.max_balance);
                Foundation::<T>::set(self.foundation.clone());
                Configured::<T>::put(true);
            }

            log::info!(
                target: LOG_TARGET,
                "genesis: {} super-admins, {} admins, initial supply {}, configured {}",
                self.super_admins.len(),
                self.admins.len(),
                self.initial_supply,
                self.configured
            );
        }
    }
}
