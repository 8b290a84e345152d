//! Benchmarking setup for pallet-cst-token

use super::*;

#[allow(unused)]
use crate::Pallet as CstToken;
use frame_benchmarking::v2::*;
use frame_support::traits::fungible::Mutate;
use frame_system::RawOrigin;
use sp_std::vec;

const FUNDS: u128 = 1_000_000_000_000;
const AMOUNT: u128 = 1_000;

/// Make the whitelisted caller the owner so every role check passes.
fn privileged<T: Config>() -> T::AccountId {
    let caller: T::AccountId = whitelisted_caller();
    Owner::<T>::put(&caller);
    caller
}

/// Configure with a unit price and caps that never bind.
fn configure_token<T: Config>() {
    BuyPrice::<T>::put(1);
    CirculationCap::<T>::put(u128::MAX / 2);
    MaxBalance::<T>::put(u128::MAX / 2);
    Configured::<T>::put(true);
}

fn funded<T: Config>(name: &'static str) -> T::AccountId {
    let who: T::AccountId = account(name, 0, 0);
    T::Currency::set_balance(&who, FUNDS);
    who
}

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn configure() {
        let caller = privileged::<T>();
        Configured::<T>::kill();

        #[extrinsic_call]
        _(
            RawOrigin::Signed(caller),
            vec![b'N'; 64],
            vec![b'S'; 16],
            1u128,
            u128::MAX / 2,
            u128::MAX / 2,
            None,
        );

        assert!(Configured::<T>::get());
    }

    #[benchmark]
    fn buy() {
        configure_token::<T>();
        let caller = funded::<T>("buyer");

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), AMOUNT);

        assert_eq!(Balances::<T>::get(&caller), AMOUNT);
    }

    #[benchmark]
    fn sell() -> Result<(), BenchmarkError> {
        configure_token::<T>();
        let caller = funded::<T>("seller");
        CstToken::<T>::do_buy(&caller, AMOUNT)?;

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), AMOUNT);

        assert_eq!(Balances::<T>::get(&caller), 0);
        Ok(())
    }

    #[benchmark]
    fn transfer() {
        let caller: T::AccountId = whitelisted_caller();
        let recipient: T::AccountId = account("recipient", 0, 0);
        TotalTokens::<T>::put(AMOUNT);
        TotalInCirculation::<T>::put(AMOUNT);
        Balances::<T>::insert(&caller, AMOUNT);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), recipient.clone(), AMOUNT);

        assert_eq!(Balances::<T>::get(&recipient), AMOUNT);
    }

    #[benchmark]
    fn mint_tokens() {
        let caller = privileged::<T>();
        let before = TotalTokens::<T>::get();

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), AMOUNT);

        assert_eq!(TotalTokens::<T>::get(), before + AMOUNT);
    }

    #[benchmark]
    fn grant_tokens() {
        let caller = privileged::<T>();
        configure_token::<T>();
        let recipient: T::AccountId = account("recipient", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), recipient.clone(), AMOUNT);

        assert_eq!(Balances::<T>::get(&recipient), AMOUNT);
    }

    #[benchmark]
    fn grant_vested_tokens() {
        let caller = privileged::<T>();
        configure_token::<T>();
        let beneficiary: T::AccountId = account("beneficiary", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), beneficiary.clone(), AMOUNT, 0u64, 10u64, 100u64, true);

        assert!(VestingGrants::<T>::contains_key(&beneficiary));
    }

    #[benchmark]
    fn release() -> Result<(), BenchmarkError> {
        configure_token::<T>();
        let caller: T::AccountId = whitelisted_caller();
        let beneficiary: T::AccountId = account("beneficiary", 0, 0);
        // Zero duration vests everything at the start
        CstToken::<T>::do_grant_vested_tokens(&beneficiary, AMOUNT, 0, 0, 0, false)?;

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), beneficiary.clone());

        assert_eq!(Balances::<T>::get(&beneficiary), AMOUNT);
        Ok(())
    }

    #[benchmark]
    fn revoke_vesting() -> Result<(), BenchmarkError> {
        let caller = privileged::<T>();
        configure_token::<T>();
        let beneficiary: T::AccountId = account("beneficiary", 0, 0);
        CstToken::<T>::do_grant_vested_tokens(&beneficiary, AMOUNT, 0, 0, 1_000_000, true)?;

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), beneficiary.clone());

        assert_eq!(VestingGrants::<T>::get(&beneficiary).map(|g| g.revoked), Some(true));
        Ok(())
    }

    #[benchmark]
    fn freeze_account() {
        let caller = privileged::<T>();
        let target: T::AccountId = account("target", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), target.clone(), true);

        assert_eq!(FrozenAccounts::<T>::get(&target), true);
    }

    #[benchmark]
    fn freeze_token() {
        let caller = privileged::<T>();

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), true);

        assert_eq!(TokenFrozen::<T>::get(), true);
    }

    #[benchmark]
    fn add_super_admin() {
        let caller = privileged::<T>();
        let account: T::AccountId = account("account", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), account.clone());

        assert_eq!(SuperAdmins::<T>::get(&account), true);
    }

    #[benchmark]
    fn remove_super_admin() {
        let caller = privileged::<T>();
        let account: T::AccountId = account("account", 0, 0);
        SuperAdmins::<T>::insert(&account, true);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), account.clone());

        assert_eq!(SuperAdmins::<T>::get(&account), false);
    }

    #[benchmark]
    fn add_admin() {
        let caller = privileged::<T>();
        let account: T::AccountId = account("account", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), account.clone());

        assert_eq!(Admins::<T>::get(&account), true);
    }

    #[benchmark]
    fn remove_admin() {
        let caller = privileged::<T>();
        let account: T::AccountId = account("account", 0, 0);
        Admins::<T>::insert(&account, true);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), account.clone());

        assert_eq!(Admins::<T>::get(&account), false);
    }

    impl_benchmark_test_suite!(CstToken, crate::mock::new_test_ext(), crate::mock::Test);
}
