use crate as pallet_cst_token;
use frame_support::{
    derive_impl, parameter_types,
    traits::{ConstU128, ConstU32, ConstU64},
    PalletId,
};
use sp_core::H256;
use sp_runtime::{
    traits::{BlakeTwo256, IdentityLookup},
    BuildStorage,
};

type Block = frame_system::mocking::MockBlock<Test>;

pub const OWNER: u64 = 1;
pub const SUPER_ADMIN: u64 = 2;
pub const ADMIN: u64 = 3;
pub const ALICE: u64 = 10;
pub const BOB: u64 = 11;
pub const CAROL: u64 = 12;

/// Native currency per token.
pub const BUY_PRICE: u128 = 100;
pub const CIRCULATION_CAP: u128 = 10_000;
pub const MAX_BALANCE: u128 = 1_000;
pub const INITIAL_SUPPLY: u128 = 100;
pub const ENDOWMENT: u128 = 10_000_000;

pub const DAY: u64 = 86_400;
/// Chain time (seconds) at the start of every test.
pub const GENESIS_TIME: u64 = 1_700_000_000;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        Timestamp: pallet_timestamp,
        Balances: pallet_balances,
        CstToken: pallet_cst_token,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type BaseCallFilter = frame_support::traits::Everything;
    type BlockWeights = ();
    type BlockLength = ();
    type DbWeight = ();
    type RuntimeOrigin = RuntimeOrigin;
    type RuntimeCall = RuntimeCall;
    type Nonce = u64;
    type Hash = H256;
    type Hashing = BlakeTwo256;
    type AccountId = u64;
    type Lookup = IdentityLookup<Self::AccountId>;
    type Block = Block;
    type RuntimeEvent = RuntimeEvent;
    type BlockHashCount = ConstU64<250>;
    type Version = ();
    type PalletInfo = PalletInfo;
    type AccountData = pallet_balances::AccountData<u128>;
    type OnNewAccount = ();
    type OnKilledAccount = ();
    type SystemWeightInfo = ();
    type SS58Prefix = ();
    type OnSetCode = ();
    type MaxConsumers = ConstU32<16>;
}

impl pallet_timestamp::Config for Test {
    type Moment = u64;
    type OnTimestampSet = ();
    type MinimumPeriod = ConstU64<1>;
    type WeightInfo = ();
}

#[derive_impl(pallet_balances::config_preludes::TestDefaultConfig)]
impl pallet_balances::Config for Test {
    type Balance = u128;
    type ExistentialDeposit = ConstU128<1>;
    type AccountStore = System;
}

parameter_types! {
    pub const CstPalletId: PalletId = PalletId(*b"cst/cust");
}

impl pallet_cst_token::Config for Test {
    type Currency = Balances;
    type TimeProvider = Timestamp;
    type PalletId = CstPalletId;
    type WeightInfo = ();
}

fn build_ext(configured: bool) -> sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_balances::GenesisConfig::<Test> {
        balances: vec![
            (ALICE, ENDOWMENT),
            (BOB, ENDOWMENT),
            (CAROL, ENDOWMENT),
            (SUPER_ADMIN, ENDOWMENT),
        ],
        dev_accounts: None,
    }
    .assimilate_storage(&mut t)
    .unwrap();

    pallet_cst_token::GenesisConfig::<Test> {
        owner: Some(OWNER),
        super_admins: vec![SUPER_ADMIN],
        admins: vec![ADMIN],
        initial_supply: INITIAL_SUPPLY,
        configured,
        token_name: b"CardStack Token".to_vec(),
        token_symbol: b"CST".to_vec(),
        buy_price: BUY_PRICE,
        circulation_cap: CIRCULATION_CAP,
        max_balance: MAX_BALANCE,
        foundation: None,
    }
    .assimilate_storage(&mut t)
    .unwrap();

    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| {
        System::set_block_number(1);
        set_now(GENESIS_TIME);
    });
    ext
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> sp_io::TestExternalities {
    build_ext(true)
}

/// Genesis without token parameters, for exercising `configure`.
pub fn unconfigured_test_ext() -> sp_io::TestExternalities {
    build_ext(false)
}

/// Set chain time in seconds.
pub fn set_now(secs: u64) {
    Timestamp::set_timestamp(secs * 1_000);
}

/// Assert the ledger invariant holds.
pub fn check_ledger() {
    CstToken::do_try_state().expect("ledger invariant violated");
}
