//! Weights for pallet-cst-token.
//!
//! Hand-estimated from the storage accesses of each call until the
//! benchmarks in `benchmarking.rs` are run against a production runtime.

use frame_support::{
    traits::Get,
    weights::{constants::RocksDbWeight, RuntimeDbWeight, Weight},
};

pub trait WeightInfo {
    fn configure() -> Weight;
    fn buy() -> Weight;
    fn sell() -> Weight;
    fn transfer() -> Weight;
    fn mint_tokens() -> Weight;
    fn grant_tokens() -> Weight;
    fn grant_vested_tokens() -> Weight;
    fn release() -> Weight;
    fn revoke_vesting() -> Weight;
    fn freeze_account() -> Weight;
    fn freeze_token() -> Weight;
    fn add_super_admin() -> Weight;
    fn remove_super_admin() -> Weight;
    fn add_admin() -> Weight;
    fn remove_admin() -> Weight;
}

fn base(reads: u64, writes: u64, db: RuntimeDbWeight) -> Weight {
    Weight::from_parts(10_000_000, 0).saturating_add(db.reads_writes(reads, writes))
}

/// Estimates against RocksDB read/write costs.
impl WeightInfo for () {
    fn configure() -> Weight {
        base(3, 7, RocksDbWeight::get())
    }
    fn buy() -> Weight {
        base(11, 6, RocksDbWeight::get())
    }
    fn sell() -> Weight {
        base(7, 4, RocksDbWeight::get())
    }
    fn transfer() -> Weight {
        base(5, 2, RocksDbWeight::get())
    }
    fn mint_tokens() -> Weight {
        base(5, 1, RocksDbWeight::get())
    }
    fn grant_tokens() -> Weight {
        base(9, 3, RocksDbWeight::get())
    }
    fn grant_vested_tokens() -> Weight {
        base(9, 3, RocksDbWeight::get())
    }
    fn release() -> Weight {
        base(8, 4, RocksDbWeight::get())
    }
    fn revoke_vesting() -> Weight {
        base(10, 4, RocksDbWeight::get())
    }
    fn freeze_account() -> Weight {
        base(3, 1, RocksDbWeight::get())
    }
    fn freeze_token() -> Weight {
        base(3, 1, RocksDbWeight::get())
    }
    fn add_super_admin() -> Weight {
        base(2, 1, RocksDbWeight::get())
    }
    fn remove_super_admin() -> Weight {
        base(1, 1, RocksDbWeight::get())
    }
    fn add_admin() -> Weight {
        base(2, 1, RocksDbWeight::get())
    }
    fn remove_admin() -> Weight {
        base(2, 1, RocksDbWeight::get())
    }
}
