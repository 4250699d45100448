//! Persistence tests for the LMDB wallet state backend.

use std::collections::BTreeSet;

use envelope_store::{WalletReconciliationState, WalletStateCache, WalletStateStore};
use envelope_store_lmdb::LmdbEnvironment;
use envelope_types::{TimestampMs, WalletAddress};

fn temp_env() -> (tempfile::TempDir, LmdbEnvironment) {
    let dir = tempfile::tempdir().expect("temp dir");
    let env = LmdbEnvironment::open_default(dir.path()).expect("open env");
    (dir, env)
}

fn wallet(raw: &str) -> WalletAddress {
    WalletAddress::parse(raw).expect("valid address")
}

#[test]
fn missing_wallet_loads_as_none() {
    let (_dir, env) = temp_env();
    let store = env.wallet_state_store();
    assert!(store.load(&wallet("0xabc")).unwrap().is_none());
    assert_eq!(store.wallet_count().unwrap(), 0);
}

#[test]
fn save_then_load_returns_record() {
    let (_dir, env) = temp_env();
    let store = env.wallet_state_store();
    let state = WalletReconciliationState {
        last_checked_approval_hash: Some("0x01".into()),
        winning_approval_hash: Some("0x02".into()),
        last_opened_at: Some(TimestampMs::new(1_700_000_000_000)),
        skipped_transaction_ids: ["t1", "t2"].iter().map(|s| s.to_string()).collect(),
    };
    store.save(&wallet("0xabc"), &state).unwrap();
    assert_eq!(store.load(&wallet("0xABC")).unwrap(), Some(state));
}

#[test]
fn records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let env = LmdbEnvironment::open_default(dir.path()).unwrap();
        let cache = WalletStateCache::new(env.wallet_state_store());
        cache.upsert_winning(&wallet("0xabc"), "0xwin");
    }
    let env = LmdbEnvironment::open_default(dir.path()).unwrap();
    let state = env.wallet_state_store().load(&wallet("0xabc")).unwrap().unwrap();
    assert_eq!(state.winning_approval_hash.as_deref(), Some("0xwin"));
}

#[test]
fn wallets_are_isolated() {
    let (_dir, env) = temp_env();
    let cache = WalletStateCache::new(env.wallet_state_store());
    let skipped: BTreeSet<String> = ["t1".to_string()].into_iter().collect();
    cache.upsert_skipped(&wallet("0xaaa"), skipped.clone());
    cache.upsert_winning(&wallet("0xbbb"), "0xwin");

    let a = cache.get(&wallet("0xaaa")).unwrap();
    let b = cache.get(&wallet("0xbbb")).unwrap();
    assert_eq!(a.skipped_transaction_ids, skipped);
    assert!(a.winning_approval_hash.is_none());
    assert!(b.skipped_transaction_ids.is_empty());
    assert_eq!(cache.store().wallet_count().unwrap(), 2);
}
