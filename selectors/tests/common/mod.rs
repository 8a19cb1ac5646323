#![allow(dead_code)]

use {
  std::sync::Arc,
  vantage_primitives::{Address, PermissionHistoryEntry},
  vantage_selectors::WalletState,
};

pub const UNISWAP: &str = "https://app.uniswap.org";
pub const ACCOUNT_1: &str = "0x1111111111111111111111111111111111111111";
pub const ACCOUNT_2: &str = "0x2222222222222222222222222222222222222222";
pub const LEDGER_1: &str = "0x3333333333333333333333333333333333333333";

/// A snapshot of a wallet with two HD accounts, a ledger account and a
/// solana snap account. Uniswap is open in the active tab and has both
/// HD accounts connected, account 2 being the one it used last.
pub fn snapshot() -> WalletState {
  serde_json::from_str(include_str!("../fixtures/snapshot.json"))
    .expect("fixture snapshot decodes")
}

pub fn address(value: &str) -> Address {
  value.parse().expect("valid fixture address")
}

/// Replaces the recorded `eth_accounts` history of an origin.
pub fn with_history(
  state: &WalletState,
  origin: &str,
  history: &[(&str, u64)],
) -> WalletState {
  state.update(|s| {
    let entry = PermissionHistoryEntry {
      accounts: history.iter().map(|(a, t)| (address(a), *t)).collect(),
      last_approved: None,
    };
    Arc::make_mut(&mut s.permission_history)
      .entry(origin.to_owned())
      .or_default()
      .insert("eth_accounts".to_owned(), entry);
  })
}

pub fn ids<'a, T: 'a>(
  items: impl IntoIterator<Item = &'a T>,
  id: impl Fn(&'a T) -> &'a str,
) -> Vec<&'a str> {
  items.into_iter().map(id).collect()
}
