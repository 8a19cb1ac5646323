use {
  crate::{permissions::ConnectedAccount, Error, WalletState},
  serde::Serialize,
  std::cmp::Reverse,
  vantage_primitives::{Address, InternalAccount, KeyringKind},
};

/// Balance reported for accounts that have no cached balance yet.
pub const ZERO_BALANCE: &str = "0x0";

/// An account joined with its last known native balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountWithBalance {
  #[serde(flatten)]
  pub account: InternalAccount,
  pub balance: String,
}

/// An account annotated for the account picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortedAccount {
  #[serde(flatten)]
  pub account: AccountWithBalance,
  pub pinned: bool,
  pub hidden: bool,

  /// The connected account the active tab interacted with most
  /// recently.
  pub active: bool,
}

pub fn internal_accounts(state: &WalletState) -> Vec<&InternalAccount> {
  state.internal_accounts.accounts().values().collect()
}

pub fn internal_account<'s>(
  state: &'s WalletState,
  id: &str,
) -> Option<&'s InternalAccount> {
  state.internal_accounts.get(id)
}

pub fn internal_account_by_address<'s>(
  state: &'s WalletState,
  address: &Address,
) -> Option<&'s InternalAccount> {
  state.internal_accounts.by_address(address)
}

/// The selected account. A selected id that does not resolve means the
/// snapshot is corrupt.
pub fn selected_internal_account(
  state: &WalletState,
) -> Result<&InternalAccount, Error> {
  let id = state.internal_accounts.selected_account();
  state
    .internal_accounts
    .get(id)
    .ok_or_else(|| Error::SelectedAccountNotFound(id.into()))
}

/// Same as [`selected_internal_account`] but tolerates a missing
/// selection, which happens during onboarding.
pub fn maybe_selected_internal_account(
  state: &WalletState,
) -> Option<&InternalAccount> {
  match state.internal_accounts.selected_account() {
    "" => None,
    id => state.internal_accounts.get(id),
  }
}

pub fn evm_internal_accounts(state: &WalletState) -> Vec<&InternalAccount> {
  state
    .internal_accounts
    .accounts()
    .values()
    .filter(|acc| acc.kind.is_evm())
    .collect()
}

/// The EVM account that was selected most recently. Accounts that were
/// never selected count as selected at time zero.
pub fn selected_evm_internal_account(
  state: &WalletState,
) -> Option<&InternalAccount> {
  // first maximum wins
  evm_internal_accounts(state)
    .into_iter()
    .min_by_key(|acc| Reverse(acc.metadata.last_selected.unwrap_or(0)))
}

/// Accounts in the order their keyrings list them. Keyring entries
/// without a matching account record are skipped.
pub fn accounts_sorted_by_keyring(state: &WalletState) -> Vec<&InternalAccount> {
  state
    .keyrings
    .iter()
    .flat_map(|keyring| keyring.accounts.iter())
    .filter_map(|address| state.internal_accounts.by_address(address))
    .collect()
}

pub fn balance_of(state: &WalletState, address: &Address) -> String {
  state
    .account_balances
    .get(address)
    .map(|b| b.balance.clone())
    .unwrap_or_else(|| ZERO_BALANCE.into())
}

/// Accounts in keyring order joined with their cached balances.
pub fn accounts_ordered(state: &WalletState) -> Vec<AccountWithBalance> {
  accounts_sorted_by_keyring(state)
    .into_iter()
    .map(|account| AccountWithBalance {
      balance: balance_of(state, &account.address),
      account: account.clone(),
    })
    .collect()
}

pub fn selected_account_with_balance(
  state: &WalletState,
) -> Result<AccountWithBalance, Error> {
  let account = selected_internal_account(state)?;
  Ok(AccountWithBalance {
    balance: balance_of(state, &account.address),
    account: account.clone(),
  })
}

/// Accounts for the account picker: pinned accounts first in pinned
/// order, then accounts that are neither pinned nor hidden, then hidden
/// accounts.
pub fn updated_and_sorted_accounts(state: &WalletState) -> Vec<SortedAccount> {
  let ordered = accounts_ordered(state);
  let connected = match state.active_tab_origin() {
    Some(origin) => {
      crate::permissions::connect_ordered(state, &ordered, origin)
    }
    None => vec![],
  };
  sort_for_display(
    &ordered,
    &state.pinned_accounts,
    &state.hidden_accounts,
    &connected,
  )
}

pub(crate) fn sort_for_display(
  ordered: &[AccountWithBalance],
  pinned: &[Address],
  hidden: &[Address],
  connected: &[ConnectedAccount],
) -> Vec<SortedAccount> {
  // connected accounts are ordered by recency, the head is the active one
  let active = connected.first().map(|c| c.account.id.as_str());

  let annotate = |acc: &AccountWithBalance| SortedAccount {
    pinned: pinned.contains(&acc.account.address),
    hidden: hidden.contains(&acc.account.address),
    active: Some(acc.account.id.as_str()) == active,
    account: acc.clone(),
  };

  let pinned_first = pinned
    .iter()
    .filter(|address| !hidden.contains(*address))
    .filter_map(|address| {
      ordered.iter().find(|acc| &acc.account.address == address)
    })
    .map(&annotate);

  let regular = ordered
    .iter()
    .filter(|acc| {
      !pinned.contains(&acc.account.address)
        && !hidden.contains(&acc.account.address)
    })
    .map(&annotate);

  let hidden_last = ordered
    .iter()
    .filter(|acc| hidden.contains(&acc.account.address))
    .map(&annotate);

  pinned_first.chain(regular).chain(hidden_last).collect()
}

pub fn is_hardware_wallet(state: &WalletState) -> Result<bool, Error> {
  Ok(selected_internal_account(state)?.keyring_kind().is_hardware())
}

/// The keyring kind of the selected account if it is a hardware wallet.
pub fn hardware_wallet_kind(
  state: &WalletState,
) -> Result<Option<KeyringKind>, Error> {
  let kind = selected_internal_account(state)?.keyring_kind();
  Ok(kind.is_hardware().then(|| kind.clone()))
}
