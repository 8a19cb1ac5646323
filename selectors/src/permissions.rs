use {
  crate::{
    accounts::{self, AccountWithBalance},
    Error,
    WalletState,
  },
  serde::Serialize,
  std::collections::BTreeMap,
  vantage_primitives::{
    Address,
    ChainId,
    InternalAccount,
    Permission,
    PermissionHistoryEntry,
    PermissionSubject,
    ETH_ACCOUNTS_PERMISSION,
  },
};

/// An account connected to a dapp, annotated with the last time the
/// dapp interacted with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedAccount {
  #[serde(flatten)]
  pub account: InternalAccount,
  pub balance: String,

  /// Milliseconds since epoch, absent if the origin never used the
  /// account.
  pub last_active: Option<u64>,
}

/// A dapp (or snap, or extension) as shown in connection listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedSubject {
  pub origin: String,
  pub name: Option<String>,
  pub icon_url: Option<String>,
  pub extension_id: Option<String>,
}

pub fn permission_subjects(
  state: &WalletState,
) -> &BTreeMap<String, PermissionSubject> {
  &state.subjects
}

pub fn permissions<'s>(
  state: &'s WalletState,
  origin: &str,
) -> Option<&'s BTreeMap<String, Permission>> {
  state.subjects.get(origin).map(|s| &s.permissions)
}

/// EVM addresses the origin may see.
pub fn permitted_accounts(state: &WalletState, origin: &str) -> Vec<Address> {
  state
    .subjects
    .get(origin)
    .map(PermissionSubject::eth_accounts)
    .unwrap_or_default()
}

/// EVM chains the origin may use.
pub fn permitted_chains(state: &WalletState, origin: &str) -> Vec<ChainId> {
  state
    .subjects
    .get(origin)
    .map(PermissionSubject::eth_chain_ids)
    .unwrap_or_default()
}

pub fn permitted_accounts_for_current_tab(state: &WalletState) -> Vec<Address> {
  state
    .active_tab_origin()
    .map(|origin| permitted_accounts(state, origin))
    .unwrap_or_default()
}

pub fn permitted_chains_for_current_tab(state: &WalletState) -> Vec<ChainId> {
  state
    .active_tab_origin()
    .map(|origin| permitted_chains(state, origin))
    .unwrap_or_default()
}

/// Origins that were granted at least one account, with their accounts.
pub fn permitted_accounts_by_origin(
  state: &WalletState,
) -> BTreeMap<String, Vec<Address>> {
  state
    .subjects
    .iter()
    .map(|(origin, subject)| (origin.clone(), subject.eth_accounts()))
    .filter(|(_, accounts)| !accounts.is_empty())
    .collect()
}

pub fn permitted_chains_by_origin(
  state: &WalletState,
) -> BTreeMap<String, Vec<ChainId>> {
  state
    .subjects
    .iter()
    .map(|(origin, subject)| (origin.clone(), subject.eth_chain_ids()))
    .filter(|(_, chains)| !chains.is_empty())
    .collect()
}

fn connected_subject(state: &WalletState, origin: &str) -> ConnectedSubject {
  let metadata = state.subject_metadata.get(origin);
  ConnectedSubject {
    origin: origin.into(),
    name: metadata.and_then(|m| m.name.clone()),
    icon_url: metadata.and_then(|m| m.icon_url.clone()),
    extension_id: metadata.and_then(|m| m.extension_id.clone()),
  }
}

/// Subjects that can see the selected account.
pub fn connected_subjects_for_selected_address(
  state: &WalletState,
) -> Result<Vec<ConnectedSubject>, Error> {
  let selected = &accounts::selected_internal_account(state)?.address;
  Ok(
    state
      .subjects
      .iter()
      .filter(|(_, subject)| subject.eth_accounts().contains(selected))
      .map(|(origin, _)| connected_subject(state, origin))
      .collect(),
  )
}

/// For every exposed address, the subjects that can see it.
pub fn connected_subjects_for_all_addresses(
  state: &WalletState,
) -> BTreeMap<Address, Vec<ConnectedSubject>> {
  let mut connections: BTreeMap<Address, Vec<ConnectedSubject>> =
    BTreeMap::new();
  for (origin, subject) in state.subjects.iter() {
    for address in subject.eth_accounts() {
      connections
        .entry(address)
        .or_default()
        .push(connected_subject(state, origin));
    }
  }
  connections
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectBadge {
  pub icon_url: Option<String>,

  /// The subject name, or its origin when it has none.
  pub name: String,
}

/// address -> origin -> badge of every subject connected to it.
pub fn address_connected_subject_map(
  state: &WalletState,
) -> BTreeMap<Address, BTreeMap<String, SubjectBadge>> {
  let mut map: BTreeMap<Address, BTreeMap<String, SubjectBadge>> =
    BTreeMap::new();
  for (origin, addresses) in permitted_accounts_by_origin(state) {
    let metadata = state.subject_metadata.get(&origin);
    let badge = SubjectBadge {
      icon_url: metadata.and_then(|m| m.icon_url.clone()),
      name: metadata
        .and_then(|m| m.name.clone())
        .unwrap_or_else(|| origin.clone()),
    };
    for address in addresses {
      map
        .entry(address)
        .or_default()
        .insert(origin.clone(), badge.clone());
    }
  }
  map
}

/// Subjects that hold a permission with the given name.
pub fn subjects_with_permission(
  state: &WalletState,
  permission: &str,
) -> Vec<ConnectedSubject> {
  state
    .subjects
    .iter()
    .filter(|(_, subject)| subject.permissions.contains_key(permission))
    .map(|(origin, _)| connected_subject(state, origin))
    .collect()
}

pub fn permissions_for_active_tab(
  state: &WalletState,
) -> Vec<(&str, &Permission)> {
  state
    .active_tab_origin()
    .and_then(|origin| permissions(state, origin))
    .map(|perms| perms.iter().map(|(k, v)| (k.as_str(), v)).collect())
    .unwrap_or_default()
}

pub fn active_tab_has_permissions(state: &WalletState) -> bool {
  !permissions_for_active_tab(state).is_empty()
}

/// Account connection history of every origin that has one.
pub fn last_connected_info(
  state: &WalletState,
) -> BTreeMap<&str, &PermissionHistoryEntry> {
  state
    .permission_history
    .iter()
    .filter_map(|(origin, perms)| {
      perms
        .get(ETH_ACCOUNTS_PERMISSION)
        .map(|entry| (origin.as_str(), entry))
    })
    .collect()
}

/// Accounts connected to the origin, most recently used first.
///
/// Only EVM accounts that the origin is permitted to see are listed.
/// Accounts the origin never used are listed last, in keyring order.
pub fn ordered_connected_accounts(
  state: &WalletState,
  origin: &str,
) -> Vec<ConnectedAccount> {
  connect_ordered(state, &accounts::accounts_ordered(state), origin)
}

pub fn ordered_connected_accounts_for_active_tab(
  state: &WalletState,
) -> Vec<ConnectedAccount> {
  state
    .active_tab_origin()
    .map(|origin| ordered_connected_accounts(state, origin))
    .unwrap_or_default()
}

pub(crate) fn connect_ordered(
  state: &WalletState,
  ordered: &[AccountWithBalance],
  origin: &str,
) -> Vec<ConnectedAccount> {
  let permitted = permitted_accounts(state, origin);
  let history = state
    .permission_history_for(origin, ETH_ACCOUNTS_PERMISSION)
    .map(|entry| &entry.accounts);

  let mut connected: Vec<_> = ordered
    .iter()
    .filter(|acc| permitted.contains(&acc.account.address))
    .filter(|acc| acc.account.kind.is_evm())
    .map(|acc| ConnectedAccount {
      account: acc.account.clone(),
      balance: acc.balance.clone(),
      last_active: history
        .and_then(|h| h.get(&acc.account.address))
        .copied(),
    })
    .collect();

  // sort_by is stable, equal times keep their keyring order
  connected.sort_by(|a, b| match (a.last_active, b.last_active) {
    (Some(a), Some(b)) => b.cmp(&a),
    (Some(_), None) => std::cmp::Ordering::Less,
    (None, Some(_)) => std::cmp::Ordering::Greater,
    (None, None) => std::cmp::Ordering::Equal,
  });
  connected
}

/// The selected account, if it should be offered for connection to the
/// active tab.
///
/// That is the case only when the tab already has some, but not all,
/// accounts connected and the selected account is not one of them.
pub fn account_to_connect_to_active_tab(
  state: &WalletState,
) -> Result<Option<&InternalAccount>, Error> {
  let selected = accounts::selected_internal_account(state)?;
  let connected = permitted_accounts_for_current_tab(state);
  let total = state.internal_accounts.accounts().len();

  if connected.is_empty() || connected.len() == total {
    return Ok(None);
  }

  Ok(match connected.contains(&selected.address) {
    true => None,
    false => Some(selected),
  })
}

pub fn is_account_connected_to_current_tab(
  state: &WalletState,
  address: &Address,
) -> bool {
  permitted_accounts_for_current_tab(state).contains(address)
}

/// Accounts in keyring order that are not connected to the origin.
pub fn unconnected_accounts(
  state: &WalletState,
  origin: &str,
) -> Vec<AccountWithBalance> {
  let ordered = accounts::accounts_ordered(state);
  let connected = connect_ordered(state, &ordered, origin);
  ordered
    .into_iter()
    .filter(|acc| !connected.iter().any(|c| c.account.id == acc.account.id))
    .collect()
}

pub fn unconnected_accounts_for_active_tab(
  state: &WalletState,
) -> Vec<AccountWithBalance> {
  match state.active_tab_origin() {
    Some(origin) => unconnected_accounts(state, origin),
    None => accounts::accounts_ordered(state),
  }
}
