use {
  crate::{
    accounts::{self, AccountWithBalance, SortedAccount},
    alerts,
    confirmations,
    delegations::{self, DelegationFilter},
    feature_flags::{merge_flags, ManifestFlags},
    memo::{ByRef, Memo},
    networks::{self, DappNetwork},
    permissions::{self, ConnectedAccount},
    state::{ConfirmAlertsState, InternalAccountsState},
    trace::TraceRegistry,
    WalletState,
  },
  std::{collections::BTreeMap, num::NonZeroUsize, sync::Arc},
  vantage_primitives::{
    Address,
    Alert,
    ApprovalRequest,
    CaipChainId,
    ChainId,
    DelegationEntry,
    FlagMap,
    Keyring,
    MultichainNetworkConfiguration,
    NetworkClientId,
    NetworkConfiguration,
  },
};

type OrderedKey = (
  ByRef<Vec<Keyring>>,
  ByRef<BTreeMap<Address, crate::state::CachedBalance>>,
  ByRef<InternalAccountsState>,
);

type ConnectedKey = (
  ByRef<Vec<AccountWithBalance>>,
  ByRef<BTreeMap<String, vantage_primitives::PermissionSubject>>,
  ByRef<crate::state::PermissionHistory>,
  Option<String>,
);

type SortedKey = (
  ByRef<Vec<AccountWithBalance>>,
  ByRef<Vec<ConnectedAccount>>,
  ByRef<Vec<Address>>,
  ByRef<Vec<Address>>,
);

type DappNetworkKey = (
  ByRef<Vec<ConnectedAccount>>,
  Option<ByRef<BTreeMap<String, NetworkClientId>>>,
  ByRef<BTreeMap<ChainId, NetworkConfiguration>>,
  ByRef<BTreeMap<CaipChainId, MultichainNetworkConfiguration>>,
  Option<String>,
);

/// Number of alert owners and delegation filters kept per cell.
const KEYED_CAPACITY: usize = 8;

fn keyed_capacity() -> NonZeroUsize {
  NonZeroUsize::new(KEYED_CAPACITY).unwrap_or(NonZeroUsize::MIN)
}

/// Memoized views over wallet snapshots.
///
/// Each derivation owns a [`Memo`] cell keyed on the regions it reads,
/// by identity. Feeding the context successive snapshots produced with
/// [`WalletState::update`] returns the same `Arc` for every view whose
/// inputs were not touched. Derivations that build on other derivations
/// key on the `Arc` of the upstream output, so an unchanged upstream
/// result keeps the downstream cached as well.
///
/// The context also owns the build's [`ManifestFlags`] and a
/// [`TraceRegistry`] that times every recomputation by memo name.
#[derive(Debug)]
pub struct SelectorContext {
  manifest: ManifestFlags,
  traces: TraceRegistry,

  accounts_ordered: Memo<OrderedKey, Vec<AccountWithBalance>>,
  connected_for_active_tab: Memo<ConnectedKey, Vec<ConnectedAccount>>,
  updated_and_sorted: Memo<SortedKey, Vec<SortedAccount>>,
  dapp_active_network: Memo<DappNetworkKey, Option<DappNetwork>>,

  confirmations_sorted:
    Memo<ByRef<BTreeMap<String, ApprovalRequest>>, Vec<ApprovalRequest>>,
  oldest_confirmation: Memo<ByRef<Vec<ApprovalRequest>>, Option<ApprovalRequest>>,
  next_confirmation:
    Memo<(ByRef<Vec<ApprovalRequest>>, Option<String>), Option<ApprovalRequest>>,

  general_alerts: Memo<(ByRef<ConfirmAlertsState>, String), Vec<Alert>>,
  field_alerts: Memo<(ByRef<ConfirmAlertsState>, String), Vec<Alert>>,

  delegations: Memo<
    (ByRef<BTreeMap<String, DelegationEntry>>, Option<DelegationFilter>),
    Vec<DelegationEntry>,
  >,

  remote_feature_flags: Memo<ByRef<FlagMap>, FlagMap>,
}

impl Default for SelectorContext {
  fn default() -> Self {
    Self::new(ManifestFlags::default())
  }
}

impl SelectorContext {
  pub fn new(manifest: ManifestFlags) -> Self {
    Self {
      manifest,
      traces: TraceRegistry::new(),
      accounts_ordered: Memo::new("accounts_ordered"),
      connected_for_active_tab: Memo::new(
        "ordered_connected_accounts_for_active_tab",
      ),
      updated_and_sorted: Memo::new("updated_and_sorted_accounts")
        .with_result_equality(),
      dapp_active_network: Memo::new("dapp_active_network"),
      confirmations_sorted: Memo::new("pending_confirmations_sorted"),
      oldest_confirmation: Memo::new("oldest_pending_confirmation"),
      next_confirmation: Memo::new("next_confirmation"),
      general_alerts: Memo::new("general_alerts")
        .with_capacity(keyed_capacity()),
      field_alerts: Memo::new("field_alerts").with_capacity(keyed_capacity()),
      delegations: Memo::new("delegation_entries")
        .with_capacity(keyed_capacity()),
      remote_feature_flags: Memo::new("remote_feature_flags")
        .with_result_equality(),
    }
  }

  pub fn manifest(&self) -> &ManifestFlags {
    &self.manifest
  }

  pub fn traces(&self) -> &TraceRegistry {
    &self.traces
  }

  pub fn accounts_ordered(
    &self,
    state: &WalletState,
  ) -> Arc<Vec<AccountWithBalance>> {
    let key = (
      ByRef::new(&state.keyrings),
      ByRef::new(&state.account_balances),
      ByRef::new(&state.internal_accounts),
    );
    self.accounts_ordered.get_or_compute(key, || {
      self.traces.trace(self.accounts_ordered.name(), || {
        accounts::accounts_ordered(state)
      })
    })
  }

  pub fn ordered_connected_accounts_for_active_tab(
    &self,
    state: &WalletState,
  ) -> Arc<Vec<ConnectedAccount>> {
    let ordered = self.accounts_ordered(state);
    let origin = state.active_tab_origin();
    let key = (
      ByRef::new(&ordered),
      ByRef::new(&state.subjects),
      ByRef::new(&state.permission_history),
      origin.map(str::to_owned),
    );

    let memo = &self.connected_for_active_tab;
    memo.get_or_compute(key, || {
      self.traces.trace(memo.name(), || match origin {
        Some(origin) => permissions::connect_ordered(state, &ordered, origin),
        None => vec![],
      })
    })
  }

  pub fn updated_and_sorted_accounts(
    &self,
    state: &WalletState,
  ) -> Arc<Vec<SortedAccount>> {
    let ordered = self.accounts_ordered(state);
    let connected = self.ordered_connected_accounts_for_active_tab(state);
    let key = (
      ByRef::new(&ordered),
      ByRef::new(&connected),
      ByRef::new(&state.pinned_accounts),
      ByRef::new(&state.hidden_accounts),
    );

    let memo = &self.updated_and_sorted;
    memo.get_or_compute(key, || {
      self.traces.trace(memo.name(), || {
        accounts::sort_for_display(
          &ordered,
          &state.pinned_accounts,
          &state.hidden_accounts,
          &connected,
        )
      })
    })
  }

  pub fn dapp_active_network(
    &self,
    state: &WalletState,
  ) -> Arc<Option<DappNetwork>> {
    let connected = self.ordered_connected_accounts_for_active_tab(state);
    let key = (
      ByRef::new(&connected),
      state.domains.as_ref().map(ByRef::new),
      ByRef::new(&state.network_configurations_by_chain_id),
      ByRef::new(&state.multichain_network_configurations_by_chain_id),
      state.active_tab_origin().map(str::to_owned),
    );

    let memo = &self.dapp_active_network;
    memo.get_or_compute(key, || {
      self.traces.trace(memo.name(), || {
        networks::dapp_network_from_connected(state, &connected)
      })
    })
  }

  pub fn pending_confirmations_sorted(
    &self,
    state: &WalletState,
  ) -> Arc<Vec<ApprovalRequest>> {
    let memo = &self.confirmations_sorted;
    memo.get_or_compute(ByRef::new(&state.pending_approvals), || {
      self.traces.trace(memo.name(), || {
        confirmations::pending_confirmations_sorted(state)
          .into_iter()
          .cloned()
          .collect()
      })
    })
  }

  pub fn oldest_pending_confirmation(
    &self,
    state: &WalletState,
  ) -> Arc<Option<ApprovalRequest>> {
    let sorted = self.pending_confirmations_sorted(state);
    self
      .oldest_confirmation
      .get_or_compute(ByRef::new(&sorted), || sorted.first().cloned())
  }

  pub fn next_confirmation(
    &self,
    state: &WalletState,
    current_id: Option<&str>,
  ) -> Arc<Option<ApprovalRequest>> {
    let sorted = self.pending_confirmations_sorted(state);
    let key = (ByRef::new(&sorted), current_id.map(str::to_owned));
    self.next_confirmation.get_or_compute(key, || {
      sorted
        .iter()
        .find(|req| Some(req.id.as_str()) != current_id)
        .cloned()
    })
  }

  pub fn general_alerts(&self, state: &WalletState, owner: &str) -> Arc<Vec<Alert>> {
    let key = (ByRef::new(&state.confirm_alerts), owner.to_owned());
    let memo = &self.general_alerts;
    memo.get_or_compute(key, || {
      self.traces.trace(memo.name(), || {
        alerts::general_alerts(state, owner)
          .into_iter()
          .cloned()
          .collect()
      })
    })
  }

  pub fn field_alerts(&self, state: &WalletState, owner: &str) -> Arc<Vec<Alert>> {
    let key = (ByRef::new(&state.confirm_alerts), owner.to_owned());
    let memo = &self.field_alerts;
    memo.get_or_compute(key, || {
      self.traces.trace(memo.name(), || {
        alerts::field_alerts(state, owner)
          .into_iter()
          .cloned()
          .collect()
      })
    })
  }

  pub fn delegation_entries(
    &self,
    state: &WalletState,
    filter: Option<&DelegationFilter>,
  ) -> Arc<Vec<DelegationEntry>> {
    let key = (ByRef::new(&state.delegations), filter.cloned());
    let memo = &self.delegations;
    memo.get_or_compute(key, || {
      self.traces.trace(memo.name(), || {
        delegations::list_delegation_entries(state, filter)
          .into_iter()
          .cloned()
          .collect()
      })
    })
  }

  /// Runtime flags from the snapshot with the manifest flags laid over
  /// them.
  pub fn remote_feature_flags(&self, state: &WalletState) -> Arc<FlagMap> {
    let memo = &self.remote_feature_flags;
    memo.get_or_compute(ByRef::new(&state.remote_feature_flags), || {
      merge_flags(
        &self.manifest.remote_feature_flags,
        &state.remote_feature_flags,
      )
    })
  }
}
