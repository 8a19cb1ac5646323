use {
  once_cell::sync::OnceCell,
  serde::{Deserialize, Serialize},
  std::{
    collections::{BTreeMap, HashMap},
    fmt::Debug,
    sync::Arc,
  },
  vantage_primitives::{
    AccountId,
    Address,
    Alert,
    ApprovalRequest,
    CaipChainId,
    ChainId,
    DelegationEntry,
    FlagMap,
    InternalAccount,
    Keyring,
    MultichainNetworkConfiguration,
    NetworkClientId,
    NetworkConfiguration,
    PermissionHistoryEntry,
    PermissionSubject,
    SubjectMetadata,
    TransactionMeta,
  },
};

/// Origin -> permission name -> history entry.
pub type PermissionHistory =
  BTreeMap<String, BTreeMap<String, PermissionHistoryEntry>>;

/// The accounts region. It is the only region every snapshot must
/// carry, decoding a snapshot without it fails.
#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalAccountsState {
  accounts: BTreeMap<AccountId, InternalAccount>,
  selected_account: AccountId,

  #[serde(skip)]
  by_address: OnceCell<HashMap<Address, AccountId>>,
}

impl InternalAccountsState {
  pub fn new(
    accounts: impl IntoIterator<Item = InternalAccount>,
    selected_account: impl Into<AccountId>,
  ) -> Self {
    Self {
      accounts: accounts
        .into_iter()
        .map(|acc| (acc.id.clone(), acc))
        .collect(),
      selected_account: selected_account.into(),
      by_address: OnceCell::new(),
    }
  }

  pub fn accounts(&self) -> &BTreeMap<AccountId, InternalAccount> {
    &self.accounts
  }

  pub fn get(&self, id: &str) -> Option<&InternalAccount> {
    self.accounts.get(id)
  }

  /// Id of the selected account. It is not guaranteed to resolve.
  pub fn selected_account(&self) -> &str {
    &self.selected_account
  }

  /// Finds an account by its address in canonical form.
  ///
  /// The address index is built on first use and dropped whenever the
  /// region changes.
  pub fn by_address(&self, address: &Address) -> Option<&InternalAccount> {
    self
      .by_address
      .get_or_init(|| {
        self
          .accounts
          .values()
          .map(|acc| (acc.address.clone(), acc.id.clone()))
          .collect()
      })
      .get(address)
      .and_then(|id| self.accounts.get(id))
  }

  /// Inserts or replaces an account, returning the previous record
  /// stored under the same id.
  pub fn insert(&mut self, account: InternalAccount) -> Option<InternalAccount> {
    self.by_address.take();
    self.accounts.insert(account.id.clone(), account)
  }

  pub fn remove(&mut self, id: &str) -> Option<InternalAccount> {
    self.by_address.take();
    self.accounts.remove(id)
  }

  pub fn select(&mut self, id: impl Into<AccountId>) {
    self.selected_account = id.into();
  }
}

impl Clone for InternalAccountsState {
  fn clone(&self) -> Self {
    Self {
      accounts: self.accounts.clone(),
      selected_account: self.selected_account.clone(),
      by_address: OnceCell::new(),
    }
  }
}

impl PartialEq for InternalAccountsState {
  fn eq(&self, other: &Self) -> bool {
    self.accounts == other.accounts
      && self.selected_account == other.selected_account
  }
}

impl Debug for InternalAccountsState {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("InternalAccountsState")
      .field("accounts", &self.accounts)
      .field("selected_account", &self.selected_account)
      .finish()
  }
}

/// Last known native balance of an account, as a hex quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedBalance {
  pub balance: String,
}

/// Alerts raised on confirmations, grouped by the confirmation that
/// owns them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmAlertsState {
  #[serde(default)]
  pub alerts: BTreeMap<String, Vec<Alert>>,

  /// owner -> alert key -> confirmed by the user
  #[serde(default)]
  pub confirmed: BTreeMap<String, BTreeMap<String, bool>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTab {
  #[serde(default)]
  pub id: Option<u64>,

  #[serde(default)]
  pub origin: Option<String>,

  #[serde(default)]
  pub title: Option<String>,

  #[serde(default)]
  pub url: Option<String>,
}

/// An immutable snapshot of the wallet state that all selectors read.
///
/// Regions are reference counted, so a newer snapshot that did not
/// touch a region shares it with the previous one. Memoized selectors
/// rely on that to detect unchanged inputs by pointer.
///
/// Every region except `internal_accounts` is optional in the encoded
/// form and decodes to its empty value when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletState {
  pub internal_accounts: Arc<InternalAccountsState>,

  #[serde(default)]
  pub keyrings: Arc<Vec<Keyring>>,

  #[serde(default, rename = "accounts")]
  pub account_balances: Arc<BTreeMap<Address, CachedBalance>>,

  #[serde(default)]
  pub pinned_accounts: Arc<Vec<Address>>,

  #[serde(default)]
  pub hidden_accounts: Arc<Vec<Address>>,

  /// Permission subjects keyed by origin.
  #[serde(default)]
  pub subjects: Arc<BTreeMap<String, PermissionSubject>>,

  #[serde(default)]
  pub subject_metadata: Arc<BTreeMap<String, SubjectMetadata>>,

  #[serde(default)]
  pub permission_history: Arc<PermissionHistory>,

  #[serde(default)]
  pub network_configurations_by_chain_id:
    Arc<BTreeMap<ChainId, NetworkConfiguration>>,

  #[serde(default)]
  pub multichain_network_configurations_by_chain_id:
    Arc<BTreeMap<CaipChainId, MultichainNetworkConfiguration>>,

  #[serde(default)]
  pub selected_multichain_network_chain_id: Option<CaipChainId>,

  #[serde(default = "evm_selected_by_default")]
  pub is_evm_selected: bool,

  #[serde(default)]
  pub selected_network_client_id: Option<NetworkClientId>,

  /// Network client chosen per dapp origin. Absent when per-dapp
  /// network selection was never initialized.
  #[serde(default)]
  pub domains: Option<Arc<BTreeMap<String, NetworkClientId>>>,

  #[serde(default)]
  pub pending_approvals: Arc<BTreeMap<String, ApprovalRequest>>,

  #[serde(default)]
  pub pending_approval_count: usize,

  #[serde(default)]
  pub transactions: Arc<Vec<TransactionMeta>>,

  /// Delegation entries keyed by their hash.
  #[serde(default)]
  pub delegations: Arc<BTreeMap<String, DelegationEntry>>,

  #[serde(default)]
  pub remote_feature_flags: Arc<FlagMap>,

  #[serde(default)]
  pub confirm_alerts: Arc<ConfirmAlertsState>,

  #[serde(default)]
  pub active_tab: Arc<ActiveTab>,
}

fn evm_selected_by_default() -> bool {
  true
}

impl WalletState {
  /// A snapshot with the given accounts and every optional region
  /// empty.
  pub fn new(internal_accounts: InternalAccountsState) -> Self {
    Self {
      internal_accounts: Arc::new(internal_accounts),
      keyrings: Default::default(),
      account_balances: Default::default(),
      pinned_accounts: Default::default(),
      hidden_accounts: Default::default(),
      subjects: Default::default(),
      subject_metadata: Default::default(),
      permission_history: Default::default(),
      network_configurations_by_chain_id: Default::default(),
      multichain_network_configurations_by_chain_id: Default::default(),
      selected_multichain_network_chain_id: None,
      is_evm_selected: true,
      selected_network_client_id: None,
      domains: None,
      pending_approvals: Default::default(),
      pending_approval_count: 0,
      transactions: Default::default(),
      delegations: Default::default(),
      remote_feature_flags: Default::default(),
      confirm_alerts: Default::default(),
      active_tab: Default::default(),
    }
  }

  /// Produces the next snapshot.
  ///
  /// Regions are shared with `self` until the closure replaces them or
  /// mutates them through [`Arc::make_mut`], so untouched regions keep
  /// their identity across snapshots.
  pub fn update(&self, f: impl FnOnce(&mut WalletState)) -> WalletState {
    let mut next = self.clone();
    f(&mut next);
    next
  }

  pub fn active_tab_origin(&self) -> Option<&str> {
    self.active_tab.origin.as_deref()
  }

  /// The history of a permission for an origin, if any was recorded.
  pub fn permission_history_for(
    &self,
    origin: &str,
    permission: &str,
  ) -> Option<&PermissionHistoryEntry> {
    self
      .permission_history
      .get(origin)
      .and_then(|perms| perms.get(permission))
  }
}
