use {
  crate::{Address, CaipAccountId, CaipScope, ChainId},
  serde::{Deserialize, Serialize},
  std::collections::BTreeMap,
};

/// Name of the permission that grants a dapp access to accounts and
/// chains, keyed by CAIP-25 scopes.
pub const CAIP25_PERMISSION: &str = "endowment:caip25";

/// Caveat type carried by the CAIP-25 permission.
pub const CAIP25_CAVEAT: &str = "authorizedScopes";

/// Name under which account connection history is recorded.
pub const ETH_ACCOUNTS_PERMISSION: &str = "eth_accounts";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeObject {
  #[serde(default)]
  pub accounts: Vec<CaipAccountId>,
}

/// Scopes authorized for a dapp, keyed by CAIP-2 chain id, a
/// `wallet:<namespace>` pseudo scope or the bare `wallet` scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caip25CaveatValue {
  #[serde(default)]
  pub required_scopes: BTreeMap<CaipScope, ScopeObject>,

  #[serde(default)]
  pub optional_scopes: BTreeMap<CaipScope, ScopeObject>,

  #[serde(default)]
  pub is_multichain_origin: bool,
}

impl Caip25CaveatValue {
  fn scopes(&self) -> impl Iterator<Item = (&CaipScope, &ScopeObject)> {
    self.required_scopes.iter().chain(self.optional_scopes.iter())
  }

  /// All EVM addresses authorized in any `eip155` scope, deduplicated
  /// in first-seen order.
  pub fn eth_accounts(&self) -> Vec<Address> {
    let mut accounts: Vec<Address> = vec![];
    for (scope, object) in self.scopes() {
      if !scope.is_eip155() {
        continue;
      }
      for account in &object.accounts {
        if account.chain.is_eip155() && !accounts.contains(&account.address) {
          accounts.push(account.address.clone());
        }
      }
    }
    accounts
  }

  /// All EVM chains authorized, deduplicated in first-seen order.
  pub fn eth_chain_ids(&self) -> Vec<ChainId> {
    let mut chains = vec![];
    for (scope, _) in self.scopes() {
      if let Some(id) = scope.to_evm_chain_id() {
        if !chains.contains(&id) {
          chains.push(id);
        }
      }
    }
    chains
  }
}

/// Value of a caveat. Only the CAIP-25 caveat is decoded, every other
/// caveat keeps its value as it was received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CaveatValue {
  Caip25(Caip25CaveatValue),
  Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCaveat")]
pub struct Caveat {
  #[serde(rename = "type")]
  pub kind: String,
  pub value: CaveatValue,
}

#[derive(Deserialize)]
struct RawCaveat {
  #[serde(rename = "type")]
  kind: String,

  #[serde(default)]
  value: serde_json::Value,
}

impl TryFrom<RawCaveat> for Caveat {
  type Error = serde_json::Error;

  fn try_from(raw: RawCaveat) -> Result<Self, Self::Error> {
    let value = match raw.kind.as_str() {
      CAIP25_CAVEAT => CaveatValue::Caip25(serde_json::from_value(raw.value)?),
      _ => CaveatValue::Other(raw.value),
    };
    Ok(Caveat {
      kind: raw.kind,
      value,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
  pub parent_capability: String,

  #[serde(default)]
  pub caveats: Vec<Caveat>,

  #[serde(default)]
  pub date: u64,
}

impl Permission {
  pub fn caip25_value(&self) -> Option<&Caip25CaveatValue> {
    self.caveats.iter().find_map(|c| match (&c.value, c.kind.as_str()) {
      (CaveatValue::Caip25(value), CAIP25_CAVEAT) => Some(value),
      _ => None,
    })
  }
}

/// Everything a single origin has been granted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSubject {
  pub origin: String,

  #[serde(default)]
  pub permissions: BTreeMap<String, Permission>,
}

impl PermissionSubject {
  pub fn caip25(&self) -> Option<&Caip25CaveatValue> {
    self
      .permissions
      .get(CAIP25_PERMISSION)
      .and_then(Permission::caip25_value)
  }

  pub fn eth_accounts(&self) -> Vec<Address> {
    self.caip25().map(|c| c.eth_accounts()).unwrap_or_default()
  }

  pub fn eth_chain_ids(&self) -> Vec<ChainId> {
    self.caip25().map(|c| c.eth_chain_ids()).unwrap_or_default()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubjectType {
  Extension,
  Internal,
  Snap,
  Website,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectMetadata {
  pub origin: String,

  #[serde(default)]
  pub name: Option<String>,

  #[serde(default)]
  pub icon_url: Option<String>,

  #[serde(default)]
  pub extension_id: Option<String>,

  #[serde(default)]
  pub subject_type: Option<SubjectType>,
}

/// Interaction history of one permission for one origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionHistoryEntry {
  /// Last time (ms since epoch) each account was exposed to the origin.
  #[serde(default)]
  pub accounts: BTreeMap<Address, u64>,

  #[serde(default)]
  pub last_approved: Option<u64>,
}
