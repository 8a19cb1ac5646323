use {
  crate::{Address, ChainId},
  serde::{Deserialize, Serialize},
};

/// A signed grant of authority from a delegator to a delegate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delegation {
  pub delegate: Address,
  pub delegator: Address,

  /// Hash of the parent delegation, or the root authority marker.
  pub authority: String,

  #[serde(default)]
  pub caveats: Vec<serde_json::Value>,

  pub salt: String,
  pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationEntry {
  pub hash: String,
  pub delegation: Delegation,
  pub chain_id: ChainId,

  #[serde(default)]
  pub tags: Vec<String>,
}

impl DelegationEntry {
  pub fn has_tags<S: AsRef<str>>(&self, tags: &[S]) -> bool {
    tags
      .iter()
      .all(|t| self.tags.iter().any(|own| own == t.as_ref()))
  }
}
