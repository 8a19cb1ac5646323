use {
  crate::WalletState,
  serde::Deserialize,
  vantage_primitives::{Address, ChainId, DelegationEntry},
};

/// Narrows a delegation listing. Every criterion that is set must hold,
/// an empty filter matches every entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationFilter {
  /// The delegator.
  #[serde(default)]
  pub from: Option<Address>,

  /// The delegate.
  #[serde(default)]
  pub to: Option<Address>,

  #[serde(default)]
  pub chain_id: Option<ChainId>,

  /// Entries must carry all of these tags, and may carry more.
  #[serde(default)]
  pub tags: Vec<String>,
}

impl DelegationFilter {
  pub fn matches(&self, entry: &DelegationEntry) -> bool {
    let delegation = &entry.delegation;
    self.from.as_ref().map_or(true, |a| *a == delegation.delegator)
      && self.to.as_ref().map_or(true, |a| *a == delegation.delegate)
      && self.chain_id.map_or(true, |c| c == entry.chain_id)
      && entry.has_tags(&self.tags)
  }
}

/// Delegation entries in hash order, optionally narrowed by a filter.
pub fn list_delegation_entries<'s>(
  state: &'s WalletState,
  filter: Option<&DelegationFilter>,
) -> Vec<&'s DelegationEntry> {
  state
    .delegations
    .values()
    .filter(|entry| filter.map_or(true, |f| f.matches(entry)))
    .collect()
}

pub fn delegation_entry<'s>(
  state: &'s WalletState,
  hash: &str,
) -> Option<&'s DelegationEntry> {
  state.delegations.get(hash)
}
