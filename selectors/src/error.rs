use {
  thiserror::Error,
  vantage_primitives::{AccountId, ChainId, NetworkClientId},
};

/// Structural violations of a snapshot. Missing optional regions never
/// produce these, they resolve to empty values instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
  #[error("Selected account {0} is not present in the accounts region")]
  SelectedAccountNotFound(AccountId),

  #[error("No network client is selected")]
  NoNetworkSelected,

  #[error("Selected network client {0} matches no network configuration")]
  NetworkConfigurationNotFound(NetworkClientId),

  #[error(
    "Default endpoint index {index} is out of range for chain {chain_id}"
  )]
  DefaultEndpointOutOfRange { chain_id: ChainId, index: usize },
}
