use {
  crate::{CaipChainId, ChainId},
  serde::{Deserialize, Serialize},
};

/// Opaque id of a network access point (an RPC endpoint). Dapps are
/// bound to a network through this id.
pub type NetworkClientId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RpcEndpointType {
  Infura,
  Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcEndpoint {
  pub network_client_id: NetworkClientId,
  pub url: String,

  #[serde(rename = "type")]
  pub kind: RpcEndpointType,

  #[serde(default)]
  pub name: Option<String>,
}

/// Configuration of one EVM chain, with all known endpoints for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfiguration {
  pub chain_id: ChainId,
  pub name: String,
  pub native_currency: String,
  pub rpc_endpoints: Vec<RpcEndpoint>,

  #[serde(default)]
  pub default_rpc_endpoint_index: usize,

  #[serde(default)]
  pub block_explorer_urls: Vec<String>,

  #[serde(default)]
  pub default_block_explorer_url_index: Option<usize>,
}

impl NetworkConfiguration {
  /// The endpoint used when no dapp specific endpoint is chosen.
  ///
  /// `None` when the default index points past the endpoint list,
  /// which the network controller never produces.
  pub fn default_rpc_endpoint(&self) -> Option<&RpcEndpoint> {
    self.rpc_endpoints.get(self.default_rpc_endpoint_index)
  }

  pub fn default_block_explorer_url(&self) -> Option<&str> {
    self
      .default_block_explorer_url_index
      .and_then(|i| self.block_explorer_urls.get(i))
      .map(String::as_str)
  }

  pub fn has_endpoint(&self, network_client_id: &str) -> bool {
    self
      .rpc_endpoints
      .iter()
      .any(|e| e.network_client_id == network_client_id)
  }
}

/// Configuration of a chain that is keyed by its CAIP-2 id, used for
/// non-EVM networks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultichainNetworkConfiguration {
  pub chain_id: CaipChainId,
  pub name: String,
  pub native_currency: String,

  #[serde(default)]
  pub is_evm: bool,
}
