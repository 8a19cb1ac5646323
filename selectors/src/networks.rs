use {
  crate::{permissions::ConnectedAccount, Error, WalletState},
  serde::Serialize,
  std::collections::BTreeMap,
  tracing::warn,
  vantage_primitives::{
    AddressFormat,
    CaipChainId,
    CaipNamespace,
    ChainId,
    InternalAccount,
    MultichainNetworkConfiguration,
    NetworkClientId,
    NetworkConfiguration,
    RpcEndpoint,
    RpcEndpointType,
  },
};

/// The network a dapp is operating against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "network", rename_all = "camelCase")]
pub enum DappNetwork {
  Evm(NetworkConfiguration),
  NonEvm(MultichainNetworkConfiguration),

  /// The representative account lives in a namespace whose network
  /// resolution is not implemented.
  Unsupported { namespace: String },
}

/// The selected network configuration together with the client id that
/// selected it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedNetwork<'s> {
  pub configuration: &'s NetworkConfiguration,
  pub client_id: &'s str,
}

/// A flattened view of the selected network's default endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentNetwork {
  pub chain_id: ChainId,
  pub id: NetworkClientId,
  pub nickname: String,
  pub rpc_url: String,
  pub ticker: String,
  pub block_explorer_url: Option<String>,

  /// Set for infura endpoints, where the client id names the provider.
  pub provider_type: Option<String>,
}

pub fn network_configurations_by_chain_id(
  state: &WalletState,
) -> &BTreeMap<ChainId, NetworkConfiguration> {
  &state.network_configurations_by_chain_id
}

pub fn network_configuration_by_chain_id(
  state: &WalletState,
  chain_id: ChainId,
) -> Option<&NetworkConfiguration> {
  state.network_configurations_by_chain_id.get(&chain_id)
}

fn default_endpoint(
  configuration: &NetworkConfiguration,
) -> Result<&RpcEndpoint, Error> {
  configuration.default_rpc_endpoint().ok_or(
    Error::DefaultEndpointOutOfRange {
      chain_id: configuration.chain_id,
      index: configuration.default_rpc_endpoint_index,
    },
  )
}

/// The default endpoint of a known chain, `None` for unknown chains.
pub fn default_rpc_endpoint_by_chain_id(
  state: &WalletState,
  chain_id: ChainId,
) -> Result<Option<&RpcEndpoint>, Error> {
  network_configuration_by_chain_id(state, chain_id)
    .map(default_endpoint)
    .transpose()
}

pub fn network_client_id_by_chain_id(
  state: &WalletState,
  chain_id: ChainId,
) -> Result<Option<&str>, Error> {
  Ok(
    default_rpc_endpoint_by_chain_id(state, chain_id)?
      .map(|e| e.network_client_id.as_str()),
  )
}

pub fn selected_network_client_id(state: &WalletState) -> Option<&str> {
  state.selected_network_client_id.as_deref()
}

/// The first configuration that has an endpoint with this client id.
pub fn network_configuration_by_client_id<'s>(
  state: &'s WalletState,
  client_id: &str,
) -> Option<&'s NetworkConfiguration> {
  state
    .network_configurations_by_chain_id
    .values()
    .find(|config| config.has_endpoint(client_id))
}

pub fn selected_network(
  state: &WalletState,
) -> Result<SelectedNetwork<'_>, Error> {
  let client_id =
    selected_network_client_id(state).ok_or(Error::NoNetworkSelected)?;
  let configuration = network_configuration_by_client_id(state, client_id)
    .ok_or_else(|| Error::NetworkConfigurationNotFound(client_id.into()))?;
  Ok(SelectedNetwork {
    configuration,
    client_id,
  })
}

pub fn current_chain_id(state: &WalletState) -> Result<ChainId, Error> {
  Ok(selected_network(state)?.configuration.chain_id)
}

pub fn current_network(state: &WalletState) -> Result<CurrentNetwork, Error> {
  let network = selected_network(state)?.configuration;
  let endpoint = default_endpoint(network)?;
  Ok(CurrentNetwork {
    chain_id: network.chain_id,
    id: endpoint.network_client_id.clone(),
    nickname: network.name.clone(),
    rpc_url: endpoint.url.clone(),
    ticker: network.native_currency.clone(),
    block_explorer_url: network.default_block_explorer_url().map(Into::into),
    provider_type: match endpoint.kind {
      RpcEndpointType::Infura => Some(endpoint.network_client_id.clone()),
      RpcEndpointType::Custom => None,
    },
  })
}

pub fn multichain_network_configurations(
  state: &WalletState,
) -> &BTreeMap<CaipChainId, MultichainNetworkConfiguration> {
  &state.multichain_network_configurations_by_chain_id
}

pub fn is_evm_selected(state: &WalletState) -> bool {
  state.is_evm_selected
}

fn accepts_address(
  namespace: &CaipNamespace,
  account: &InternalAccount,
) -> bool {
  match namespace {
    CaipNamespace::Solana => account.address.is_solana_address(),
    CaipNamespace::Bip122 => account.address.is_bitcoin_address(),
    _ => false,
  }
}

/// The network an account operates on.
///
/// EVM accounts share the selected EVM network. Other accounts resolve
/// to the first non-EVM configuration whose namespace accepts the
/// account's address, preferring chains listed in the account scopes.
pub fn multichain_network_for_account(
  state: &WalletState,
  account: &InternalAccount,
) -> Result<Option<DappNetwork>, Error> {
  if account.kind.is_evm() {
    let network = selected_network(state)?;
    return Ok(Some(DappNetwork::Evm(network.configuration.clone())));
  }

  let candidates: Vec<_> = multichain_network_configurations(state)
    .values()
    .filter(|config| !config.is_evm)
    .filter(|config| accepts_address(&config.chain_id.namespace, account))
    .collect();

  let in_scope = candidates
    .iter()
    .find(|config| account.scopes.contains(&config.chain_id));

  Ok(
    in_scope
      .or_else(|| candidates.first())
      .map(|config| DappNetwork::NonEvm((*config).clone())),
  )
}

/// Resolves the network of a dapp from its representative account.
///
/// EVM accounts resolve through the origin's chosen network client, the
/// first configuration listing that client wins. Non-EVM accounts
/// resolve through their `solana` scope; accounts scoped to any other
/// namespace are reported as [`DappNetwork::Unsupported`].
pub fn resolve_dapp_network(
  account: &InternalAccount,
  origin: Option<&str>,
  domains: Option<&BTreeMap<String, NetworkClientId>>,
  configurations: &BTreeMap<ChainId, NetworkConfiguration>,
  multichain: &BTreeMap<CaipChainId, MultichainNetworkConfiguration>,
) -> Option<DappNetwork> {
  if account.kind.is_evm() {
    let client_id = domains?.get(origin?)?;
    let found = configurations
      .values()
      .find(|config| config.has_endpoint(client_id));
    if found.is_none() {
      warn!("network client {client_id} matches no network configuration");
    }
    return found.cloned().map(DappNetwork::Evm);
  }

  let solana = account
    .scopes
    .iter()
    .find(|scope| scope.namespace == CaipNamespace::Solana);

  match solana {
    Some(scope) => multichain.get(scope).cloned().map(DappNetwork::NonEvm),
    None => account.scopes.first().map(|scope| DappNetwork::Unsupported {
      namespace: scope.namespace.to_string(),
    }),
  }
}

/// The network the active tab's dapp is using, judged by the most
/// recently used account connected to it.
pub fn dapp_active_network(state: &WalletState) -> Option<DappNetwork> {
  let connected =
    crate::permissions::ordered_connected_accounts_for_active_tab(state);
  dapp_network_from_connected(state, &connected)
}

pub(crate) fn dapp_network_from_connected(
  state: &WalletState,
  connected: &[ConnectedAccount],
) -> Option<DappNetwork> {
  let representative = connected.first()?;
  resolve_dapp_network(
    &representative.account,
    state.active_tab_origin(),
    state.domains.as_deref(),
    &state.network_configurations_by_chain_id,
    &state.multichain_network_configurations_by_chain_id,
  )
}
