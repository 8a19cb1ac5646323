use {
  crate::{Address, AddressError},
  serde::{Deserialize, Serialize},
  std::{
    fmt::{Debug, Display},
    str::FromStr,
  },
  thiserror::Error,
};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
  #[error("Chain id '{0}' must be a 0x prefixed hex number")]
  InvalidChainId(String),

  #[error("CAIP-2 chain id '{0}' must have the form namespace:reference")]
  InvalidCaipChainId(String),

  #[error("CAIP-25 scope '{0}' must be a namespace or namespace:reference")]
  InvalidCaipScope(String),

  #[error("CAIP-10 account id '{0}' must have the form namespace:reference:address")]
  InvalidCaipAccountId(String),

  #[error("CAIP-10 account id has an invalid address: {0}")]
  InvalidAccountAddress(#[from] AddressError),
}

/// EVM chain identifier, carried on the wire as a `0x` prefixed
/// hex string (`0x1` for mainnet).
///
/// The numeric value is the identity, so `0xA` and `0xa` are the
/// same chain.
#[derive(
  Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ChainId(u64);

impl ChainId {
  pub const fn new(id: u64) -> Self {
    Self(id)
  }

  pub const fn value(&self) -> u64 {
    self.0
  }

  /// The CAIP-2 form of this chain, `eip155:<decimal id>`.
  pub fn to_caip(&self) -> CaipChainId {
    CaipChainId {
      namespace: CaipNamespace::Eip155,
      reference: self.0.to_string(),
    }
  }
}

impl Display for ChainId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "0x{:x}", self.0)
  }
}

impl Debug for ChainId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "chain(0x{:x})", self.0)
  }
}

impl FromStr for ChainId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let digits = s
      .strip_prefix("0x")
      .or_else(|| s.strip_prefix("0X"))
      .ok_or_else(|| Error::InvalidChainId(s.into()))?;
    u64::from_str_radix(digits, 16)
      .map(Self)
      .map_err(|_| Error::InvalidChainId(s.into()))
  }
}

impl TryFrom<String> for ChainId {
  type Error = Error;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<ChainId> for String {
  fn from(id: ChainId) -> Self {
    id.to_string()
  }
}

/// The namespace part of a CAIP-2 chain id.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CaipNamespace {
  Eip155,
  Solana,
  Bip122,
  Wallet,
  Other(String),
}

impl CaipNamespace {
  pub fn as_str(&self) -> &str {
    match self {
      CaipNamespace::Eip155 => "eip155",
      CaipNamespace::Solana => "solana",
      CaipNamespace::Bip122 => "bip122",
      CaipNamespace::Wallet => "wallet",
      CaipNamespace::Other(ns) => ns,
    }
  }
}

impl From<&str> for CaipNamespace {
  fn from(value: &str) -> Self {
    match value {
      "eip155" => CaipNamespace::Eip155,
      "solana" => CaipNamespace::Solana,
      "bip122" => CaipNamespace::Bip122,
      "wallet" => CaipNamespace::Wallet,
      other => CaipNamespace::Other(other.into()),
    }
  }
}

impl Display for CaipNamespace {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl Debug for CaipNamespace {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "namespace({})", self.as_str())
  }
}

/// CAIP-2 chain id, e.g. `eip155:1` or
/// `solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp`.
#[derive(
  Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct CaipChainId {
  pub namespace: CaipNamespace,
  pub reference: String,
}

impl CaipChainId {
  pub fn new(namespace: CaipNamespace, reference: impl Into<String>) -> Self {
    Self {
      namespace,
      reference: reference.into(),
    }
  }

  /// True for `eip155:<id>` chains and the `wallet:eip155` pseudo
  /// chain.
  pub fn is_eip155(&self) -> bool {
    match &self.namespace {
      CaipNamespace::Eip155 => true,
      CaipNamespace::Wallet => self.reference == "eip155",
      _ => false,
    }
  }

  /// The EVM chain id if this is an `eip155` chain with a numeric
  /// reference.
  pub fn to_evm_chain_id(&self) -> Option<ChainId> {
    match self.namespace {
      CaipNamespace::Eip155 => self.reference.parse().ok().map(ChainId),
      _ => None,
    }
  }
}

impl Display for CaipChainId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}:{}", self.namespace, self.reference)
  }
}

impl Debug for CaipChainId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "caip({self})")
  }
}

impl FromStr for CaipChainId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.split_once(':') {
      Some((ns, reference))
        if !ns.is_empty() && !reference.is_empty() && !reference.contains(':') =>
      {
        Ok(Self::new(ns.into(), reference))
      }
      _ => Err(Error::InvalidCaipChainId(s.into())),
    }
  }
}

impl TryFrom<String> for CaipChainId {
  type Error = Error;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<CaipChainId> for String {
  fn from(id: CaipChainId) -> Self {
    id.to_string()
  }
}

/// Key of a CAIP-25 scope object. Either a CAIP-2 chain id or a bare
/// namespace such as `wallet`.
#[derive(
  Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum CaipScope {
  Namespace(CaipNamespace),
  Chain(CaipChainId),
}

impl CaipScope {
  pub fn namespace(&self) -> &CaipNamespace {
    match self {
      CaipScope::Namespace(ns) => ns,
      CaipScope::Chain(chain) => &chain.namespace,
    }
  }

  pub fn to_evm_chain_id(&self) -> Option<ChainId> {
    match self {
      CaipScope::Chain(chain) => chain.to_evm_chain_id(),
      CaipScope::Namespace(_) => None,
    }
  }

  pub fn is_eip155(&self) -> bool {
    match self {
      CaipScope::Chain(chain) => chain.is_eip155(),
      CaipScope::Namespace(_) => false,
    }
  }
}

impl From<CaipChainId> for CaipScope {
  fn from(chain: CaipChainId) -> Self {
    CaipScope::Chain(chain)
  }
}

impl Display for CaipScope {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      CaipScope::Namespace(ns) => Display::fmt(ns, f),
      CaipScope::Chain(chain) => Display::fmt(chain, f),
    }
  }
}

impl Debug for CaipScope {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "scope({self})")
  }
}

impl FromStr for CaipScope {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.contains(':') {
      s.parse()
        .map(CaipScope::Chain)
        .map_err(|_| Error::InvalidCaipScope(s.into()))
    } else if s.is_empty() {
      Err(Error::InvalidCaipScope(s.into()))
    } else {
      Ok(CaipScope::Namespace(s.into()))
    }
  }
}

impl TryFrom<String> for CaipScope {
  type Error = Error;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<CaipScope> for String {
  fn from(scope: CaipScope) -> Self {
    scope.to_string()
  }
}

/// CAIP-10 account id, e.g. `eip155:1:0xabc..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CaipAccountId {
  pub chain: CaipChainId,
  pub address: Address,
}

impl Display for CaipAccountId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}:{}", self.chain, self.address)
  }
}

impl FromStr for CaipAccountId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut parts = s.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
      (Some(ns), Some(reference), Some(address))
        if !ns.is_empty() && !reference.is_empty() =>
      {
        Ok(Self {
          chain: CaipChainId::new(ns.into(), reference),
          address: address.parse()?,
        })
      }
      _ => Err(Error::InvalidCaipAccountId(s.into())),
    }
  }
}

impl TryFrom<String> for CaipAccountId {
  type Error = Error;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<CaipAccountId> for String {
  fn from(id: CaipAccountId) -> Self {
    id.to_string()
  }
}
