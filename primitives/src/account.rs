use {
  crate::{Address, CaipChainId},
  serde::{Deserialize, Serialize},
  std::fmt::Display,
};

/// Opaque account identifier (a UUID in practice) assigned by the
/// accounts controller.
pub type AccountId = String;

/// The account type tag. It decides which family of chain interaction
/// rules applies to an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountKind {
  /// `eip155:eoa`, externally owned EVM account.
  EvmEoa,
  /// `eip155:erc4337`, EVM smart contract account.
  EvmErc4337,
  /// `bip122:p2wpkh`
  BitcoinP2wpkh,
  /// `bip122:p2tr`
  BitcoinP2tr,
  /// `solana:data-account`
  SolanaDataAccount,
  Other(String),
}

impl AccountKind {
  pub fn as_str(&self) -> &str {
    match self {
      AccountKind::EvmEoa => "eip155:eoa",
      AccountKind::EvmErc4337 => "eip155:erc4337",
      AccountKind::BitcoinP2wpkh => "bip122:p2wpkh",
      AccountKind::BitcoinP2tr => "bip122:p2tr",
      AccountKind::SolanaDataAccount => "solana:data-account",
      AccountKind::Other(kind) => kind,
    }
  }

  /// EVM compatible accounts are the only ones that can be connected
  /// to a dapp through the `eth_accounts` permission.
  pub fn is_evm(&self) -> bool {
    matches!(self, AccountKind::EvmEoa | AccountKind::EvmErc4337)
  }
}

impl From<String> for AccountKind {
  fn from(value: String) -> Self {
    match value.as_str() {
      "eip155:eoa" => AccountKind::EvmEoa,
      "eip155:erc4337" => AccountKind::EvmErc4337,
      "bip122:p2wpkh" => AccountKind::BitcoinP2wpkh,
      "bip122:p2tr" => AccountKind::BitcoinP2tr,
      "solana:data-account" => AccountKind::SolanaDataAccount,
      _ => AccountKind::Other(value),
    }
  }
}

impl From<AccountKind> for String {
  fn from(kind: AccountKind) -> Self {
    kind.as_str().into()
  }
}

impl Display for AccountKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The kind of keyring that holds the private key of an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum KeyringKind {
  Hd,
  Imported,
  Ledger,
  Trezor,
  OneKey,
  Lattice,
  Qr,
  Snap,
  Other(String),
}

impl KeyringKind {
  pub fn as_str(&self) -> &str {
    match self {
      KeyringKind::Hd => "HD Key Tree",
      KeyringKind::Imported => "Simple Key Pair",
      KeyringKind::Ledger => "Ledger Hardware",
      KeyringKind::Trezor => "Trezor Hardware",
      KeyringKind::OneKey => "OneKey Hardware",
      KeyringKind::Lattice => "Lattice Hardware",
      KeyringKind::Qr => "QR Hardware Wallet Device",
      KeyringKind::Snap => "Snap Keyring",
      KeyringKind::Other(kind) => kind,
    }
  }

  pub fn is_hardware(&self) -> bool {
    matches!(
      self,
      KeyringKind::Ledger
        | KeyringKind::Trezor
        | KeyringKind::OneKey
        | KeyringKind::Lattice
        | KeyringKind::Qr
    )
  }
}

impl From<String> for KeyringKind {
  fn from(value: String) -> Self {
    match value.as_str() {
      "HD Key Tree" => KeyringKind::Hd,
      "Simple Key Pair" => KeyringKind::Imported,
      "Ledger Hardware" => KeyringKind::Ledger,
      "Trezor Hardware" => KeyringKind::Trezor,
      "OneKey Hardware" => KeyringKind::OneKey,
      "Lattice Hardware" => KeyringKind::Lattice,
      "QR Hardware Wallet Device" => KeyringKind::Qr,
      "Snap Keyring" => KeyringKind::Snap,
      _ => KeyringKind::Other(value),
    }
  }
}

impl From<KeyringKind> for String {
  fn from(kind: KeyringKind) -> Self {
    kind.as_str().into()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyringInfo {
  #[serde(rename = "type")]
  pub kind: KeyringKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMetadata {
  pub name: String,
  pub keyring: KeyringInfo,

  /// Milliseconds since epoch.
  #[serde(default)]
  pub import_time: u64,

  /// Milliseconds since epoch of the last time this account was the
  /// selected account, absent if it never was.
  #[serde(default)]
  pub last_selected: Option<u64>,
}

/// An account managed by the wallet, EVM or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalAccount {
  pub id: AccountId,
  pub address: Address,

  #[serde(rename = "type")]
  pub kind: AccountKind,

  /// CAIP-2 chains this account can operate on.
  #[serde(default)]
  pub scopes: Vec<CaipChainId>,

  /// RPC methods the account supports.
  #[serde(default)]
  pub methods: Vec<String>,

  pub metadata: AccountMetadata,
}

impl InternalAccount {
  pub fn name(&self) -> &str {
    &self.metadata.name
  }

  pub fn keyring_kind(&self) -> &KeyringKind {
    &self.metadata.keyring.kind
  }
}

/// A keyring and the addresses of the accounts it holds, in the order
/// they were created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyring {
  #[serde(rename = "type")]
  pub kind: KeyringKind,
  pub accounts: Vec<Address>,
}
