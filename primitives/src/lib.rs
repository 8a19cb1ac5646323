mod account;
mod address;
mod alert;
mod approval;
mod b58;
mod chain;
mod delegation;
mod network;
mod permission;
mod transaction;

/// A JSON object of feature flags, either from the runtime state or
/// declared statically in the extension manifest.
pub type FlagMap = serde_json::Map<String, serde_json::Value>;

pub use {
  account::{
    AccountId,
    AccountKind,
    AccountMetadata,
    InternalAccount,
    Keyring,
    KeyringInfo,
    KeyringKind,
  },
  address::{Address, Error as AddressError},
  alert::{Alert, Severity},
  approval::{ApprovalRequest, ApprovalType},
  b58::AddressFormat,
  chain::{
    CaipAccountId,
    CaipChainId,
    CaipNamespace,
    CaipScope,
    ChainId,
    Error as ParseError,
  },
  delegation::{Delegation, DelegationEntry},
  network::{
    MultichainNetworkConfiguration,
    NetworkClientId,
    NetworkConfiguration,
    RpcEndpoint,
    RpcEndpointType,
  },
  permission::{
    Caip25CaveatValue,
    Caveat,
    CaveatValue,
    Permission,
    PermissionHistoryEntry,
    PermissionSubject,
    ScopeObject,
    SubjectMetadata,
    SubjectType,
    CAIP25_CAVEAT,
    CAIP25_PERMISSION,
    ETH_ACCOUNTS_PERMISSION,
  },
  transaction::{
    TransactionMeta,
    TransactionStatus,
    TransactionType,
    TxParams,
    TxReceipt,
  },
};
