use {
  serde::{Deserialize, Serialize},
  std::fmt::Display,
};

/// The kind tag of a pending approval request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApprovalType {
  Transaction,
  EthSignTypedData,
  PersonalSign,
  EthDecrypt,
  EthGetEncryptionPublicKey,
  WalletRequestPermissions,
  WalletInstallSnap,
  WalletUpdateSnap,
  AddEthereumChain,
  SwitchEthereumChain,
  WatchAsset,
  /// Status page for a smart transaction that the user has already
  /// seen, never shown as a confirmation.
  SmartTransactionStatusPage,
  Other(String),
}

impl ApprovalType {
  pub fn as_str(&self) -> &str {
    match self {
      ApprovalType::Transaction => "transaction",
      ApprovalType::EthSignTypedData => "eth_signTypedData",
      ApprovalType::PersonalSign => "personal_sign",
      ApprovalType::EthDecrypt => "eth_decrypt",
      ApprovalType::EthGetEncryptionPublicKey => "eth_getEncryptionPublicKey",
      ApprovalType::WalletRequestPermissions => "wallet_requestPermissions",
      ApprovalType::WalletInstallSnap => "wallet_installSnap",
      ApprovalType::WalletUpdateSnap => "wallet_updateSnap",
      ApprovalType::AddEthereumChain => "wallet_addEthereumChain",
      ApprovalType::SwitchEthereumChain => "wallet_switchEthereumChain",
      ApprovalType::WatchAsset => "wallet_watchAsset",
      ApprovalType::SmartTransactionStatusPage => {
        "smartTransaction:showSmartTransactionStatusPage"
      }
      ApprovalType::Other(kind) => kind,
    }
  }

  /// Requests that sign or decrypt a message on behalf of an account.
  pub fn is_message(&self) -> bool {
    matches!(
      self,
      ApprovalType::EthSignTypedData
        | ApprovalType::PersonalSign
        | ApprovalType::EthDecrypt
        | ApprovalType::EthGetEncryptionPublicKey
    )
  }

  /// Message requests and plain transactions.
  pub fn is_transaction_like(&self) -> bool {
    *self == ApprovalType::Transaction || self.is_message()
  }
}

impl From<String> for ApprovalType {
  fn from(value: String) -> Self {
    match value.as_str() {
      "transaction" => ApprovalType::Transaction,
      "eth_signTypedData" => ApprovalType::EthSignTypedData,
      "personal_sign" => ApprovalType::PersonalSign,
      "eth_decrypt" => ApprovalType::EthDecrypt,
      "eth_getEncryptionPublicKey" => ApprovalType::EthGetEncryptionPublicKey,
      "wallet_requestPermissions" => ApprovalType::WalletRequestPermissions,
      "wallet_installSnap" => ApprovalType::WalletInstallSnap,
      "wallet_updateSnap" => ApprovalType::WalletUpdateSnap,
      "wallet_addEthereumChain" => ApprovalType::AddEthereumChain,
      "wallet_switchEthereumChain" => ApprovalType::SwitchEthereumChain,
      "wallet_watchAsset" => ApprovalType::WatchAsset,
      "smartTransaction:showSmartTransactionStatusPage" => {
        ApprovalType::SmartTransactionStatusPage
      }
      _ => ApprovalType::Other(value),
    }
  }
}

impl From<ApprovalType> for String {
  fn from(kind: ApprovalType) -> Self {
    kind.as_str().into()
  }
}

impl Display for ApprovalType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A queued request awaiting the user's accept or reject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRequest {
  pub id: String,
  pub origin: String,

  /// Milliseconds since epoch.
  pub time: u64,

  #[serde(rename = "type")]
  pub kind: ApprovalType,

  #[serde(default)]
  pub request_data: serde_json::Value,

  #[serde(default)]
  pub request_state: Option<serde_json::Value>,

  #[serde(default)]
  pub expects_result: bool,
}

impl ApprovalRequest {
  /// The transaction id a transaction approval refers to. Transaction
  /// approvals share their id with the transaction they confirm.
  pub fn transaction_id(&self) -> Option<&str> {
    match self.kind {
      ApprovalType::Transaction => Some(&self.id),
      _ => None,
    }
  }
}
