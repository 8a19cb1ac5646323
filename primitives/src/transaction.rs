use {
  crate::{Address, ChainId, NetworkClientId},
  serde::{Deserialize, Serialize},
  std::fmt::Display,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
  Unapproved,
  Approved,
  Signed,
  Submitted,
  Confirmed,
  Failed,
  Dropped,
  Rejected,
}

impl TransactionStatus {
  /// Statuses of a transaction that has not reached the chain yet or
  /// is waiting to be included.
  pub fn is_pending(&self) -> bool {
    matches!(
      self,
      TransactionStatus::Approved
        | TransactionStatus::Signed
        | TransactionStatus::Submitted
    )
  }

  /// Statuses shown in the pending section of the activity list.
  pub fn is_unsettled(&self) -> bool {
    *self == TransactionStatus::Unapproved || self.is_pending()
  }

  /// Statuses whose transaction best describes a nonce group: still
  /// unsettled, or confirmed on chain.
  pub fn has_priority(&self) -> bool {
    self.is_unsettled() || *self == TransactionStatus::Confirmed
  }
}

/// The kind tag of a transaction. Only the kinds the wallet treats
/// specially get their own variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
  SimpleSend,
  ContractInteraction,
  Swap,
  /// Speed up of an earlier transaction with the same nonce.
  Retry,
  /// Replacement that cancels an earlier transaction with the same
  /// nonce.
  Cancel,
  Incoming,
  Other(String),
}

impl TransactionType {
  pub fn as_str(&self) -> &str {
    match self {
      TransactionType::SimpleSend => "simpleSend",
      TransactionType::ContractInteraction => "contractInteraction",
      TransactionType::Swap => "swap",
      TransactionType::Retry => "retry",
      TransactionType::Cancel => "cancel",
      TransactionType::Incoming => "incoming",
      TransactionType::Other(kind) => kind,
    }
  }

  pub fn is_retry_or_cancel(&self) -> bool {
    matches!(self, TransactionType::Retry | TransactionType::Cancel)
  }
}

impl From<String> for TransactionType {
  fn from(value: String) -> Self {
    match value.as_str() {
      "simpleSend" => TransactionType::SimpleSend,
      "contractInteraction" => TransactionType::ContractInteraction,
      "swap" => TransactionType::Swap,
      "retry" => TransactionType::Retry,
      "cancel" => TransactionType::Cancel,
      "incoming" => TransactionType::Incoming,
      _ => TransactionType::Other(value),
    }
  }
}

impl From<TransactionType> for String {
  fn from(kind: TransactionType) -> Self {
    match kind {
      TransactionType::Other(kind) => kind,
      kind => kind.as_str().to_owned(),
    }
  }
}

impl Display for TransactionType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
  /// `0x1` when the transaction succeeded on chain, `0x0` when it was
  /// mined but reverted.
  #[serde(default)]
  pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxParams {
  pub from: Address,

  #[serde(default)]
  pub to: Option<Address>,

  #[serde(default)]
  pub value: Option<String>,

  #[serde(default)]
  pub data: Option<String>,

  #[serde(default)]
  pub nonce: Option<String>,
}

/// A transaction tracked by the transaction controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMeta {
  pub id: String,
  pub chain_id: ChainId,
  pub network_client_id: NetworkClientId,
  pub status: TransactionStatus,

  /// Milliseconds since epoch.
  pub time: u64,

  #[serde(default)]
  pub origin: Option<String>,

  #[serde(default, rename = "type")]
  pub kind: Option<TransactionType>,

  pub tx_params: TxParams,

  #[serde(default)]
  pub tx_receipt: Option<TxReceipt>,
}

impl TransactionMeta {
  pub fn sender(&self) -> &Address {
    &self.tx_params.from
  }

  pub fn nonce(&self) -> Option<&str> {
    self.tx_params.nonce.as_deref()
  }

  pub fn is_kind(&self, kind: &TransactionType) -> bool {
    self.kind.as_ref() == Some(kind)
  }

  pub fn is_retry_or_cancel(&self) -> bool {
    self
      .kind
      .as_ref()
      .map_or(false, TransactionType::is_retry_or_cancel)
  }

  /// Mined but reverted.
  pub fn is_on_chain_failure(&self) -> bool {
    self
      .tx_receipt
      .as_ref()
      .and_then(|r| r.status.as_deref())
      == Some("0x0")
  }

  /// Failed before it was broadcast, so its nonce was never consumed.
  pub fn is_ephemeral_failure(&self) -> bool {
    self.status == TransactionStatus::Failed && !self.is_on_chain_failure()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kinds_and_failures_decode() -> anyhow::Result<()> {
    let tx: TransactionMeta = serde_json::from_str(
      r#"{
        "id": "7",
        "chainId": "0x1",
        "networkClientId": "mainnet",
        "status": "failed",
        "time": 1,
        "type": "retry",
        "txParams": {
          "from": "0x0dcd5d886577d5081b0c52e242ef29e70be3e7bc",
          "nonce": "0x4"
        },
        "txReceipt": { "status": "0x0" }
      }"#,
    )?;
    assert!(tx.is_kind(&TransactionType::Retry));
    assert!(tx.is_retry_or_cancel());
    assert_eq!(tx.nonce(), Some("0x4"));
    assert!(tx.is_on_chain_failure());
    assert!(!tx.is_ephemeral_failure());

    let tx = TransactionMeta {
      tx_receipt: None,
      kind: Some("tokenMethodTransfer".to_owned().into()),
      ..tx
    };
    assert!(tx.is_ephemeral_failure());
    assert!(!tx.is_retry_or_cancel());
    assert_eq!(
      serde_json::to_value(&tx.kind)?,
      serde_json::json!("tokenMethodTransfer")
    );
    Ok(())
  }

  #[test]
  fn status_sets() {
    use TransactionStatus::*;
    let unsettled: Vec<_> = [
      Unapproved, Approved, Signed, Submitted, Confirmed, Failed, Dropped,
      Rejected,
    ]
    .into_iter()
    .filter(TransactionStatus::is_unsettled)
    .collect();
    assert_eq!(unsettled, [Unapproved, Approved, Signed, Submitted]);
    assert!(Confirmed.has_priority());
    assert!(!Dropped.has_priority());
  }
}
