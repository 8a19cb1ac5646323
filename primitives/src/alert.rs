use serde::{Deserialize, Serialize};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Info,
  Warning,
  Danger,
}

/// A problem flagged on a confirmation, owned by the confirmation id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
  pub key: String,

  /// The input field the alert refers to. General alerts have none.
  #[serde(default)]
  pub field: Option<String>,

  pub severity: Severity,
  pub message: String,

  #[serde(default)]
  pub reason: Option<String>,

  /// Blocking alerts prevent the confirmation from being submitted.
  #[serde(default)]
  pub is_blocking: bool,
}

impl Alert {
  pub fn is_general(&self) -> bool {
    self.field.is_none()
  }
}
