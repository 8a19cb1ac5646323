use {
  crate::WalletState,
  vantage_primitives::{Alert, Severity},
};

/// All alerts raised on a confirmation, in the order they were raised.
/// Unknown owners have no alerts.
pub fn alerts<'s>(state: &'s WalletState, owner: &str) -> &'s [Alert] {
  state
    .confirm_alerts
    .alerts
    .get(owner)
    .map(Vec::as_slice)
    .unwrap_or_default()
}

/// Alerts that are not attached to a field.
pub fn general_alerts<'s>(state: &'s WalletState, owner: &str) -> Vec<&'s Alert> {
  alerts(state, owner)
    .iter()
    .filter(|a| a.is_general())
    .collect()
}

pub fn field_alerts<'s>(state: &'s WalletState, owner: &str) -> Vec<&'s Alert> {
  alerts(state, owner)
    .iter()
    .filter(|a| !a.is_general())
    .collect()
}

pub fn confirmed_alert_keys<'s>(
  state: &'s WalletState,
  owner: &str,
) -> Vec<&'s str> {
  state
    .confirm_alerts
    .confirmed
    .get(owner)
    .into_iter()
    .flatten()
    .filter(|(_, confirmed)| **confirmed)
    .map(|(key, _)| key.as_str())
    .collect()
}

fn is_confirmed(state: &WalletState, owner: &str, key: &str) -> bool {
  state
    .confirm_alerts
    .confirmed
    .get(owner)
    .and_then(|keys| keys.get(key))
    .copied()
    .unwrap_or(false)
}

pub fn unconfirmed_danger_alerts<'s>(
  state: &'s WalletState,
  owner: &str,
) -> Vec<&'s Alert> {
  alerts(state, owner)
    .iter()
    .filter(|a| a.severity == Severity::Danger)
    .filter(|a| !is_confirmed(state, owner, &a.key))
    .collect()
}

/// Blocking alerts hold the confirmation until the user acknowledges
/// them.
pub fn has_unconfirmed_blocking_alerts(state: &WalletState, owner: &str) -> bool {
  alerts(state, owner)
    .iter()
    .any(|a| a.is_blocking && !is_confirmed(state, owner, &a.key))
}
