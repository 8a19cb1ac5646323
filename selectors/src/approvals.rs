use {
  crate::WalletState,
  tracing::debug,
  vantage_primitives::{ApprovalRequest, ApprovalType},
};

/// Decides whether a pending transaction approval belongs to the network
/// the user currently has selected.
pub trait NetworkMatcher {
  fn matches(&self, state: &WalletState, request: &ApprovalRequest) -> bool;
}

impl<F> NetworkMatcher for F
where
  F: Fn(&WalletState, &ApprovalRequest) -> bool,
{
  fn matches(&self, state: &WalletState, request: &ApprovalRequest) -> bool {
    self(state, request)
  }
}

/// Matches a transaction approval when the transaction it confirms was
/// created on the selected network client.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchByNetworkClient;

impl NetworkMatcher for MatchByNetworkClient {
  fn matches(&self, state: &WalletState, request: &ApprovalRequest) -> bool {
    let Some(selected) = state.selected_network_client_id.as_deref() else {
      return false;
    };

    let Some(tx_id) = request.transaction_id() else {
      return false;
    };

    match crate::transactions::transaction(state, tx_id) {
      Some(tx) => tx.network_client_id == selected,
      None => {
        debug!("approval {tx_id} refers to an unknown transaction");
        false
      }
    }
  }
}

pub fn pending_approvals(state: &WalletState) -> Vec<&ApprovalRequest> {
  state.pending_approvals.values().collect()
}

pub fn pending_approval<'s>(
  state: &'s WalletState,
  id: &str,
) -> Option<&'s ApprovalRequest> {
  state.pending_approvals.get(id)
}

pub fn approval_requests_by_type<'s>(
  state: &'s WalletState,
  kind: &ApprovalType,
) -> Vec<&'s ApprovalRequest> {
  state
    .pending_approvals
    .values()
    .filter(|req| &req.kind == kind)
    .collect()
}

/// True if any pending approval has one of the given kinds.
pub fn has_pending_approvals(state: &WalletState, kinds: &[ApprovalType]) -> bool {
  state
    .pending_approvals
    .values()
    .any(|req| kinds.contains(&req.kind))
}

/// Number of approvals present in the pending approvals region.
pub fn pending_approval_count(state: &WalletState) -> usize {
  state.pending_approvals.len()
}

/// The pending approval counter reported by the approval controller.
pub fn total_unapproved_count(state: &WalletState) -> usize {
  state.pending_approval_count
}

/// Whether a request is transaction like and, for plain transactions,
/// belongs to the selected network.
pub fn is_transaction_like_pending(
  state: &WalletState,
  request: &ApprovalRequest,
  matcher: &impl NetworkMatcher,
) -> bool {
  match request.kind {
    ApprovalType::Transaction => matcher.matches(state, request),
    ref kind => kind.is_transaction_like(),
  }
}

pub fn has_transaction_like_pending_approvals(
  state: &WalletState,
  matcher: &impl NetworkMatcher,
) -> bool {
  state
    .pending_approvals
    .values()
    .any(|req| is_transaction_like_pending(state, req, matcher))
}

/// Pending message signing and decryption requests, oldest first.
pub fn unapproved_messages(state: &WalletState) -> Vec<&ApprovalRequest> {
  let mut messages: Vec<_> = state
    .pending_approvals
    .values()
    .filter(|req| req.kind.is_message())
    .collect();
  messages.sort_by_key(|req| req.time);
  messages
}

/// Request payloads of pending permission requests.
pub fn permissions_requests(state: &WalletState) -> Vec<&serde_json::Value> {
  approval_requests_by_type(state, &ApprovalType::WalletRequestPermissions)
    .into_iter()
    .map(|req| &req.request_data)
    .collect()
}

pub fn first_permission_request(
  state: &WalletState,
) -> Option<&serde_json::Value> {
  permissions_requests(state).into_iter().next()
}

fn is_snap_install_or_update(kind: &ApprovalType) -> bool {
  match kind {
    ApprovalType::WalletInstallSnap | ApprovalType::WalletUpdateSnap => true,
    ApprovalType::Other(kind) => kind == "wallet_installSnapResult",
    _ => false,
  }
}

pub fn snap_install_or_update_requests(
  state: &WalletState,
) -> Vec<&serde_json::Value> {
  state
    .pending_approvals
    .values()
    .filter(|req| is_snap_install_or_update(&req.kind))
    .map(|req| &req.request_data)
    .collect()
}

pub fn request_state<'s>(
  state: &'s WalletState,
  id: &str,
) -> Option<&'s serde_json::Value> {
  pending_approval(state, id).and_then(|req| req.request_state.as_ref())
}

pub fn request_type<'s>(
  state: &'s WalletState,
  id: &str,
) -> Option<&'s ApprovalType> {
  pending_approval(state, id).map(|req| &req.kind)
}
