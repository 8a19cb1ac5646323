use {
  crate::WalletState,
  vantage_primitives::{ApprovalRequest, ApprovalType},
};

/// Pending approvals that can be shown as confirmations, oldest first.
///
/// Smart transaction status pages are excluded, they only report on
/// a transaction the user already confirmed. Requests created at the
/// same time keep their order in the approvals region.
pub fn pending_confirmations_sorted(state: &WalletState) -> Vec<&ApprovalRequest> {
  let mut pending: Vec<_> = state
    .pending_approvals
    .values()
    .filter(|req| req.kind != ApprovalType::SmartTransactionStatusPage)
    .collect();
  pending.sort_by_key(|req| req.time);
  pending
}

pub fn oldest_pending_confirmation(
  state: &WalletState,
) -> Option<&ApprovalRequest> {
  pending_confirmations_sorted(state).into_iter().next()
}

/// The confirmation to show after the one that is currently displayed.
pub fn next_confirmation<'s>(
  state: &'s WalletState,
  current_id: Option<&str>,
) -> Option<&'s ApprovalRequest> {
  pending_confirmations_sorted(state)
    .into_iter()
    .find(|req| Some(req.id.as_str()) != current_id)
}
