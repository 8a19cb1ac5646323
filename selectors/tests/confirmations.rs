use {
  common::{address, snapshot, ACCOUNT_1, ACCOUNT_2},
  std::sync::Arc,
  vantage_primitives::{ApprovalType, ChainId, Severity, TransactionType},
  vantage_selectors::{
    alerts,
    approvals::{self, MatchByNetworkClient},
    confirmations,
    delegations,
    transactions,
    DelegationFilter,
    SelectorContext,
  },
};

mod common;

#[test]
fn confirmations_skip_status_pages() {
  let state = snapshot();
  let sorted = confirmations::pending_confirmations_sorted(&state);
  let ids: Vec<_> = sorted.iter().map(|r| r.id.as_str()).collect();
  assert_eq!(ids, ["sig-1", "perm-1", "tx-1"]);

  let ctx = SelectorContext::default();
  let oldest = ctx.oldest_pending_confirmation(&state);
  assert_eq!((*oldest).as_ref().map(|r| r.id.as_str()), Some("sig-1"));
  let next = ctx.next_confirmation(&state, Some("sig-1"));
  assert_eq!((*next).as_ref().map(|r| r.id.as_str()), Some("perm-1"));
}

#[test]
fn approval_counts_and_kinds() {
  let state = snapshot();
  assert_eq!(approvals::total_unapproved_count(&state), 4);
  assert_eq!(approvals::pending_approval_count(&state), 4);
  assert!(approvals::has_pending_approvals(&state, &[
    ApprovalType::WalletRequestPermissions
  ]));
  assert!(approvals::has_transaction_like_pending_approvals(
    &state,
    &MatchByNetworkClient
  ));

  // the pending transaction was created on mainnet
  let polygon =
    state.update(|s| s.selected_network_client_id = Some("polygon-rpc".into()));
  let tx = approvals::pending_approval(&polygon, "tx-1").expect("pending tx");
  assert!(!approvals::is_transaction_like_pending(
    &polygon,
    tx,
    &MatchByNetworkClient
  ));
  // the personal signature still counts
  assert!(approvals::has_transaction_like_pending_approvals(
    &polygon,
    &MatchByNetworkClient
  ));
}

#[test]
fn unapproved_transactions_on_current_network() -> anyhow::Result<()> {
  let state = snapshot();
  let unapproved = transactions::unapproved_transactions(&state);
  assert_eq!(unapproved.len(), 1);
  assert_eq!(unapproved[0].id, "tx-1");

  let on_mainnet = transactions::current_network_transactions(&state)?;
  assert_eq!(on_mainnet.len(), 1);
  assert!(
    transactions::unapproved_transactions_for_chain(&state, ChainId::new(0x89))
      .is_empty()
  );
  Ok(())
}

#[test]
fn activity_of_the_selected_account() -> anyhow::Result<()> {
  let state = snapshot().update(|s| {
    let mut deposit = s.transactions[1].clone();
    deposit.id = "deposit".into();
    deposit.kind = Some(TransactionType::Incoming);
    deposit.tx_params.to = Some(address(ACCOUNT_1));
    deposit.tx_params.nonce = Some("0x7".into());
    Arc::make_mut(&mut s.transactions).push(deposit);
  });

  let activity = transactions::selected_address_transactions(&state)?;
  let ids: Vec<_> = activity.iter().map(|tx| tx.id.as_str()).collect();
  assert_eq!(ids, ["tx-1", "deposit"]);

  let primary = |groups: Vec<transactions::TransactionGroup>| -> Vec<String> {
    groups
      .iter()
      .map(|g| g.primary_transaction.id.clone())
      .collect()
  };
  assert_eq!(
    primary(transactions::nonce_sorted_transactions(&state)?),
    ["tx-1", "deposit"]
  );
  assert_eq!(
    primary(transactions::nonce_sorted_pending_transactions(&state)?),
    ["tx-1"]
  );
  assert_eq!(
    primary(transactions::nonce_sorted_completed_transactions(&state)?),
    ["deposit"]
  );
  assert!(transactions::submitted_pending_transactions(&state)?.is_empty());
  Ok(())
}

#[test]
fn alerts_of_a_confirmation() {
  let state = snapshot();
  let general = alerts::general_alerts(&state, "tx-1");
  let field = alerts::field_alerts(&state, "tx-1");
  assert_eq!(general.len(), 1);
  assert_eq!(field.len(), 1);
  assert_eq!(field[0].severity, Severity::Danger);

  assert_eq!(alerts::confirmed_alert_keys(&state, "tx-1"), [
    "originSpecialChar"
  ]);
  assert!(alerts::has_unconfirmed_blocking_alerts(&state, "tx-1"));
  assert_eq!(alerts::unconfirmed_danger_alerts(&state, "tx-1").len(), 1);
}

#[test]
fn delegations_by_filter() {
  let ctx = SelectorContext::default();
  let state = snapshot();

  assert_eq!(ctx.delegation_entries(&state, None).len(), 2);

  let filter = DelegationFilter {
    from: Some(address(ACCOUNT_1)),
    to: Some(address(ACCOUNT_2)),
    ..Default::default()
  };
  let found = ctx.delegation_entries(&state, Some(&filter));
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].hash, "0xaa01");
  assert_eq!(
    *found,
    delegations::list_delegation_entries(&state, Some(&filter))
      .into_iter()
      .cloned()
      .collect::<Vec<_>>()
  );
}
