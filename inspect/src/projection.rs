use {
  crate::cli::{Command, Section},
  serde::Serialize,
  serde_json::Value,
  vantage_primitives::Alert,
  vantage_selectors::{
    accounts,
    alerts,
    approvals::{self, MatchByNetworkClient},
    networks,
    permissions,
    transactions,
    SelectorContext,
    WalletState,
  },
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApprovalSummary<'s> {
  pending: usize,
  total_unapproved: usize,
  has_transaction_like: bool,
  permission_requests: Vec<&'s Value>,
}

#[derive(Serialize)]
struct AlertSummary<'s> {
  general: &'s [Alert],
  field: &'s [Alert],
  confirmed: Vec<&'s str>,
  blocking: bool,
}

fn view(value: impl Serialize) -> anyhow::Result<Value> {
  Ok(serde_json::to_value(value)?)
}

/// Computes the view a command asks for.
pub fn run(
  ctx: &SelectorContext,
  state: &WalletState,
  command: &Command,
) -> anyhow::Result<Value> {
  match command {
    Command::Accounts => view(&*ctx.updated_and_sorted_accounts(state)),
    Command::ConnectedAccounts => {
      view(&*ctx.ordered_connected_accounts_for_active_tab(state))
    }
    Command::UnconnectedAccounts => {
      view(permissions::unconnected_accounts_for_active_tab(state))
    }
    Command::ConnectCandidate => {
      view(permissions::account_to_connect_to_active_tab(state)?)
    }
    Command::Connections => {
      view(permissions::connected_subjects_for_all_addresses(state))
    }
    Command::DappNetwork => view(&*ctx.dapp_active_network(state)),
    Command::CurrentNetwork => view(networks::current_network(state)?),
    Command::Confirmations => view(&*ctx.pending_confirmations_sorted(state)),
    Command::NextConfirmation { current } => {
      view(&*ctx.next_confirmation(state, current.as_deref()))
    }
    Command::Approvals => view(ApprovalSummary {
      pending: approvals::pending_approval_count(state),
      total_unapproved: approvals::total_unapproved_count(state),
      has_transaction_like: approvals::has_transaction_like_pending_approvals(
        state,
        &MatchByNetworkClient,
      ),
      permission_requests: approvals::permissions_requests(state),
    }),
    Command::Transactions { chain_id } => match chain_id {
      Some(chain_id) => view(transactions::unapproved_transactions_for_chain(
        state, *chain_id,
      )),
      None => view(transactions::unapproved_transactions(state)),
    },
    Command::Activity { section } => view(match section {
      Section::All => transactions::nonce_sorted_transactions(state)?,
      Section::Pending => {
        transactions::nonce_sorted_pending_transactions(state)?
      }
      Section::Completed => {
        transactions::nonce_sorted_completed_transactions(state)?
      }
    }),
    Command::Messages => view(approvals::unapproved_messages(state)),
    Command::Alerts { owner } => view(AlertSummary {
      general: &ctx.general_alerts(state, owner),
      field: &ctx.field_alerts(state, owner),
      confirmed: alerts::confirmed_alert_keys(state, owner),
      blocking: alerts::has_unconfirmed_blocking_alerts(state, owner),
    }),
    Command::Delegations { .. } => {
      let filter = command.delegation_filter();
      view(&*ctx.delegation_entries(state, filter.as_ref()))
    }
    Command::FeatureFlags => view(&*ctx.remote_feature_flags(state)),
  }
}

/// A one line description of the selected account, for the log.
pub fn describe_selected(state: &WalletState) -> String {
  match accounts::maybe_selected_internal_account(state) {
    Some(account) => format!("{} ({})", account.name(), account.address),
    None => "none".into(),
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    crate::cli::{decode_state, Format},
    serde_json::json,
  };

  fn snapshot() -> anyhow::Result<WalletState> {
    decode_state(
      include_str!("../../selectors/tests/fixtures/snapshot.json").as_bytes(),
      Format::Json,
    )
  }

  #[test]
  fn renders_account_picker() -> anyhow::Result<()> {
    let ctx = SelectorContext::default();
    let output = run(&ctx, &snapshot()?, &Command::Accounts)?;
    let ids: Vec<_> = output
      .as_array()
      .expect("a list")
      .iter()
      .map(|acc| acc["id"].as_str().unwrap_or_default().to_owned())
      .collect();
    assert_eq!(ids, ["a3", "a1", "sol", "a2"]);
    assert_eq!(output[3]["active"], json!(true));
    Ok(())
  }

  #[test]
  fn renders_dapp_network() -> anyhow::Result<()> {
    let ctx = SelectorContext::default();
    let output = run(&ctx, &snapshot()?, &Command::DappNetwork)?;
    assert_eq!(output["kind"], json!("evm"));
    assert_eq!(output["network"]["chainId"], json!("0x89"));
    Ok(())
  }

  #[test]
  fn renders_activity_groups() -> anyhow::Result<()> {
    let ctx = SelectorContext::default();
    let state = snapshot()?;

    let all = run(&ctx, &state, &Command::Activity {
      section: Section::All,
    })?;
    assert_eq!(all[0]["primaryTransaction"]["id"], json!("tx-1"));
    assert_eq!(all[0]["initialTransaction"]["id"], json!("tx-1"));
    assert_eq!(all[0]["hasRetried"], json!(false));
    assert_eq!(all.as_array().map(Vec::len), Some(1));

    let completed = run(&ctx, &state, &Command::Activity {
      section: Section::Completed,
    })?;
    assert_eq!(completed, json!([]));

    let messages = run(&ctx, &state, &Command::Messages)?;
    assert_eq!(messages[0]["id"], json!("sig-1"));
    Ok(())
  }

  #[test]
  fn selector_errors_surface() -> anyhow::Result<()> {
    let ctx = SelectorContext::default();
    let state = snapshot()?.update(|s| s.selected_network_client_id = None);
    assert!(run(&ctx, &state, &Command::CurrentNetwork).is_err());
    Ok(())
  }
}
