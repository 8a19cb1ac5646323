use {
  common::{address, ids, snapshot, with_history, ACCOUNT_1, ACCOUNT_2, UNISWAP},
  std::sync::Arc,
  vantage_primitives::ChainId,
  vantage_selectors::{
    accounts,
    networks,
    permissions,
    ActiveTab,
    DappNetwork,
    SelectorContext,
  },
};

mod common;

#[test]
fn connected_accounts_follow_interaction_recency() {
  let state = snapshot();
  let connected = permissions::ordered_connected_accounts(&state, UNISWAP);
  assert_eq!(ids(&connected, |c| c.account.id.as_str()), ["a2", "a1"]);
  assert_eq!(connected[0].last_active, Some(1700000000500));

  // no history at all keeps keyring order
  let state = state.update(|s| s.permission_history = Default::default());
  let connected = permissions::ordered_connected_accounts(&state, UNISWAP);
  assert_eq!(ids(&connected, |c| c.account.id.as_str()), ["a2", "a1"]);
  assert!(connected.iter().all(|c| c.last_active.is_none()));
}

#[test]
fn bare_wallet_scope_keeps_permitted_accounts() -> anyhow::Result<()> {
  let state = snapshot();
  assert_eq!(permissions::permitted_accounts(&state, UNISWAP), [
    address(ACCOUNT_1),
    address(ACCOUNT_2)
  ]);

  // caveats other than the scopes survive a round trip untouched
  let snap = &state.subjects[UNISWAP].permissions["wallet_snap"];
  assert_eq!(
    serde_json::to_value(&snap.caveats[0].value)?,
    serde_json::json!({ "npm:@metamask/solana-wallet-snap": {} })
  );
  Ok(())
}

#[test]
fn accounts_without_history_sort_last() {
  let state = with_history(&snapshot(), UNISWAP, &[(ACCOUNT_1, 10)]);
  let connected = permissions::ordered_connected_accounts(&state, UNISWAP);
  assert_eq!(ids(&connected, |c| c.account.id.as_str()), ["a1", "a2"]);
  assert_eq!(connected[1].last_active, None);
}

#[test]
fn account_picker_ordering() {
  let state = snapshot();
  let sorted = accounts::updated_and_sorted_accounts(&state);

  assert_eq!(
    ids(&sorted, |s| s.account.account.id.as_str()),
    ["a3", "a1", "sol", "a2"]
  );
  assert!(sorted[0].pinned && !sorted[0].hidden);
  assert!(sorted[3].hidden);
  let active: Vec<_> = sorted
    .iter()
    .filter(|s| s.active)
    .map(|s| s.account.account.id.as_str())
    .collect();
  assert_eq!(active, ["a2"]);
  assert_eq!(sorted[1].account.balance, "0xde0b6b3a7640000");
  assert_eq!(sorted[2].account.balance, accounts::ZERO_BALANCE);
}

#[test]
fn connect_candidate() -> anyhow::Result<()> {
  let state = snapshot();

  // the selected account is already connected
  assert_eq!(permissions::account_to_connect_to_active_tab(&state)?, None);

  let ledger = state.update(|s| Arc::make_mut(&mut s.internal_accounts).select("a3"));
  let candidate = permissions::account_to_connect_to_active_tab(&ledger)?;
  assert_eq!(candidate.map(|a| a.id.as_str()), Some("a3"));

  // nothing connected to a fresh origin
  let fresh = ledger.update(|s| {
    s.active_tab = Arc::new(ActiveTab {
      origin: Some("https://opensea.io".into()),
      ..Default::default()
    })
  });
  assert_eq!(permissions::account_to_connect_to_active_tab(&fresh)?, None);

  assert!(permissions::is_account_connected_to_current_tab(
    &state,
    &address(ACCOUNT_2)
  ));
  assert_eq!(
    ids(&permissions::unconnected_accounts_for_active_tab(&state), |a| {
      a.account.id.as_str()
    }),
    ["a3", "sol"]
  );
  Ok(())
}

#[test]
fn dapp_network_from_domain_selection() {
  let state = snapshot();
  match networks::dapp_active_network(&state) {
    Some(DappNetwork::Evm(config)) => {
      assert_eq!(config.chain_id, ChainId::new(0x89))
    }
    other => panic!("unexpected network {other:?}"),
  }

  let no_domains = state.update(|s| s.domains = None);
  assert_eq!(networks::dapp_active_network(&no_domains), None);

  let no_tab = state.update(|s| s.active_tab = Default::default());
  assert_eq!(networks::dapp_active_network(&no_tab), None);
}

#[test]
fn context_matches_free_functions() {
  let ctx = SelectorContext::default();
  let state = snapshot();

  assert_eq!(
    *ctx.updated_and_sorted_accounts(&state),
    accounts::updated_and_sorted_accounts(&state)
  );
  assert_eq!(
    *ctx.ordered_connected_accounts_for_active_tab(&state),
    permissions::ordered_connected_accounts_for_active_tab(&state)
  );
  assert_eq!(
    *ctx.dapp_active_network(&state),
    networks::dapp_active_network(&state)
  );

  // switching the dapp's network only recomputes the network view
  let connected = ctx.ordered_connected_accounts_for_active_tab(&state);
  let switched = state.update(|s| {
    s.domains = Some(Arc::new(
      [(UNISWAP.to_owned(), "mainnet".to_owned())].into(),
    ))
  });
  assert!(Arc::ptr_eq(
    &connected,
    &ctx.ordered_connected_accounts_for_active_tab(&switched)
  ));
  match &*ctx.dapp_active_network(&switched) {
    Some(DappNetwork::Evm(config)) => assert_eq!(config.chain_id, ChainId::new(1)),
    other => panic!("unexpected network {other:?}"),
  }
}
