use {
  common::{snapshot, UNISWAP},
  proptest::prelude::*,
  std::sync::Arc,
  vantage_primitives::{Alert, Severity},
  vantage_selectors::{alerts, permissions, ConfirmAlertsState},
};

mod common;

const HD_ACCOUNTS: [&str; 2] = [common::ACCOUNT_2, common::ACCOUNT_1];

fn alert_strategy() -> impl Strategy<Value = Alert> {
  (
    "[a-z]{1,8}",
    proptest::option::of("[a-z]{1,8}"),
    prop_oneof![
      Just(Severity::Info),
      Just(Severity::Warning),
      Just(Severity::Danger)
    ],
    any::<bool>(),
  )
    .prop_map(|(key, field, severity, is_blocking)| Alert {
      message: format!("{key} raised"),
      key,
      field,
      severity,
      reason: None,
      is_blocking,
    })
}

proptest! {
  #[test]
  fn connected_accounts_sorted_by_recency(
    times in proptest::collection::vec(proptest::option::of(0u64..1000), 2)
  ) {
    let history: Vec<_> = HD_ACCOUNTS
      .iter()
      .zip(&times)
      .filter_map(|(a, t)| t.map(|t| (*a, t)))
      .collect();
    let state = common::with_history(&snapshot(), UNISWAP, &history);
    let connected = permissions::ordered_connected_accounts(&state, UNISWAP);

    prop_assert_eq!(connected.len(), 2);
    for pair in connected.windows(2) {
      match (pair[0].last_active, pair[1].last_active) {
        (Some(a), Some(b)) => prop_assert!(a >= b),
        (None, Some(_)) => prop_assert!(false, "missing time sorted first"),
        _ => {}
      }
    }

    // equal or missing times keep keyring order
    if times[0] == times[1] {
      prop_assert_eq!(connected[0].account.id.as_str(), "a2");
    }
  }

  #[test]
  fn alerts_partition_preserves_order(
    raised in proptest::collection::vec(alert_strategy(), 0..12)
  ) {
    let state = snapshot().update(|s| {
      s.confirm_alerts = Arc::new(ConfirmAlertsState {
        alerts: [("owner".to_owned(), raised.clone())].into(),
        confirmed: Default::default(),
      })
    });

    let general = alerts::general_alerts(&state, "owner");
    let field = alerts::field_alerts(&state, "owner");
    prop_assert_eq!(general.len() + field.len(), raised.len());
    prop_assert!(general.iter().all(|a| a.field.is_none()));
    prop_assert!(field.iter().all(|a| a.field.is_some()));

    let expected: Vec<_> = raised.iter().filter(|a| a.field.is_none()).collect();
    prop_assert_eq!(general, expected);
  }
}
