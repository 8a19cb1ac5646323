use {
  crate::{accounts, networks, Error, WalletState},
  serde::Serialize,
  std::collections::HashMap,
  vantage_primitives::{
    Address,
    ChainId,
    TransactionMeta,
    TransactionStatus,
    TransactionType,
  },
};

/// All transactions, oldest first.
pub fn transactions(state: &WalletState) -> Vec<&TransactionMeta> {
  let mut txs: Vec<_> = state.transactions.iter().collect();
  txs.sort_by_key(|tx| tx.time);
  txs
}

pub fn transaction<'s>(
  state: &'s WalletState,
  id: &str,
) -> Option<&'s TransactionMeta> {
  state.transactions.iter().find(|tx| tx.id == id)
}

pub fn transaction_sender<'s>(
  state: &'s WalletState,
  id: &str,
) -> Option<&'s Address> {
  transaction(state, id).map(TransactionMeta::sender)
}

/// Transactions awaiting approval on every network, oldest first.
pub fn unapproved_transactions(state: &WalletState) -> Vec<&TransactionMeta> {
  transactions(state)
    .into_iter()
    .filter(|tx| tx.status == TransactionStatus::Unapproved)
    .collect()
}

pub fn unapproved_transactions_for_chain(
  state: &WalletState,
  chain_id: ChainId,
) -> Vec<&TransactionMeta> {
  unapproved_transactions(state)
    .into_iter()
    .filter(|tx| tx.chain_id == chain_id)
    .collect()
}

/// Transactions on the chain of the selected network, oldest first.
pub fn current_network_transactions(
  state: &WalletState,
) -> Result<Vec<&TransactionMeta>, Error> {
  let chain_id = networks::current_chain_id(state)?;
  Ok(
    transactions(state)
      .into_iter()
      .filter(|tx| tx.chain_id == chain_id)
      .collect(),
  )
}

/// Transactions that were approved but are not final yet.
pub fn pending_transactions(state: &WalletState) -> Vec<&TransactionMeta> {
  transactions(state)
    .into_iter()
    .filter(|tx| tx.status.is_pending())
    .collect()
}

/// Approved or signed transactions on every network. A nonce held by
/// one of these blocks the next transaction on any chain.
pub fn approved_and_signed_transactions(
  state: &WalletState,
) -> Vec<&TransactionMeta> {
  transactions(state)
    .into_iter()
    .filter(|tx| {
      matches!(
        tx.status,
        TransactionStatus::Approved | TransactionStatus::Signed
      )
    })
    .collect()
}

/// The activity of the selected account, newest first: what it sent,
/// and incoming transfers addressed to it.
pub fn selected_address_transactions(
  state: &WalletState,
) -> Result<Vec<&TransactionMeta>, Error> {
  let address = &accounts::selected_internal_account(state)?.address;
  let mut txs: Vec<_> = state
    .transactions
    .iter()
    .filter(|tx| {
      if tx.is_kind(&TransactionType::Incoming) {
        tx.tx_params.to.as_ref() == Some(address)
      } else {
        tx.sender() == address
      }
    })
    .collect();
  txs.sort_by(|a, b| b.time.cmp(&a.time));
  Ok(txs)
}

pub fn submitted_pending_transactions(
  state: &WalletState,
) -> Result<Vec<&TransactionMeta>, Error> {
  Ok(
    selected_address_transactions(state)?
      .into_iter()
      .filter(|tx| tx.status == TransactionStatus::Submitted)
      .collect(),
  )
}

/// Transactions that share a nonce, shown as a single activity entry.
///
/// Speed ups and cancellations replace an earlier transaction by
/// reusing its nonce, so a group holds the original transaction and
/// every replacement of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionGroup<'s> {
  pub nonce: Option<&'s str>,

  /// Oldest first.
  pub transactions: Vec<&'s TransactionMeta>,

  /// The transaction that describes what the user set out to do. Never
  /// a retry or cancel while the group holds anything else.
  pub initial_transaction: &'s TransactionMeta,

  /// The transaction whose status the group reports.
  pub primary_transaction: &'s TransactionMeta,

  pub has_retried: bool,
  pub has_cancelled: bool,
}

/// Retries and cancels only count when they reached the network or are
/// about to.
fn is_valid_replacement(tx: &TransactionMeta, kind: &TransactionType) -> bool {
  tx.is_kind(kind)
    && (tx.status.has_priority() || tx.status == TransactionStatus::Dropped)
}

impl<'s> TransactionGroup<'s> {
  fn single(tx: &'s TransactionMeta) -> Self {
    Self {
      nonce: tx.nonce(),
      transactions: vec![tx],
      initial_transaction: tx,
      primary_transaction: tx,
      has_retried: false,
      has_cancelled: false,
    }
  }

  fn first_of_nonce(tx: &'s TransactionMeta) -> Self {
    Self {
      has_retried: is_valid_replacement(tx, &TransactionType::Retry),
      has_cancelled: is_valid_replacement(tx, &TransactionType::Cancel),
      ..Self::single(tx)
    }
  }

  fn absorb(&mut self, tx: &'s TransactionMeta) {
    let at = self.transactions.partition_point(|t| t.time <= tx.time);
    self.transactions.insert(at, tx);

    // a confirmed or reverted transaction consumed the nonce, nothing
    // else in the group can be more accurate
    let final_on_chain =
      tx.status == TransactionStatus::Confirmed || tx.is_on_chain_failure();
    if final_on_chain
      || self.primary_transaction.is_ephemeral_failure()
      || (tx.time > self.primary_transaction.time && tx.status.has_priority())
    {
      self.primary_transaction = tx;
    }

    let eligible_for_initial =
      !tx.is_retry_or_cancel() && !tx.is_ephemeral_failure();
    if eligible_for_initial
      && (tx.time < self.initial_transaction.time
        || self.initial_transaction.is_ephemeral_failure())
    {
      self.initial_transaction = tx;
    }

    self.has_retried |= is_valid_replacement(tx, &TransactionType::Retry);
    self.has_cancelled |= is_valid_replacement(tx, &TransactionType::Cancel);
  }

  fn with_valid_initial(mut self) -> Self {
    if self.initial_transaction.is_retry_or_cancel() {
      let original = self
        .transactions
        .iter()
        .copied()
        .find(|tx| !tx.is_retry_or_cancel());
      if let Some(tx) = original {
        self.initial_transaction = tx;
      }
    }
    self
  }
}

fn parse_nonce(nonce: &str) -> Option<u64> {
  let digits = nonce.strip_prefix("0x").unwrap_or(nonce);
  u64::from_str_radix(digits, 16).ok()
}

/// Keeps `nonces` ascending. Nonces that do not parse go last.
fn insert_ordered_nonce<'s>(nonces: &mut Vec<&'s str>, nonce: &'s str) {
  let value = parse_nonce(nonce);
  let at = nonces
    .iter()
    .position(|n| matches!((parse_nonce(n), value), (Some(a), Some(b)) if a > b))
    .unwrap_or(nonces.len());
  nonces.insert(at, nonce);
}

/// Inserts before the first group whose primary transaction is newer.
fn insert_by_time<'s>(
  groups: &mut Vec<TransactionGroup<'s>>,
  group: TransactionGroup<'s>,
) {
  let time = group.primary_transaction.time;
  let at = groups
    .iter()
    .position(|g| g.primary_transaction.time > time)
    .unwrap_or(groups.len());
  groups.insert(at, group);
}

/// Groups transactions by nonce, in ascending nonce order.
///
/// Transactions without a nonce are not signed yet; they come first,
/// each in its own group, ordered by time. Incoming transfers carry the
/// sender's nonce, so they are never grouped and are placed among the
/// nonce groups by time instead.
pub fn group_by_nonce<'s>(
  transactions: impl IntoIterator<Item = &'s TransactionMeta>,
) -> Vec<TransactionGroup<'s>> {
  let mut unsigned = vec![];
  let mut incoming = vec![];
  let mut nonces = vec![];
  let mut by_nonce: HashMap<&str, TransactionGroup> = HashMap::new();

  for tx in transactions {
    let is_incoming = tx.is_kind(&TransactionType::Incoming);
    match tx.nonce() {
      Some(nonce) if !is_incoming => match by_nonce.get_mut(nonce) {
        Some(group) => group.absorb(tx),
        None => {
          insert_ordered_nonce(&mut nonces, nonce);
          by_nonce.insert(nonce, TransactionGroup::first_of_nonce(tx));
        }
      },
      _ if is_incoming => incoming.push(TransactionGroup::single(tx)),
      _ => insert_by_time(&mut unsigned, TransactionGroup::single(tx)),
    }
  }

  let mut ordered: Vec<_> = nonces
    .into_iter()
    .filter_map(|nonce| by_nonce.remove(nonce))
    .collect();
  for group in incoming {
    insert_by_time(&mut ordered, group);
  }

  unsigned
    .into_iter()
    .chain(ordered)
    .map(TransactionGroup::with_valid_initial)
    .collect()
}

/// Activity of the selected account grouped by nonce.
pub fn nonce_sorted_transactions(
  state: &WalletState,
) -> Result<Vec<TransactionGroup<'_>>, Error> {
  Ok(group_by_nonce(selected_address_transactions(state)?))
}

/// Groups whose primary transaction has not settled yet, ascending by
/// nonce.
pub fn nonce_sorted_pending_transactions(
  state: &WalletState,
) -> Result<Vec<TransactionGroup<'_>>, Error> {
  Ok(
    nonce_sorted_transactions(state)?
      .into_iter()
      .filter(|g| g.primary_transaction.status.is_unsettled())
      .collect(),
  )
}

/// Settled groups, most recent nonce first.
pub fn nonce_sorted_completed_transactions(
  state: &WalletState,
) -> Result<Vec<TransactionGroup<'_>>, Error> {
  Ok(
    nonce_sorted_transactions(state)?
      .into_iter()
      .filter(|g| !g.primary_transaction.status.is_unsettled())
      .rev()
      .collect(),
  )
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    crate::state::InternalAccountsState,
    std::sync::Arc,
    vantage_primitives::TxParams,
  };

  fn tx(id: &str, chain: u64, status: TransactionStatus, time: u64) -> TransactionMeta {
    TransactionMeta {
      id: id.into(),
      chain_id: ChainId::new(chain),
      network_client_id: format!("client-{chain}"),
      status,
      time,
      origin: Some("https://app.uniswap.org".into()),
      kind: None,
      tx_params: TxParams {
        from: "0x0dcd5d886577d5081b0c52e242ef29e70be3e7bc".parse().unwrap(),
        to: None,
        value: Some("0x0".into()),
        data: None,
        nonce: None,
      },
      tx_receipt: None,
    }
  }

  fn state() -> WalletState {
    WalletState::new(InternalAccountsState::default()).update(|s| {
      s.transactions = Arc::new(vec![
        tx("3", 1, TransactionStatus::Unapproved, 30),
        tx("1", 137, TransactionStatus::Unapproved, 10),
        tx("2", 1, TransactionStatus::Submitted, 20),
        tx("4", 1, TransactionStatus::Confirmed, 5),
      ])
    })
  }

  fn ids<'a>(txs: &[&'a TransactionMeta]) -> Vec<&'a str> {
    txs.iter().map(|tx| tx.id.as_str()).collect()
  }

  #[test]
  fn unapproved_transactions_are_time_ordered() {
    let state = state();
    assert_eq!(ids(&unapproved_transactions(&state)), ["1", "3"]);
    assert_eq!(
      ids(&unapproved_transactions_for_chain(&state, ChainId::new(1))),
      ["3"]
    );
    assert_eq!(ids(&pending_transactions(&state)), ["2"]);
  }

  #[test]
  fn lookups() -> anyhow::Result<()> {
    let state = state();
    assert_eq!(transaction(&state, "2").map(|tx| tx.time), Some(20));
    assert_eq!(
      transaction_sender(&state, "2"),
      Some(&"0x0DCD5D886577d5081B0c52e242Ef29E70Be3E7bc".parse()?)
    );
    assert!(transaction(&state, "9").is_none());
    Ok(())
  }

  fn signed(
    id: &str,
    nonce: Option<&str>,
    kind: Option<TransactionType>,
    status: TransactionStatus,
    time: u64,
  ) -> TransactionMeta {
    let mut meta = tx(id, 1, status, time);
    meta.tx_params.nonce = nonce.map(Into::into);
    meta.kind = kind;
    meta
  }

  fn activity() -> Vec<TransactionMeta> {
    use {TransactionStatus::*, TransactionType::*};
    let mut txs = vec![
      signed("send", Some("0x1"), Some(SimpleSend), Submitted, 10),
      signed("speed-up", Some("0x1"), Some(Retry), Submitted, 20),
      signed("old", Some("0x0"), None, Confirmed, 5),
      signed("not-broadcast", Some("0x2"), None, Failed, 30),
      signed("resent", Some("0x2"), None, Submitted, 40),
      signed("draft", None, None, Unapproved, 50),
      signed("deposit", Some("0x9"), Some(Incoming), Confirmed, 7),
      signed("cancel", Some("0x3"), Some(Cancel), Submitted, 60),
      signed("cancelled", Some("0x3"), None, Failed, 55),
      signed("first", Some("0x10"), None, Confirmed, 1),
    ];
    txs.sort_by(|a, b| b.time.cmp(&a.time));
    txs
  }

  fn primaries<'a>(groups: &[TransactionGroup<'a>]) -> Vec<&'a str> {
    groups
      .iter()
      .map(|g| g.primary_transaction.id.as_str())
      .collect()
  }

  #[test]
  fn groups_follow_nonce_order() {
    let txs = activity();
    let groups = group_by_nonce(&txs);

    assert_eq!(primaries(&groups), [
      "draft", "old", "deposit", "speed-up", "resent", "cancel", "first"
    ]);
    let nonces: Vec<_> = groups.iter().map(|g| g.nonce).collect();
    assert_eq!(nonces, [
      None,
      Some("0x0"),
      Some("0x9"),
      Some("0x1"),
      Some("0x2"),
      Some("0x3"),
      Some("0x10")
    ]);
  }

  #[test]
  fn replacements_share_a_group() {
    let txs = activity();
    let groups = group_by_nonce(&txs);

    let sped_up = &groups[3];
    assert_eq!(ids(&sped_up.transactions), ["send", "speed-up"]);
    assert_eq!(sped_up.initial_transaction.id, "send");
    assert!(sped_up.has_retried && !sped_up.has_cancelled);

    // the failed attempt never consumed its nonce
    let resent = &groups[4];
    assert_eq!(resent.initial_transaction.id, "resent");
    assert_eq!(resent.primary_transaction.id, "resent");

    // a cancel is never the initial transaction while the group holds
    // anything else
    let cancelled = &groups[5];
    assert_eq!(cancelled.initial_transaction.id, "cancelled");
    assert!(cancelled.has_cancelled && !cancelled.has_retried);
  }

  #[test]
  fn on_chain_failure_becomes_primary() {
    use {TransactionStatus::*, TransactionType::*};
    let mut reverted = signed("swap", Some("0x5"), Some(Swap), Failed, 10);
    reverted.tx_receipt = Some(vantage_primitives::TxReceipt {
      status: Some("0x0".into()),
    });
    let txs = [
      signed("speed-up", Some("0x5"), Some(Retry), Dropped, 20),
      reverted,
    ];

    let groups = group_by_nonce(&txs);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].primary_transaction.id, "swap");
    assert_eq!(groups[0].initial_transaction.id, "swap");
    assert!(groups[0].has_retried);
  }

  #[test]
  fn status_filters_and_selection() {
    let state = state().update(|s| {
      Arc::make_mut(&mut s.transactions).extend([
        tx("5", 137, TransactionStatus::Signed, 40),
        tx("6", 1, TransactionStatus::Approved, 1),
      ])
    });
    assert_eq!(ids(&approved_and_signed_transactions(&state)), ["6", "5"]);

    // activity views are relative to the selected account
    assert!(selected_address_transactions(&state).is_err());
    assert!(nonce_sorted_transactions(&state).is_err());
  }

  #[test]
  fn current_network_requires_a_selection() {
    let state = state();
    assert_eq!(
      current_network_transactions(&state),
      Err(Error::NoNetworkSelected)
    );
  }
}
