//! Derived, read-only views over a wallet state snapshot.
//!
//! Every view is available as a free function over [`WalletState`].
//! The views that are expensive or feed other views are also available
//! memoized through [`SelectorContext`].

pub mod accounts;
pub mod alerts;
pub mod approvals;
pub mod confirmations;
pub mod delegations;
pub mod feature_flags;
pub mod networks;
pub mod permissions;
pub mod transactions;

mod context;
mod error;
mod memo;
mod state;
mod trace;

pub use {
  accounts::{AccountWithBalance, SortedAccount},
  approvals::{MatchByNetworkClient, NetworkMatcher},
  context::SelectorContext,
  delegations::DelegationFilter,
  error::Error,
  feature_flags::{ManifestError, ManifestFlags},
  memo::{ByRef, Memo, MemoStats},
  networks::{CurrentNetwork, DappNetwork, SelectedNetwork},
  permissions::{ConnectedAccount, ConnectedSubject, SubjectBadge},
  state::{
    ActiveTab,
    CachedBalance,
    ConfirmAlertsState,
    InternalAccountsState,
    PermissionHistory,
    WalletState,
  },
  trace::TraceRegistry,
};
