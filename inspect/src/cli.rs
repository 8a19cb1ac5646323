use {
  anyhow::Context,
  clap::{Parser, Subcommand, ValueEnum},
  std::{path::PathBuf, sync::Arc},
  vantage_primitives::{Address, ChainId},
  vantage_selectors::{
    ActiveTab,
    DelegationFilter,
    ManifestFlags,
    WalletState,
  },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
  Json,
  Msgpack,
}

/// Which part of the activity list to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
  All,
  Pending,
  Completed,
}

#[derive(Debug, Parser)]
#[clap(version, about = "Prints derived views of a wallet state snapshot")]
pub struct CliOptions {
  #[clap(long, short, help = "path to the wallet state snapshot")]
  state: PathBuf,

  #[clap(long, short, value_enum, default_value = "json")]
  format: Format,

  #[clap(long, help = "JSON file with the flags baked into the build")]
  manifest_flags: Option<PathBuf>,

  #[clap(long, help = "treat this origin as the one open in the active tab")]
  origin: Option<String>,

  #[clap(subcommand)]
  pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Accounts as listed in the account picker.
  Accounts,

  /// Accounts connected to the active tab, most recently used first.
  ConnectedAccounts,

  /// Accounts not connected to the active tab.
  UnconnectedAccounts,

  /// The selected account, if it should be offered to the active tab.
  ConnectCandidate,

  /// Dapps connected to each account.
  Connections,

  /// The network the active tab's dapp uses.
  DappNetwork,

  /// The selected EVM network.
  CurrentNetwork,

  /// Approvals that can be confirmed, oldest first.
  Confirmations,

  /// The confirmation shown after the current one.
  NextConfirmation {
    #[clap(long)]
    current: Option<String>,
  },

  /// Pending approval counts and transaction-like approvals.
  Approvals,

  /// Unapproved transactions, oldest first.
  Transactions {
    #[clap(long, help = "only list transactions on this chain, 0x hex")]
    chain_id: Option<ChainId>,
  },

  /// Activity of the selected account, grouped by nonce.
  Activity {
    #[clap(long, value_enum, default_value = "all")]
    section: Section,
  },

  /// Pending message signing requests, oldest first.
  Messages,

  /// Alerts raised on a confirmation.
  Alerts { owner: String },

  /// Stored delegations, optionally filtered.
  Delegations {
    #[clap(long)]
    from: Option<Address>,

    #[clap(long)]
    to: Option<Address>,

    #[clap(long)]
    chain_id: Option<ChainId>,

    #[clap(long = "tag")]
    tags: Vec<String>,
  },

  /// Runtime feature flags with the manifest flags applied.
  FeatureFlags,
}

impl Command {
  pub fn delegation_filter(&self) -> Option<DelegationFilter> {
    match self {
      Command::Delegations {
        from,
        to,
        chain_id,
        tags,
      } => Some(DelegationFilter {
        from: from.clone(),
        to: to.clone(),
        chain_id: *chain_id,
        tags: tags.clone(),
      }),
      _ => None,
    }
  }
}

impl CliOptions {
  /// Reads and decodes the snapshot, applying the origin override.
  pub fn state(&self) -> anyhow::Result<WalletState> {
    let bytes = std::fs::read(&self.state)
      .with_context(|| format!("reading {}", self.state.display()))?;
    let state = decode_state(&bytes, self.format)
      .with_context(|| format!("decoding {}", self.state.display()))?;

    Ok(match &self.origin {
      Some(origin) => state.update(|s| {
        s.active_tab = Arc::new(ActiveTab {
          origin: Some(origin.clone()),
          ..(*s.active_tab).clone()
        })
      }),
      None => state,
    })
  }

  pub fn manifest_flags(&self) -> anyhow::Result<ManifestFlags> {
    match &self.manifest_flags {
      Some(path) => ManifestFlags::load(path)
        .with_context(|| format!("loading {}", path.display())),
      None => Ok(ManifestFlags::default()),
    }
  }
}

pub fn decode_state(bytes: &[u8], format: Format) -> anyhow::Result<WalletState> {
  Ok(match format {
    Format::Json => serde_json::from_slice(bytes)?,
    Format::Msgpack => rmp_serde::from_slice(bytes)?,
  })
}
