use {
  crate::cli::CliOptions,
  clap::Parser,
  tracing::{debug, info},
  tracing_subscriber::{EnvFilter, FmtSubscriber},
  vantage_selectors::SelectorContext,
};

mod cli;
mod projection;

fn main() -> anyhow::Result<()> {
  tracing::subscriber::set_global_default(
    FmtSubscriber::builder()
      .with_env_filter(
        EnvFilter::try_from_default_env()
          .unwrap_or_else(|_| EnvFilter::new("info")),
      )
      .with_writer(std::io::stderr)
      .finish(),
  )?;

  let opts = CliOptions::parse();
  info!("Inspect options: {opts:?}");

  let ctx = SelectorContext::new(opts.manifest_flags()?);
  let state = opts.state()?;
  info!("selected account: {}", projection::describe_selected(&state));

  ctx.traces().start("inspect", None);
  let output = projection::run(&ctx, &state, &opts.command)?;
  if let Some(elapsed) = ctx.traces().end("inspect", None) {
    debug!("projection computed in {elapsed:?}");
  }

  for (name, duration) in ctx.traces().durations() {
    debug!("selector {name} took {duration:?}");
  }

  println!("{}", serde_json::to_string_pretty(&output)?);
  Ok(())
}
