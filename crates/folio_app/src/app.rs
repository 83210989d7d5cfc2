use std::process::ExitCode;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use folio_core::{update, AppState, Msg};
use folio_logging::{folio_debug, folio_info, level_for_verbosity};

use crate::cli::{Cli, OutputFormat};
use crate::config::FeedConfig;
use crate::effects::EffectRunner;
use crate::{logging, render};

/// Slack on top of the per-request timeouts before giving up on the engine.
const ENGINE_GRACE: Duration = Duration::from_secs(5);

pub fn run(cli: Cli) -> Result<ExitCode> {
    logging::initialize(cli.log, level_for_verbosity(cli.verbose));

    let config = FeedConfig::resolve(&cli)?;
    let source = config.source()?;
    let host_base = config.host_base()?;
    let fetch = config.fetch_settings();
    // Listing and document batch run one after the other.
    let deadline =
        Instant::now() + (fetch.connect_timeout + fetch.request_timeout) * 2 + ENGINE_GRACE;

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(fetch, config.loader_settings()?, msg_tx);

    folio_info!("Loading posts from {}", source);
    let mut state = dispatch(&runner, AppState::new(), Msg::SourceChanged(source));

    while state.view().loading {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let msg = match msg_rx.recv_timeout(remaining) {
            Ok(msg) => msg,
            Err(mpsc::RecvTimeoutError::Timeout) => bail!("timed out waiting for blog posts"),
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                bail!("engine stopped before reporting")
            }
        };
        state = dispatch(&runner, state, msg);
    }

    let view = state.view();
    match cli.format {
        OutputFormat::Text => print!("{}", render::render_text(&view, config.limit, &host_base)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&render::render_json(&view, &host_base))?
        ),
    }

    Ok(if view.error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn dispatch(runner: &EffectRunner, state: AppState, msg: Msg) -> AppState {
    let (mut state, effects) = update(state, msg);
    if state.consume_dirty() {
        folio_debug!("State changed: loading={}", state.view().loading);
    }
    runner.enqueue(effects);
    state
}
