//! Headless entry point.
//!
//! Stands in for the presentation collaborator: reads one JSON [`Intent`] per
//! line from stdin and writes one JSON line per intent to stdout, holding the
//! render flag, the session snapshot and any failures the intent produced.
//!
//! ```text
//! $ kinoteka color_scheme=dark asset_root=./assets
//! {"intent":"set_title_query","text":"рево"}
//! {"render":true,"snapshot":{"visible_movies":[...],...},"failures":[]}
//! ```
//!
//! Logs go to the rotating log file, never to stdout.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use kinoteka::infrastructure::expand_tilde;
use kinoteka::{initialize, Config, FsAssetProvider, Intent, KinotekaError, Result, SessionDriver};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("kinoteka: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = Config::from_map(&parse_args(std::env::args().skip(1))?);
    kinoteka::observability::init_tracing(&config);

    let span = tracing::debug_span!("session");
    let _guard = span.entered();

    let state = initialize(&config)?;
    let provider = FsAssetProvider::new(expand_tilde(&config.asset_root));
    let mut driver = SessionDriver::new(state, provider);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    emit(&mut stdout, true, &driver, &[])?;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let mut render = false;
        let mut failures = Vec::new();

        match serde_json::from_str::<Intent>(&line) {
            Ok(intent) => {
                render |= driver.dispatch(intent)?;
                render |= driver.poll_ready()?;
                failures = driver.take_failures();
            }
            Err(e) => {
                tracing::debug!(error = %e, "malformed intent");
                failures.push(KinotekaError::from(e));
            }
        }

        emit(&mut stdout, render, &driver, &failures)?;
    }

    tracing::debug!(pending_loads = driver.pending_loads(), "input closed");
    Ok(())
}

/// Collects `key=value` arguments into a configuration map.
fn parse_args(args: impl Iterator<Item = String>) -> Result<BTreeMap<String, String>> {
    args.map(|arg| {
        arg.split_once('=')
            .map(|(key, value)| (key.trim().to_string(), value.to_string()))
            .ok_or_else(|| KinotekaError::Config(format!("expected key=value, got `{arg}`")))
    })
    .collect()
}

fn emit<W: Write, P: kinoteka::AssetProvider>(
    out: &mut W,
    render: bool,
    driver: &SessionDriver<P>,
    failures: &[KinotekaError],
) -> Result<()> {
    let failures: Vec<String> = failures.iter().map(ToString::to_string).collect();
    let line = serde_json::json!({
        "render": render,
        "snapshot": driver.snapshot(),
        "failures": failures,
    });
    serde_json::to_writer(&mut *out, &line)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
