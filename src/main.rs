//! Command-line battle royale runner.
//!
//! Loads a JSON config, prints narration to stdout, and saves it to
//! `logs/royale-<unix-seconds>.log` unless `--no-save` is given.

use std::fs::File;
use std::io::{BufRead, LineWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use battle_royale::core::{ConfigError, SimError};
use battle_royale::engine::{RoundOutcome, SimulationBuilder, StopHandle};
use battle_royale::loader::load_config;
use battle_royale::narration::{Narration, NarrationSink};
use battle_royale::packs;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Battle royale simulator
#[derive(Parser, Debug)]
#[command(name = "battle-royale", version)]
#[command(about = "Simulate a battle royale from a JSON config file")]
struct Args {
    /// Path to the config file
    config: PathBuf,

    /// Simulate every round without waiting for Enter
    #[arg(long, short = 'a')]
    auto: bool,

    /// Do not save the game to a log file
    #[arg(long)]
    no_save: bool,

    /// Enable debug logging
    #[arg(long, short = 'd')]
    debug: bool,

    /// Random seed, overrides the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many rounds
    #[arg(long)]
    max_rounds: Option<u32>,
}

/// Prints every line and copies it into the log file, if one is open.
struct ConsoleSink {
    log: Option<LineWriter<File>>,
}

impl NarrationSink for ConsoleSink {
    fn emit(&mut self, narration: &Narration) {
        println!("{narration}");
        let failed = match &mut self.log {
            Some(log) => writeln!(log, "{narration}").err(),
            None => None,
        };
        if let Some(error) = failed {
            warn!(%error, "could not write log file, no longer saving");
            self.log = None;
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if args.debug {
        filter = filter.add_directive(tracing::Level::DEBUG.into());
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "simulation failed");
            eprintln!("{error}");
            match error {
                SimError::Config(_) | SimError::BuiltinPack(_) => ExitCode::from(1),
                _ => ExitCode::from(2),
            }
        }
    }
}

fn run(args: &Args) -> Result<(), SimError> {
    let loaded = load_config(&args.config)?;

    // Files in the extensions directory enable shipped packs by name.
    let catalog = packs::catalog();
    let extensions = match &loaded.extensions_dir {
        Some(dir) => catalog.enabled_in_dir(dir).map_err(|source| ConfigError::Io {
            what: "extensions directory",
            path: dir.display().to_string(),
            source,
        })?,
        None => Vec::new(),
    };

    let stop = StopHandle::new();
    watch_ctrl_c(stop.clone());

    let log = if args.no_save { None } else { open_log(&args.config) };
    let mut builder = SimulationBuilder::new(loaded.config)
        .messages(loaded.messages)
        .sink(ConsoleSink { log })
        .stop_handle(stop.clone())
        .extensions(extensions);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    let mut sim = builder.build()?;

    let lines = (!args.auto).then(stdin_lines);
    let mut prompt = "Initialization finished. Press enter to begin, or ctrl-c to exit.";

    loop {
        if let Some(lines) = &lines {
            print!("{prompt}");
            let _ = std::io::stdout().flush();
            if wait_for_enter(lines, &stop, PROMPT_POLL) == Prompt::Interrupted {
                println!();
            }
            prompt = "Press enter to simulate the next round";
        }
        // A stop requested at the prompt ends here with the stopped line.
        if sim.advance_round()? != RoundOutcome::Continuing {
            break;
        }
        if args.max_rounds.is_some_and(|max| sim.round() >= max) {
            info!(rounds = sim.round(), "round limit reached");
            break;
        }
    }

    info!(phase = ?sim.phase(), rounds = sim.round(), "done");
    Ok(())
}

const PROMPT_POLL: Duration = Duration::from_millis(50);

/// How waiting at a prompt ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Prompt {
    /// Enter was pressed, or stdin is closed.
    Proceed,
    /// A stop was requested while waiting.
    Interrupted,
}

/// Read stdin on a helper thread, one message per line. The channel
/// disconnects at EOF.
fn stdin_lines() -> Receiver<()> {
    let (tx, rx) = mpsc::channel();
    let spawned = std::thread::Builder::new()
        .name("stdin".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                if let Err(error) = line {
                    warn!(%error, "could not read stdin");
                    break;
                }
                if tx.send(()).is_err() {
                    break;
                }
            }
        });
    if let Err(error) = spawned {
        warn!(%error, "cannot read stdin, not waiting between rounds");
    }
    rx
}

/// Wait for a line on `lines` or for `stop`, whichever comes first.
fn wait_for_enter(lines: &Receiver<()>, stop: &StopHandle, poll: Duration) -> Prompt {
    loop {
        if stop.is_stop_requested() {
            return Prompt::Interrupted;
        }
        match lines.recv_timeout(poll) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return Prompt::Proceed,
            Err(RecvTimeoutError::Timeout) => {}
        }
    }
}

/// Flip `stop` on the first Ctrl-C; exit on the second.
fn watch_ctrl_c(stop: StopHandle) {
    let spawned = std::thread::Builder::new()
        .name("ctrl-c".into())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(error) => {
                    warn!(%error, "Ctrl-C handling unavailable");
                    return;
                }
            };
            runtime.block_on(async {
                while tokio::signal::ctrl_c().await.is_ok() {
                    if stop.is_stop_requested() {
                        std::process::exit(130);
                    }
                    stop.request_stop();
                }
            });
        });
    if let Err(error) = spawned {
        warn!(%error, "Ctrl-C handling unavailable");
    }
}

/// Open a fresh log file. A failure only disables saving.
fn open_log(config: &Path) -> Option<LineWriter<File>> {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let path = PathBuf::from("logs").join(format!("royale-{secs}.log"));

    let opened = std::fs::create_dir_all("logs").and_then(|()| File::create(&path));
    let mut log = match opened {
        Ok(file) => LineWriter::new(file),
        Err(error) => {
            warn!(path = %path.display(), %error, "game will not be saved");
            return None;
        }
    };
    let header = writeln!(log, "battle-royale {}", env!("CARGO_PKG_VERSION"))
        .and_then(|()| writeln!(log, "Config file: {}", config.display()));
    if let Err(error) = header {
        warn!(path = %path.display(), %error, "game will not be saved");
        return None;
    }
    info!(path = %path.display(), "saving game");
    Some(log)
}
