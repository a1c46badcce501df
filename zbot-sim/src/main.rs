//! ZBot showcase simulator
//!
//! Runs the landing page state machines on the embassy std executor in real
//! time, renders the page to the terminal and takes commands from stdin or
//! a `--script`.

use std::path::PathBuf;

use clap::Parser;
use embassy_executor::{Executor, SpawnToken, Spawner};
use embassy_time::Instant;
use static_cell::StaticCell;
use tracing::{error, info};

use zbot_core::site::Site;
use zbot_core::timer::Millis;

mod channels;
mod config;
mod error;
mod logger;
mod tasks;

use crate::error::Result;
use crate::tasks::input::{parse_script, Command};

/// Scripted runs stop here unless `--duration-ms` says otherwise
const DEFAULT_SCRIPT_DURATION_MS: Millis = 10_000;

static EXECUTOR: StaticCell<Executor> = StaticCell::new();

#[derive(Parser, Debug)]
#[command(name = "zbot-sim", version, about = "Run the ZBot landing page in a terminal")]
struct Args {
    /// TOML configuration file (defaults to the embedded zbot.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scripted commands instead of stdin, e.g. "@3600 start; @4000 select 2"
    #[arg(short, long)]
    script: Option<String>,

    /// Stop after this many milliseconds
    #[arg(short, long)]
    duration_ms: Option<Millis>,

    /// Print frames without ANSI escapes
    #[arg(long)]
    plain: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Everything the tasks need, built before the executor starts
struct Setup {
    site: Site,
    script: Option<Vec<(Millis, Command)>>,
    stop_after_ms: Option<Millis>,
}

fn prepare(args: &Args) -> Result<Setup> {
    let config = config::load(args.config.as_deref())?;
    let site = Site::new(&config)?;

    let script = args.script.as_deref().map(parse_script).transpose()?;
    let stop_after_ms = match (&script, args.duration_ms) {
        (_, Some(ms)) => Some(ms),
        (Some(_), None) => Some(DEFAULT_SCRIPT_DURATION_MS),
        (None, None) => None,
    };

    Ok(Setup {
        site,
        script,
        stop_after_ms,
    })
}

fn spawn<S>(spawner: Spawner, name: &str, token: SpawnToken<S>) {
    if let Err(e) = spawner.spawn(token) {
        error!("Failed to spawn {}: {:?}", name, e);
    }
}

fn main() {
    let args = Args::parse();
    logger::init(args.verbose);

    info!("ZBot simulator starting");

    let setup = match prepare(&args) {
        Ok(setup) => setup,
        Err(e) => {
            error!("{}", e);
            eprintln!("zbot-sim: {}", e);
            std::process::exit(1);
        }
    };

    if setup.script.is_none() {
        if let Err(e) = tasks::spawn_stdin_reader() {
            error!("Cannot read stdin: {}", e);
            std::process::exit(1);
        }
        info!("Reading commands from stdin (start, select <i>, next, close, toggle <day>, time <HH:MM>, save, story, go <section>, preorder, back, menu, quit)");
    }

    let origin = Instant::now();
    let executor = EXECUTOR.init(Executor::new());

    executor.run(move |spawner| {
        spawn(spawner, "display", tasks::display_task(!args.plain));
        spawn(
            spawner,
            "site",
            tasks::site_task(setup.site, origin, setup.stop_after_ms),
        );
        if let Some(script) = setup.script {
            spawn(spawner, "script", tasks::script_task(origin, script));
        }
        info!("All tasks spawned, simulator running");
    });
}
