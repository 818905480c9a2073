use anyhow::Result;
use clap::Parser;
use jukebox::console::{run_shell, ConsoleObserver};
use jukebox::playback::PlayerKind;
use jukebox::tags::TagReader;
use jukebox::{Jukebox, JukeboxConfig};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "jukebox")]
#[command(about = "Catalog a tagged music collection and play a shared queue", long_about = None)]
struct Args {
    /// Root directory of the music collection
    #[arg(env = "JUKEBOX_LIBRARY")]
    library: String,

    /// External player used for playback
    #[arg(short = 'p', long, env = "JUKEBOX_PLAYER", value_enum, default_value_t = PlayerKind::Mpg321)]
    player: PlayerKind,

    /// Tag reader used while scanning
    #[arg(short = 't', long, value_enum, default_value_t = TagReader::Lofty)]
    tag_reader: TagReader,

    /// How often the idle player re-checks the queue, in milliseconds
    #[arg(long, default_value = "100")]
    idle_poll_ms: u64,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Expand ~ in paths
    let library_root = shellexpand::tilde(&args.library);

    let config = JukeboxConfig::new(PathBuf::from(library_root.as_ref()))
        .with_player(args.player)
        .with_tag_reader(args.tag_reader)
        .with_idle_poll(Duration::from_millis(args.idle_poll_ms));

    log::info!("Loading library...");
    let (jukebox, report) = Jukebox::open(&config)?;
    log::info!(
        "Ready: {} tracks added, {} skipped, {} non-audio files ignored",
        report.added,
        report.skipped,
        report.ignored
    );

    jukebox.register(ConsoleObserver::new(io::stdout()));

    let stdin = io::stdin();
    run_shell(&jukebox, stdin.lock(), io::stdout())?;

    jukebox.engine().shutdown();
    Ok(())
}
