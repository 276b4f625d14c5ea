mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{WrapErr, bail};
use keeper_script::{GameHost, ScriptEngine, Severity};
use keeper_types::limits::PLAYERS_COUNT;

use crate::settings::{Overrides, Settings};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// TOML file with map and run settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// More logging; repeat for trace output
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a level script and report its problems
    Check { script: PathBuf },
    /// Load a level script and play it in a simulated game
    Run {
        script: PathBuf,
        #[arg(long)]
        turns: Option<u64>,
        #[arg(long)]
        seed: Option<u32>,
        /// Keep running after the local player won or lost
        #[arg(long)]
        run_after_victory: bool,
    },
}

fn read_script(path: &Path) -> color_eyre::Result<String> {
    let bytes = fs::read(path).wrap_err_with(|| format!("reading {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Check { script } => {
            let settings = Settings::load(cli.config.as_deref(), Overrides::default())?;
            let text = read_script(&script)?;
            let mut host = settings.host();
            let mut engine = ScriptEngine::new(settings.engine);
            engine.load_level(&text, &mut host);

            let errors = count(&engine, Severity::Error);
            let warnings = count(&engine, Severity::Warning);
            log::info!(
                "{}: level version {}, {errors} errors, {warnings} warnings",
                script.display(),
                engine.level_version()
            );
            if errors > 0 {
                bail!("{} has {errors} script errors", script.display());
            }
        }
        Command::Run {
            script,
            turns,
            seed,
            run_after_victory,
        } => {
            let overrides = Overrides {
                seed,
                turns,
                run_after_victory,
            };
            let settings = Settings::load(cli.config.as_deref(), overrides)?;
            let text = read_script(&script)?;
            let mut host = settings.host();
            let mut engine = ScriptEngine::new(settings.engine);
            engine.load_level(&text, &mut host);

            for _ in 0..settings.turns {
                host.advance();
                engine.tick(&mut host);
                if host.victory_decided() && !settings.engine.run_after_victory {
                    break;
                }
            }

            log::info!("Stopped at turn {}", host.turn);
            log::debug!("Dungeon state read {} times", host.dungeon_reads());
            if host.won.contains(&host.my_player) {
                log::info!("Player {} won", host.my_player);
            } else if host.lost.contains(&host.my_player) {
                log::info!("Player {} lost", host.my_player);
            }
            for player in 0..PLAYERS_COUNT as u8 {
                let dungeon = host.dungeon(player);
                log::info!(
                    "Player {player}: {} gold, {} creatures",
                    dungeon.total_money_owned,
                    dungeon.num_active_creatures
                );
            }
            for message in &host.messages {
                log::debug!("Shown: {message:?}");
            }
        }
    }
    Ok(())
}

fn count(engine: &ScriptEngine, severity: Severity) -> usize {
    engine
        .diagnostics()
        .iter()
        .filter(|d| d.severity == severity)
        .count()
}
