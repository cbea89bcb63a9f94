//! Gazette -- turns a Diplomacy turn into a newspaper.
//!
//! Subcommands:
//!   battles <SNAPSHOT>                 print the battles of a turn
//!   publish <SNAPSHOT>                 write the newspaper page
//!   announce show|set|delete           manage a country's announcement

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gazette::announcements::AnnouncementStore;
use gazette::battle::group_battles;
use gazette::board::Power;
use gazette::config::Config;
use gazette::newspaper::{write_html, Edition};
use gazette::press::{OpenAiClient, PromptCache};
use gazette::source::{TerritoryCatalog, TurnSnapshot};

#[derive(Parser)]
#[command(name = "gazette", version, about = "Ghost-writes a newspaper for a Diplomacy turn")]
struct Cli {
    /// Announcement store shared by all countries.
    #[arg(long, global = true, default_value = "data.json", env = "GAZETTE_ANNOUNCEMENTS")]
    announcements: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the battles of a turn, largest first.
    Battles {
        /// Turn snapshot JSON file.
        snapshot: PathBuf,
    },
    /// Write the newspaper page for a turn.
    Publish {
        /// Turn snapshot JSON file.
        snapshot: PathBuf,
        /// Territory metadata overriding the standard map names.
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Where to write the page.
        #[arg(long, short, default_value = "index.html")]
        output: PathBuf,
    },
    /// Show, post or remove a country's announcement.
    Announce {
        #[command(subcommand)]
        action: AnnounceAction,
    },
}

#[derive(Subcommand)]
enum AnnounceAction {
    Show {
        #[arg(long)]
        country: Power,
    },
    Set {
        #[arg(long)]
        country: Power,
        message: String,
    },
    Delete {
        #[arg(long)]
        country: Power,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gazette=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> gazette::Result<()> {
    let store = AnnouncementStore::new(cli.announcements);

    match cli.command {
        Command::Battles { snapshot } => {
            let snapshot = TurnSnapshot::load(&snapshot)?;
            for battle in group_battles(&snapshot.orders) {
                let ids: Vec<&str> = battle.iter().map(|t| t.as_str()).collect();
                println!("{}: {}", battle.len(), ids.join(" "));
            }
        }
        Command::Publish { snapshot, catalog, output } => {
            let snapshot = TurnSnapshot::load(&snapshot)?;
            if snapshot.orders.is_empty() {
                info!("no orders for this turn, nothing to publish");
                return Ok(());
            }
            let catalog = match catalog {
                Some(path) => TerritoryCatalog::load(path)?,
                None => TerritoryCatalog::standard(),
            };
            let announcements = store.load()?;

            let config = Config::from_env()?;
            let mut client = OpenAiClient::from_config(&config)?;
            let mut cache = PromptCache::new(config.cache_capacity);

            let edition =
                Edition::assemble(&snapshot, &catalog, &announcements, &mut client, &mut cache)?;
            write_html(&edition, &output)?;
            info!(
                path = %output.display(),
                stories = edition.stories.len(),
                cache_hits = cache.hits(),
                "newspaper written"
            );
        }
        Command::Announce { action } => match action {
            AnnounceAction::Show { country } => {
                println!("{}", store.message_for(country.name())?);
            }
            AnnounceAction::Set { country, message } => {
                store.save(country.name(), &message)?;
                info!(%country, "announcement saved");
            }
            AnnounceAction::Delete { country } => {
                store.delete(country.name())?;
                info!(%country, "announcement deleted");
            }
        },
    }
    Ok(())
}
