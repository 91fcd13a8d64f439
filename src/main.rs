use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::warn;

use itinerary_book::config::Config;
use itinerary_book::display::{print_day_schedule, render_itinerary, write_itinerary_to_file, RenderMode};
use itinerary_book::export::export_schedule_to_csv;
use itinerary_book::parser::import_csv;
use itinerary_book::schedule::days::{days_until_departure, is_known_day};
use itinerary_book::schedule::{
    maps_search_link, normalize_time_label, Confirmation, Direction, EntryPatch, NewEntry, DAYS,
    DEFAULT_STORAGE_KEY,
};
use itinerary_book::web;

#[derive(Parser)]
#[command(name = "itinerary-book")]
#[command(about = "2025 Kyoto/Osaka autumn trip itinerary: view, edit, print")]
struct Cli {
    /// Directory where the schedule is saved
    #[arg(long, env = "ITINERARY_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Storage key (file name without .json)
    #[arg(long, env = "ITINERARY_STORAGE_KEY", default_value = DEFAULT_STORAGE_KEY)]
    storage_key: String,

    /// Keep edits in memory only
    #[arg(long)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show one day, or the whole trip
    Show {
        day: Option<String>,
        /// Render the print version (no slot numbers, ids or links)
        #[arg(long)]
        print: bool,
    },
    /// List the itinerary days
    Days,
    /// Add an entry; the day is re-sorted by time
    Add {
        day: String,
        time: String,
        title: String,
        #[arg(long, default_value = "")]
        desc: String,
        #[arg(long)]
        link: Option<String>,
        #[arg(long)]
        highlight: bool,
    },
    /// Change fields of an entry; a new time re-sorts the day
    Update {
        day: String,
        id: String,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long, conflicts_with = "clear_link")]
        link: Option<String>,
        #[arg(long)]
        clear_link: bool,
        #[arg(long)]
        highlight: Option<bool>,
    },
    /// Remove an entry
    Delete { day: String, id: String },
    /// Swap an entry with its neighbour; slot times stay put
    Move {
        day: String,
        index: usize,
        direction: Direction,
    },
    /// Discard all edits and restore the original itinerary
    Reset {
        /// Required: confirms that all edits will be lost
        #[arg(long)]
        yes: bool,
    },
    /// Write the print version of the whole trip to a text file
    Print {
        #[arg(long, default_value = "itinerary.txt")]
        out: String,
    },
    /// Export all entries as CSV
    ExportCsv {
        #[arg(long, default_value = "itinerary.csv")]
        out: PathBuf,
    },
    /// Add every row of a CSV file (day,time,title[,description,link,highlight])
    ImportCsv { file: PathBuf },
    /// Serve the itinerary and its editing API over HTTP
    Web {
        #[arg(long, env = "ITINERARY_PORT", default_value_t = 8080)]
        port: u16,
        #[arg(long, env = "ITINERARY_BIND", default_value = "127.0.0.1")]
        bind: String,
    },
}

fn canonical_time(input: &str) -> anyhow::Result<String> {
    match normalize_time_label(input) {
        Some(time) => Ok(time),
        None => bail!("Invalid time {:?}: expected HH:MM (24-hour)", input),
    }
}

fn warn_unknown_day(day: &str) {
    if !is_known_day(day) {
        warn!(day, "not one of the itinerary days");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Some(Command::Web { .. }) => "itinerary_book=info,actix_web=info",
        _ => "itinerary_book=info",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let mut config = Config {
        data_dir: cli.data_dir,
        storage_key: cli.storage_key,
        ephemeral: cli.ephemeral,
        ..Config::default()
    };

    let command = cli.command.unwrap_or(Command::Show {
        day: None,
        print: false,
    });

    match command {
        Command::Web { port, bind } => {
            config.port = port;
            config.bind = bind;
            println!("Starting web server on {}:{}...", config.bind, config.port);
            web::start_server(&config).await?;
            Ok(())
        }
        command => run_command(command, &config),
    }
}

fn run_command(command: Command, config: &Config) -> anyhow::Result<()> {
    let mut store = config.open_store();

    match command {
        Command::Show { day, print } => {
            let mode = if print { RenderMode::Print } else { RenderMode::Screen };
            match day {
                Some(day) => print_day_schedule(&day, store.day(&day), mode),
                None => {
                    if let Some(days) = days_until_departure(Local::now().date_naive()) {
                        if days > 0 {
                            println!("{} days until departure\n", days);
                        }
                    }
                    print!("{}", render_itinerary(&store.snapshot(), mode));
                }
            }
        }
        Command::Days => {
            for info in DAYS.iter() {
                let count = store.day(info.key).len();
                println!(
                    "{}  {} {}  {}  ({} entries)",
                    info.key, info.short_date, info.subtitle, info.headline, count
                );
            }
        }
        Command::Add {
            day,
            time,
            title,
            desc,
            link,
            highlight,
        } => {
            warn_unknown_day(&day);
            let mut entry = NewEntry::new(canonical_time(&time)?, title).description(desc);
            entry.link = link.or_else(|| maps_search_link(&entry.title));
            entry.highlight = highlight;
            let id = store.add_item(&day, entry)?;
            println!("Added {} to {}", id, day);
        }
        Command::Update {
            day,
            id,
            time,
            title,
            desc,
            link,
            clear_link,
            highlight,
        } => {
            let patch = EntryPatch {
                time: time.as_deref().map(canonical_time).transpose()?,
                title,
                description: desc,
                link: if clear_link { Some(None) } else { link.map(Some) },
                highlight,
            };
            if patch.is_empty() {
                bail!("Nothing to update: pass at least one of --time, --title, --desc, --link, --clear-link, --highlight");
            }
            if store.update_item(&day, &id, &patch) {
                println!("Updated {} in {}", id, day);
            } else {
                println!("No entry {} in {}", id, day);
            }
        }
        Command::Delete { day, id } => {
            if store.delete_item(&day, &id) {
                println!("Deleted {} from {}", id, day);
            } else {
                println!("No entry {} in {}", id, day);
            }
        }
        Command::Move {
            day,
            index,
            direction,
        } => {
            if store.move_item(&day, index, direction) {
                print_day_schedule(&day, store.day(&day), RenderMode::Screen);
            } else {
                println!("Cannot move slot {} {} in {}", index, direction, day);
            }
        }
        Command::Reset { yes } => {
            if !yes {
                bail!("Reset discards every edit. Re-run with --yes to confirm.");
            }
            store.reset_to_default(Confirmation::from(yes));
            println!("Schedule reset to the original itinerary");
        }
        Command::Print { out } => {
            write_itinerary_to_file(&store.snapshot(), &out)
                .with_context(|| format!("Failed to write {}", out))?;
            println!("Itinerary saved to {}", out);
        }
        Command::ExportCsv { out } => {
            export_schedule_to_csv(&store.snapshot(), &out)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!("Schedule exported to {}", out.display());
        }
        Command::ImportCsv { file } => {
            let summary = import_csv(&mut store, &file)
                .with_context(|| format!("Failed to import {}", file.display()))?;
            println!("Imported {} entries ({} skipped)", summary.added, summary.skipped);
        }
        Command::Web { .. } => bail!("web mode runs a server, not a one-shot command"),
    }

    Ok(())
}
