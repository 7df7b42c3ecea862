use clap::Parser;
use colored::Colorize;
use countdown::{
    args::{CLISubcommand, CountdownCLI},
    clock::SystemClock,
    config::Config,
    dirs,
    error::CountdownError,
    persistence::{FileSlots, SnapshotAdapter},
    store::{Commit, TimerStore},
    ticker::{self, Stop},
    time::{seconds_to_clock, seconds_to_string},
    timers::{NewTimer, Timer, TimerId, TimerUpdate},
};
use std::{env, path::PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Store = TimerStore<FileSlots, SystemClock>;

fn show_commit(commit: &Commit) {
    if let Some(error) = commit.warning() {
        println!(
            "{} {}",
            "Warning: change was not saved:".yellow(),
            error.to_string().yellow()
        );
    }
}

fn show_timer(timer: &Timer) {
    let state = if timer.is_running {
        "running".green()
    } else if timer.is_expired() {
        "expired".red()
    } else {
        "paused".yellow()
    };

    println!(
        "{}  {}  {} / {}  {}",
        timer.id.short().bright_black(),
        seconds_to_clock(timer.remaining_time).bold(),
        seconds_to_string(timer.duration),
        state,
        timer.title.bright_blue(),
    );
    if !timer.description.is_empty() {
        println!("          {}", timer.description);
    }
}

/// Resolves an id argument, printing a notice when nothing matches
fn lookup(store: &Store, id: &str) -> Result<Option<TimerId>, CountdownError> {
    let found = store.resolve(id)?;
    if found.is_none() {
        println!("No timer matches '{}', nothing to do", id.bright_black());
    }

    Ok(found)
}

#[tokio::main]
async fn main() -> Result<(), CountdownError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = CountdownCLI::parse();
    let Some(root) = args
        .config
        .to_owned()
        .or_else(|| env::var("COUNTDOWN_ROOT").map(PathBuf::from).ok())
        .or_else(|| dirs().map(|d| d.data_local_dir().to_owned()).ok())
    else {
        return Err(CountdownError::NoProjectDirs);
    };
    debug!("Using data root {}", root.display());

    let config = Config::load_or_default(&root)?;
    let adapter = SnapshotAdapter::with_key(FileSlots::new(&root), config.slot.as_str());
    let mut store: Store = TimerStore::open(adapter, SystemClock);

    match args.command {
        CLISubcommand::Add {
            title,
            duration,
            description,
        } => {
            let (id, commit) = store.add(NewTimer {
                title,
                description,
                duration,
            })?;
            show_commit(&commit);
            if let Some(timer) = store.get(&id) {
                println!("Added timer {}", timer.title.bright_blue());
                show_timer(timer);
            }
        }
        CLISubcommand::List => {
            if store.timers().is_empty() {
                println!("No timers yet, add one with {}", "countdown add".bold());
            }
            for timer in store.timers() {
                show_timer(timer);
            }
        }
        CLISubcommand::Toggle { id } => {
            if let Some(id) = lookup(&store, &id)? {
                let commit = store.toggle(&id);
                show_commit(&commit);
                if let Some(timer) = store.get(&id) {
                    if !commit.changed() && timer.is_expired() {
                        println!("Timer has expired, restart it first");
                    }
                    show_timer(timer);
                }
            }
        }
        CLISubcommand::Restart { id } => {
            if let Some(id) = lookup(&store, &id)? {
                show_commit(&store.restart(&id));
                if let Some(timer) = store.get(&id) {
                    show_timer(timer);
                }
            }
        }
        CLISubcommand::Edit {
            id,
            title,
            description,
            duration,
        } => {
            if let Some(id) = lookup(&store, &id)? {
                let commit = store.edit(
                    &id,
                    TimerUpdate {
                        title,
                        description,
                        duration,
                    },
                )?;
                show_commit(&commit);
                if let Some(timer) = store.get(&id) {
                    println!("Updated timer");
                    show_timer(timer);
                }
            }
        }
        CLISubcommand::Delete { id } => {
            if let Some(id) = lookup(&store, &id)? {
                show_commit(&store.delete(&id));
                println!("Deleted timer {}", id.to_string().bright_black());
            }
        }
        CLISubcommand::Run { start } => {
            for id in start {
                if let Some(id) = lookup(&store, &id)? {
                    let running = store.get(&id).map_or(false, |timer| timer.is_running);
                    if !running {
                        show_commit(&store.toggle(&id));
                    }
                }
            }

            let shutdown = async {
                if let Err(error) = tokio::signal::ctrl_c().await {
                    tracing::error!("Could not listen for ctrl-c: {error}");
                    std::future::pending::<()>().await;
                }
            };

            let stop = ticker::run(&mut store, ticker::TICK_PERIOD, shutdown, |timer| {
                if timer.is_expired() {
                    println!("{} {}", "Time is up:".red().bold(), timer.title.bright_blue());
                } else {
                    println!(
                        "{}  {}",
                        seconds_to_clock(timer.remaining_time).bold(),
                        timer.title.bright_blue()
                    );
                }
            })
            .await;

            match stop {
                Stop::Idle => println!("No running timers left"),
                Stop::Shutdown => println!("Stopped counting, running timers stay running"),
            }
        }
    }

    Ok(())
}
