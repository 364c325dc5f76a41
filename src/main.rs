mod config;
mod error;
mod generator;
mod matcher;
mod model;
mod sources;
mod state;
mod ui;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::load_config;
use crate::generator::Layout;
use crate::model::LauncherSpec;
use crate::sources::desktop::{DesktopSource, extract_exec_command, strip_field_codes};
use crate::state::AppState;
use crate::ui::icons::IconResolver;

#[derive(Parser, Debug)]
#[command(author, version, about = "Bundle several applications behind one desktop launcher", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List installed desktop entries
    List {
        /// Only show entries whose label matches
        query: Option<String>,
        /// Only show launchers created by this tool
        #[arg(long)]
        created: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a launcher that starts every given application
    Create {
        /// Launcher name
        #[arg(short, long)]
        name: String,
        /// Icon file for the launcher
        #[arg(short, long)]
        icon: Option<PathBuf>,
        /// Desktop file paths or names such as firefox.desktop
        apps: Vec<String>,
    },
    /// Delete a desktop entry
    Remove {
        app: String,
    },
    /// Print the command an entry would launch
    Exec {
        app: String,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    let config = load_config();
    let source = DesktopSource::default();
    let mut app_state = AppState::new(config);
    app_state.refresh(&source);

    match command {
        Command::List { query, created, json } => {
            app_state.set_created_only(created);
            app_state.update_query(query.as_deref().unwrap_or_default());
            print_list(&app_state, json)?;
        }
        Command::Create { name, icon, apps } => {
            let members = apps
                .iter()
                .map(|app| {
                    app_state
                        .resolve(app)
                        .map(|e| e.path)
                        .ok_or_else(|| anyhow!("Unknown application: {}", app))
                })
                .collect::<Result<Vec<_>>>()?;
            let layout = Layout::from_env().ok_or_else(|| anyhow!("Could not determine home directory"))?;

            let spec = LauncherSpec { name, icon, members };
            let launcher = generator::generate(&layout, &spec)?;
            println!("Launch script written to: {}", launcher.script_path.display());
            println!("Desktop file created at: {}", launcher.desktop_path.display());

            app_state.refresh(&source);
            log::info!("{} entries after refresh", app_state.entries.len());
        }
        Command::Remove { app } => {
            let entry = app_state
                .resolve_scanned(&app)
                .cloned()
                .ok_or_else(|| anyhow!("No launcher selected for removal."))?;
            if let Err(e) = generator::remove(&entry) {
                log::error!("{:?}: {}", e.path, e.source);
                return Err(e.into());
            }
            println!("Launcher removed: {}", entry.path.display());

            app_state.refresh(&source);
            log::info!("{} entries after refresh", app_state.entries.len());
        }
        Command::Exec { app } => {
            let entry = app_state.resolve(&app).ok_or_else(|| anyhow!("Unknown application: {}", app))?;
            println!("{}", strip_field_codes(&extract_exec_command(&entry.path)));
        }
    }
    Ok(())
}

fn print_list(app_state: &AppState, json: bool) -> Result<()> {
    let icons = app_state.config.general.icons.then(IconResolver::default);

    if json {
        let rows: Vec<serde_json::Value> = app_state
            .visible()
            .map(|e| {
                let mut row = serde_json::to_value(e)?;
                if let Some(resolver) = &icons {
                    row["icon_path"] = serde_json::to_value(resolver.resolve(&e.icon))?;
                }
                Ok(row)
            })
            .collect::<Result<_, serde_json::Error>>()?;
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for e in app_state.visible() {
        match icons.as_ref().and_then(|r| r.resolve(&e.icon)) {
            Some(icon) => println!("{}\t{}\t{}", e.label, e.path.display(), icon.display()),
            None => println!("{}\t{}", e.label, e.path.display()),
        }
    }
    Ok(())
}
