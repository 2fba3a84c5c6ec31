mod api;
mod cli;
mod config;
mod controller;
mod detail;
mod executor;
mod generation;
mod launcher;
mod logging;
mod models;
mod pagination;
mod session;
mod trailer;
mod ui;
mod view;

use std::sync::{Arc, mpsc};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use api::{HttpMovieApi, MovieApi};
use cli::Cli;
use config::Config;
use controller::{Controller, Intent};
use executor::Executor;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_create().unwrap_or_else(|e| {
        eprintln!("{} {:#}", "Using default settings:".yellow(), e);
        Config::default()
    });
    config.apply_cli(&cli);

    if let Err(e) = logging::init_logger(&config) {
        eprintln!("{} {:#}", "Logging disabled:".yellow(), e);
    }
    log::info!("Starting against {}", config.api_url);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let api = HttpMovieApi::new(&config.api_url, config.request_timeout())?;

    if cli.check {
        return check_server(&runtime, &api, &config);
    }

    let (completions_tx, completions_rx) = mpsc::channel();
    let executor = Executor::new(
        Arc::new(api),
        runtime.handle().clone(),
        completions_tx,
        &config.opener,
    );

    let mut controller = Controller::new(&config);
    let startup = controller.start();
    let mut app = ui::App::new(controller);
    ui::runner::apply_effects(&mut app, &executor, startup);

    if let Some(query) = cli.initial_query() {
        app.search_input = query.clone();
        app.push(Intent::SubmitQuery(query));
    } else if let Some(genre) = &cli.genre {
        app.push(Intent::SelectGenre(genre.trim().to_lowercase()));
    }

    // Initialize TUI
    let terminal = ui::init_terminal()?;
    let mut terminal_guard = ui::TerminalGuard::new(terminal);

    let result = match terminal_guard.get_mut() {
        Some(terminal) => ui::run_app(terminal, app, &executor, &completions_rx),
        None => Ok(()),
    };

    // Terminal cleanup happens via Drop guard
    drop(terminal_guard);

    result
}

fn check_server(runtime: &tokio::runtime::Runtime, api: &HttpMovieApi, config: &Config) -> Result<()> {
    println!("{} {}", "Checking".blue(), config.api_url);
    match runtime.block_on(api.health()) {
        Ok(health) => {
            println!("{} {} {}", "✓".green(), health.status.green(), health.message);
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e.to_string().red());
            std::process::exit(1);
        }
    }
}
