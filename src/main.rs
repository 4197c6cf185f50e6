mod app;
mod cli;
mod color;
mod columns;
mod config;
mod data;
mod error;
mod event;
mod logging;
mod pipeline;
mod sheet;
mod tui;
mod types;
mod ui;
mod view;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::columns::ColumnSet;
use crate::config::Config;
use crate::data::EntryStore;
use crate::logging::LogTarget;
use crate::sheet::TimeSheet;

fn main() -> Result<()> {
    let cli_opts = cli::Cli::parse();
    let config = Config::load(cli_opts.config.as_deref())?;

    match &cli_opts.command {
        Some(_) => logging::init(cli_opts.verbose, LogTarget::Stderr)?,
        None => {
            let log_path = match &config.log_file {
                Some(path) => path.clone(),
                None => Config::default_log_path()?,
            };
            logging::init(cli_opts.verbose, LogTarget::File(&log_path))?;
        }
    }

    let store = match cli_opts.entries.as_ref().or(config.entries_file.as_ref()) {
        Some(path) => data::load_entries_file(path)?,
        None => EntryStore::new(data::mock_entries())?,
    };
    let columns = ColumnSet::standard()?;
    config.check_columns(&columns)?;
    let mut sheet = TimeSheet::new(store, columns, config.initial_view());
    info!(entries = sheet.total_entries(), "time sheet ready");

    if let Some(command) = cli_opts.command {
        return cli::run(command, &mut sheet, &mut std::io::stdout().lock());
    }

    let mut app = app::App::new(sheet, config.activity_colors.clone());
    let mut guard = tui::TerminalGuard::enter()?;
    event::run(&mut app, &mut guard.terminal)
}
