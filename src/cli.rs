/// CLI argument parsing and command handling.
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::columns::ColumnKey;
use crate::pipeline::{ActivityFilter, SortDescriptor, SortDirection};
use crate::sheet::TimeSheet;
use crate::types::ActivityType;
use crate::view::ViewAction;

#[derive(Parser, Debug)]
#[command(
    name = "timesheet",
    version,
    about = "Timesheet - A terminal time-sheet viewer"
)]
pub struct Cli {
    /// Config file (default: <config dir>/timesheet/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// TOML file with [[entries]]; overrides entries_file from the config
    #[arg(long, global = true)]
    pub entries: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print one page of the time sheet
    List(ListArgs),
    /// Print the total duration of all entries in hours
    Total,
    /// Print the configured columns and whether they are visible
    Columns,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Case-insensitive project search
    #[arg(short, long)]
    pub search: Option<String>,
    /// Only show these activity types (repeatable)
    #[arg(short, long = "activity")]
    pub activities: Vec<ActivityType>,
    /// Column to sort by
    #[arg(long)]
    pub sort: Option<ColumnKey>,
    /// Sort descending
    #[arg(long)]
    pub desc: bool,
    /// Rows per page
    #[arg(short, long)]
    pub rows: Option<usize>,
    /// 1-based page number
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
    /// Visible columns, comma separated or repeated
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub columns: Vec<ColumnKey>,
}

/// Execute a CLI command against the sheet, writing to `out`.
pub fn run(command: Command, sheet: &mut TimeSheet, out: &mut impl Write) -> Result<()> {
    match command {
        Command::List(args) => handle_list(args, sheet, out)?,
        Command::Total => handle_total(sheet, out)?,
        Command::Columns => handle_columns(sheet, out)?,
    }
    Ok(())
}

/// Translates list flags into the same actions the TUI dispatches.
fn list_actions(args: ListArgs, current_sort: SortDescriptor) -> Vec<ViewAction> {
    let mut actions = Vec::new();
    if let Some(search) = args.search {
        actions.push(ViewAction::SetSearch(search));
    }
    if !args.activities.is_empty() {
        actions.push(ViewAction::SetActivityFilter(ActivityFilter::Only(
            args.activities.into_iter().collect(),
        )));
    }
    if args.sort.is_some() || args.desc {
        actions.push(ViewAction::SetSort(SortDescriptor {
            column: args.sort.unwrap_or(current_sort.column),
            direction: if args.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            },
        }));
    }
    if let Some(rows) = args.rows {
        actions.push(ViewAction::SetRowsPerPage(rows));
    }
    if !args.columns.is_empty() {
        actions.push(ViewAction::SetVisibleColumns(args.columns.into_iter().collect()));
    }
    actions.push(ViewAction::SetPage(args.page));
    actions
}

fn handle_list(args: ListArgs, sheet: &mut TimeSheet, out: &mut impl Write) -> Result<()> {
    if args.rows == Some(0) {
        bail!("--rows must be at least 1");
    }
    if let Some(column) = args.sort {
        if !sheet.columns().is_sortable(column) {
            bail!("column '{column}' is not sortable");
        }
    }
    for action in list_actions(args, sheet.view().sort) {
        sheet.dispatch(action);
    }
    write!(out, "{}", render_page(sheet))?;
    Ok(())
}

/// Plain-text rendering of the current page.
pub fn render_page(sheet: &mut TimeSheet) -> String {
    let headers: Vec<(&'static str, ColumnKey)> = sheet
        .header_columns()
        .iter()
        .map(|column| (column.descriptor.name, column.descriptor.key))
        .collect();
    let page = sheet.page_view();
    let rows: Vec<Vec<String>> = page
        .rows
        .iter()
        .map(|entry| {
            sheet
                .render_row(entry)
                .iter()
                .map(|cell| cell.plain_text())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, (name, _))| {
            rows.iter()
                .map(|row| row[index].chars().count())
                .chain([name.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let sort = sheet.view().sort;
    let mut output = String::new();
    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|((name, key), width)| {
            let arrow = if *key == sort.column { sort.direction.arrow() } else { "" };
            format!("{:<width$}", format!("{name}{arrow}"), width = width + 1)
        })
        .collect();
    output.push_str(header_line.join("  ").trim_end());
    output.push('\n');
    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}", width = width + 1))
            .collect();
        output.push_str(line.join("  ").trim_end());
        output.push('\n');
    }
    if rows.is_empty() {
        output.push_str("No entries\n");
    }
    output.push_str(&format!(
        "Page {}/{}, {} entries\n",
        page.page,
        page.page_count.max(1),
        page.total_count
    ));
    output
}

fn handle_total(sheet: &mut TimeSheet, out: &mut impl Write) -> Result<()> {
    let total = sheet.total_duration();
    writeln!(out, "{total}")?;
    if !total.rejected.is_empty() {
        let ids: Vec<String> = total.rejected.iter().map(|id| id.to_string()).collect();
        writeln!(
            out,
            "warning: entries {} end before they start and were counted as zero",
            ids.join(", ")
        )?;
    }
    Ok(())
}

fn handle_columns(sheet: &TimeSheet, out: &mut impl Write) -> Result<()> {
    let visible = &sheet.view().visible_columns;
    for column in sheet.columns().columns() {
        let descriptor = &column.descriptor;
        writeln!(
            out,
            "[{}] {:<14} {:<10}{}",
            if visible.contains(&descriptor.key) { "x" } else { " " },
            descriptor.key.uid(),
            descriptor.name,
            if descriptor.sortable { " sortable" } else { "" }
        )?;
    }
    Ok(())
}
