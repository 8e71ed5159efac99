use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::cli::script::{self, ReplayReport};
use crate::grid::engine::GridEngine;
use crate::io::config_io;
use crate::io::project_io;
use crate::io::state::{self, GridUiState};
use crate::model::project::Project;
use crate::ops::check;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let config = cli.config;
    match cli.command {
        Commands::Show(args) => cmd_show(args, config.as_deref(), json),
        Commands::Replay(args) => cmd_replay(args, config.as_deref(), json),
        Commands::Hide(args) => cmd_hide(args, config.as_deref(), json),
        Commands::Unhide(args) => cmd_unhide(args, config.as_deref(), json),
        Commands::Check(args) => cmd_check(args, json),
    }
}

/// Load the document and build an engine for it, restoring UI state when a
/// state file is given.
fn open(
    document: &Path,
    config: Option<&Path>,
    state_file: Option<&Path>,
) -> Result<(Project, GridEngine), Box<dyn std::error::Error>> {
    let project = project_io::load_document(document)?;
    let config_path = config.map_or_else(|| config_io::config_path_for(document), Path::to_path_buf);
    let mut engine = GridEngine::new(config_io::read_config(&config_path)?);
    if let Some(ui) = state_file.and_then(state::read_ui_state) {
        engine.restore_ui_state(ui, &project);
    }
    Ok((project, engine))
}

// ---------------------------------------------------------------------------
// Read command handlers
// ---------------------------------------------------------------------------

fn cmd_show(args: ShowArgs, config: Option<&Path>, json: bool) -> CmdResult {
    let (project, engine) = open(&args.document, config, args.state.as_deref())?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&grid_to_json(&engine, &project))?
        );
    } else {
        for line in format_grid(&engine, &project) {
            println!("{}", line);
        }
        print_hidden(&engine.ui_state());
    }
    Ok(())
}

fn print_hidden(ui: &GridUiState) {
    let mut columns: Vec<&str> = ui
        .visibility
        .hidden_columns
        .iter()
        .map(String::as_str)
        .collect();
    columns.sort_unstable();
    let mut rows: Vec<&str> = ui.visibility.hidden_rows.iter().map(String::as_str).collect();
    rows.sort_unstable();
    if !columns.is_empty() {
        println!("hidden columns: {}", columns.join(", "));
    }
    if !rows.is_empty() {
        println!("hidden rows: {}", rows.join(", "));
    }
}

fn cmd_check(args: CheckArgs, json: bool) -> CmdResult {
    let project = project_io::load_document(&args.document)?;
    let result = check::check_project(&project);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for line in format_check(&result) {
            println!("{}", line);
        }
    }
    if !result.valid {
        return Err(format!("{} integrity error(s)", result.errors.len()).into());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write command handlers
// ---------------------------------------------------------------------------

fn cmd_replay(args: ReplayArgs, config: Option<&Path>, json: bool) -> CmdResult {
    let events = script::parse_script(&args.script)?;
    let (mut project, mut engine) = open(&args.document, config, args.state.as_deref())?;

    let report = script::replay(&mut engine, &mut project, &events);

    if args.write && report.document_changed {
        project_io::save_document(&args.document, &project)?;
    }
    if args.save_state
        && let Some(path) = &args.state
    {
        state::write_ui_state(path, &engine.ui_state())?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
        if args.write && report.document_changed {
            println!("wrote {}", args.document.display());
        }
    }
    Ok(())
}

fn print_report(report: &ReplayReport) {
    if report.intents.is_empty() {
        println!("no intents");
    } else {
        println!("intents:");
        for intent in &report.intents {
            println!("  {}", format_intent(intent));
        }
    }
    for scroll in &report.scrolls {
        println!("scroll: dx={} dy={}", scroll.dx, scroll.dy);
    }
    println!("{}", format_cursor(report.cursor.as_ref()));
    if let Some(status) = &report.status {
        if report.status_is_error {
            println!("status (error): {}", status);
        } else {
            println!("status: {}", status);
        }
    }
}

fn cmd_hide(args: HideArgs, config: Option<&Path>, json: bool) -> CmdResult {
    let (project, mut engine) = open(&args.document, config, Some(args.state.as_path()))?;
    let changed = match (&args.column, &args.row) {
        (Some(column), _) => {
            require_asset(&project, column)?;
            engine.hide_column(&project, column)?
        }
        (None, Some(row)) => {
            require_page(&project, row)?;
            engine.hide_row(&project, row)?
        }
        (None, None) => false,
    };
    finish_visibility(&args.state, &engine, changed, json)
}

fn cmd_unhide(args: UnhideArgs, config: Option<&Path>, json: bool) -> CmdResult {
    let (project, mut engine) = open(&args.document, config, Some(args.state.as_path()))?;
    let changed = if args.all {
        let before = engine.visibility.clone();
        engine.show_all_columns();
        engine.show_all_rows();
        engine.visibility != before
    } else if let Some(column) = &args.column {
        require_asset(&project, column)?;
        engine.show_column(column)
    } else if let Some(row) = &args.row {
        require_page(&project, row)?;
        engine.show_row(row)
    } else {
        false
    };
    finish_visibility(&args.state, &engine, changed, json)
}

fn finish_visibility(state_file: &Path, engine: &GridEngine, changed: bool, json: bool) -> CmdResult {
    let ui = engine.ui_state();
    if changed {
        state::write_ui_state(state_file, &ui)?;
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&ui)?);
    } else {
        if !changed {
            println!("nothing to change");
        }
        print_hidden(&ui);
    }
    Ok(())
}

fn require_asset(project: &Project, asset_id: &str) -> Result<(), String> {
    match project.asset(asset_id) {
        Some(_) => Ok(()),
        None => Err(format!("asset not found: {}", asset_id)),
    }
}

fn require_page(project: &Project, page_id: &str) -> Result<(), String> {
    match project.page(page_id) {
        Some(_) => Ok(()),
        None => Err(format!("page not found: {}", page_id)),
    }
}
