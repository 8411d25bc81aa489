use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use partbin::api::PartbinApi;
use partbin::catalogue::Catalogue;
use partbin::config::PartbinConfig;
use partbin::error::{PartbinError, Result};
use partbin::model::{BomRow, Component};
use partbin::store::fs::FileStore;
use partbin::strip::bus::{LedBus, SetOutcome};
use partbin::strip::transport::TtyLink;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let api = init_api(&cli)?;

    match cli.command {
        Commands::List => handle_list(&api),
        Commands::Add {
            part_number,
            count,
            location,
            manufacturer,
            part_type,
            description,
            low_stock,
            force,
        } => handle_add(
            &api,
            part_number,
            count,
            location,
            manufacturer,
            part_type,
            description,
            low_stock,
            force,
        ),
        Commands::Merge { part_number, count } => handle_merge(&api, &part_number, count),
        Commands::Search { term } => handle_search(&api, &term),
        Commands::Checkout { part_number, qty } => handle_checkout(&api, &part_number, qty),
        Commands::Delete { index } => handle_delete(&api, index),
        Commands::Undo => handle_undo(&api),
        Commands::Stats => handle_stats(&api),
        Commands::LowStock => handle_low_stock(&api),
        Commands::BomOut { rows_file, board } => handle_bom_out(&api, &rows_file, &board),
        Commands::BomReturn {
            rows_file,
            adjustments,
        } => handle_bom_return(&api, &rows_file, &adjustments),
        Commands::Highlight { code, delay_ms } => handle_highlight(&api, &code, delay_ms),
        Commands::LightAll { codes, stagger_ms } => handle_light_all(&api, codes, stagger_ms),
        Commands::Off { code } => {
            report_outcome(api.turn_off_led(&code));
            Ok(())
        }
        Commands::Clear { all } => {
            let outcome = if all {
                api.clear_all()
            } else {
                api.clear_recent()
            };
            report_outcome(outcome);
            Ok(())
        }
        Commands::Backup => handle_backup(&api),
    }
}

fn init_api(cli: &Cli) -> Result<PartbinApi<FileStore>> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("com", "partbin", "partbin")
            .expect("Could not determine data dir")
            .data_dir()
            .to_path_buf(),
    };

    let config = PartbinConfig::load(&data_dir)?;
    let store = FileStore::new(
        config.resolve(&data_dir, &config.files.catalogue),
        config.resolve(&data_dir, &config.files.changelog),
    );
    let catalogue = Catalogue::open(store, config.strip.max_bins)?;

    let bus = Arc::new(LedBus::new(config.strip.num_slots));
    if !cli.no_device {
        if let Some(port) = &config.serial.port {
            match TtyLink::open(port) {
                Ok(link) => bus.reconnect(Some(Box::new(link))),
                Err(err) => {
                    log::warn!("LED controller unavailable on {}: {err}", port.display())
                }
            }
        }
    }

    Ok(PartbinApi::new(catalogue, bus))
}

fn handle_list(api: &PartbinApi<FileStore>) -> Result<()> {
    let components = api.get_all_components()?;
    if components.is_empty() {
        println!("Catalogue is empty.");
        return Ok(());
    }
    print_table(&components);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn handle_add(
    api: &PartbinApi<FileStore>,
    part_number: String,
    count: i64,
    location: Option<String>,
    manufacturer: Option<String>,
    part_type: Option<String>,
    description: Option<String>,
    low_stock: Option<i64>,
    force: bool,
) -> Result<()> {
    if !force {
        if let Some(suggestion) = api.suggest_duplicate(&part_number)? {
            println!(
                "{} did you mean '{}'? (score {:.2})",
                "Possible duplicate:".yellow().bold(),
                suggestion.part_number,
                suggestion.score,
            );
            println!(
                "Run `partbin merge {} {count}` to fold the counts in, or re-run with --force.",
                suggestion.part_number
            );
            return Ok(());
        }
    }

    let mut component = Component::new(part_number, count);
    component.part_info.location = location;
    component.part_info.manufacturer_number = manufacturer;
    component.part_info.part_type = part_type;
    component.metadata.description = description;
    component.metadata.low_stock = low_stock;

    match api.add_component(component)? {
        partbin::commands::AddOutcome::Added { location } => println!(
            "{} stored at {}",
            "Added.".green().bold(),
            location.as_deref().unwrap_or("?").bold()
        ),
        partbin::commands::AddOutcome::Merged {
            part_number,
            new_count,
            location,
        } => println!(
            "{} '{}' already catalogued; count is now {} at {}",
            "Merged.".green().bold(),
            part_number,
            new_count,
            location.as_deref().unwrap_or("?").bold()
        ),
    }
    Ok(())
}

fn handle_merge(api: &PartbinApi<FileStore>, part_number: &str, count: i64) -> Result<()> {
    if let partbin::commands::AddOutcome::Merged {
        part_number,
        new_count,
        ..
    } = api.merge_counts(part_number, count)?
    {
        println!(
            "{} '{}' count is now {}",
            "Merged.".green().bold(),
            part_number,
            new_count
        );
    }
    Ok(())
}

fn handle_search(api: &PartbinApi<FileStore>, term: &str) -> Result<()> {
    let hits = api.search_components(term)?;
    if hits.is_empty() {
        println!("No components match '{term}'.");
    } else {
        print_table(&hits);
    }
    Ok(())
}

fn handle_checkout(api: &PartbinApi<FileStore>, part_number: &str, qty: i64) -> Result<()> {
    let receipt = api.checkout(part_number, qty)?;
    println!(
        "{} {qty} x '{part_number}' from {}, {} left",
        "Checked out.".green().bold(),
        receipt.location.as_deref().unwrap_or("?").bold(),
        receipt.new_count
    );
    Ok(())
}

fn handle_delete(api: &PartbinApi<FileStore>, index: usize) -> Result<()> {
    let removed = api.delete_component(index)?;
    println!(
        "{} '{}' (undo with `partbin undo`)",
        "Deleted.".green().bold(),
        removed.part_info.part_number
    );
    Ok(())
}

fn handle_undo(api: &PartbinApi<FileStore>) -> Result<()> {
    if api.undo_delete()? {
        println!("{}", "Restored last deleted component.".green().bold());
    } else {
        println!("Nothing to undo.");
    }
    Ok(())
}

fn handle_stats(api: &PartbinApi<FileStore>) -> Result<()> {
    let stats = api.get_statistics()?;
    println!("Total parts: {}", stats.total_parts);
    if !stats.types.is_empty() {
        println!("Types: {}", stats.types.join(", "));
    }
    Ok(())
}

fn handle_low_stock(api: &PartbinApi<FileStore>) -> Result<()> {
    let flagged = api.get_low_stock()?;
    if flagged.is_empty() {
        println!("Nothing is below its low-stock threshold.");
    } else {
        print_table(&flagged);
    }
    Ok(())
}

fn handle_bom_out(api: &PartbinApi<FileStore>, rows_file: &PathBuf, board: &str) -> Result<()> {
    let rows = read_bom_rows(rows_file)?;
    for result in api.process_bom_out(&rows, board)? {
        print_row_result(&result);
    }
    Ok(())
}

fn handle_bom_return(
    api: &PartbinApi<FileStore>,
    rows_file: &PathBuf,
    adjustments: &[String],
) -> Result<()> {
    let rows = read_bom_rows(rows_file)?;
    let adjustments = parse_adjustments(adjustments)?;
    for result in api.process_returned_vials(&rows, &adjustments)? {
        print_row_result(&result);
    }
    Ok(())
}

fn handle_highlight(api: &PartbinApi<FileStore>, code: &str, delay_ms: u64) -> Result<()> {
    let delay = Duration::from_millis(delay_ms);
    api.highlight(code, delay);
    // one-shot process: give the debounced timer room to fire before exit
    std::thread::sleep(delay + Duration::from_millis(100));
    println!("Highlighted {}", code.bold());
    Ok(())
}

fn handle_light_all(api: &PartbinApi<FileStore>, codes: Vec<String>, stagger_ms: u64) -> Result<()> {
    let handle = api.highlight_many(&codes, Duration::from_millis(stagger_ms));
    let _ = handle.join();
    println!("Lit {} bins", codes.len());
    Ok(())
}

fn handle_backup(api: &PartbinApi<FileStore>) -> Result<()> {
    match api.backup_now()? {
        Some(path) => println!("{} {}", "Backup created:".green().bold(), path.display()),
        None => println!("Nothing to back up yet."),
    }
    Ok(())
}

fn report_outcome(outcome: SetOutcome) {
    match outcome {
        SetOutcome::Sent => println!("{}", "Done.".green().bold()),
        SetOutcome::NoDevice => println!("{}", "No LED controller connected.".yellow()),
        SetOutcome::NoAddress => println!("{}", "That code has no LED on the strip.".yellow()),
    }
}

fn read_bom_rows(path: &PathBuf) -> Result<Vec<BomRow>> {
    let content = std::fs::read_to_string(path)?;
    let rows: Vec<BomRow> = serde_json::from_str(&content)?;
    Ok(rows)
}

fn parse_adjustments(specs: &[String]) -> Result<HashMap<String, i64>> {
    let mut adjustments = HashMap::new();
    for spec in specs {
        let (part, delta) = spec.split_once('=').ok_or_else(|| {
            PartbinError::Validation(format!("Expected PART=DELTA, got '{spec}'"))
        })?;
        let delta: i64 = delta
            .parse()
            .map_err(|_| PartbinError::Validation(format!("Invalid delta in '{spec}'")))?;
        adjustments.insert(part.to_string(), delta);
    }
    Ok(adjustments)
}

fn print_row_result(result: &partbin::commands::BomRowResult) {
    let status = match result.status {
        partbin::commands::BomStatus::Updated | partbin::commands::BomStatus::Returned => {
            result.status.to_string().green()
        }
        partbin::commands::BomStatus::OutOfStock => result.status.to_string().red(),
        partbin::commands::BomStatus::NotFound => result.status.to_string().yellow(),
    };
    let remaining = result
        .remaining
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!("{:<24} {:>8}  {}", result.part, remaining, status);
}

fn print_table(components: &[Component]) {
    let headers = ["#", "Part", "Count", "Location", "Type"];
    let mut rows: Vec<[String; 5]> = Vec::with_capacity(components.len());
    for (i, comp) in components.iter().enumerate() {
        rows.push([
            i.to_string(),
            comp.part_info.part_number.clone(),
            comp.part_info.count.to_string(),
            comp.part_info
                .location
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            comp.part_info
                .part_type
                .clone()
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.width());
        }
    }

    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(col, h)| pad(h, widths[col]))
        .collect();
    println!("{}", header_line.join("  ").bold());
    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(col, cell)| pad(cell, widths[col]))
            .collect();
        println!("{}", line.join("  "));
    }
}

fn pad(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}
