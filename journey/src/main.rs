//! Daily journey CLI.
//!
//! Validates a dataset and prints the path or day map for a set of choices.
//! Exhaustive verification lives in the `verify-paths` binary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use journey::core::book::sentence_book;
use journey::core::journey_id::{journey_number, journey_signature};
use journey::core::map::{MapRow, journey_map};
use journey::core::session::JourneySession;
use journey::core::types::PathItem;
use journey::dataset::{ContentEntry, Dataset, TimeBlock};
use journey::exit_codes;
use journey::io::config::{CONFIG_FILE, load_config};
use journey::io::dataset_store::load_dataset_or_bundled;
use journey::logging;

#[derive(Parser)]
#[command(
    name = "journey",
    version,
    about = "Daily journey path builder for the flashcard app"
)]
struct Cli {
    /// Config file (defaults to `journey.toml` in the working directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Dataset JSON (defaults to config `dataset`, then the bundled dataset).
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check the dataset against schema and invariants.
    Validate,
    /// Print the path for the given choices.
    Path {
        #[command(flatten)]
        choices: ChoiceArgs,
        /// Show only one time block (e.g. `commute-pm`).
        #[arg(long)]
        time_block: Option<TimeBlock>,
        /// Emit the path as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the day overview with the journey number and signature.
    Map {
        #[command(flatten)]
        choices: ChoiceArgs,
    },
    /// Print every sentence grouped by time block.
    Book,
}

#[derive(Args)]
struct ChoiceArgs {
    /// Answer a choice point, as `choice=option`. Repeatable.
    #[arg(long = "choose", value_name = "CHOICE=OPTION", value_parser = parse_choice)]
    choose: Vec<(String, String)>,
}

fn parse_choice(raw: &str) -> Result<(String, String), String> {
    let (choice, option) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CHOICE=OPTION, got '{raw}'"))?;
    if choice.is_empty() || option.is_empty() {
        return Err(format!("expected CHOICE=OPTION, got '{raw}'"));
    }
    Ok((choice.to_string(), option.to_string()))
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::INVALID);
    }
}

fn run() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let dataset = load_for_cli(cli.config.as_deref(), cli.dataset)?;
    match cli.command {
        Command::Validate => cmd_validate(&dataset),
        Command::Path {
            choices,
            time_block,
            json,
        } => cmd_path(&dataset, &choices, time_block, json),
        Command::Map { choices } => cmd_map(&dataset, &choices),
        Command::Book => cmd_book(&dataset),
    }
}

fn load_for_cli(config: Option<&Path>, dataset: Option<PathBuf>) -> Result<Dataset> {
    let config_path = config.unwrap_or_else(|| Path::new(CONFIG_FILE));
    let cfg = load_config(config_path).context("load config")?;
    let dataset_path = dataset.or(cfg.dataset);
    debug!(dataset = ?dataset_path, "resolved dataset");
    load_dataset_or_bundled(dataset_path.as_deref())
}

fn session_with(dataset: &Dataset, choices: &ChoiceArgs) -> Result<JourneySession> {
    let mut session = JourneySession::new();
    for (choice, option) in &choices.choose {
        session
            .choose(dataset, choice, option)
            .map_err(|err| anyhow!(err))?;
    }
    Ok(session)
}

fn journey_count(dataset: &Dataset) -> Result<u64> {
    dataset
        .journey_count()
        .context("journey count overflows u64")
}

fn cmd_validate(dataset: &Dataset) -> Result<()> {
    println!(
        "ok: entries={} choices={} segments={} journeys={}",
        dataset.entries.len(),
        dataset.choices.len(),
        dataset.max_segment(),
        journey_count(dataset)?
    );
    for block in TimeBlock::ALL {
        let entries = dataset
            .entries
            .iter()
            .filter(|entry| entry.time_block == block)
            .count();
        println!(
            "  {:<10} {} {} entries={}",
            block,
            block.label(),
            block.range(),
            entries
        );
    }
    Ok(())
}

fn cmd_path(
    dataset: &Dataset,
    choices: &ChoiceArgs,
    time_block: Option<TimeBlock>,
    json: bool,
) -> Result<()> {
    let mut session = session_with(dataset, choices)?;
    session.set_time_block(time_block);
    let path = session.path(dataset);

    if json {
        let mut payload = serde_json::to_string_pretty(&path).context("serialize path")?;
        payload.push('\n');
        print!("{payload}");
        return Ok(());
    }

    for (position, item) in path.iter().enumerate() {
        println!("{:>3}. {}", position + 1, render_item(item));
    }
    println!(
        "entries: {}/{} complete: {}%",
        path.iter().filter(|item| item.entry().is_some()).count(),
        session.total_entries(dataset),
        session.progress_percent(dataset)
    );
    Ok(())
}

fn render_item(item: &PathItem<'_>) -> String {
    match item {
        PathItem::Entry { entry } => format!(
            "[{} {}] #{} {} {} / {}",
            entry.time_block, entry.time, entry.id, entry.emoji, entry.english, entry.korean
        ),
        PathItem::Choice { choice } => {
            let options: Vec<&str> = choice
                .options
                .iter()
                .map(|option| option.branch.as_str())
                .collect();
            format!(
                "[{} {}] ? {}: {} ({})",
                choice.time_block,
                choice.time,
                choice.id,
                choice.question_en,
                options.join(" | ")
            )
        }
    }
}

fn cmd_map(dataset: &Dataset, choices: &ChoiceArgs) -> Result<()> {
    let session = session_with(dataset, choices)?;
    let total = journey_count(dataset)?;
    let number = journey_number(&dataset.choices, &session.selections)
        .context("journey count overflows u64")?;
    println!(
        "journey #{} of {} signature: {}",
        number,
        total,
        journey_signature(&dataset.choices, &session.selections)
    );
    for row in journey_map(dataset, &session.selections) {
        println!("{}", render_row(&row));
    }
    Ok(())
}

fn cmd_book(dataset: &Dataset) -> Result<()> {
    for section in sentence_book(dataset) {
        let block = section.time_block;
        println!("{} {} ({}) {}", block.emoji(), block.label(), block, block.range());
        for entry in &section.common {
            println!("{}", render_sentence(entry));
        }
        for group in &section.branches {
            if let Some(label) = &group.label {
                println!("  -- {label} --");
            }
            for entry in &group.entries {
                println!("{}", render_sentence(entry));
            }
        }
    }
    println!(
        "{} sentences, {} time blocks, {} choice points, {} unique journeys",
        dataset.entries.len(),
        TimeBlock::ALL.len(),
        dataset.choices.len(),
        journey_count(dataset)?
    );
    Ok(())
}

fn render_sentence(entry: &ContentEntry) -> String {
    format!(
        "  {} {} {} / {}",
        entry.time, entry.emoji, entry.english, entry.korean
    )
}

fn render_row(row: &MapRow) -> String {
    match row {
        MapRow::Common {
            segment,
            time_block,
            time,
            label,
            ..
        } => format!("{segment:>3} {time_block:<10} {time}  {label}"),
        MapRow::Choice {
            segment,
            choice_id,
            time_block,
            time,
            options,
            ..
        } => {
            let options: Vec<String> = options
                .iter()
                .map(|option| {
                    if option.chosen {
                        format!("[{}]", option.branch)
                    } else {
                        option.branch.clone()
                    }
                })
                .collect();
            format!(
                "{segment:>3} {time_block:<10} {time}  {choice_id}: {}",
                options.join(" ")
            )
        }
    }
}
