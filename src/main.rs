// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use monday_sync::config::Command;
use monday_sync::workflows::parse_column_values;
use monday_sync::{
    add_update, create_item, export_board_csv, items_for_project, measure_tree, me,
    search_boards, update_item, AppError, BoardConnector, BoardId, CommandLineInput,
    ConnectorConfig, ItemId, MondayHttpClient, TreeSummary,
};
use serde::Serialize;
use serde_json::json;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};

/// Sets up logging configuration.
///
/// The console appender writes to stderr; stdout is reserved for data.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("monday_sync.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_level)))
                .build("stderr", Box::new(stderr_appender)),
        )
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Runs one subcommand against monday.com, writing results to `out`.
struct BoardSync {
    connector: BoardConnector<MondayHttpClient>,
    out: Box<dyn Write>,
}

impl BoardSync {
    fn new(cli: &CommandLineInput) -> Result<Self, AppError> {
        let config = ConnectorConfig::resolve(cli)?;
        let client = MondayHttpClient::new(&config)?;
        let out: Box<dyn Write> = match &cli.output {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(BufWriter::new(io::stdout())),
        };

        Ok(Self {
            connector: BoardConnector::new(client).with_page_size(config.page_size),
            out,
        })
    }

    fn run(&mut self, command: &Command) -> Result<(), AppError> {
        let transport = self.connector.transport();

        match command {
            Command::Schema(args) => {
                let schema = self
                    .connector
                    .discover_board_schema(&BoardId::parse(&args.board)?)?;
                self.emit_json(&schema)?;
            }
            Command::Tree(args) => {
                let board = self.connector.fetch_board(&BoardId::parse(&args.board)?)?;
                self.emit_json(&board)?;
                eprintln!("📋 Board '{}': {}", board.name, measure_tree(&board));
            }
            Command::Stream { board, no_subitems } => {
                let board_id = BoardId::parse(&board.board)?;
                let mut summary = TreeSummary::default();
                for node in self.connector.traverse_hierarchy(&board_id, !no_subitems) {
                    let node = node?;
                    summary.record(&node);
                    serde_json::to_writer(&mut self.out, &node)?;
                    writeln!(self.out)?;
                }
                eprintln!("📋 Streamed board {}: {}", board_id, summary);
            }
            Command::Export(args) => {
                let board_id = BoardId::parse(&args.board)?;
                let rows = export_board_csv(&self.connector, &board_id, &mut self.out)?;
                eprintln!("✓ Exported {} rows from board {}", rows, board_id);
            }
            Command::Search { term, limit } => {
                let result = search_boards(transport, term, *limit)?;
                self.emit_json(&result)?;
                eprintln!(
                    "🔍 {} board(s) matched '{}' (showing {})",
                    result.total_matched,
                    term,
                    result.boards.len()
                );
            }
            Command::Suggest { project, limit } => {
                let result = items_for_project(&self.connector, project, *limit)?;
                self.emit_json(&result)?;
                eprintln!("💡 {} item(s) suggested for '{}'", result.count, project);
            }
            Command::Me => {
                let account = me(transport)?;
                self.emit_json(&account)?;
            }
            Command::CreateItem {
                board,
                name,
                group,
                values,
            } => {
                let values = values.as_deref().map(parse_column_values).transpose()?;
                let item = create_item(
                    transport,
                    &BoardId::parse(&board.board)?,
                    name,
                    group.as_deref(),
                    values.as_ref(),
                )?;
                self.emit_json(&item)?;
            }
            Command::UpdateItem {
                board,
                item,
                values,
            } => {
                let item = update_item(
                    transport,
                    &BoardId::parse(&board.board)?,
                    &ItemId::parse(item)?,
                    &parse_column_values(values)?,
                )?;
                self.emit_json(&item)?;
            }
            Command::PostUpdate { item, body } => {
                let update_id = add_update(transport, &ItemId::parse(item)?, body)?;
                self.emit_json(&json!({ "update_id": update_id }))?;
            }
        }

        self.out.flush()?;
        Ok(())
    }

    fn emit_json<S: Serialize>(&mut self, value: &S) -> Result<(), AppError> {
        serde_json::to_writer_pretty(&mut self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let mut sync = BoardSync::new(&cli)?;
    if let Err(e) = sync.run(&cli.command) {
        log::debug!("Command failed ({}): {:?}", e.kind(), e);
        return Err(e.into());
    }

    Ok(())
}
