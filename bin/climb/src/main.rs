//! climb command line front end.
//!
//! Loads a file, places the cursor, and runs grow/shrink/expand actions in
//! order, printing the selection after each one.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use climb_config::Config;
use climb_primitives::{Position, Selection, ViewId};
use climb_select::SelectionHost;
use climb_text::{RopeBrackets, TextDocument, TextRangeProvider};
use tracing::{debug, info};

/// climb command line arguments.
#[derive(Parser, Debug)]
#[command(name = "climb")]
#[command(about = "Grow, shrink and bracket-expand selections in a text file")]
struct Args {
	/// File to navigate
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// Cursor line (1-based)
	#[arg(short, long, default_value_t = 1, value_parser = one_based)]
	line: usize,

	/// Cursor column (1-based, in chars)
	#[arg(short, long, default_value_t = 1, value_parser = one_based)]
	column: usize,

	/// Anchor line, for starting from a selection instead of a caret
	#[arg(long, requires = "anchor_column", value_parser = one_based)]
	anchor_line: Option<usize>,

	/// Anchor column
	#[arg(long, requires = "anchor_line", value_parser = one_based)]
	anchor_column: Option<usize>,

	/// Config file (defaults to the user config, if present)
	#[arg(long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,

	/// Actions to run, in order
	#[arg(value_enum, required = true, value_name = "ACTION")]
	actions: Vec<Action>,
}

impl Args {
	fn selection(&self) -> Selection {
		let active = Position::new(self.line, self.column);
		match (self.anchor_line, self.anchor_column) {
			(Some(line), Some(column)) => Selection::new(Position::new(line, column), active),
			_ => Selection::caret(active),
		}
	}
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
	/// Select the next larger enclosing range
	Grow,
	/// Return to the previous smaller range
	Shrink,
	/// Select the nearest bracket pair or its interior
	Expand,
}

impl Action {
	fn name(self) -> &'static str {
		match self {
			Self::Grow => "grow",
			Self::Shrink => "shrink",
			Self::Expand => "expand",
		}
	}
}

fn one_based(s: &str) -> Result<usize, String> {
	match s.parse::<usize>() {
		Ok(0) => Err("positions start at 1".into()),
		Ok(n) => Ok(n),
		Err(e) => Err(e.to_string()),
	}
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	setup_tracing(args.verbose);

	let config = load_config(args.config.as_deref())?;
	debug!(?config, "loaded configuration");

	let text = std::fs::read_to_string(&args.file).with_context(|| format!("reading {}", args.file.display()))?;
	let doc = TextDocument::new(ViewId(1), &text);
	let selection = args.selection();
	doc.move_cursor(selection)
		.with_context(|| format!("placing cursor at {}", selection.range()))?;
	info!(file = %args.file.display(), lines = doc.line_count(), "document loaded");

	let mut out = std::io::stdout().lock();
	run(&doc, &config, &args.actions, &mut out).await
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
	match path {
		Some(path) => Config::load(path).with_context(|| format!("loading config {}", path.display())),
		None => Ok(Config::load_default()?),
	}
}

/// Runs `actions` against `doc`, writing one line per action.
async fn run(doc: &TextDocument, config: &Config, actions: &[Action], out: &mut impl Write) -> anyhow::Result<()> {
	let provider = TextRangeProvider::new(doc, config);
	let oracle = RopeBrackets::new(doc, &config.brackets);
	let controller = climb_text::controller_for(config);

	for &action in actions {
		match action {
			Action::Grow => {
				controller.grow(doc, &provider).await;
			}
			Action::Shrink => {
				controller.shrink(doc, &provider).await;
			}
			Action::Expand => {
				controller.expand_brackets(doc, &oracle);
			}
		}
		let range = doc.selections().primary().range();
		writeln!(out, "{}\t{}\t{:?}", action.name(), range, doc.slice(range))?;
	}
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use std::fs::OpenOptions;

	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::prelude::*;

	let filter = || {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("climb=trace,climb_select=trace,climb_text=trace,info")
			} else {
				EnvFilter::new("warn")
			}
		})
	};

	// CLIMB_LOG_DIR redirects logs to a per-process file.
	if let Some(log_dir) = std::env::var("CLIMB_LOG_DIR").ok().map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("climb.{}.log", std::process::id()));
		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer()
				.with_writer(file)
				.with_ansi(false)
				.with_target(true);
			tracing_subscriber::registry().with(filter()).with(file_layer).init();
			tracing::info!(path = ?log_path, "climb tracing initialized");
			return;
		}
	}

	// Stdout carries results, so logs go to stderr.
	tracing_subscriber::fmt()
		.with_env_filter(filter())
		.with_writer(std::io::stderr)
		.init();
}
