#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "cadoc", about = "CAD document JSON inspection tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Info {
		path: PathBuf,
		#[arg(long)]
		json: bool,
	},
	Hash {
		path: PathBuf,
	},
	Repack {
		path: PathBuf,
		#[arg(long)]
		pretty: bool,
		#[arg(long)]
		compact: bool,
		#[arg(long)]
		minimal: bool,
		#[arg(long, short)]
		out: Option<PathBuf>,
	},
	Validate {
		path: PathBuf,
	},
}

fn main() {
	env_logger::init();
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> cadoc::data::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Info { path, json } => cmd::info::run(path, json),
		Commands::Hash { path } => cmd::hash::run(path),
		Commands::Repack {
			path,
			pretty,
			compact,
			minimal,
			out,
		} => cmd::repack::run(path, cadoc::data::DumpOptions { pretty, compact, minimal }, out),
		Commands::Validate { path } => cmd::validate::run(path),
	}
}
