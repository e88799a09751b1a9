//! Rule engine command line entry point.
//!
//! Each invocation runs one command against the configured node store and prints
//! its result as JSON on stdout:
//!
//! - `parse <RULE>`: stores a rule tree and prints its root identifier
//! - `combine <RULE>...`: stores the combination of several rules
//! - `evaluate`: evaluates a stored rule or an inline tree against a data record
//! - `stringify <ID>`: prints the expression of a stored rule

pub mod bootstrap;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;

use crate::{
	bootstrap::{initialize_service, load_engine_config, Result},
	models::{NodeId, ResolvedNode},
	services::rule::RuleServiceTrait,
	utils::{logging::setup_logging, parse_string_to_bytes_size},
};

use clap::{Parser, Subcommand};
use dotenvy::dotenv_override;
use serde_json::{json, Value};
use std::env::{set_var, var};
use tracing::{error, instrument};

#[derive(Parser)]
#[command(
	name = "rule-engine",
	about = "Parses, combines, evaluates and renders boolean rule expressions.",
	version
)]
struct Cli {
	/// Write logs to file instead of the console
	#[arg(long, global = true)]
	log_file: bool,

	/// Set log level (trace, debug, info, warn, error)
	#[arg(long, value_name = "LEVEL", global = true)]
	log_level: Option<String>,

	/// Path to store log files (default: logs/)
	#[arg(long, value_name = "PATH", global = true)]
	log_path: Option<String>,

	/// Maximum log file size before rolling (e.g., "1GB", "500MB", "1024KB")
	#[arg(long, value_name = "SIZE", value_parser = parse_string_to_bytes_size, global = true)]
	log_max_size: Option<u64>,

	/// Path to the engine configuration file
	#[arg(long, value_name = "CONFIG_PATH", global = true)]
	config: Option<String>,

	/// Directory of the file node store, overriding the configuration
	#[arg(long, value_name = "STORE_PATH", global = true)]
	store_path: Option<String>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
	/// Parse a rule and store its tree
	Parse {
		/// Rule expression, e.g. "age > 30 AND department = 'Sales'"
		rule: String,
	},
	/// Combine several rules into one stored tree
	Combine {
		#[arg(required = true)]
		rules: Vec<String>,
	},
	/// Evaluate a rule against a JSON data record
	Evaluate {
		/// Root identifier of a stored rule
		#[arg(long, value_name = "ID", conflicts_with = "tree", required_unless_present = "tree")]
		rule_id: Option<String>,

		/// Resolved tree as JSON
		#[arg(long, value_name = "JSON")]
		tree: Option<String>,

		/// Data record as a JSON object
		#[arg(long, value_name = "JSON")]
		data: String,
	},
	/// Print the expression of a stored rule
	Stringify {
		/// Root identifier of a stored rule
		id: String,
	},
}

impl Cli {
	/// Apply CLI options to environment variables, overriding any existing values
	fn apply_to_env(&self) {
		// Reload environment variables from .env file
		// Override any existing environment variables
		dotenv_override().ok();

		if self.log_file {
			set_var("LOG_MODE", "file");
		}

		if let Ok(level) = var("RUST_LOG") {
			set_var("LOG_LEVEL", level);
		}

		if let Some(level) = &self.log_level {
			set_var("LOG_LEVEL", level);
			set_var("RUST_LOG", level);
		}

		if let Some(path) = &self.log_path {
			set_var("LOG_DATA_DIR", path);
		}

		if let Some(max_size) = &self.log_max_size {
			set_var("LOG_MAX_SIZE", max_size.to_string());
		}

		if let Some(path) = &self.config {
			set_var("RULE_ENGINE_CONFIG", path);
		}

		if let Some(path) = &self.store_path {
			set_var("RULE_ENGINE_STORE_PATH", path);
		}
	}
}

/// Runs one command and returns the JSON document to print
#[instrument(skip(service))]
async fn run_command<T: RuleServiceTrait>(service: &T, command: Command) -> Result<Value> {
	let output = match command {
		Command::Parse { rule } => json!({ "id": service.parse(&rule).await? }),
		Command::Combine { rules } => json!({ "id": service.combine(&rules).await? }),
		Command::Evaluate {
			rule_id,
			tree,
			data,
		} => {
			let record: Value = serde_json::from_str(&data)
				.map_err(|e| anyhow::anyhow!("Invalid data record: {}", e))?;
			let result = match (rule_id, tree) {
				(Some(id), _) => service.evaluate_stored(&NodeId::new(id), &record).await?,
				(None, Some(tree)) => {
					let tree: ResolvedNode = serde_json::from_str(&tree)
						.map_err(|e| anyhow::anyhow!("Invalid rule tree: {}", e))?;
					service.evaluate(&tree, &record)?
				}
				(None, None) => {
					return Err(anyhow::anyhow!("Either --rule-id or --tree is required").into())
				}
			};
			json!({ "result": result })
		}
		Command::Stringify { id } => {
			json!({ "expression": service.stringify(&NodeId::new(id)).await? })
		}
	};
	Ok(output)
}

/// Main entry point for the rule engine CLI.
///
/// # Errors
/// Returns an error if the configuration cannot be loaded or the command fails.
#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	cli.apply_to_env();

	setup_logging().unwrap_or_else(|e| {
		error!("Failed to setup logging: {}", e);
	});

	let config = load_engine_config().await?;
	let service = initialize_service(&config);

	let output = run_command(&service, cli.command).await?;
	println!("{}", serde_json::to_string_pretty(&output)?);

	Ok(())
}
