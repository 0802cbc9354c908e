//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod file;
mod task;

use anyhow::Result;
use clap::Subcommand;
use manus_client::ManusClient;
use serde_json::Value;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a task from a prompt
    Create {
        /// Prompt words, joined with spaces
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        prompt: Vec<String>,

        /// Connector to enable for the task (repeatable)
        #[arg(short, long = "connector")]
        connectors: Vec<String>,
    },
    /// Get the status of a task
    Get {
        /// Task ID
        task_id: String,
    },
    /// List recent tasks
    List {
        /// Maximum number of tasks to return
        #[arg(short, long, default_value_t = manus_core::dto::task::DEFAULT_LIST_LIMIT)]
        limit: u32,
    },
    /// Upload a file
    Upload {
        /// Path of the file to upload
        path: std::path::PathBuf,
    },
    /// Create a task and wait until it completes, fails or times out
    Wait {
        /// Prompt words, joined with spaces
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        prompt: Vec<String>,

        /// Connector to enable for the task (repeatable)
        #[arg(short, long = "connector")]
        connectors: Vec<String>,

        /// Give up waiting after this many seconds
        #[arg(long, default_value_t = 300)]
        timeout: u64,

        /// Seconds between status checks
        #[arg(long, default_value_t = 5)]
        interval: u64,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = ManusClient::new(config.gateway())?;

    match command {
        Commands::Create { prompt, connectors } => {
            task::create_task(&client, &prompt, connectors).await
        }
        Commands::Get { task_id } => task::get_task(&client, &task_id).await,
        Commands::List { limit } => task::list_tasks(&client, limit).await,
        Commands::Upload { path } => file::upload_file(&client, &path).await,
        Commands::Wait {
            prompt,
            connectors,
            timeout,
            interval,
        } => task::run_and_wait(client, &prompt, connectors, timeout, interval).await,
    }
}

/// Print a JSON document pretty-printed on stdout
fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
