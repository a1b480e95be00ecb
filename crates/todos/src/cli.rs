//! Command-line interface definitions.

use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};

/// Todos - per-user task store administration
#[derive(Debug, Parser)]
#[command(name = "todos")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Owner of the tasks being operated on
    #[arg(long, short, global = true, default_value = "local", env = "TODOS_USER_ID")]
    pub user_id: String,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the table and its creation-time index if missing
    #[command(long_about = "Create the table and its creation-time index if missing.

Waits until the table is active.

Environment variables:
  TODOS_TABLE             - Table name (defaults to todos)
  TODOS_CREATED_AT_INDEX  - Creation-time index (defaults to CreatedAtIndex)
  AWS_ENDPOINT_URL        - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION              - AWS region (defaults to us-east-1)")]
    Init,

    /// List every task, newest first
    List,

    /// Show a single task
    Get {
        /// Task ID
        todo_id: String,
    },

    /// Create a task
    Create {
        /// Task name
        #[arg(long)]
        name: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        due_date: NaiveDate,

        /// Use this ID instead of a generated one
        #[arg(long)]
        id: Option<String>,
    },

    /// Overwrite name, due date and completion of a task
    Update {
        /// Task ID
        todo_id: String,

        /// Task name
        #[arg(long)]
        name: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        due_date: NaiveDate,

        /// Completion flag
        #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
        done: bool,
    },

    /// Delete a task
    Delete {
        /// Task ID
        todo_id: String,
    },

    /// List the tasks whose name contains a substring
    Search {
        /// Case-sensitive substring; empty matches everything
        #[arg(default_value = "")]
        needle: String,
    },

    /// Record an attachment on a task and print a presigned upload URL
    Attach {
        /// Task ID
        todo_id: String,
    },
}
