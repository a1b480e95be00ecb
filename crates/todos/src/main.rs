mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todos::attachments::S3UploadSigner;
use todos::aws::{load_sdk_config, AwsSettings};
use todos::storage::dynamodb::ProvisionOutcome;
use todos::storage::{DynamoDbRepository, ObservedRepository, TracingObserver};
use todos::{Config, TodoService};
use todos_core::todo::{CreateTodoRequest, UpdateTodoRequest};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    let config = Config::from_env();
    tracing::debug!(target_env = %config.target_display(), table = %config.table_name, "Loaded configuration");

    let sdk_config = load_sdk_config(&AwsSettings::from(&config)).await;
    let repository = Arc::new(
        DynamoDbRepository::from_sdk_config(&sdk_config, &config.table_name)
            .with_created_at_index(&config.created_at_index),
    );

    if let Command::Init = cli.command {
        let outcome = repository
            .ensure_table()
            .await
            .with_context(|| format!("Failed to provision table {}", config.table_name))?;
        let status = match outcome {
            ProvisionOutcome::Created => "created",
            ProvisionOutcome::AlreadyExists => "exists",
        };
        return print_json(
            &serde_json::json!({ "table": repository.table_name(), "status": status }),
            cli.pretty,
        );
    }

    let signer = S3UploadSigner::from_sdk_config(&sdk_config, &config.attachment_bucket);
    let service = TodoService::new(
        Arc::new(ObservedRepository::new(repository, Arc::new(TracingObserver))),
        config.attachment_resolver(),
        Arc::new(signer),
    )
    .with_upload_url_expiry(config.upload_url_expiry());

    let user_id = cli.user_id.as_str();
    match cli.command {
        Command::Init => Ok(()),
        Command::List => print_json(&service.list(user_id).await?, cli.pretty),
        Command::Get { todo_id } => print_json(&service.get(user_id, &todo_id).await?, cli.pretty),
        Command::Create { name, due_date, id } => {
            let request = CreateTodoRequest::new(name, due_date);
            let todo = match id {
                Some(todo_id) => service.create_with_id(user_id, &todo_id, request).await?,
                None => service.create(user_id, request).await?,
            };
            print_json(&todo, cli.pretty)
        }
        Command::Update {
            todo_id,
            name,
            due_date,
            done,
        } => {
            let request = UpdateTodoRequest::new(name, due_date, done);
            print_json(&service.update(user_id, &todo_id, request).await?, cli.pretty)
        }
        Command::Delete { todo_id } => {
            service.delete(user_id, &todo_id).await?;
            print_json(
                &serde_json::json!({ "userId": user_id, "todoId": todo_id, "deleted": true }),
                cli.pretty,
            )
        }
        Command::Search { needle } => {
            print_json(&service.search(user_id, &needle).await?, cli.pretty)
        }
        Command::Attach { todo_id } => {
            print_json(&service.attach(user_id, &todo_id).await?, cli.pretty)
        }
    }
}

/// Initialize the tracing subscriber.
///
/// Logs go to stderr so stdout carries only JSON results. `LOG_FORMAT=json`
/// switches to structured output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "todos=info".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{output}");
    Ok(())
}
