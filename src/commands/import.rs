//! Import command - Validates a CSV file and imports its users.

use crate::cli::args::ImportArgs;
use crate::config::Config;
use crate::domain::ImportOutcome;
use crate::errors::{AppError, AppResult};
use crate::import::{BackendMode, ImportClient, ImportFile, StaticSession};

/// Execute the import command
pub async fn execute(args: ImportArgs, config: Config) -> AppResult<()> {
    let mode = backend_mode(&args, &config);
    let session = StaticSession::new(
        args.token
            .clone()
            .or_else(|| config.import_access_token().map(str::to_string)),
    );

    let file = ImportFile::from_path(&args.file).map_err(|e| {
        AppError::BadRequest(format!("Cannot read {}: {}", args.file.display(), e))
    })?;

    let client = ImportClient::new(mode, session).map_err(|e| AppError::internal(e.to_string()))?;
    tracing::debug!(mode = ?client.mode(), "Importing {}", file.name);
    let outcome = client.import_file(&file).await.map_err(|e| {
        if let Some(status) = e.status() {
            tracing::debug!(status = %status, "Import service answered with an error");
        }
        AppError::validation(e.to_string())
    })?;

    print_outcome(&outcome);
    Ok(())
}

fn backend_mode(args: &ImportArgs, config: &Config) -> BackendMode {
    if args.simulate {
        return BackendMode::Simulated {
            delay: config.simulated_delay(),
        };
    }

    match &args.api_url {
        Some(base_url) => BackendMode::Live {
            base_url: base_url.clone(),
        },
        None => BackendMode::from_config(config),
    }
}

fn print_outcome(outcome: &ImportOutcome) {
    if outcome.simulated {
        println!("Simulated import: no import service was contacted");
    }
    println!(
        "Total: {}  Successful: {}  Failed: {}",
        outcome.total, outcome.successful, outcome.failed
    );

    if !outcome.errors.is_empty() {
        println!("Errors:");
        for error in &outcome.errors {
            println!("  - {}", error);
        }
    }

    if !outcome.sample_preview.is_empty() {
        println!("Preview:");
        for row in &outcome.sample_preview {
            let fields: Vec<String> = row
                .fields()
                .iter()
                .map(|(column, value)| format!("{}={}", column, value))
                .collect();
            println!("  {}", fields.join(", "));
        }
    }
}
