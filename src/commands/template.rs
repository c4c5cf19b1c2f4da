//! Template command - Writes the example import CSV.

use crate::cli::args::TemplateArgs;
use crate::errors::{AppError, AppResult};
use crate::import::write_template;

/// Execute the template command
pub async fn execute(args: TemplateArgs) -> AppResult<()> {
    let path = write_template(&args.output).map_err(|e| {
        AppError::internal(format!(
            "Failed to write template to {}: {}",
            args.output.display(),
            e
        ))
    })?;

    println!("Template written to {}", path.display());
    Ok(())
}
