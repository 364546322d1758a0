// report/writer.rs

use crate::analyzer::AnalyticsResult;
use crate::model::ReportError;
use std::path::Path;
use tokio::fs;
use tracing::info;

/// Writes the result as pretty-printed JSON.
pub async fn write_json(path: impl AsRef<Path>, result: &AnalyticsResult) -> Result<(), ReportError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(result)?;
    create_parent(path).await?;
    fs::write(path, json).await?;
    info!("✅ JSON report written: {}", path.display());
    Ok(())
}

pub async fn write_text(path: impl AsRef<Path>, text: &str) -> Result<(), ReportError> {
    let path = path.as_ref();
    create_parent(path).await?;
    fs::write(path, text).await?;
    info!("✅ Text report written: {}", path.display());
    Ok(())
}

async fn create_parent(path: &Path) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    Ok(())
}
