use anyhow::{Context, Result};
use clap::Parser;
use cv_renderer::cli::{handle_command, Cli};
use cv_renderer::core::ConfigManager;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Layer, Registry};

type FileLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging first; the log file path is only known once the
    // configuration is loaded, so that layer is attached afterwards.
    let (file_layer, file_handle) = reload::Layer::new(None::<FileLayer>);
    let console = fmt::layer().with_writer(std::io::stderr).with_target(false);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console)
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cv_renderer=info,rocket=warn")),
        )
        .init();

    let config = ConfigManager::load()?;
    if let Some(path) = &config.environment.log_file {
        file_handle
            .reload(Some(json_file_layer(path)?))
            .context("Failed to attach log file")?;
    }

    info!(
        "Environment: {}",
        cv_renderer::environment::EnvironmentConfig::get_environment()
    );

    handle_command(cli, config).await
}

fn json_file_layer(path: &Path) -> Result<FileLayer> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    Ok(fmt::layer()
        .json()
        .with_writer(file)
        .with_current_span(false)
        .with_span_list(false)
        .boxed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_attaches_after_startup() {
        let path = std::env::temp_dir().join(format!("cvrender-log-{}.json", std::process::id()));
        let (file_layer, handle) = reload::Layer::new(None::<FileLayer>);
        let subscriber = tracing_subscriber::registry().with(file_layer);

        tracing::subscriber::with_default(subscriber, || {
            info!("before the log file");
            handle.reload(Some(json_file_layer(&path).unwrap())).unwrap();
            info!("after the log file");
        });

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("after the log file"));
        assert!(!content.contains("before the log file"));
        std::fs::remove_file(&path).ok();
    }
}
