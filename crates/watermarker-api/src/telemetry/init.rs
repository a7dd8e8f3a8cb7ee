use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use watermarker_core::LogFormat;

const DEFAULT_FILTER: &str = "watermarker=debug,tower_http=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Initialize tracing. `RUST_LOG` overrides the default filter.
pub fn init_telemetry(
    log_format: LogFormat,
    environment: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match log_format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter())
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_current_span(true),
                )
                .try_init()?;
        }
        LogFormat::Compact => {
            // Console: compact format (message string for convenience)
            let console_fmt = tracing_subscriber::fmt::layer().event_format(
                Format::default()
                    .compact()
                    .with_target(false)
                    .without_time(),
            );
            tracing_subscriber::registry()
                .with(env_filter())
                .with(console_fmt)
                .try_init()?;
        }
    }

    tracing::info!(
        log_format = ?log_format,
        environment = environment,
        "Tracing initialized"
    );
    Ok(())
}
