mod config;

use anyhow::Result;
use config::ObservabilityConfig;
use tracing::{info, info_span, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber for `component`. Safe to call once per
/// process; a second call returns an error.
pub fn init_observability(component: &str) -> Result<()> {
    let config = ObservabilityConfig::from_env(component);
    let default_directives = config.default_directives();

    let (env_filter, filter_source) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, "RUST_LOG"),
        Err(_) => (EnvFilter::new(&default_directives), "LOG_LEVEL"),
    };

    // Local time so `TZ=Asia/Ho_Chi_Minh` shows `+07:00` in logs.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(config.ansi)
        .with_target(true)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    let context = &config.service_context;
    let _startup = info_span!(
        "observability",
        service = %context.service_name,
        environment = %context.environment,
        component = %context.component,
    )
    .entered();

    for warning in &config.warnings {
        warn!(%warning, "observability: config warning");
    }

    info!(
        filter_source,
        %default_directives,
        ansi = config.ansi,
        "observability: initialized"
    );

    Ok(())
}
