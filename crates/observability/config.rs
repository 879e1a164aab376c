use std::env;
use tracing::Level;

#[derive(Clone)]
pub(crate) struct ServiceContext {
    pub(crate) service_name: String,
    pub(crate) environment: String,
    pub(crate) component: String,
}

#[derive(Clone)]
pub(crate) struct ObservabilityConfig {
    pub(crate) service_context: ServiceContext,
    /// Level used when `RUST_LOG` is not set.
    pub(crate) default_level: Level,
    pub(crate) ansi: bool,
    /// Warnings captured during config parsing so they can be logged after tracing is initialized.
    pub(crate) warnings: Vec<String>,
}

impl ObservabilityConfig {
    /// Filter used when `RUST_LOG` is unset. SDK and connection targets stay
    /// at `warn`.
    pub(crate) fn default_directives(&self) -> String {
        let level = self.default_level.to_string().to_lowercase();
        let mut directives = vec![level.clone()];
        directives.extend(
            QUIET_TARGETS
                .iter()
                .map(|target| format!("{target}={}", quieter_of(&level))),
        );
        directives.join(",")
    }

    pub(crate) fn from_env(component: &str) -> Self {
        let component = component.trim().to_string();
        let mut warnings = Vec::new();

        let service_name = env_string("SERVICE_NAME")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| component.clone());

        let environment = env_string("STAGE")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "unknown".to_string());

        let default_level = match env_string("LOG_LEVEL") {
            Some(raw) if !raw.trim().is_empty() => match parse_level(&raw) {
                Some(level) => level,
                None => {
                    warnings.push(format!("LOG_LEVEL is invalid (value: {raw}); defaulting to INFO"));
                    Level::INFO
                }
            },
            _ => Level::INFO,
        };

        let ansi = match env_string("LOG_ANSI") {
            Some(raw) => env_bool(&raw).unwrap_or_else(|| {
                warnings.push(format!("LOG_ANSI is invalid (value: {raw}); keeping colors on"));
                true
            }),
            None => true,
        };

        Self {
            service_context: ServiceContext {
                service_name,
                environment,
                component,
            },
            default_level,
            ansi,
            warnings,
        }
    }
}

const QUIET_TARGETS: [&str; 4] = ["aws_config", "aws_smithy_runtime", "hyper", "h2"];

/// `warn`, unless the base level is already stricter.
fn quieter_of(level: &str) -> &str {
    if level == "error" { "error" } else { "warn" }
}

fn parse_level(input: &str) -> Option<Level> {
    match input.trim().to_ascii_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}
