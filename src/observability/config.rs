use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub(crate) struct ServiceContext {
    pub(crate) service_name: String,
    pub(crate) environment: String,
    pub(crate) component: String,
}

#[derive(Debug, Clone)]
pub(crate) struct ObservabilityConfig {
    pub(crate) service_context: ServiceContext,
    pub(crate) log_format: LogFormat,
    /// Warnings captured during config parsing so they can be logged after tracing is initialized.
    pub(crate) warnings: Vec<String>,
}

impl ObservabilityConfig {
    pub(crate) fn from_env(component: &str) -> Self {
        Self::from_values(
            component,
            env_string("SERVICE_NAME"),
            env_string("STAGE"),
            env_string("LOG_FORMAT"),
        )
    }

    fn from_values(
        component: &str,
        service_name: Option<String>,
        stage: Option<String>,
        log_format: Option<String>,
    ) -> Self {
        let component = component.trim().to_string();
        let mut warnings = Vec::new();

        let service_name = service_name
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| component.clone());

        let environment = stage
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "unknown".to_string());

        let log_format = match log_format {
            Some(raw) if !raw.trim().is_empty() => match parse_log_format(&raw) {
                Some(format) => format,
                None => {
                    warnings.push(format!(
                        "LOG_FORMAT is invalid (value: {raw}); defaulting to pretty"
                    ));
                    LogFormat::Pretty
                }
            },
            _ => LogFormat::Pretty,
        };

        Self {
            service_context: ServiceContext {
                service_name,
                environment,
                component,
            },
            log_format,
            warnings,
        }
    }
}

fn parse_log_format(input: &str) -> Option<LogFormat> {
    match input.trim().to_ascii_lowercase().as_str() {
        "pretty" | "text" => Some(LogFormat::Pretty),
        "json" => Some(LogFormat::Json),
        _ => None,
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key).ok()
}
