use std::sync::Once;

/// Filter used when neither the config nor `RUST_LOG` provides one.
///
/// wgpu and naga are chatty at `info`; demos only care about their warnings.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "debug",
/// "vitrine_engine=debug,wgpu_core=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Resolves the effective filter: explicit config, then `RUST_LOG`, then
    /// [`DEFAULT_FILTER`].
    pub fn resolve_filter(&self, rust_log: Option<String>) -> String {
        self.env_filter
            .clone()
            .or(rust_log)
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string())
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.resolve_filter(std::env::var("RUST_LOG").ok());

        env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(config.write_style)
            .format_timestamp_millis()
            .init();

        log::debug!("logging initialized with filter `{filter}`");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let cfg = LoggingConfig { env_filter: Some("trace".into()), ..Default::default() };
        assert_eq!(cfg.resolve_filter(Some("warn".into())), "trace");
    }

    #[test]
    fn rust_log_is_next() {
        assert_eq!(LoggingConfig::default().resolve_filter(Some("warn".into())), "warn");
    }

    #[test]
    fn blank_falls_back_to_default() {
        assert_eq!(LoggingConfig::default().resolve_filter(Some("  ".into())), DEFAULT_FILTER);
        assert_eq!(LoggingConfig::default().resolve_filter(None), DEFAULT_FILTER);
    }
}
