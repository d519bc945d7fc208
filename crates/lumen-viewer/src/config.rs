use std::time::Duration;

use clap::Parser;
use lumen_engine::logging::LoggingConfig;
use lumen_engine::window::RuntimeConfig;
use lumen_stream::{LiveConfig, SourceMode};
use winit::dpi::LogicalSize;

#[derive(Parser, Debug, Clone)]
#[command(name = "lumen")]
#[command(about = "Live GPU signal visualizer", long_about = None)]
pub struct Config {
    /// Server-Sent Events endpoint. Runs the synthetic generator when unset.
    #[arg(long, env = "LUMEN_STREAM_URL")]
    pub endpoint: Option<String>,

    /// Synthetic sample period in milliseconds
    #[arg(long = "mock-interval-ms", default_value_t = 1000)]
    pub mock_interval_ms: u64,

    /// First reconnect delay in milliseconds
    #[arg(long = "reconnect-initial-ms", default_value_t = 3000)]
    pub reconnect_initial_ms: u64,

    /// Reconnect delay ceiling in milliseconds
    #[arg(long = "reconnect-max-ms", default_value_t = 30_000)]
    pub reconnect_max_ms: u64,

    #[arg(long, default_value = "lumen")]
    pub title: String,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 720.0)]
    pub height: f64,

    /// env_logger filter, overrides RUST_LOG
    #[arg(long = "log-filter")]
    pub log_filter: Option<String>,
}

impl Config {
    /// Live mode when a non-blank endpoint is configured, mock otherwise.
    pub fn source_mode(&self) -> SourceMode {
        match self.endpoint.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => SourceMode::Live(LiveConfig {
                reconnect_initial: Duration::from_millis(self.reconnect_initial_ms),
                reconnect_max: Duration::from_millis(self.reconnect_max_ms),
                ..LiveConfig::new(url)
            }),
            _ => SourceMode::Mock {
                interval: Duration::from_millis(self.mock_interval_ms),
            },
        }
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
        }
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.log_filter.clone(),
            ..LoggingConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("lumen").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let c = parse(&[]);
        assert_eq!(c.mock_interval_ms, 1000);
        assert_eq!(c.reconnect_initial_ms, 3000);
        assert_eq!(c.reconnect_max_ms, 30_000);
        assert_eq!(c.title, "lumen");
        assert_eq!(c.runtime_config().initial_size, LogicalSize::new(1280.0, 720.0));
        assert!(c.logging_config().env_filter.is_none());
    }

    #[test]
    fn blank_endpoint_means_mock() {
        let c = parse(&["--endpoint", "  ", "--mock-interval-ms", "250"]);
        match c.source_mode() {
            SourceMode::Mock { interval } => assert_eq!(interval, Duration::from_millis(250)),
            other => panic!("expected mock mode, got {other:?}"),
        }
    }

    #[test]
    fn endpoint_selects_live_mode() {
        let c = parse(&[
            "--endpoint",
            "http://localhost:8080/stream",
            "--reconnect-initial-ms",
            "500",
            "--reconnect-max-ms",
            "4000",
        ]);
        match c.source_mode() {
            SourceMode::Live(live) => {
                assert_eq!(live.url, "http://localhost:8080/stream");
                assert_eq!(live.reconnect_initial, Duration::from_millis(500));
                assert_eq!(live.reconnect_max, Duration::from_secs(4));
            }
            other => panic!("expected live mode, got {other:?}"),
        }
    }

    #[test]
    fn https_endpoint_fails_validation() {
        let c = parse(&["--endpoint", "https://example.com/stream"]);
        match c.source_mode() {
            SourceMode::Live(live) => assert!(live.validate().is_err()),
            other => panic!("expected live mode, got {other:?}"),
        }
    }

    #[test]
    fn window_and_logging_flags() {
        let c = parse(&[
            "--title",
            "scope",
            "--width",
            "640",
            "--height",
            "480",
            "--log-filter",
            "lumen_stream=debug",
        ]);
        let rt = c.runtime_config();
        assert_eq!(rt.title, "scope");
        assert_eq!(rt.initial_size, LogicalSize::new(640.0, 480.0));
        assert_eq!(c.logging_config().env_filter.as_deref(), Some("lumen_stream=debug"));
    }

    #[test]
    fn rejects_non_numeric_interval() {
        assert!(Config::try_parse_from(["lumen", "--mock-interval-ms", "soon"]).is_err());
    }
}
