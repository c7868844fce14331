use clap::Parser;
use hopper_telemetry::LogFormat;
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "HOPPER_GATEWAY_LISTEN_ADDR";
pub const BASE_URL_ENV: &str = "HOPPER_GATEWAY_BASE_URL";
pub const LEGACY_BASE_URL_ENV: &str = "BASE_URL";
pub const LEGACY_PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "HOPPER_LOG_FORMAT";
pub const LOG_API_URL_ENV: &str = "LOG_API_URL";
pub const LOG_API_TOKEN_ENV: &str = "LOG_API_TOKEN";
pub const NOTIFIER_TIMEOUT_ENV: &str = "HOPPER_NOTIFIER_TIMEOUT_MS";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5050";
pub const DEFAULT_BASE_URL: &str = "http://localhost:5050/shorturls";
pub const DEFAULT_NOTIFIER_TIMEOUT_MS: u64 = 3000;

#[derive(Debug, Parser)]
#[command(name = "hopper-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Overrides the port of `--listen-addr`.
    #[arg(long, env = LEGACY_PORT_ENV)]
    pub port: Option<u16>,

    /// Prefix for the `shortLink` returned on create.
    /// Defaults to `BASE_URL`, then to http://localhost:5050/shorturls.
    #[arg(long, env = BASE_URL_ENV)]
    pub base_url: Option<String>,

    #[arg(long = "legacy-base-url", env = LEGACY_BASE_URL_ENV, hide = true)]
    pub legacy_base_url: Option<String>,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// Remote log API endpoint. Notifications are only shipped when both
    /// this and the token are set.
    #[arg(long, env = LOG_API_URL_ENV)]
    pub log_api_url: Option<String>,

    #[arg(long, env = LOG_API_TOKEN_ENV, hide_env_values = true)]
    pub log_api_token: Option<String>,

    #[arg(
        long,
        env = NOTIFIER_TIMEOUT_ENV,
        default_value_t = DEFAULT_NOTIFIER_TIMEOUT_MS
    )]
    pub notifier_timeout_ms: u64,
}

impl CLI {
    pub fn resolved_listen_addr(&self) -> SocketAddr {
        let mut addr = self.listen_addr;
        if let Some(port) = self.port {
            addr.set_port(port);
        }
        addr
    }

    pub fn resolved_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .or(self.legacy_base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = CLI::try_parse_from(["hopper-gateway"]).unwrap();
        assert_eq!(cli.resolved_listen_addr(), DEFAULT_LISTEN_ADDR.parse().unwrap());
        assert_eq!(cli.resolved_base_url(), DEFAULT_BASE_URL);
        assert_eq!(cli.notifier_timeout_ms, DEFAULT_NOTIFIER_TIMEOUT_MS);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = CLI::try_parse_from([
            "hopper-gateway",
            "--listen-addr",
            "0.0.0.0:8080",
            "--base-url",
            "https://hop.example/s",
            "--log-format",
            "json",
            "--log-api-url",
            "https://logs.example/api",
            "--log-api-token",
            "t0ken",
        ])
        .unwrap();
        assert_eq!(cli.resolved_listen_addr().port(), 8080);
        assert_eq!(cli.resolved_base_url(), "https://hop.example/s");
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.log_api_url.as_deref(), Some("https://logs.example/api"));
        assert_eq!(cli.log_api_token.as_deref(), Some("t0ken"));
    }

    #[test]
    fn legacy_port_and_base_url() {
        let cli = CLI::try_parse_from([
            "hopper-gateway",
            "--port",
            "6060",
            "--legacy-base-url",
            "http://old.example/shorturls",
        ])
        .unwrap();
        assert_eq!(cli.resolved_listen_addr(), "127.0.0.1:6060".parse().unwrap());
        assert_eq!(cli.resolved_base_url(), "http://old.example/shorturls");

        let cli = CLI::try_parse_from([
            "hopper-gateway",
            "--base-url",
            "http://new.example/s",
            "--legacy-base-url",
            "http://old.example/shorturls",
        ])
        .unwrap();
        assert_eq!(cli.resolved_base_url(), "http://new.example/s");
    }

    #[test]
    fn rejects_unknown_log_format() {
        assert!(CLI::try_parse_from(["hopper-gateway", "--log-format", "xml"]).is_err());
    }
}
