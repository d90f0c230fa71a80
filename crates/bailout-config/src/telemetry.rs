use serde::Deserialize;
use url::Url;

/// Logging and trace export configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Output format of the fmt layer
    #[serde(default)]
    pub format: LogFormat,
    /// Service name reported with exported spans
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// OTLP trace exporter; spans stay local when absent
    #[serde(default)]
    pub exporter: Option<ExporterConfig>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            format: LogFormat::default(),
            service_name: default_service_name(),
            exporter: None,
        }
    }
}

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable text
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// OTLP exporter configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    /// OTLP endpoint URL
    pub endpoint: Url,
    /// Export protocol
    #[serde(default)]
    pub protocol: ExportProtocol,
    /// Fraction of root traces to sample (0.0 to 1.0)
    #[serde(default = "default_sampling_rate")]
    pub sampling_rate: f64,
}

/// OTLP export protocol
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportProtocol {
    /// gRPC (default)
    #[default]
    Grpc,
    /// HTTP/protobuf
    HttpProto,
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "bailout".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_sampling_rate() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_exporter() {
        let config: TelemetryConfig = toml::from_str("").unwrap();
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.service_name, "bailout");
        assert!(config.exporter.is_none());
    }

    #[test]
    fn exporter_section() {
        let toml = r#"
            format = "json"

            [exporter]
            endpoint = "http://localhost:4318"
            protocol = "http_proto"
            sampling_rate = 0.25
        "#;

        let config: TelemetryConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.format, LogFormat::Json);

        let exporter = config.exporter.unwrap();
        assert_eq!(exporter.endpoint.as_str(), "http://localhost:4318/");
        assert_eq!(exporter.protocol, ExportProtocol::HttpProto);
        assert!((exporter.sampling_rate - 0.25).abs() < f64::EPSILON);
    }
}
