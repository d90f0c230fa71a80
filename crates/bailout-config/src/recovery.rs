use serde::Deserialize;

/// Where the recovery boundary writes its `PANIC:` lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogTarget {
    /// Emit through `tracing` at error level
    #[default]
    Tracing,
    /// Write raw lines to standard output
    Stdout,
    /// Write raw lines to standard error
    Stderr,
}

/// Recovery boundary configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecoveryConfig {
    /// Log destination for internal server errors
    #[serde(default)]
    pub sink: LogTarget,
    /// Prefix written in front of every log line
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            sink: LogTarget::default(),
            prefix: default_prefix(),
        }
    }
}

fn default_prefix() -> String {
    "[web] ".to_string()
}
