use serde::Deserialize;

/// Status probe endpoint configuration
///
/// When enabled, `GET {path}/{code}` answers with a structured failure for
/// `code`, which makes the recovery boundary observable from outside.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_path(),
        }
    }
}

impl ProbeConfig {
    /// Path the `/{code}` segment is appended to, without trailing slashes
    pub fn base_path(&self) -> &str {
        self.path.trim_end_matches('/')
    }
}

fn default_path() -> String {
    "/status".to_string()
}
