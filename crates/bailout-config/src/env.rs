use std::sync::OnceLock;

use regex::{Captures, Regex};
use thiserror::Error;

/// Failure to expand a placeholder in the raw config text
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpandError {
    /// `{{ env.VAR }}` without a default and `VAR` unset
    #[error("environment variable not found: `{0}`")]
    MissingVar(String),
    /// Placeholder scoped to something other than `env.`
    #[error("only variables scoped with 'env.' are supported: `{0}`")]
    UnsupportedScope(String),
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `{{ env.VAR }}` or `{{ env.VAR | default("fallback") }}`
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
    })
}

/// Expand `{{ env.VAR }}` placeholders in raw TOML text
///
/// `{{ env.VAR | default("x") }}` falls back to `x` when `VAR` is unset.
/// Comment lines are copied through untouched.
pub fn expand_env(input: &str) -> Result<String, ExpandError> {
    let mut lines = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_owned());
        } else {
            lines.push(expand_line(line)?);
        }
    }

    let mut output = lines.join("\n");
    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

fn expand_line(line: &str) -> Result<String, ExpandError> {
    let mut result = String::with_capacity(line.len());
    let mut last_end = 0;

    for captures in placeholder().captures_iter(line) {
        let Some(whole) = captures.get(0) else { continue };
        result.push_str(&line[last_end..whole.start()]);
        result.push_str(&resolve(&captures)?);
        last_end = whole.end();
    }

    result.push_str(&line[last_end..]);
    Ok(result)
}

fn resolve(captures: &Captures<'_>) -> Result<String, ExpandError> {
    let key = captures.get(1).map_or("", |m| m.as_str());
    let default = captures.get(2).map(|m| m.as_str());

    let Some(var) = key.strip_prefix("env.").filter(|var| !var.is_empty() && !var.contains('.')) else {
        return Err(ExpandError::UnsupportedScope(key.to_owned()));
    };

    match (std::env::var(var), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_owned()),
        (Err(_), None) => Err(ExpandError::MissingVar(var.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let input = "prefix = \"[web] \"\n";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn expands_several_vars() {
        let vars = [("BAILOUT_HOST", Some("127.0.0.1")), ("BAILOUT_PORT", Some("8080"))];
        temp_env::with_vars(vars, || {
            let result = expand_env("listen_address = \"{{ env.BAILOUT_HOST }}:{{ env.BAILOUT_PORT }}\"").unwrap();
            assert_eq!(result, "listen_address = \"127.0.0.1:8080\"");
        });
    }

    #[test]
    fn missing_var_is_an_error() {
        temp_env::with_var_unset("BAILOUT_MISSING", || {
            let err = expand_env("path = \"{{ env.BAILOUT_MISSING }}\"").unwrap_err();
            assert_eq!(err, ExpandError::MissingVar("BAILOUT_MISSING".to_owned()));
        });
    }

    #[test]
    fn default_applies_only_when_unset() {
        temp_env::with_var_unset("BAILOUT_PREFIX", || {
            let result = expand_env("prefix = \"{{ env.BAILOUT_PREFIX | default(\"[app] \") }}\"").unwrap();
            assert_eq!(result, "prefix = \"[app] \"");
        });

        temp_env::with_var("BAILOUT_PREFIX", Some("[api] "), || {
            let result = expand_env("prefix = \"{{ env.BAILOUT_PREFIX | default(\"[app] \") }}\"").unwrap();
            assert_eq!(result, "prefix = \"[api] \"");
        });
    }

    #[test]
    fn other_scopes_are_rejected() {
        let err = expand_env("key = \"{{ secrets.TOKEN }}\"").unwrap_err();
        assert_eq!(err, ExpandError::UnsupportedScope("secrets.TOKEN".to_owned()));
    }

    #[test]
    fn comments_are_not_expanded() {
        temp_env::with_var_unset("BAILOUT_MISSING", || {
            let input = "  # sink = \"{{ env.BAILOUT_MISSING }}\"\nsink = \"stdout\"";
            assert_eq!(expand_env(input).unwrap(), input);
        });
    }
}
