//! `${VAR}` expansion in configuration strings.

use std::borrow::Cow;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` in `value` from the process environment.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    expand_with(value, field, |name| std::env::var(name).ok())
}

/// Expand `${VAR}` and `${VAR:-default}` in `value`, resolving names with `lookup`.
///
/// Bare `$VAR` is left alone so literal dollars in paths survive. A reference
/// without a default whose name `lookup` cannot resolve is an error naming
/// `field`.
fn expand_with<F>(value: &str, field: &str, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let context = |name: &str| lookup(name).map(Some).ok_or(Unset);
    shellexpand::env_with_context(value, context)
        .map(Cow::into_owned)
        .map_err(|err| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", err.var_name),
        })
}

/// Marker for a variable `lookup` could not resolve.
struct Unset;
