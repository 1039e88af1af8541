//! `${VAR}` expansion in path settings.

use std::env;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Strings without `${` are returned as is, so a bare `$` in a path is
/// never touched. `field` names the setting in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let expanded = shellexpand::env_with_context(value, |name| env::var(name).map(Some))
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}}: {}", e.var_name, e.cause),
        })?;
    Ok(expanded.into_owned())
}
