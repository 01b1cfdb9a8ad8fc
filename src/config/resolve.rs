//! Environment variable substitution and empty-value normalization.

use super::types::{Settings, ENV_VARS};

impl Settings {
    /// Resolve `{env:VAR_NAME}` patterns in every field, then drop values
    /// that ended up empty.
    pub(super) fn resolve_substitutions(&mut self) {
        for var in ENV_VARS {
            if let Some(field) = self.field_mut(var) {
                if let Some(value) = field.take() {
                    *field = non_empty(Self::resolve_str(&value));
                }
            }
        }
    }

    /// Empty strings count as unset.
    pub fn normalize(&mut self) {
        for var in ENV_VARS {
            if let Some(field) = self.field_mut(var) {
                if let Some(value) = field.take() {
                    *field = non_empty(value);
                }
            }
        }
    }

    /// Replace {env:VAR} with the environment variable value.
    fn resolve_str(s: &str) -> String {
        let mut result = s.to_string();
        while let Some(start) = result.find("{env:") {
            if let Some(end) = result[start..].find('}') {
                let var_name = &result[start + 5..start + end];
                let value = std::env::var(var_name).unwrap_or_default();
                result = format!(
                    "{}{}{}",
                    &result[..start],
                    value,
                    &result[start + end + 1..]
                );
            } else {
                break;
            }
        }
        result
    }
}

pub(super) fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
