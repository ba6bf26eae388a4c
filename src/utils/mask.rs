//! Masking of sensitive values before they reach the logs.

use serde_json::Value;

/// Top-level JSON keys whose values are never logged.
pub const MASKED_FIELDS: &[&str] = &["password", "token", "secret"];

/// Replacement written instead of a masked value.
pub const MASK: &str = "****";

/// Returns a copy of `body` with sensitive top-level fields replaced.
///
/// Key matching is case-insensitive. Non-object values are logged as an
/// empty object, since only object bodies are inspected.
pub fn mask_sensitive(body: &Value) -> Value {
    let Value::Object(fields) = body else {
        return Value::Object(Default::default());
    };

    let masked = fields
        .iter()
        .map(|(key, value)| {
            let is_sensitive = MASKED_FIELDS
                .iter()
                .any(|field| key.eq_ignore_ascii_case(field));
            let value = if is_sensitive {
                Value::String(MASK.to_string())
            } else {
                value.clone()
            };
            (key.clone(), value)
        })
        .collect();

    Value::Object(masked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mask_sensitive_fields() {
        let masked = mask_sensitive(&json!({
            "password": "12345",
            "token": "abcd",
            "user": "alex"
        }));

        assert_eq!(masked["password"], "****");
        assert_eq!(masked["token"], "****");
        assert_eq!(masked["user"], "alex");
    }

    #[test]
    fn test_mask_is_case_insensitive() {
        let masked = mask_sensitive(&json!({"Secret": "s", "TOKEN": "t"}));

        assert_eq!(masked["Secret"], "****");
        assert_eq!(masked["TOKEN"], "****");
    }

    #[test]
    fn test_non_object_body_logged_empty() {
        assert_eq!(mask_sensitive(&json!(["password"])), json!({}));
        assert_eq!(mask_sensitive(&json!("x")), json!({}));
    }
}
