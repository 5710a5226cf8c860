//! Small string and JSON helpers shared by hooks.

use crate::error::ConfigError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Email address surrounded by chevrons. The only capture group is the
/// address without chevrons and surrounding whitespace.
pub static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"<\s*((?:(?:[^<>()\[\]\\.,;:\s@"]+(?:\.[^<>()\[\]\\.,;:\s@"]+)*)|(?:".+"))@(?:(?:\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(?:(?:[a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,})))\s*>"#,
    )
    .expect("email regex is valid")
});

/// Returns the first chevron-quoted email address in `text`, or `""`.
///
/// ```
/// use doclet_core::email_address;
///
/// assert_eq!(email_address("plop<d> < EM@IL.FR\t>  plop"), "EM@IL.FR");
/// assert_eq!(email_address("no address here"), "");
/// ```
pub fn email_address(text: &str) -> &str {
    EMAIL_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str())
}

/// Replaces every escaped at sign `''@` with `@`. `None` yields `""`.
pub fn replace_escaped_at_char(text: Option<&str>) -> String {
    text.map(|t| t.replace("''@", "@")).unwrap_or_default()
}

/// Tests whether `value` has a property called `name`.
///
/// Fails when `value` is null or when `name` is empty. Values that are not
/// objects have no properties.
pub fn has_property(value: &Value, name: &str) -> Result<bool, ConfigError> {
    if value.is_null() {
        return Err(ConfigError::NullObject(value.to_string()));
    }
    if name.is_empty() {
        return Err(ConfigError::EmptyPropertyName);
    }
    Ok(value.as_object().is_some_and(|o| o.contains_key(name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_email_address_examples() {
        assert_eq!(email_address("plop<d> <EM@IL.FR>"), "EM@IL.FR");
        assert_eq!(email_address("plop <EM@IL.FR> PLOP <d@g.ll>"), "EM@IL.FR");
        assert_eq!(email_address("plop<d@g.l> <EM@IL.FR>"), "EM@IL.FR");
        // first match wins even when glued to text
        assert_eq!(email_address("plop<d@g.ll>plop <EM@IL.FR>"), "d@g.ll");
    }

    #[test]
    fn test_email_address_missing() {
        assert_eq!(email_address("Pookie <>"), "");
        assert_eq!(email_address(""), "");
    }

    #[test]
    fn test_replace_escaped_at_char() {
        assert_eq!(replace_escaped_at_char(Some("a''@b")), "a@b");
        assert_eq!(replace_escaped_at_char(Some("''@x ''@y")), "@x @y");
        assert_eq!(replace_escaped_at_char(Some("plain")), "plain");
        assert_eq!(replace_escaped_at_char(None), "");
    }

    #[test]
    fn test_has_property() {
        let object = json!({"zero": 0, "nil": null, "empty": ""});

        assert!(has_property(&object, "zero").unwrap());
        assert!(has_property(&object, "nil").unwrap());
        assert!(has_property(&object, "empty").unwrap());
        assert!(!has_property(&object, "missing").unwrap());
        assert!(!has_property(&json!("text"), "length").unwrap());
    }

    #[test]
    fn test_has_property_errors() {
        assert!(matches!(
            has_property(&Value::Null, "x"),
            Err(ConfigError::NullObject(_))
        ));
        assert_eq!(
            has_property(&json!({}), ""),
            Err(ConfigError::EmptyPropertyName)
        );
    }
}
