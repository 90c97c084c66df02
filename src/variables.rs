//! `{{name}}` placeholder substitution

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

/// Flat key -> value table used by every substitution call
pub type VariableMap = HashMap<String, String>;

/// Replaces every literal `{{key}}` in `text` with its value.
///
/// One pass per key, keys in map order. Values containing placeholders of
/// their own have no defined resolution. Unknown placeholders stay verbatim.
pub fn substitute(text: &str, variables: &VariableMap) -> String {
    let mut result = text.to_string();
    for (key, value) in variables {
        let pattern = format!("{{{{{}}}}}", key);
        result = result.replace(&pattern, value);
    }
    result
}

/// Placeholder names still present in `text`, in order of appearance
pub fn unresolved_placeholders(text: &str) -> Vec<&str> {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let re = PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("static regex"));
    re.captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}
