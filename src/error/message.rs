//! Text helpers shared by error messages.

use std::path::Path;

/// Joins items into a natural-language "or" list.
///
/// One item renders as itself, two as `"A or B"`, and three or more with an
/// Oxford comma: `"A, B, or C"`. An empty slice renders as an empty string.
///
/// # Example
///
/// ```rust
/// use argcheck::natural_list;
///
/// assert_eq!(natural_list(&["int"]), "int");
/// assert_eq!(natural_list(&["int", "float"]), "int or float");
/// assert_eq!(natural_list(&["int", "float", "complex"]), "int, float, or complex");
/// ```
pub fn natural_list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} or {}", first.as_ref(), second.as_ref()),
        [head @ .., last] => {
            let head: Vec<&str> = head.iter().map(AsRef::as_ref).collect();
            format!("{}, or {}", head.join(", "), last.as_ref())
        }
    }
}

/// Prefixes a type description with an indefinite article unless it has one.
pub(crate) fn with_article(description: &str) -> String {
    if description.starts_with("a ") || description.starts_with("an ") {
        return description.to_string();
    }
    let article = match description.chars().next() {
        Some(c) if "aeiouAEIOU".contains(c) => "an",
        _ => "a",
    };
    format!("{} {}", article, description)
}

/// Appends the offending path on its own line.
pub(crate) fn with_path(reason: &str, path: &Path) -> String {
    format!("{}\nPath: {}", reason, path.display())
}
