use std::fmt;

/// The key half of a `(category, key)` entry address.
///
/// Strings and integers are both accepted, mirroring the key shapes UI code
/// actually uses (record ids, indices, slugs).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StateKey {
    Str(String),
    Int(i64),
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateKey::Str(s) => f.write_str(s),
            StateKey::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for StateKey {
    fn from(s: &str) -> Self {
        StateKey::Str(s.to_string())
    }
}

impl From<String> for StateKey {
    fn from(s: String) -> Self {
        StateKey::Str(s)
    }
}

impl From<&String> for StateKey {
    fn from(s: &String) -> Self {
        StateKey::Str(s.clone())
    }
}

impl From<i64> for StateKey {
    fn from(n: i64) -> Self {
        StateKey::Int(n)
    }
}

impl From<i32> for StateKey {
    fn from(n: i32) -> Self {
        StateKey::Int(n as i64)
    }
}

impl From<u32> for StateKey {
    fn from(n: u32) -> Self {
        StateKey::Int(n as i64)
    }
}

impl From<usize> for StateKey {
    fn from(n: usize) -> Self {
        StateKey::Int(n as i64)
    }
}

/// Placeholder rendered into the id when no key was given.
const MISSING_KEY: &str = "none";

/// Build the canonical entry id for a `(category, key)` pair.
///
/// The id is plain concatenation with a `-` separator, so distinct logical
/// pairs can collide: `("a", "b-c")` and `("a-b", "c")` both map to
/// `"a-b-c"`. Callers own their category naming; the registry does not
/// disambiguate.
pub(crate) fn entry_id(category: &str, key: Option<&StateKey>) -> String {
    match key {
        Some(key) => format!("{category}-{key}"),
        None => format!("{category}-{MISSING_KEY}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_and_integer_keys_render_into_the_id() {
        assert_eq!(entry_id("user", Some(&StateKey::from(1))), "user-1");
        assert_eq!(entry_id("user", Some(&StateKey::from("admin"))), "user-admin");
        assert_eq!(entry_id("page", Some(&StateKey::from(-3i64))), "page--3");
    }

    #[test]
    fn missing_key_still_concatenates() {
        assert_eq!(entry_id("theme", None), "theme-none");
    }

    #[test]
    fn distinct_pairs_can_collide() {
        // Known caveat of concatenated ids, kept as specified.
        let a = entry_id("a", Some(&StateKey::from("b-c")));
        let b = entry_id("a-b", Some(&StateKey::from("c")));
        assert_eq!(a, b);
    }
}
