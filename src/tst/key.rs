//! The key-domain abstraction: two capabilities, string projection and
//! equality.
//!
//! The original container is written against a dynamically-typed key that
//! merely needs to stringify and compare for equality. Rust expresses that
//! as a trait instead of runtime duck-typing: anything that can hand back a
//! non-empty string view of itself and be compared with `==` can be stored
//! as a TST key.

use std::borrow::Cow;

/// A value that can act as a ternary search tree key.
///
/// `key_string` is the projection used for the character-by-character walk;
/// it must be stable for a given key (the same key always yields the same
/// string) and, per the container's contract, non-empty for any key that is
/// actually inserted. `Clone` lets enumeration methods (`keys`, `pairs`)
/// hand back owned keys without borrowing from the tree.
pub trait Key: Clone + PartialEq {
    /// Returns this key's string projection.
    fn key_string(&self) -> Cow<'_, str>;
}

impl Key for String {
    fn key_string(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl Key for &'static str {
    fn key_string(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_key_string_borrows() {
        let k = String::from("FROM");
        assert_eq!(k.key_string(), "FROM");
    }

    #[test]
    fn str_key_string_borrows() {
        let k: &'static str = "FROM";
        assert_eq!(k.key_string(), "FROM");
    }
}
