//! Error type for `TstTree::insert`.
//!
//! Every other operation on the tree is total (absent key in, absent value
//! out; an out-of-range distance or an empty pattern just yields no
//! matches). `insert` is the sole fallible operation, with three rejection
//! reasons checked before any tree walk happens.

use std::fmt;

/// Why an `insert` was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    /// The key argument itself was absent.
    NullKey,
    /// The key's string projection was empty.
    EmptyKey,
    /// The key-string's terminal node is already a key node for a
    /// different, non-equal key.
    Collision {
        /// The key-string both keys share.
        key_string: String,
    },
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::NullKey => write!(f, "insert called with no key"),
            InsertError::EmptyKey => write!(f, "key's string projection is empty"),
            InsertError::Collision { key_string } => {
                write!(f, "key-string {key_string:?} already stored under a different key")
            }
        }
    }
}

impl std::error::Error for InsertError {}
