//! `TstTree`: the owning façade over a root `TstNode`.
//!
//! This is the public surface of the crate. It stringifies incoming keys,
//! enforces the insertion preconditions, and delegates the recursive walk
//! to `TstNode`. It also owns the balanced-build schedule, since that
//! operates on the whole pair list rather than any single node.

use super::error::InsertError;
use super::key::Key;
use super::node::TstNode;

/// A ternary search tree mapping string-projecting keys to values.
///
/// This corresponds to a balanced binary search tree of tries: each node
/// holds one character, and a path down `eq` children spells out a stored
/// key, while `low`/`high` children keep siblings ordered for binary search
/// on the split character.
///
/// # Example
/// ```
/// use tst::TstTree;
/// let mut tree = TstTree::new();
/// tree.insert(Some("FROM"), "value5").unwrap();
/// tree.insert(Some("FORM"), "value3").unwrap();
/// assert_eq!(tree.get(&"FROM"), Some(&"value5"));
/// ```
#[derive(Debug, Clone)]
pub struct TstTree<K: Key, V> {
    root: Option<Box<TstNode<K, V>>>,
}

impl<K: Key, V> TstTree<K, V> {
    /// Creates a new empty ternary search tree.
    ///
    /// # Example
    /// ```
    /// use tst::TstTree;
    /// let tree: TstTree<&str, i32> = TstTree::new();
    /// assert!(tree.keys().is_empty());
    /// ```
    pub fn new() -> Self {
        TstTree { root: None }
    }

    /// Inserts `key` with `value`.
    ///
    /// `key` is `Option<K>` rather than `K` so the null-key precondition is
    /// a reachable branch rather than one the type system makes impossible
    /// to hit; ergonomic callers simply pass `Some(key)`.
    ///
    /// # Arguments
    /// * `key` - The key to insert, or `None` to trigger `NullKey`
    /// * `value` - The value to associate with the key
    ///
    /// # Returns
    /// `Ok(())` on success. Fails with [`InsertError::NullKey`] if `key` is
    /// `None`, [`InsertError::EmptyKey`] if its string projection is empty,
    /// or [`InsertError::Collision`] if the key-string's terminal node
    /// already stores a different, non-equal key. A re-insertion of an
    /// already-stored, equal key simply overwrites its value.
    ///
    /// # Complexity
    /// - Time: O(k + log n) where k is the key length and n the number of
    ///   distinct characters sharing each prefix level
    ///
    /// # Example
    /// ```
    /// use tst::TstTree;
    /// let mut tree = TstTree::new();
    /// tree.insert(Some("CAT"), 1).unwrap();
    /// assert_eq!(tree.get(&"CAT"), Some(&1));
    /// ```
    pub fn insert(&mut self, key: Option<K>, value: V) -> Result<(), InsertError> {
        let key = key.ok_or(InsertError::NullKey)?;
        let key_string = key.key_string().into_owned();
        if key_string.is_empty() {
            return Err(InsertError::EmptyKey);
        }
        let chars: Vec<char> = key_string.chars().collect();

        let terminal = if self.root.is_none() {
            self.root = Some(Box::new(TstNode::new(chars[0])));
            self.root.as_mut().unwrap().insert_chars(&chars, 0)
        } else {
            self.root.as_mut().unwrap().insert_chars(&chars, 0)
        };

        if terminal.is_key {
            let existing = terminal
                .key
                .as_ref()
                .expect("invariant: is_key implies key is present");
            if *existing != key {
                return Err(InsertError::Collision { key_string });
            }
            terminal.value = Some(value);
        } else {
            terminal.key = Some(key);
            terminal.value = Some(value);
            terminal.is_key = true;
        }
        Ok(())
    }

    /// Searches for the value stored under `key`.
    ///
    /// # Arguments
    /// * `key` - The key to search for
    ///
    /// # Returns
    /// A reference to the value if found, `None` otherwise
    ///
    /// # Complexity
    /// - Time: O(k + log n) where k is the key length
    ///
    /// # Example
    /// ```
    /// use tst::TstTree;
    /// let mut tree = TstTree::new();
    /// tree.insert(Some("FROM"), 1).unwrap();
    /// assert_eq!(tree.get(&"FROM"), Some(&1));
    /// assert_eq!(tree.get(&"NOPE"), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let node = self.find_key_node(key)?;
        node.value.as_ref()
    }

    /// Returns true iff `key` is stored (a key node with an equal key).
    ///
    /// # Arguments
    /// * `key` - The key to check for
    ///
    /// # Complexity
    /// - Time: O(k + log n) where k is the key length
    ///
    /// # Example
    /// ```
    /// use tst::TstTree;
    /// let mut tree = TstTree::new();
    /// tree.insert(Some("CAT"), 1).unwrap();
    /// assert!(tree.contains_key(&"CAT"));
    /// assert!(!tree.contains_key(&"DOG"));
    /// ```
    pub fn contains_key(&self, key: &K) -> bool {
        self.find_key_node(key).is_some()
    }

    fn find_key_node(&self, key: &K) -> Option<&TstNode<K, V>> {
        let key_string = key.key_string();
        if key_string.is_empty() {
            return None;
        }
        let chars: Vec<char> = key_string.chars().collect();
        let node = self.root.as_deref()?.find(&chars, 0)?;
        if node.is_key && node.key.as_ref() == Some(key) {
            Some(node)
        } else {
            None
        }
    }

    /// Demotes `key`'s node back to a non-key node, if it was stored.
    ///
    /// This never removes structural nodes: only `key`, `value`, and
    /// `is_key` are cleared, explicitly and in that order, rather than
    /// `is_key` being derived from key presence.
    ///
    /// # Arguments
    /// * `key` - The key to remove
    ///
    /// # Returns
    /// `true` if `key` was stored and has now been demoted, `false` if it
    /// was absent
    ///
    /// # Complexity
    /// - Time: O(k + log n) where k is the key length
    ///
    /// # Example
    /// ```
    /// use tst::TstTree;
    /// let mut tree = TstTree::new();
    /// tree.insert(Some("CAT"), 1).unwrap();
    /// assert!(tree.remove_key(&"CAT"));
    /// assert!(!tree.contains_key(&"CAT"));
    /// assert!(!tree.remove_key(&"CAT"));
    /// ```
    pub fn remove_key(&mut self, key: &K) -> bool {
        let key_string = key.key_string();
        if key_string.is_empty() {
            return false;
        }
        let chars: Vec<char> = key_string.chars().collect();
        let node = match self.root.as_deref_mut().and_then(|n| n.find_mut(&chars, 0)) {
            Some(n) => n,
            None => return false,
        };
        if node.is_key && node.key.as_ref() == Some(key) {
            node.key = None;
            node.value = None;
            node.is_key = false;
            true
        } else {
            false
        }
    }

    /// Returns true iff a path for `prefix` exists in the tree, whether or
    /// not its terminal node is a key node.
    ///
    /// # Arguments
    /// * `prefix` - The character sequence to test
    ///
    /// # Complexity
    /// - Time: O(k + log n) where k is the prefix length
    ///
    /// # Example
    /// ```
    /// use tst::TstTree;
    /// let mut tree = TstTree::new();
    /// tree.insert(Some("CATALOG"), 1).unwrap();
    /// assert!(tree.contains_node("CAT"));
    /// assert!(!tree.contains_key(&"CAT"));
    /// ```
    pub fn contains_node(&self, prefix: &str) -> bool {
        if prefix.is_empty() {
            return false;
        }
        let chars: Vec<char> = prefix.chars().collect();
        self.root
            .as_deref()
            .and_then(|n| n.find(&chars, 0))
            .is_some()
    }

    /// Returns every stored key, in ascending order.
    ///
    /// # Complexity
    /// - Time: O(n) where n is the number of stored keys
    ///
    /// # Example
    /// ```
    /// use tst::TstTree;
    /// let mut tree = TstTree::new();
    /// tree.insert(Some("CAT"), 1).unwrap();
    /// tree.insert(Some("BAT"), 2).unwrap();
    /// assert_eq!(tree.keys(), vec!["BAT", "CAT"]);
    /// ```
    pub fn keys(&self) -> Vec<K> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.collect_keys(&mut out);
        }
        out
    }

    /// Returns every stored value, in key order. Skips any key node whose
    /// value slot is absent; under this crate's `insert`, that never
    /// actually happens, since key and value are always stamped together.
    ///
    /// # Complexity
    /// - Time: O(n) where n is the number of stored keys
    ///
    /// # Example
    /// ```
    /// use tst::TstTree;
    /// let mut tree = TstTree::new();
    /// tree.insert(Some("CAT"), 1).unwrap();
    /// tree.insert(Some("BAT"), 2).unwrap();
    /// assert_eq!(tree.values(), vec![&2, &1]);
    /// ```
    pub fn values(&self) -> Vec<&V> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.collect_values(&mut out);
        }
        out
    }

    /// Returns every stored (key, value) pair, in ascending key order.
    ///
    /// # Complexity
    /// - Time: O(n) where n is the number of stored keys
    ///
    /// # Example
    /// ```
    /// use tst::TstTree;
    /// let mut tree = TstTree::new();
    /// tree.insert(Some("CAT"), 1).unwrap();
    /// let pairs = tree.pairs();
    /// assert_eq!(pairs, vec![("CAT", &1)]);
    /// ```
    pub fn pairs(&self) -> Vec<(K, &V)> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.collect_pairs(&mut out);
        }
        out
    }

    /// Drops every node, recursively, leaving an empty tree. Each child
    /// field is nulled immediately once its own subtree has been released,
    /// consistently across `low`/`eq`/`high`. Implemented with an explicit
    /// work stack rather than recursion, so teardown of very deep trees
    /// does not consume native stack.
    ///
    /// # Complexity
    /// - Time: O(n) where n is the number of stored nodes
    ///
    /// # Example
    /// ```
    /// use tst::TstTree;
    /// let mut tree = TstTree::new();
    /// tree.insert(Some("CAT"), 1).unwrap();
    /// tree.clear();
    /// assert!(tree.keys().is_empty());
    /// ```
    pub fn clear(&mut self) {
        let Some(root) = self.root.take() else {
            return;
        };
        let mut stack = vec![root];
        while let Some(mut node) = stack.pop() {
            if let Some(low) = node.low.take() {
                stack.push(low);
            }
            if let Some(eq) = node.eq.take() {
                stack.push(eq);
            }
            if let Some(high) = node.high.take() {
                stack.push(high);
            }
            // `node` is dropped here with all three children already
            // disowned onto `stack`.
        }
    }

    /// Rebuilds the tree into an approximately median-rooted shape,
    /// preserving every (key, value) pair.
    ///
    /// Extracts the in-order pair list (already sorted, by construction),
    /// clears the tree, then re-inserts through the median-split schedule
    /// `bulk_insert` implements.
    ///
    /// # Complexity
    /// - Time: O(n log n) where n is the number of stored keys
    ///
    /// # Example
    /// ```
    /// use tst::TstTree;
    /// let mut tree = TstTree::new();
    /// for w in ["FROM", "FORM", "FORD", "FOR", "FOUR"] {
    ///     tree.insert(Some(w), 0).unwrap();
    /// }
    /// tree.balance();
    /// assert_eq!(tree.keys(), vec!["FOR", "FORD", "FORM", "FOUR", "FROM"]);
    /// ```
    pub fn balance(&mut self) {
        let mut slots: Vec<Option<(K, V)>> = self.drain_pairs().into_iter().map(Some).collect();
        let end = slots.len() as isize - 1;
        self.build_balanced(&mut slots, 0, end)
            .expect("re-inserting previously-valid pairs cannot fail");
    }

    fn drain_pairs(&mut self) -> Vec<(K, V)> {
        let mut out = Vec::new();
        if let Some(root) = self.root.take() {
            root.drain_into(&mut out);
        }
        out
    }

    /// Inserts `sorted_pairs`, which the caller must already have sorted
    /// ascending by key-string, through the same median-first schedule
    /// `balance` uses, without requiring an existing tree to rebuild from.
    ///
    /// # Arguments
    /// * `sorted_pairs` - Key-value pairs, ascending by key-string
    ///
    /// # Complexity
    /// - Time: O(n log n) where n is `sorted_pairs.len()`
    ///
    /// # Example
    /// ```
    /// use tst::TstTree;
    /// let sorted = vec![("FOR", 1), ("FORD", 2), ("FORM", 3)];
    /// let mut tree = TstTree::new();
    /// tree.bulk_insert(sorted).unwrap();
    /// assert_eq!(tree.get(&"FORM"), Some(&3));
    /// ```
    pub fn bulk_insert(&mut self, sorted_pairs: Vec<(K, V)>) -> Result<(), InsertError> {
        let mut slots: Vec<Option<(K, V)>> = sorted_pairs.into_iter().map(Some).collect();
        let end = slots.len() as isize - 1;
        self.build_balanced(&mut slots, 0, end)
    }

    /// Inserts the median element of `slots[start..=end]` first, then
    /// recurses on the left and right halves. `mid = (end - start + 1) / 2`
    /// (integer division, biased low) is the formula used, not
    /// `(start + end) / 2`.
    fn build_balanced(
        &mut self,
        slots: &mut [Option<(K, V)>],
        start: isize,
        end: isize,
    ) -> Result<(), InsertError> {
        if start > end || end < 0 {
            return Ok(());
        }
        let mid = (end - start + 1) / 2;
        let idx = (start + mid) as usize;
        let (key, value) = slots[idx]
            .take()
            .expect("balanced build visits each index exactly once");
        self.insert(Some(key), value)?;
        self.build_balanced(slots, start, start + mid - 1)?;
        self.build_balanced(slots, start + mid + 1, end)?;
        Ok(())
    }

    /// Returns pairs whose key-string is within Hamming budget `d` of `q`.
    /// Never fails: an empty query or a negative budget simply yields no
    /// matches.
    ///
    /// # Arguments
    /// * `q` - The query string
    /// * `d` - The maximum number of character substitutions allowed
    ///
    /// # Returns
    /// Every stored pair whose key-string is the same length as `q` and
    /// differs from it in at most `d` positions
    ///
    /// # Complexity
    /// - Time: O(log n) per matching character position in the worst case
    ///
    /// # Example
    /// ```
    /// use tst::TstTree;
    /// let mut tree = TstTree::new();
    /// tree.insert(Some("FROM"), 1).unwrap();
    /// tree.insert(Some("FORM"), 2).unwrap();
    /// let mut got: Vec<&str> = tree.near_search("FROM", 1).iter().map(|(k, _)| *k).collect();
    /// got.sort();
    /// assert_eq!(got, vec!["FORM", "FROM"]);
    /// ```
    pub fn near_search(&self, q: &str, d: i64) -> Vec<(K, &V)> {
        if q.is_empty() || d < 0 {
            return Vec::new();
        }
        let chars: Vec<char> = q.chars().collect();
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.near(&chars, 0, d, &mut out);
        }
        out
    }

    /// Returns pairs whose key-string matches `pattern` under `.`/`*`
    /// wildcard semantics (`.` matches any single character, `*` matches
    /// any run of characters). Never fails: an empty pattern yields no
    /// matches.
    ///
    /// # Arguments
    /// * `pattern` - The wildcard pattern to match key-strings against
    ///
    /// # Complexity
    /// - Time: O(log n) per literal character position, with an additional
    ///   fan-out proportional to matching subtree size per `*`
    ///
    /// # Example
    /// ```
    /// use tst::TstTree;
    /// let mut tree = TstTree::new();
    /// tree.insert(Some("FROM"), 1).unwrap();
    /// tree.insert(Some("FORD"), 2).unwrap();
    /// let got: Vec<&str> = tree.partial_key_search("FRO*").iter().map(|(k, _)| *k).collect();
    /// assert_eq!(got, vec!["FROM"]);
    /// ```
    pub fn partial_key_search(&self, pattern: &str) -> Vec<(K, &V)> {
        if pattern.is_empty() {
            return Vec::new();
        }
        let chars: Vec<char> = pattern.chars().collect();
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.partial(&chars, 0, &mut out);
        }
        out
    }
}

impl<K: Key, V> Default for TstTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl<K: Key, V> TstTree<K, V> {
    /// Test-only height probe, see `TstNode::height`.
    pub(crate) fn height(&self) -> usize {
        self.root.as_deref().map_or(0, |n| n.height())
    }
}
