//! A single ternary node and the recursive algorithms rooted at it.
//!
//! `TstNode` has no notion of "the tree": every method here operates on
//! the subtree the node heads, and `TstTree` (in `tree.rs`) is the thin
//! façade that owns the root and turns incoming keys/patterns into the
//! character sequences these methods walk.

use std::cmp::Ordering;

use super::key::Key;

/// One node of a ternary search tree.
///
/// `split_char` partitions this node's siblings: a `low` child's
/// `split_char` is always less than this node's, and a `high` child's is
/// always greater (invariants 1-2 of the data model). The `eq` child, when
/// present, continues the key-string one character further. A node is a
/// *key node* when `is_key` is set, which only happens once a stored
/// key-string terminates there.
#[derive(Debug, Clone)]
pub struct TstNode<K: Key, V> {
    pub(crate) split_char: char,
    pub(crate) is_key: bool,
    pub(crate) key: Option<K>,
    pub(crate) value: Option<V>,
    pub(crate) low: Option<Box<TstNode<K, V>>>,
    pub(crate) eq: Option<Box<TstNode<K, V>>>,
    pub(crate) high: Option<Box<TstNode<K, V>>>,
}

impl<K: Key, V> TstNode<K, V> {
    /// Builds a fresh, non-key node that splits on `split_char`.
    pub(crate) fn new(split_char: char) -> Self {
        TstNode {
            split_char,
            is_key: false,
            key: None,
            value: None,
            low: None,
            eq: None,
            high: None,
        }
    }

    /// Walks (creating nodes as needed) the path for `chars[i..]` and
    /// returns the terminal node for the whole string.
    ///
    /// The caller is responsible for stamping the returned node's `key`,
    /// `value`, and `is_key` fields; this only builds/finds the path.
    pub(crate) fn insert_chars(&mut self, chars: &[char], i: usize) -> &mut TstNode<K, V> {
        let c = chars[i];
        match c.cmp(&self.split_char) {
            Ordering::Less => self
                .low
                .get_or_insert_with(|| Box::new(TstNode::new(c)))
                .insert_chars(chars, i),
            Ordering::Greater => self
                .high
                .get_or_insert_with(|| Box::new(TstNode::new(c)))
                .insert_chars(chars, i),
            Ordering::Equal => {
                if i == chars.len() - 1 {
                    self
                } else {
                    let next_char = chars[i + 1];
                    self.eq
                        .get_or_insert_with(|| Box::new(TstNode::new(next_char)))
                        .insert_chars(chars, i + 1)
                }
            }
        }
    }

    /// Plain BST-over-trie descent for `chars[i..]`: no node creation.
    /// Returns the terminal node the walk reaches, regardless of whether
    /// it is a key node (callers test that themselves).
    pub(crate) fn find(&self, chars: &[char], i: usize) -> Option<&TstNode<K, V>> {
        let c = chars[i];
        match c.cmp(&self.split_char) {
            Ordering::Less => self.low.as_deref().and_then(|n| n.find(chars, i)),
            Ordering::Greater => self.high.as_deref().and_then(|n| n.find(chars, i)),
            Ordering::Equal => {
                if i == chars.len() - 1 {
                    Some(self)
                } else {
                    self.eq.as_deref().and_then(|n| n.find(chars, i + 1))
                }
            }
        }
    }

    /// Mutable counterpart of `find`, used by `remove_key` to demote a key
    /// node in place.
    pub(crate) fn find_mut(&mut self, chars: &[char], i: usize) -> Option<&mut TstNode<K, V>> {
        let c = chars[i];
        match c.cmp(&self.split_char) {
            Ordering::Less => self.low.as_deref_mut().and_then(|n| n.find_mut(chars, i)),
            Ordering::Greater => self.high.as_deref_mut().and_then(|n| n.find_mut(chars, i)),
            Ordering::Equal => {
                if i == chars.len() - 1 {
                    Some(self)
                } else {
                    self.eq.as_deref_mut().and_then(|n| n.find_mut(chars, i + 1))
                }
            }
        }
    }

    /// In-order (low, self-if-key, eq, high) collection of stored keys.
    pub(crate) fn collect_keys(&self, out: &mut Vec<K>) {
        if let Some(low) = &self.low {
            low.collect_keys(out);
        }
        if self.is_key {
            if let Some(k) = &self.key {
                out.push(k.clone());
            }
        }
        if let Some(eq) = &self.eq {
            eq.collect_keys(out);
        }
        if let Some(high) = &self.high {
            high.collect_keys(out);
        }
    }

    /// In-order collection of stored values. Unlike `collect_keys`, this
    /// skips a node whenever its value slot is absent, even if `is_key` is
    /// set.
    pub(crate) fn collect_values<'a>(&'a self, out: &mut Vec<&'a V>) {
        if let Some(low) = &self.low {
            low.collect_values(out);
        }
        if let Some(v) = &self.value {
            out.push(v);
        }
        if let Some(eq) = &self.eq {
            eq.collect_values(out);
        }
        if let Some(high) = &self.high {
            high.collect_values(out);
        }
    }

    /// In-order collection of (key, value) pairs for every key node.
    pub(crate) fn collect_pairs<'a>(&'a self, out: &mut Vec<(K, &'a V)>) {
        if let Some(low) = &self.low {
            low.collect_pairs(out);
        }
        if self.is_key {
            if let (Some(k), Some(v)) = (&self.key, &self.value) {
                out.push((k.clone(), v));
            }
        }
        if let Some(eq) = &self.eq {
            eq.collect_pairs(out);
        }
        if let Some(high) = &self.high {
            high.collect_pairs(out);
        }
    }

    /// Consumes the subtree, moving every (key, value) pair into `out` in
    /// the same in-order sequence `collect_pairs` would visit. Used by
    /// `TstTree::balance` to extract the sorted pair list before rebuilding;
    /// ownership moves rather than clones because `V` is not required to
    /// be `Clone`.
    pub(crate) fn drain_into(mut self, out: &mut Vec<(K, V)>) {
        if let Some(low) = self.low.take() {
            low.drain_into(out);
        }
        if self.is_key {
            if let (Some(k), Some(v)) = (self.key.take(), self.value.take()) {
                out.push((k, v));
            }
        }
        if let Some(eq) = self.eq.take() {
            eq.drain_into(out);
        }
        if let Some(high) = self.high.take() {
            high.drain_into(out);
        }
    }

    /// Hamming-style near-neighbor search.
    ///
    /// `q` is the full query as characters, `i` the current index into it,
    /// and `d` the remaining substitution budget. Emission and the `eq`
    /// descent are mutually exclusive at a given node: once a key is
    /// emitted here, this node's `eq` subtree is not searched further for
    /// this query. That trade-off is deliberate, not an oversight: it keeps
    /// the recursion from re-visiting work a sibling branch already covers.
    pub(crate) fn near<'a>(&'a self, q: &[char], i: usize, d: i64, out: &mut Vec<(K, &'a V)>) {
        if d < 0 {
            return;
        }
        let c = q[i];

        if d > 0 || c < self.split_char {
            if let Some(low) = &self.low {
                low.near(q, i, d, out);
            }
        }

        let tail_len = (q.len() - i) as i64;
        if self.is_key && tail_len <= d {
            if let (Some(k), Some(v)) = (&self.key, &self.value) {
                out.push((k.clone(), v));
            }
        } else if let Some(eq) = &self.eq {
            let next_i = if i < q.len() - 1 { i + 1 } else { i };
            let next_d = if c == self.split_char { d } else { d - 1 };
            eq.near(q, next_i, next_d, out);
        }

        if d > 0 || c > self.split_char {
            if let Some(high) = &self.high {
                high.near(q, i, d, out);
            }
        }
    }

    /// Wildcard pattern match. `pattern[i]` is `.` (any one character), `*`
    /// (handed off to `glob`), or a literal.
    pub(crate) fn partial<'a>(&'a self, pattern: &[char], i: usize, out: &mut Vec<(K, &'a V)>) {
        let c = pattern[i];
        if c == '*' {
            self.glob(pattern, i + 1, out);
            return;
        }

        if c == '.' || c < self.split_char {
            if let Some(low) = &self.low {
                low.partial(pattern, i, out);
            }
        }
        if c == '.' || c == self.split_char {
            if i < pattern.len() - 1 {
                if let Some(eq) = &self.eq {
                    eq.partial(pattern, i + 1, out);
                }
            } else if self.is_key {
                if let (Some(k), Some(v)) = (&self.key, &self.value) {
                    out.push((k.clone(), v));
                }
            }
        }
        if c == '.' || c > self.split_char {
            if let Some(high) = &self.high {
                high.partial(pattern, i, out);
            }
        }
    }

    /// Resumes pattern matching after a `*` at `pattern[i..]`. A terminal
    /// `*` enumerates the whole subtree; otherwise every descendant whose
    /// `split_char` could start matching the remainder is tried as a fresh
    /// anchor.
    fn glob<'a>(&'a self, pattern: &[char], i: usize, out: &mut Vec<(K, &'a V)>) {
        if i == pattern.len() {
            self.collect_pairs(out);
            return;
        }
        if pattern[i] == '*' {
            self.glob(pattern, i + 1, out);
            return;
        }

        let next = pattern[i];
        let mut anchors = Vec::new();
        self.collect_matching(next, &mut anchors);

        let sub = &pattern[i..];
        for anchor in anchors {
            anchor.partial(sub, 0, out);
        }
    }

    /// Pre-order collection of every node in this subtree (self-inclusive)
    /// whose `split_char` equals `next`, or all nodes when `next == '.'`.
    fn collect_matching<'a>(&'a self, next: char, out: &mut Vec<&'a TstNode<K, V>>) {
        if next == '.' || self.split_char == next {
            out.push(self);
        }
        if let Some(low) = &self.low {
            low.collect_matching(next, out);
        }
        if let Some(eq) = &self.eq {
            eq.collect_matching(next, out);
        }
        if let Some(high) = &self.high {
            high.collect_matching(next, out);
        }
    }
}

#[cfg(test)]
impl<K: Key, V> TstNode<K, V> {
    /// Height of this subtree, counting nodes. Test-only: used to verify
    /// the balanced-build schedule actually flattens the tree.
    pub(crate) fn height(&self) -> usize {
        let low_h = self.low.as_deref().map_or(0, |n| n.height());
        let eq_h = self.eq.as_deref().map_or(0, |n| n.height());
        let high_h = self.high.as_deref().map_or(0, |n| n.height());
        1 + low_h.max(eq_h).max(high_h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn stamp(node: &mut TstNode<String, i32>, key: &str, value: i32) {
        node.key = Some(key.to_string());
        node.value = Some(value);
        node.is_key = true;
    }

    #[test]
    fn insert_chars_creates_eq_chain_for_single_word() {
        let mut root = TstNode::new('C');
        let cs = chars("CAT");
        let terminal = root.insert_chars(&cs, 0);
        stamp(terminal, "CAT", 1);

        let found = root.find(&cs, 0).unwrap();
        assert!(found.is_key);
        assert_eq!(found.key.as_deref(), Some("CAT"));
    }

    #[test]
    fn insert_chars_branches_low_and_high_on_first_character() {
        let mut root = TstNode::new('M');
        let low_word = chars("APPLE");
        let high_word = chars("ZEBRA");
        stamp(root.insert_chars(&low_word, 0), "APPLE", 1);
        stamp(root.insert_chars(&high_word, 0), "ZEBRA", 2);

        assert!(root.low.is_some());
        assert!(root.high.is_some());
        assert_eq!(root.low.as_ref().unwrap().split_char, 'A');
        assert_eq!(root.high.as_ref().unwrap().split_char, 'Z');
    }

    #[test]
    fn collect_pairs_is_sorted_in_order() {
        let mut root = TstNode::new('F');
        for (word, v) in [("FROM", 1), ("FORM", 2), ("FORD", 3), ("FOR", 4), ("FOUR", 5)] {
            let cs = chars(word);
            stamp(root.insert_chars(&cs, 0), word, v);
        }
        let mut out = Vec::new();
        root.collect_pairs(&mut out);
        let words: Vec<&str> = out.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(words, vec!["FOR", "FORD", "FORM", "FOUR", "FROM"]);
    }

    #[test]
    fn near_search_finds_single_substitution() {
        let mut root = TstNode::new('F');
        for (word, v) in [("FROM", 1), ("FORM", 2)] {
            let cs = chars(word);
            stamp(root.insert_chars(&cs, 0), word, v);
        }
        let q = chars("FROM");
        let mut out = Vec::new();
        root.near(&q, 0, 1, &mut out);
        let words: Vec<&str> = out.iter().map(|(k, _)| k.as_str()).collect();
        assert!(words.contains(&"FROM"));
        assert!(words.contains(&"FORM"));
    }

    #[test]
    fn partial_search_dot_wildcard() {
        let mut root = TstNode::new('F');
        for (word, v) in [("FROM", 1), ("FORM", 2), ("FOUR", 3)] {
            let cs = chars(word);
            stamp(root.insert_chars(&cs, 0), word, v);
        }
        let pattern = chars("F..M");
        let mut out = Vec::new();
        root.partial(&pattern, 0, &mut out);
        let mut words: Vec<&str> = out.iter().map(|(k, _)| k.as_str()).collect();
        words.sort();
        assert_eq!(words, vec!["FORM", "FROM"]);
    }

    #[test]
    fn partial_search_star_wildcard_terminal() {
        let mut root = TstNode::new('F');
        for (word, v) in [("FROM", 1), ("FORD", 2)] {
            let cs = chars(word);
            stamp(root.insert_chars(&cs, 0), word, v);
        }
        let pattern = chars("FRO*");
        let mut out = Vec::new();
        root.partial(&pattern, 0, &mut out);
        let words: Vec<&str> = out.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(words, vec!["FROM"]);
    }

    #[test]
    fn drain_into_moves_every_pair() {
        let mut root = TstNode::new('A');
        for (word, v) in [("AB", 1), ("AC", 2)] {
            let cs = chars(word);
            stamp(root.insert_chars(&cs, 0), word, v);
        }
        let mut out = Vec::new();
        root.drain_into(&mut out);
        let mut words: Vec<String> = out.into_iter().map(|(k, _)| k).collect();
        words.sort();
        assert_eq!(words, vec!["AB".to_string(), "AC".to_string()]);
    }
}
