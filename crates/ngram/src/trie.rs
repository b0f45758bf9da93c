//! Prefix trie over token n-grams.
//!
//! Nodes live in a single arena (`Vec<TrieNode>`) and refer to their
//! children by index, so a whole trie is freed in one deallocation and
//! shared token prefixes are stored once. Lookup walks at most `n` edges and
//! does not depend on how many n-grams were inserted.

use fxhash::FxHashMap;

use crate::generator::Ngram;

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: FxHashMap<Box<str>, NodeId>,
    /// Number of inserted n-grams whose prefix ends exactly here.
    count: u64,
}

/// Per-document containment index with multiplicity counts.
#[derive(Debug, Clone)]
pub struct NgramTrie {
    nodes: Vec<TrieNode>,
    inserted: u64,
}

impl NgramTrie {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            inserted: 0,
        }
    }

    /// Build a trie from owned n-grams.
    pub fn from_ngrams<I>(ngrams: I) -> Self
    where
        I: IntoIterator<Item = Ngram>,
    {
        ngrams.into_iter().collect()
    }

    /// Insert one n-gram, creating missing nodes and bumping the count of
    /// every node on its path. Empty n-grams are ignored.
    pub fn insert<S: AsRef<str>>(&mut self, ngram: &[S]) {
        if ngram.is_empty() {
            return;
        }
        let mut node = ROOT;
        for token in ngram {
            let token = token.as_ref();
            let next = match self.nodes[node].children.get(token).copied() {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.insert(token.into(), child);
                    child
                }
            };
            self.nodes[next].count += 1;
            node = next;
        }
        self.inserted += 1;
    }

    /// Count stored at the end of `ngram`'s path, or `None` when some token
    /// along the path was never inserted.
    pub fn lookup<S: AsRef<str>>(&self, ngram: &[S]) -> Option<u64> {
        let mut node = ROOT;
        for token in ngram {
            node = *self.nodes[node].children.get(token.as_ref())?;
        }
        Some(self.nodes[node].count)
    }

    /// How many inserted n-grams share `ngram` as a prefix; 0 if absent.
    pub fn search<S: AsRef<str>>(&self, ngram: &[S]) -> u64 {
        self.lookup(ngram).unwrap_or(0)
    }

    pub fn contains<S: AsRef<str>>(&self, ngram: &[S]) -> bool {
        self.search(ngram) > 0
    }

    /// Number of n-grams inserted, duplicates included.
    pub fn len(&self) -> u64 {
        self.inserted
    }

    pub fn is_empty(&self) -> bool {
        self.inserted == 0
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for NgramTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Ngram> for NgramTrie {
    fn from_iter<I: IntoIterator<Item = Ngram>>(iter: I) -> Self {
        let mut trie = Self::new();
        for ngram in iter {
            trie.insert(ngram.tokens());
        }
        trie
    }
}

impl<'a, S: AsRef<str> + 'a> FromIterator<&'a [S]> for NgramTrie {
    fn from_iter<I: IntoIterator<Item = &'a [S]>>(iter: I) -> Self {
        let mut trie = Self::new();
        for window in iter {
            trie.insert(window);
        }
        trie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{ngram_windows, ngrams};

    #[test]
    fn new_trie_is_empty() {
        let trie = NgramTrie::new();
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);
        assert_eq!(trie.search(&["a"]), 0);
    }

    #[test]
    fn insert_then_search_finds_ngram() {
        let mut trie = NgramTrie::new();
        trie.insert(&["the", "quick", "brown"]);
        assert!(trie.search(&["the", "quick", "brown"]) >= 1);
        assert!(trie.contains(&["the", "quick", "brown"]));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn never_inserted_ngram_returns_zero() {
        let mut trie = NgramTrie::new();
        trie.insert(&["the", "quick", "brown"]);
        assert_eq!(trie.search(&["the", "quick", "fox"]), 0);
        assert_eq!(trie.search(&["quick", "brown", "the"]), 0);
        assert_eq!(trie.lookup(&["lazy", "dog", "sleeps"]), None);
    }

    #[test]
    fn duplicate_insertions_accumulate() {
        let mut trie = NgramTrie::new();
        trie.insert(&["a", "b", "c"]);
        trie.insert(&["a", "b", "c"]);
        trie.insert(&["a", "b", "d"]);
        assert_eq!(trie.search(&["a", "b", "c"]), 2);
        assert_eq!(trie.search(&["a", "b", "d"]), 1);
        assert_eq!(trie.len(), 3);
    }

    #[test]
    fn prefix_counts_reflect_shared_prefixes() {
        let mut trie = NgramTrie::new();
        trie.insert(&["a", "b", "c"]);
        trie.insert(&["a", "b", "d"]);
        trie.insert(&["a", "x", "y"]);
        assert_eq!(trie.search(&["a"]), 3);
        assert_eq!(trie.search(&["a", "b"]), 2);
        assert_eq!(trie.search(&["a", "x"]), 1);
    }

    #[test]
    fn shared_prefixes_share_nodes() {
        let mut trie = NgramTrie::new();
        trie.insert(&["a", "b", "c"]);
        trie.insert(&["a", "b", "d"]);
        // root + a + b + c + d
        assert_eq!(trie.node_count(), 5);
    }

    #[test]
    fn empty_ngram_is_ignored() {
        let mut trie = NgramTrie::new();
        let empty: [&str; 0] = [];
        trie.insert(&empty);
        assert!(trie.is_empty());
        assert_eq!(trie.search(&empty), 0);
    }

    #[test]
    fn search_does_not_mutate() {
        let mut trie = NgramTrie::new();
        trie.insert(&["a", "b"]);
        let before = trie.node_count();
        for _ in 0..3 {
            trie.search(&["x", "y"]);
            trie.search(&["a", "b"]);
        }
        assert_eq!(trie.node_count(), before);
        assert_eq!(trie.search(&["a", "b"]), 1);
    }

    #[test]
    fn every_inserted_window_is_found() {
        let tokens: Vec<String> = "the quick brown fox jumps over the lazy dog the quick end"
            .split(' ')
            .map(String::from)
            .collect();
        let trie: NgramTrie = ngram_windows(&tokens, 3).unwrap().collect();
        for gram in ngrams(&tokens, 3).unwrap() {
            assert!(trie.search(gram.tokens()) >= 1, "missing {gram}");
        }
        assert_eq!(trie.len(), (tokens.len() - 2) as u64);
        assert_eq!(trie.search(&["the", "quick", "brown"]), 1);
        assert_eq!(trie.search(&["the", "quick"]), 2);
    }

    #[test]
    fn from_owned_ngrams() {
        let grams = ngrams(&["a", "b", "c", "a", "b", "c"], 3).unwrap();
        let trie = NgramTrie::from_ngrams(grams);
        assert_eq!(trie.search(&["a", "b", "c"]), 2);
        assert_eq!(trie.search(&["b", "c", "a"]), 1);
    }
}
