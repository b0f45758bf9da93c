//! Invariants checked over small generated inputs.

use plagscan::{
    Corpus, DetectConfig, Detector, NgramTrie, longest_common_substring, ngram_windows, ngrams,
};

const VOCAB: &[&str] = &[
    "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "and", "cat",
];

/// Deterministic xorshift so failures reproduce without a seed file.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }

    fn sentence(&mut self, max_words: usize) -> Vec<String> {
        let len = self.below(max_words + 1);
        (0..len)
            .map(|_| VOCAB[self.below(VOCAB.len())].to_string())
            .collect()
    }

    fn text(&mut self, alphabet: &[char], max_len: usize) -> String {
        let len = self.below(max_len + 1);
        (0..len).map(|_| alphabet[self.below(alphabet.len())]).collect()
    }
}

#[test]
fn window_larger_than_sequence_yields_nothing() {
    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
    for _ in 0..200 {
        let tokens = rng.sentence(8);
        let n = tokens.len() + 1 + rng.below(3);
        assert!(ngrams(&tokens, n).unwrap().is_empty());
    }
}

#[test]
fn window_count_length_and_order() {
    let mut rng = XorShift(42);
    for _ in 0..200 {
        let tokens = rng.sentence(12);
        for n in 1..=tokens.len() {
            let grams = ngrams(&tokens, n).unwrap();
            assert_eq!(grams.len(), tokens.len() - n + 1);
            assert!(grams.iter().all(|g| g.len() == n));

            let starts: Vec<&String> = grams.iter().map(|g| &g.tokens()[0]).collect();
            let expected: Vec<&String> = tokens[..tokens.len() - n + 1].iter().collect();
            assert_eq!(starts, expected);
        }
    }
}

#[test]
fn trie_round_trip_and_isolation() {
    let mut rng = XorShift(7);
    for _ in 0..100 {
        let tokens = rng.sentence(15);
        let mut trie = NgramTrie::new();
        for window in ngram_windows(&tokens, 3).unwrap() {
            trie.insert(window);
            assert!(trie.search(window) >= 1);
        }

        let foreign = ["zebra", "quagga", "okapi"];
        assert_eq!(trie.search(&foreign), 0);
        for window in ngram_windows(&tokens, 2).unwrap() {
            let probe = [window[0].as_str(), window[1].as_str(), "zebra"];
            assert_eq!(trie.search(&probe), 0);
        }
    }
}

#[test]
fn ratio_bounds_and_threshold_monotonicity() {
    let mut rng = XorShift(0xDEAD_BEEF);
    for _ in 0..30 {
        let corpus: Corpus = (0..6)
            .map(|i| (format!("doc{i}"), rng.sentence(20).join(" ")))
            .collect();
        let input = rng.sentence(10).join(" ");

        let detector = Detector::new(corpus.clone(), DetectConfig::with_params(2, 0.0)).unwrap();
        let sheet = detector.score_all(&input).unwrap();
        for score in &sheet.scores {
            assert!((0.0..=1.0).contains(&score.ratio), "{score:?}");
            if sheet.input_ngrams == 0 {
                assert_eq!(score.ratio, 0.0);
            }
        }

        let mut previous = usize::MAX;
        for step in 0..=20 {
            let threshold = step as f64 / 20.0;
            let detector =
                Detector::new(corpus.clone(), DetectConfig::with_params(2, threshold)).unwrap();
            let flagged = detector.detect(&input).unwrap().result.len();
            assert!(flagged <= previous, "threshold {threshold}");
            previous = flagged;
        }
    }
}

#[test]
fn lcs_symmetry_identity_and_disjointness() {
    let mut rng = XorShift(1234);
    let left = ['a', 'b', 'c', ' '];
    let right = ['x', 'y', 'z', 'é'];
    for _ in 0..300 {
        let a = rng.text(&left, 24);
        let b = rng.text(&left, 24);
        assert_eq!(
            longest_common_substring(&a, &b).chars().count(),
            longest_common_substring(&b, &a).chars().count(),
            "{a:?} / {b:?}"
        );
        assert_eq!(longest_common_substring(&a, &a), a);

        let c = rng.text(&right, 24);
        assert_eq!(longest_common_substring(&a, &c), "");

        let lcs = longest_common_substring(&a, &b);
        assert!(a.contains(&lcs) && b.contains(&lcs));
    }
}
