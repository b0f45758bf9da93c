//! Longest common substring over characters.
//!
//! Classic suffix-length table: cell `(i, j)` is the length of the common
//! run ending at `a[i - 1]` and `b[j - 1]`. Only the previous row is kept,
//! so memory is O(|b|) while time stays O(|a| * |b|).
//!
//! Ties go to the run with the lowest end index in `a`, then the lowest in
//! `b`: the table is scanned row-major and only a strictly longer run
//! replaces the current best.

use crate::types::{MatchError, OversizePolicy, INPUT_DOC_ID, REFERENCE_DOC_ID};

/// Size bound applied before the quadratic table is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LcsBound {
    /// Maximum characters per text; `0` disables the bound.
    pub max_chars: usize,
    pub policy: OversizePolicy,
}

impl LcsBound {
    pub fn new(max_chars: usize, policy: OversizePolicy) -> Self {
        Self { max_chars, policy }
    }

    pub fn unbounded() -> Self {
        Self::new(0, OversizePolicy::Truncate)
    }
}

/// Longest run of characters appearing identically in both texts.
///
/// Case-sensitive. Returns an empty string when either text is empty or no
/// character is shared. The result is always a slice of `a`.
pub fn longest_common_substring(a: &str, b: &str) -> String {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (len, end) = longest_run(&a_chars, &b_chars);
    a_chars[end - len..end].iter().collect()
}

/// [`longest_common_substring`] with a size bound on both texts.
///
/// Under [`OversizePolicy::Reject`] an oversized text fails with
/// [`MatchError::InputTooLarge`]; `a` is reported as the input and `b` as
/// the reference. Under [`OversizePolicy::Truncate`] each text is cut to its
/// first `max_chars` characters.
pub fn bounded_longest_common_substring(
    a: &str,
    b: &str,
    bound: LcsBound,
) -> Result<String, MatchError> {
    if bound.max_chars == 0 {
        return Ok(longest_common_substring(a, b));
    }

    let a_chars = bounded_chars(a, INPUT_DOC_ID, bound)?;
    let b_chars = bounded_chars(b, REFERENCE_DOC_ID, bound)?;
    let (len, end) = longest_run(&a_chars, &b_chars);
    Ok(a_chars[end - len..end].iter().collect())
}

fn bounded_chars(text: &str, doc_id: &str, bound: LcsBound) -> Result<Vec<char>, MatchError> {
    match bound.policy {
        OversizePolicy::Truncate => Ok(text.chars().take(bound.max_chars).collect()),
        OversizePolicy::Reject => {
            let chars: Vec<char> = text.chars().collect();
            if chars.len() > bound.max_chars {
                return Err(MatchError::InputTooLarge {
                    doc_id: doc_id.to_string(),
                    len: chars.len(),
                    max: bound.max_chars,
                });
            }
            Ok(chars)
        }
    }
}

/// Length and exclusive end index in `a` of the longest common run.
fn longest_run(a: &[char], b: &[char]) -> (usize, usize) {
    if a.is_empty() || b.is_empty() {
        return (0, 0);
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    let (mut best, mut end) = (0usize, 0usize);

    for (i, &ca) in a.iter().enumerate() {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                let run = prev[j] + 1;
                if run > best {
                    best = run;
                    end = i + 1;
                }
                run
            } else {
                0
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    (best, end)
}
