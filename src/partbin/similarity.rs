//! String similarity for duplicate detection.
//!
//! Scores a pair of part numbers as `2·M / T`, where `M` is the total
//! length of matched characters found by repeatedly taking the longest
//! common block (then recursing into the unmatched pieces on either side)
//! and `T` is the combined length of both strings. 1.0 means identical,
//! 0.0 means nothing in common.

use std::collections::HashMap;

/// A candidate surfaced by [`best_match`].
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub candidate: String,
    pub score: f64,
}

pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_len(&a, &b) as f64 / total as f64
}

/// Single best candidate scoring at least `cutoff` against `target`.
/// Ties keep the earliest candidate.
pub fn best_match<'a, I>(target: &str, candidates: I, cutoff: f64) -> Option<Match>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<Match> = None;
    for candidate in candidates {
        let score = ratio(target, candidate);
        if score < cutoff {
            continue;
        }
        if best.as_ref().map(|m| score > m.score).unwrap_or(true) {
            best = Some(Match {
                candidate: candidate.to_string(),
                score,
            });
        }
    }
    best
}

fn matched_len(a: &[char], b: &[char]) -> usize {
    let (i, j, len) = longest_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matched_len(&a[..i], &b[..j]) + matched_len(&a[i + len..], &b[j + len..])
}

/// Earliest-starting longest common block of `a` and `b`, as
/// `(start_in_a, start_in_b, length)`.
fn longest_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        positions.entry(c).or_default().push(j);
    }

    let mut best = (0, 0, 0);
    // run_lengths[j] = length of the common block ending at a[i], b[j]
    let mut run_lengths: HashMap<usize, usize> = HashMap::new();
    for (i, c) in a.iter().enumerate() {
        let mut next_runs: HashMap<usize, usize> = HashMap::new();
        if let Some(js) = positions.get(c) {
            for &j in js {
                let len = j
                    .checked_sub(1)
                    .and_then(|prev| run_lengths.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_runs.insert(j, len);
                if len > best.2 {
                    best = (i + 1 - len, j + 1 - len, len);
                }
            }
        }
        run_lengths = next_runs;
    }
    best
}
