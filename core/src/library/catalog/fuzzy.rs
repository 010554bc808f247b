//! Approximate string matching on a 0-100 scale
//!
//! Scores are built from the indel similarity of two strings
//! (`2 * LCS / (len_a + len_b)`), combined the usual "weighted ratio" way:
//!
//! - similar lengths: best of the plain ratio and the token-sorted ratio
//! - very different lengths: best of the plain ratio and the partial
//!   (best-window) ratios, scaled down by how lopsided the lengths are
//!
//! All lengths are counted in `char`s.

/// A ranked candidate from [`extract_top`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Position in the candidate list
    pub index: usize,
    /// Similarity, 0-100
    pub score: u8,
}

/// Rank `choices` against `query`, best first, and keep at most `limit`.
///
/// Ties keep the order of `choices` (the sort is stable), so results are
/// deterministic for a given input.
pub fn extract_top(query: &str, choices: &[String], limit: usize) -> Vec<Match> {
    let mut matches: Vec<Match> = choices
        .iter()
        .enumerate()
        .map(|(index, choice)| Match {
            index,
            score: weighted_ratio(query, choice),
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches.truncate(limit);
    matches
}

/// Weighted combination of the ratios below.
pub fn weighted_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let base = similarity(&a, &b);
    let (shorter, longer) = if a.len() <= b.len() { (a.len(), b.len()) } else { (b.len(), a.len()) };
    let len_ratio = longer as f64 / shorter as f64;

    let sorted_a = sorted_tokens(&a);
    let sorted_b = sorted_tokens(&b);

    let best = if len_ratio < 1.5 {
        base.max(similarity(&sorted_a, &sorted_b) * 0.95)
    } else {
        let scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
        base.max(partial_similarity(&a, &b) * scale)
            .max(partial_similarity(&sorted_a, &sorted_b) * 0.95 * scale)
    };
    to_score(best)
}

/// Plain indel similarity of the whole strings.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    to_score(similarity(&a, &b))
}

/// Best similarity between the shorter string and any equally long window
/// of the longer one.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    to_score(partial_similarity(&a, &b))
}

/// Similarity after sorting the whitespace-separated tokens of both strings.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    to_score(similarity(&sorted_tokens(&a), &sorted_tokens(&b)))
}

fn to_score(similarity: f64) -> u8 {
    (similarity * 100.0).round().clamp(0.0, 100.0) as u8
}

/// `2 * LCS / (len_a + len_b)`, in `0.0..=1.0`.
fn similarity(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    (2 * lcs_len(a, b)) as f64 / total as f64
}

fn partial_similarity(a: &[char], b: &[char]) -> f64 {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return 0.0;
    }
    if short.len() == long.len() {
        return similarity(short, long);
    }

    let mut best = 0.0f64;
    for window in long.windows(short.len()) {
        best = best.max(similarity(short, window));
        if best >= 1.0 {
            break;
        }
    }
    best
}

/// Length of the longest common subsequence (two-row DP).
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                std::cmp::max(prev[j + 1], curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn sorted_tokens(s: &[char]) -> Vec<char> {
    let text: String = s.iter().collect();
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ").chars().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lcs_len() {
        let a: Vec<char> = "mario".chars().collect();
        let b: Vec<char> = "zelda".chars().collect();
        assert_eq!(lcs_len(&a, &b), 1);
        assert_eq!(lcs_len(&a, &a), 5);
        assert_eq!(lcs_len(&a, &[]), 0);
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio("mario", "mario"), 100);
        assert_eq!(ratio("mario", "zelda"), 20);
        assert_eq!(ratio("abc", "xyz"), 0);
    }

    #[test]
    fn test_partial_ratio_finds_substring() {
        assert_eq!(partial_ratio("mario", "mario kart nintendo"), 100);
        assert_eq!(partial_ratio("kart", "mario kart"), 100);
    }

    #[test]
    fn test_token_sort_ignores_word_order() {
        assert_eq!(token_sort_ratio("kart mario", "mario kart"), 100);
    }

    #[test]
    fn test_weighted_ratio_prefers_substring_in_long_key() {
        assert_eq!(weighted_ratio("mario", "mario kart nintendo"), 90);
    }

    #[test]
    fn test_weighted_ratio_empty_is_zero() {
        assert_eq!(weighted_ratio("", "mario"), 0);
        assert_eq!(weighted_ratio("mario", ""), 0);
    }

    #[test]
    fn test_weighted_ratio_unrelated_is_low() {
        assert!(weighted_ratio("xyzzy", "mario kart nintendo") < 35);
        assert!(weighted_ratio("xyzzy", "zelda") < 35);
        assert!(weighted_ratio("mario", "zelda") < 35);
    }

    #[test]
    fn test_extract_top_orders_by_score() {
        let choices = vec![
            "zelda".to_string(),
            "mario kart".to_string(),
            "mario".to_string(),
        ];
        let top = extract_top("mario", &choices, 10);
        assert_eq!(top[0], Match { index: 2, score: 100 });
        assert_eq!(top[1].index, 1);
        assert_eq!(top[2].index, 0);
    }

    #[test]
    fn test_extract_top_ties_keep_input_order() {
        let choices = vec!["tetris".to_string(), "tetris".to_string(), "tetris".to_string()];
        let top = extract_top("tetris", &choices, 2);
        assert_eq!(top.iter().map(|m| m.index).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_extract_top_respects_limit() {
        let choices: Vec<String> = (0..20).map(|i| format!("game {}", i)).collect();
        assert_eq!(extract_top("game", &choices, 3).len(), 3);
        assert!(extract_top("game", &[], 3).is_empty());
    }
}
