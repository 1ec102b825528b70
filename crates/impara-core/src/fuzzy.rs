//! Lenient answer matching.
//!
//! Free-text answers are graded with a Levenshtein distance budget that
//! grows with the length of the expected answer, so a single typo in a short
//! word (or a couple in a long one) still counts.

/// Edit distance between two strings, counted in `char`s.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rolling rows of the DP table.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Maximum accepted distance for an expected answer of `expected_len` chars:
/// `max(1, floor(len * 0.2))`.
pub fn tolerance(expected_len: usize) -> usize {
    (expected_len / 5).max(1)
}

/// Case-insensitive fuzzy comparison of a learner's answer with the expected one.
pub fn is_correct(user: &str, expected: &str) -> bool {
    let user = user.to_lowercase();
    let expected = expected.to_lowercase();
    if user == expected {
        return true;
    }
    levenshtein(&user, &expected) <= tolerance(expected.chars().count())
}
