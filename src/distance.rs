/// Classic Levenshtein edit distance over full dynamic-programming table.
///
/// Symmetric, zero iff the strings are equal, and exact for all inputs
/// including empty strings (distance equals the other string's length).
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());

    let mut table = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=n {
        table[0][j] = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let substitution = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            table[i][j] = (table[i - 1][j] + 1)
                .min(table[i][j - 1] + 1)
                .min(table[i - 1][j - 1] + substitution);
        }
    }

    table[m][n]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_strings_are_zero() {
        assert_eq!(levenshtein("paypal", "paypal"), 0);
        assert_eq!(levenshtein("", ""), 0);
    }

    #[test]
    fn test_symmetric() {
        assert_eq!(
            levenshtein("kitten", "sitting"),
            levenshtein("sitting", "kitten")
        );
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn test_empty_string_is_other_length() {
        assert_eq!(levenshtein("", "amazon"), 6);
        assert_eq!(levenshtein("amazon", ""), 6);
    }

    #[test]
    fn test_single_substitution() {
        assert_eq!(levenshtein("paypa1", "paypal"), 1);
        assert_eq!(levenshtein("micros0ft", "microsoft"), 1);
    }

    #[test]
    fn test_multibyte_characters() {
        assert_eq!(levenshtein("аpple", "apple"), 1); // Cyrillic а
    }
}
