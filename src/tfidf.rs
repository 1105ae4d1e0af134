//! Term frequency–inverse document frequency.

/// Weight of a unit occurring `tf` times in a scope, given that `df` of the
/// `num_docs` corpus documents contain it.
///
/// Returns 0 when the document frequency or corpus size is unknown (zero).
///
/// ```
/// use freqscope::tfidf::tf_idf;
///
/// assert!((tf_idf(3, 10, 1000) - 6.0).abs() < 1e-9);
/// assert_eq!(tf_idf(3, 0, 1000), 0.0);
/// ```
pub fn tf_idf(tf: u64, df: u64, num_docs: u64) -> f64 {
    if df == 0 || num_docs == 0 {
        return 0.0;
    }
    tf as f64 * (num_docs as f64 / df as f64).log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tf_idf() {
        assert!((tf_idf(1, 1, 10) - 1.0).abs() < 1e-12);
        assert_eq!(tf_idf(5, 100, 100), 0.0);
        assert_eq!(tf_idf(5, 4, 0), 0.0);
    }
}
