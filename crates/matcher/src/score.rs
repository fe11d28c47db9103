/// Similarity of two normalized strings in `[0, 1]`.
///
/// - identical: `1.0`
/// - one contains the other: `0.8`
/// - otherwise: characters of `a` (counted per occurrence) that appear
///   anywhere in `b`, divided by the longer length.
///
/// This is a coverage heuristic rather than an edit distance. It ignores
/// order, so transpositions score as exact coverage, and a repeated letter in
/// `a` counts every time it occurs. Thresholds are tuned against this exact
/// formula.
pub fn similarity(a: &str, b: &str) -> f32 {
    if a == b {
        return 1.0;
    }
    if a.contains(b) || b.contains(a) {
        return 0.8;
    }

    let longest = a.chars().count().max(b.chars().count());
    let covered = a.chars().filter(|&ch| b.contains(ch)).count();
    covered as f32 / longest as f32
}
