//! Sparse TF-IDF vectors and cosine similarity.

use crate::types::{IdfTable, TermFrequencies, TfIdfVector};

/// Weight each term by its IDF.
///
/// Terms missing from `idf` are left out, which is what makes
/// out-of-vocabulary query words contribute nothing. Zero weights are left
/// out as well. Chunk vectors and query vectors are built the same way.
pub fn vectorize(tf: &TermFrequencies, idf: &IdfTable) -> TfIdfVector {
    tf.iter()
        .filter_map(|(token, freq)| {
            let weight = freq * idf.get(token)?;
            (weight > 0.0).then(|| (token.clone(), weight))
        })
        .collect()
}

/// Euclidean norm.
pub fn norm(vector: &TfIdfVector) -> f64 {
    sum_of_squares(vector).sqrt()
}

/// Squares are summed smallest first so vectors holding the same weights
/// under different keys get bit-identical results.
fn sum_of_squares(vector: &TfIdfVector) -> f64 {
    let mut squares: Vec<f64> = vector.values().map(|w| w * w).collect();
    squares.sort_by(f64::total_cmp);
    squares.iter().sum()
}

/// Cosine similarity of two sparse vectors, in `[0, 1]`.
///
/// Vectors without a shared key, or with a zero norm, score exactly 0. A
/// non-empty vector scores exactly 1 against itself: its dot product sums
/// the same sorted squares as its norm, and the denominator takes a single
/// square root of the product of both sums.
pub fn cosine_similarity(a: &TfIdfVector, b: &TfIdfVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut shared = small
        .iter()
        .filter_map(|(token, wa)| large.get(token).map(|wb| wa * wb))
        .peekable();
    if shared.peek().is_none() {
        return 0.0;
    }
    let mut products: Vec<f64> = shared.collect();
    products.sort_by(f64::total_cmp);
    let dot: f64 = products.iter().sum();

    let denominator = (sum_of_squares(a) * sum_of_squares(b)).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }

    (dot / denominator).clamp(0.0, 1.0)
}
