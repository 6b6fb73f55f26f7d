use regex::Regex;
use std::sync::LazyLock;

use crate::domain::utils::id::EdgeId;

static EDGE_INDEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"E(\d+)").expect("edge index pattern is valid"));

/// Numeric index embedded in an edge id (`"E12"` and `"-E12"` give 12).
///
/// Ids without an `E<digits>` group have index 0.
pub fn edge_index(edge: &EdgeId) -> u64 {
    EDGE_INDEX
        .captures(edge.as_str())
        .and_then(|captures| captures.get(1))
        .and_then(|digits| digits.as_str().parse::<u64>().ok())
        .unwrap_or(0)
}

/// Normalized weights `exp(bias * n)` over `edges`.
///
/// A negative bias favors low-numbered edges, a positive one high-numbered edges,
/// zero gives a uniform distribution. Exponents are shifted by their maximum
/// before exponentiation so large indices cannot overflow.
pub fn edge_weights<'a, I>(edges: I, bias: f64) -> Vec<f64>
where
    I: IntoIterator<Item = &'a EdgeId>,
{
    let exponents: Vec<f64> = edges.into_iter().map(|edge| bias * edge_index(edge) as f64).collect();
    let Some(max) = exponents.iter().copied().reduce(f64::max) else {
        return Vec::new();
    };

    let raw: Vec<f64> = exponents.iter().map(|exponent| (exponent - max).exp()).collect();
    let sum: f64 = raw.iter().sum();

    raw.into_iter().map(|weight| weight / sum).collect()
}
