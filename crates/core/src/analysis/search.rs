//! Explicit enumeration helpers shared by the exponential searches.

/// Advances `indices` to the next lexicographic `k`-combination of `0..n`,
/// where `k = indices.len()`.
///
/// Returns `false`, leaving `indices` untouched, once the last combination
/// has been reached.
pub(crate) fn next_combination(indices: &mut [usize], n: usize) -> bool {
    let k = indices.len();
    // Rightmost index that can still move right.
    let Some(pivot) = (0..k).rev().find(|&i| indices[i] < n - k + i) else {
        return false;
    };
    indices[pivot] += 1;
    for i in pivot + 1..k {
        indices[i] = indices[i - 1] + 1;
    }
    true
}
