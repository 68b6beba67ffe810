//! Descriptive statistics helpers
//!
//! Missing values (`None`) are skipped the way spreadsheet tools skip blank
//! cells: they count towards group sizes but not towards means or extrema.

use std::collections::BTreeMap;

/// Round to two decimals, ties to even
#[inline]
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Arithmetic mean of the present values
#[must_use]
pub fn mean(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / f64::from(count))
}

/// Largest present value
#[must_use]
pub fn max(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    values.into_iter().flatten().reduce(f64::max)
}

/// Smallest present value
#[must_use]
pub fn min(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    values.into_iter().flatten().reduce(f64::min)
}

/// Number of present values
#[must_use]
pub fn count(values: impl IntoIterator<Item = Option<f64>>) -> u64 {
    values.into_iter().flatten().map(|_| 1).sum()
}

/// Size of the top `fraction` of `n` items, rounded half to even
///
/// Small groups round down to an empty cohort (5 × 10% = 0.5 → 0).
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn cohort_size(n: usize, fraction: f64) -> usize {
    (n as f64 * fraction).round_ties_even().max(0.0) as usize
}

/// Mean of the top `fraction` of ratings
///
/// Ratings are sorted descending with a stable sort and blanks last; the
/// cohort size counts every row, blanks included.
#[must_use]
pub fn top_cohort_mean(ratings: &[Option<f64>], fraction: f64) -> Option<f64> {
    let size = cohort_size(ratings.len(), fraction);
    let mut sorted = ratings.to_vec();
    sorted.sort_by(|a, b| match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    mean(sorted.into_iter().take(size))
}

/// Group items by key, keys in ascending order
pub fn group_by<I, T, K, F>(items: I, key: F) -> BTreeMap<K, Vec<T>>
where
    I: IntoIterator<Item = T>,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_matches_numpy_rounding() {
        assert_eq!(round2(4.0), 4.0);
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
    }

    #[test]
    fn mean_skips_blanks() {
        assert_eq!(mean([Some(1.0), None, Some(3.0)]), Some(2.0));
        assert_eq!(mean([None, None]), None);
        assert_eq!(mean(std::iter::empty()), None);
    }

    #[test]
    fn extrema_and_count() {
        let values = [Some(2.5), None, Some(4.0), Some(1.0)];
        assert_eq!(max(values), Some(4.0));
        assert_eq!(min(values), Some(1.0));
        assert_eq!(count(values), 3);
    }

    #[test]
    fn cohort_sizes_round_half_to_even() {
        assert_eq!(cohort_size(4, 0.10), 0);
        assert_eq!(cohort_size(5, 0.10), 0);
        assert_eq!(cohort_size(15, 0.10), 2);
        assert_eq!(cohort_size(25, 0.10), 2);
        assert_eq!(cohort_size(10, 0.20), 2);
        assert_eq!(cohort_size(0, 0.20), 0);
    }

    #[test]
    fn top_cohort_takes_highest_ratings() {
        let ratings: Vec<Option<f64>> = (1..=10).map(|r| Some(f64::from(r))).collect();
        assert_eq!(top_cohort_mean(&ratings, 0.10), Some(10.0));
        assert_eq!(top_cohort_mean(&ratings, 0.20), Some(9.5));
    }

    #[test]
    fn top_cohort_of_small_group_is_blank() {
        assert_eq!(top_cohort_mean(&[Some(5.0), Some(4.0)], 0.10), None);
    }

    #[test]
    fn blanks_sort_last() {
        let ratings = [None, Some(1.0), None, Some(3.0), Some(2.0)];
        // 5 × 40% = 2 rows: 3.0 and 2.0
        assert_eq!(top_cohort_mean(&ratings, 0.40), Some(2.5));
    }

    #[test]
    fn group_by_orders_keys() {
        let groups = group_by(vec![("b", 1), ("a", 2), ("b", 3)], |(k, _)| *k);
        let keys: Vec<_> = groups.keys().copied().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(groups["b"], vec![("b", 1), ("b", 3)]);
    }
}
