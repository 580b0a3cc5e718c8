//! Exact ckmeans clustering (Wang & Song dynamic program).
//!
//! Partitions an ascending-sorted sample into k contiguous clusters that
//! minimize the total within-cluster sum of squared deviations. Fully
//! deterministic: ties between equally-optimal splits resolve to the
//! smallest split index.

/// Start index of each cluster, ascending. The first entry is always 0.
/// The cluster count is clamped to the sample size.
pub fn cluster_starts(sorted: &[f64], clusters: usize) -> Vec<usize> {
    let n = sorted.len();
    if n == 0 {
        return Vec::new();
    }
    let k = clusters.clamp(1, n);

    // Prefix sums for O(1) within-segment cost.
    let mut sum = vec![0.0f64; n + 1];
    let mut sumsq = vec![0.0f64; n + 1];
    for (i, &v) in sorted.iter().enumerate() {
        sum[i + 1] = sum[i] + v;
        sumsq[i + 1] = sumsq[i] + v * v;
    }
    let cost = |first: usize, last: usize| -> f64 {
        let len = (last - first + 1) as f64;
        let s = sum[last + 1] - sum[first];
        let sq = sumsq[last + 1] - sumsq[first];
        (sq - s * s / len).max(0.0)
    };

    // dp[q][i]: optimal cost of the first i+1 points in q+1 clusters.
    let mut dp = vec![vec![0.0f64; n]; k];
    let mut back = vec![vec![0usize; n]; k];
    for i in 0..n {
        dp[0][i] = cost(0, i);
    }
    for q in 1..k {
        for i in q..n {
            let mut best = f64::INFINITY;
            let mut best_start = q;
            for j in q..=i {
                let c = dp[q - 1][j - 1] + cost(j, i);
                if c < best {
                    best = c;
                    best_start = j;
                }
            }
            dp[q][i] = best;
            back[q][i] = best_start;
        }
    }

    let mut starts = vec![0usize; k];
    let mut end = n - 1;
    for q in (1..k).rev() {
        let start = back[q][end];
        starts[q] = start;
        end = start - 1;
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::cluster_starts;

    #[test]
    fn separates_obvious_clusters() {
        let data = [1.0, 2.0, 3.0, 10.0, 11.0, 12.0, 100.0];
        assert_eq!(cluster_starts(&data, 3), vec![0, 3, 6]);
    }

    #[test]
    fn single_cluster_spans_everything() {
        assert_eq!(cluster_starts(&[1.0, 5.0, 9.0], 1), vec![0]);
    }

    #[test]
    fn clamps_cluster_count_to_sample_size() {
        assert_eq!(cluster_starts(&[4.0], 5), vec![0]);
        assert_eq!(cluster_starts(&[4.0, 7.0], 5), vec![0, 1]);
    }

    #[test]
    fn repeated_values_stay_together() {
        let data = [1.0, 2.0, 2.0, 2.0, 8.0, 9.0];
        let starts = cluster_starts(&data, 2);
        assert_eq!(starts, vec![0, 4]);
    }

    #[test]
    fn deterministic_for_identical_input() {
        let data = [3.0, 3.0, 6.0, 6.0];
        assert_eq!(cluster_starts(&data, 2), cluster_starts(&data, 2));
    }
}
