//! https://en.wikipedia.org/wiki/Algorithms_for_calculating_variance#Parallel_algorithm

use num_traits::cast::ToPrimitive;

/// combine two separate means and m2 values into a single mean and m2
pub fn merge_mean_m2(
	n_a: u64,
	mean_a: f64,
	m2_a: f64,
	n_b: u64,
	mean_b: f64,
	m2_b: f64,
) -> (f64, f64) {
	let n_a = n_a.to_f64().unwrap();
	let n_b = n_b.to_f64().unwrap();
	(
		(((n_a * mean_a) + (n_b * mean_b)) / (n_a + n_b)),
		m2_a + m2_b + (mean_b - mean_a) * (mean_b - mean_a) * (n_a * n_b / (n_a + n_b)),
	)
}

/// Convert an m2 value to the sample variance, with n - 1 in the divisor. The sample variance of fewer than two observations is undefined, so it is None, not zero.
pub fn m2_to_sample_variance(m2: f64, n: u64) -> Option<f64> {
	if n < 2 {
		return None;
	}
	Some(m2 / (n - 1).to_f64().unwrap())
}

#[test]
fn test_merge_mean_m2() {
	// merging [1, 2] with [3, 4] should equal the mean and m2 of [1, 2, 3, 4]
	let (mean_a, m2_a) = merge_mean_m2(1, 1.0, 0.0, 1, 2.0, 0.0);
	let (mean_b, m2_b) = merge_mean_m2(1, 3.0, 0.0, 1, 4.0, 0.0);
	let (mean, m2) = merge_mean_m2(2, mean_a, m2_a, 2, mean_b, m2_b);
	assert!((mean - 2.5).abs() < 1e-9);
	assert!((m2 - 5.0).abs() < 1e-9);
}

#[test]
fn test_m2_to_sample_variance() {
	// [1, 2, 3, 4] has sample variance 5 / 3
	assert!((m2_to_sample_variance(5.0, 4).unwrap() - 5.0 / 3.0).abs() < 1e-9);
	assert!(m2_to_sample_variance(0.0, 1).is_none());
	assert!(m2_to_sample_variance(0.0, 0).is_none());
}
