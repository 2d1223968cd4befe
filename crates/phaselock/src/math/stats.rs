//! Moment statistics over plain slices.
//!
//! Missing data is NaN. Functions with a `nan_` prefix skip it; the others
//! let it propagate.

// External dependencies
use num_traits::Float;

/// True when every value is NaN (or the slice is empty).
#[inline]
pub fn all_nan<T: Float>(values: &[T]) -> bool {
    values.iter().all(|v| v.is_nan())
}

/// True when at least one value is NaN.
#[inline]
pub fn any_nan<T: Float>(values: &[T]) -> bool {
    values.iter().any(|v| v.is_nan())
}

/// Arithmetic mean; NaN for an empty slice.
#[inline]
pub fn mean<T: Float>(values: &[T]) -> T {
    if values.is_empty() {
        return T::nan();
    }
    let n = T::from(values.len()).unwrap_or(T::one());
    values.iter().fold(T::zero(), |acc, &v| acc + v) / n
}

/// Variance with `ddof` delta degrees of freedom; NaN when `n <= ddof`.
#[inline]
pub fn variance<T: Float>(values: &[T], ddof: usize) -> T {
    let n = values.len();
    if n <= ddof {
        return T::nan();
    }
    let m = mean(values);
    let ss = values.iter().fold(T::zero(), |acc, &v| acc + (v - m) * (v - m));
    ss / T::from(n - ddof).unwrap_or(T::one())
}

/// Standard deviation with `ddof` delta degrees of freedom.
#[inline]
pub fn std_dev<T: Float>(values: &[T], ddof: usize) -> T {
    variance(values, ddof).sqrt()
}

/// Mean over the non-NaN values.
pub fn nan_mean<T: Float>(values: &[T]) -> T {
    let valid: Vec<T> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    mean(&valid)
}

/// Standard deviation over the non-NaN values.
pub fn nan_std<T: Float>(values: &[T], ddof: usize) -> T {
    let valid: Vec<T> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    std_dev(&valid, ddof)
}

/// Sample covariance of two equal-length series with `ddof` correction.
pub fn covariance<T: Float>(a: &[T], b: &[T], ddof: usize) -> T {
    let n = a.len().min(b.len());
    if n <= ddof {
        return T::nan();
    }
    let (ma, mb) = (mean(&a[..n]), mean(&b[..n]));
    let sum = a
        .iter()
        .zip(b)
        .fold(T::zero(), |acc, (&x, &y)| acc + (x - ma) * (y - mb));
    sum / T::from(n - ddof).unwrap_or(T::one())
}

/// Pearson correlation coefficient.
pub fn pearson<T: Float>(a: &[T], b: &[T]) -> T {
    let cov = covariance(a, b, 1);
    let denom = std_dev(a, 1) * std_dev(b, 1);
    cov / denom
}

/// `count` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}
