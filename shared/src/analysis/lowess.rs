//! Locally weighted scatterplot smoothing for the rainfall trendline

/// Share of points in each local neighbourhood, as plotly passes it to
/// statsmodels for `trendline="lowess"`
pub const DEFAULT_FRAC: f64 = 0.6666666;

/// Robustifying passes after the initial fit
pub const DEFAULT_ITERATIONS: usize = 3;

/// Smoothed values of `ys` at each of `xs`
///
/// `xs` must be sorted ascending and the two slices the same length.
pub fn lowess(xs: &[f64], ys: &[f64], frac: f64, iterations: usize) -> Vec<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return ys[..n].to_vec();
    }

    let k = neighbourhood_size(n, frac);
    let mut robustness = vec![1.0; n];
    let mut fitted = fit_pass(&xs[..n], &ys[..n], k, &robustness);

    for _ in 0..iterations {
        let residuals: Vec<f64> = ys[..n]
            .iter()
            .zip(&fitted)
            .map(|(y, f)| (y - f).abs())
            .collect();
        let spread = median(&residuals);
        if spread <= f64::EPSILON {
            break;
        }
        for (weight, residual) in robustness.iter_mut().zip(&residuals) {
            *weight = bisquare(residual / (6.0 * spread));
        }
        fitted = fit_pass(&xs[..n], &ys[..n], k, &robustness);
    }

    fitted
}

/// Points in each local fit: `frac * n` truncated, at least two
fn neighbourhood_size(n: usize, frac: f64) -> usize {
    ((frac * n as f64 + 1e-10) as usize).clamp(2, n)
}

fn fit_pass(xs: &[f64], ys: &[f64], k: usize, robustness: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut left = 0;
    let mut right = k - 1;

    (0..n)
        .map(|i| {
            let x = xs[i];
            // slide the k-wide window while the next point on the right is
            // closer than the leftmost one
            while right + 1 < n && x - xs[left] > xs[right + 1] - x {
                left += 1;
                right += 1;
            }
            let radius = (x - xs[left]).max(xs[right] - x);

            // a window of tied x values takes in every point at that x
            let (mut lo, mut hi) = (left, right);
            if radius == 0.0 {
                while lo > 0 && xs[lo - 1] == x {
                    lo -= 1;
                }
                while hi + 1 < n && xs[hi + 1] == x {
                    hi += 1;
                }
            }

            let weights: Vec<f64> = (lo..=hi)
                .map(|j| {
                    let kernel = if radius > 0.0 {
                        tricube((xs[j] - x).abs() / radius)
                    } else {
                        1.0
                    };
                    kernel * robustness[j]
                })
                .collect();

            local_linear(&xs[lo..=hi], &ys[lo..=hi], &weights, x).unwrap_or(ys[i])
        })
        .collect()
}

/// Weighted least-squares line through the window, evaluated at `x`
fn local_linear(xs: &[f64], ys: &[f64], weights: &[f64], x: f64) -> Option<f64> {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return None;
    }
    let x_mean = xs.iter().zip(weights).map(|(x, w)| x * w).sum::<f64>() / total;
    let y_mean = ys.iter().zip(weights).map(|(y, w)| y * w).sum::<f64>() / total;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for ((xj, yj), w) in xs.iter().zip(ys).zip(weights) {
        sxx += w * (xj - x_mean) * (xj - x_mean);
        sxy += w * (xj - x_mean) * (yj - y_mean);
    }

    if sxx <= f64::EPSILON * total {
        return Some(y_mean);
    }
    Some(y_mean + sxy / sxx * (x - x_mean))
}

fn tricube(u: f64) -> f64 {
    if u >= 1.0 {
        0.0
    } else {
        let t = 1.0 - u * u * u;
        t * t * t
    }
}

fn bisquare(u: f64) -> f64 {
    if u >= 1.0 {
        0.0
    } else {
        let t = 1.0 - u * u;
        t * t
    }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
