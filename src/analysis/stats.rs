//! Descriptive statistics over log columns.
//!
//! Columns are `Option<f64>` slices; missing values are skipped the same
//! way a spreadsheet would skip blank cells. Two-column statistics only use
//! positions where both sides are present.

use serde::Serialize;

/// Mean of the present values, `None` when there are none.
pub fn mean(values: &[Option<f64>]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Trailing mean over up to `window` values ending at each position.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window.max(1));
            mean(&values[start..=i])
        })
        .collect()
}

/// Positions where both columns hold a value.
pub fn paired(xs: &[Option<f64>], ys: &[Option<f64>]) -> Vec<(f64, f64)> {
    xs.iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect()
}

struct Moments {
    mean_x: f64,
    mean_y: f64,
    sxx: f64,
    syy: f64,
    sxy: f64,
}

fn moments(pairs: &[(f64, f64)]) -> Moments {
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;
    let (sxx, syy, sxy) = pairs.iter().fold((0.0, 0.0, 0.0), |(sxx, syy, sxy), (x, y)| {
        let dx = x - mean_x;
        let dy = y - mean_y;
        (sxx + dx * dx, syy + dy * dy, sxy + dx * dy)
    });
    Moments {
        mean_x,
        mean_y,
        sxx,
        syy,
        sxy,
    }
}

fn is_constant(values: impl Iterator<Item = f64>) -> bool {
    let mut values = values;
    match values.next() {
        Some(first) => values.all(|v| v == first),
        None => true,
    }
}

/// Pearson correlation coefficient.
///
/// Undefined (`None`) with fewer than two paired observations or when
/// either side has zero variance.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs = paired(xs, ys);
    if pairs.len() < 2
        || is_constant(pairs.iter().map(|(x, _)| *x))
        || is_constant(pairs.iter().map(|(_, y)| *y))
    {
        return None;
    }
    let m = moments(&pairs);
    let r = m.sxy / (m.sxx.sqrt() * m.syy.sqrt());
    Some(r.clamp(-1.0, 1.0))
}

/// Least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// `n` evenly spaced points on the line from `from` to `to` inclusive.
    pub fn sample(&self, from: f64, to: f64, n: usize) -> Vec<[f64; 2]> {
        match n {
            0 => Vec::new(),
            1 => vec![[from, self.predict(from)]],
            _ => {
                let step = (to - from) / (n - 1) as f64;
                (0..n)
                    .map(|i| {
                        let x = from + step * i as f64;
                        [x, self.predict(x)]
                    })
                    .collect()
            }
        }
    }
}

/// Ordinary least squares of `ys` on `xs`; `None` when x has no spread.
pub fn linear_fit(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<LinearFit> {
    let pairs = paired(xs, ys);
    if pairs.len() < 2 || is_constant(pairs.iter().map(|(x, _)| *x)) {
        return None;
    }
    let m = moments(&pairs);
    let slope = m.sxy / m.sxx;
    Some(LinearFit {
        slope,
        intercept: m.mean_y - slope * m.mean_x,
    })
}
