use thiserror::Error;

// ── StatisticError ────────────────────────────────────────────────────────────

/// Conditions under which a statistic has no defined value.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticError {
    /// One of the series is constant, so the denominator is zero.
    #[error("Undefined statistic: series has zero variance")]
    ZeroVariance,

    /// Fewer than two paired observations.
    #[error("Undefined statistic: need at least 2 observations, got {0}")]
    InsufficientData(usize),

    /// The two series have different lengths.
    #[error("Undefined statistic: series lengths differ ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },
}

// ── Pearson correlation ───────────────────────────────────────────────────────

/// Pearson product-moment correlation coefficient of two paired series.
///
/// The result is clamped to `[-1.0, 1.0]` to absorb rounding.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Result<f64, StatisticError> {
    if xs.len() != ys.len() {
        return Err(StatisticError::LengthMismatch {
            left: xs.len(),
            right: ys.len(),
        });
    }
    let n = xs.len();
    if n < 2 {
        return Err(StatisticError::InsufficientData(n));
    }
    if is_constant(xs) || is_constant(ys) {
        return Err(StatisticError::ZeroVariance);
    }

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return Err(StatisticError::ZeroVariance);
    }

    Ok((sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0))
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}
