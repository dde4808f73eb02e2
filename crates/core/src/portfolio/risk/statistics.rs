//! Statistical primitives for the risk engine.
//!
//! All statistics run on `Decimal` series. Degenerate inputs (fewer than
//! two observations, zero variance) produce zero rather than an error; the
//! service layer decides when a window is too short to analyze at all.

use rust_decimal::{Decimal, MathematicalOps};

use crate::constants::{SQRT_TRADING_DAYS_APPROX, TRADING_DAYS_PER_YEAR};

pub fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    values.iter().copied().sum::<Decimal>() / Decimal::from(values.len() as u64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std_dev(values: &[Decimal]) -> Decimal {
    if values.len() < 2 {
        return Decimal::ZERO;
    }
    let m = mean(values);
    let sum_sq: Decimal = values.iter().map(|v| (*v - m) * (*v - m)).sum();
    let variance = sum_sq / Decimal::from(values.len() as u64 - 1);
    variance.sqrt().unwrap_or(Decimal::ZERO)
}

/// Sample covariance over the common prefix of the two series.
pub fn sample_covariance(a: &[Decimal], b: &[Decimal]) -> Decimal {
    let n = a.len().min(b.len());
    if n < 2 {
        return Decimal::ZERO;
    }
    let (a, b) = (&a[..n], &b[..n]);
    let (mean_a, mean_b) = (mean(a), mean(b));
    let sum: Decimal = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x - mean_a) * (*y - mean_b))
        .sum();
    sum / Decimal::from(n as u64 - 1)
}

/// Pearson correlation; zero for short series or zero-variance inputs.
pub fn pearson_correlation(a: &[Decimal], b: &[Decimal]) -> Decimal {
    let n = a.len().min(b.len());
    if n < 2 {
        return Decimal::ZERO;
    }
    let (std_a, std_b) = (sample_std_dev(&a[..n]), sample_std_dev(&b[..n]));
    if std_a.is_zero() || std_b.is_zero() {
        return Decimal::ZERO;
    }
    sample_covariance(a, b) / (std_a * std_b)
}

/// Simple daily returns from a price or value path.
///
/// Always one return per step, so series aligned on a shared date grid
/// stay index-aligned after conversion. A step starting from a
/// non-positive level yields a zero return instead of a division blowup.
pub fn daily_returns(levels: &[Decimal]) -> Vec<Decimal> {
    levels
        .windows(2)
        .map(|pair| {
            if pair[0] > Decimal::ZERO {
                (pair[1] - pair[0]) / pair[0]
            } else {
                Decimal::ZERO
            }
        })
        .collect()
}

/// Maximum drawdown over a level path, as a non-positive fraction.
///
/// Returns the deepest peak-to-trough decline; a monotonically rising path
/// yields zero.
pub fn max_drawdown(levels: &[Decimal]) -> Decimal {
    let mut peak = Decimal::MIN;
    let mut worst = Decimal::ZERO;
    for level in levels {
        if *level > peak {
            peak = *level;
        }
        if peak > Decimal::ZERO {
            let drawdown = (*level - peak) / peak;
            if drawdown < worst {
                worst = drawdown;
            }
        }
    }
    worst
}

/// Annualize a daily standard deviation by √252.
pub fn annualize_daily_std(daily_std: Decimal) -> Decimal {
    daily_std * sqrt_trading_days()
}

fn sqrt_trading_days() -> Decimal {
    Decimal::from(TRADING_DAYS_PER_YEAR)
        .sqrt()
        .unwrap_or(SQRT_TRADING_DAYS_APPROX)
}
