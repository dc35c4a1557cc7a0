//! Reduction of a column series to its statistics record
//!
//! Every intermediate value is created at the precision of the series. Any
//! divisor that can legitimately be zero (n = 1, zero variance) short-circuits
//! to zero, so a record is always produced once a column holds one value.

use std::cmp::Ordering;

use rug::Float;

use crate::app::models::{ColumnSeries, StatisticsRecord};

/// Sums of powers of deviations from the mean
struct DeviationSums {
    squares: Float,
    cubes: Float,
    fourths: Float,
}

/// Reduce a series to its statistics, or `None` if it holds no values
pub fn compute_statistics(series: ColumnSeries) -> Option<StatisticsRecord> {
    if series.is_empty() {
        return None;
    }

    let prec = series.precision();
    let (mut values, sum) = series.into_parts();
    let count = values.len();
    let n = Float::with_val(prec, count as u64);

    let mean = Float::with_val(prec, &sum / &n);
    let sums = deviation_sums(&values, &mean, prec);

    let sample_variance = if count > 1 {
        let n_minus_one = Float::with_val(prec, &n - 1u32);
        Float::with_val(prec, &sums.squares / &n_minus_one)
    } else {
        Float::with_val(prec, 0)
    };
    let sample_std_dev = Float::with_val(prec, sample_variance.sqrt_ref());

    let population_variance = Float::with_val(prec, &sums.squares / &n);
    let population_std_dev = Float::with_val(prec, population_variance.sqrt_ref());

    let (skewness, kurtosis) = if population_variance.is_zero() {
        (Float::with_val(prec, 0), Float::with_val(prec, 0))
    } else {
        let third_moment = Float::with_val(prec, &sums.cubes / &n);
        let mut skewness = Float::with_val(prec, &third_moment / &population_variance);
        skewness /= &population_std_dev;

        let fourth_moment = Float::with_val(prec, &sums.fourths / &n);
        let variance_squared = Float::with_val(prec, population_variance.square_ref());
        let mut kurtosis = Float::with_val(prec, &fourth_moment / &variance_squared);
        kurtosis -= 3u32;

        (skewness, kurtosis)
    };

    let (skewness_f64, kurtosis_f64) = float_shape(&values);

    // Stable sort; parsed values are always finite.
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let min = values[0].clone();
    let max = values[count - 1].clone();
    let median = median_of_sorted(&values, prec);
    let range = Float::with_val(prec, &max - &min);

    Some(StatisticsRecord {
        count,
        sum,
        mean,
        sample_variance,
        sample_std_dev,
        population_variance,
        population_std_dev,
        min,
        max,
        median,
        range,
        skewness,
        skewness_f64,
        kurtosis,
        kurtosis_f64,
    })
}

fn deviation_sums(values: &[Float], mean: &Float, prec: u32) -> DeviationSums {
    let mut sums = DeviationSums {
        squares: Float::with_val(prec, 0),
        cubes: Float::with_val(prec, 0),
        fourths: Float::with_val(prec, 0),
    };

    for value in values {
        let diff = Float::with_val(prec, value - mean);
        let square = Float::with_val(prec, diff.square_ref());
        let cube = Float::with_val(prec, &square * &diff);
        let fourth = Float::with_val(prec, square.square_ref());

        sums.squares += &square;
        sums.cubes += &cube;
        sums.fourths += &fourth;
    }

    sums
}

/// Middle element, or the mean of the two middle elements
fn median_of_sorted(sorted: &[Float], prec: u32) -> Float {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Float::with_val(prec, &sorted[mid])
    } else {
        let mut pair = Float::with_val(prec, &sorted[mid - 1] + &sorted[mid]);
        pair /= 2u32;
        pair
    }
}

/// Adjusted Fisher-Pearson skewness and sample excess kurtosis in `f64`
///
/// Skewness needs three values and kurtosis four; below that, or for a
/// constant series, the result is 0.
fn float_shape(values: &[Float]) -> (f64, f64) {
    let count = values.len();
    let n = count as f64;
    let xs: Vec<f64> = values.iter().map(Float::to_f64).collect();
    let mean = xs.iter().sum::<f64>() / n;

    let (m2, m3, m4) = xs.iter().fold((0.0, 0.0, 0.0), |(m2, m3, m4), x| {
        let d = x - mean;
        let d2 = d * d;
        (m2 + d2, m3 + d2 * d, m4 + d2 * d2)
    });
    let (m2, m3, m4) = (m2 / n, m3 / n, m4 / n);

    if m2 == 0.0 {
        return (0.0, 0.0);
    }

    let skewness = if count < 3 {
        0.0
    } else {
        let g1 = m3 / m2.powf(1.5);
        g1 * (n * (n - 1.0)).sqrt() / (n - 2.0)
    };

    let kurtosis = if count < 4 {
        0.0
    } else {
        let g2 = m4 / (m2 * m2) - 3.0;
        (n - 1.0) / ((n - 2.0) * (n - 3.0)) * ((n + 1.0) * g2 + 6.0)
    };

    (skewness, kurtosis)
}
