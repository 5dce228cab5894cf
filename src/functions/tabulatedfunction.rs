use std::fmt;

use crate::functions::functionerror::FunctionError;
use crate::functions::mathfunction::MathFunction;
use crate::functions::point::Point;

// ─────────────────────────────────────────────
// Tolerance
// ─────────────────────────────────────────────
//
// 兩種儲存方式共用同一個比對容差：
//   index_of_x / index_of_y / apply 的精確命中 / insert 覆寫判斷 /
//   operation service 的 x 網格一致性檢查。
//
// 相鄰點的間距可以小於容差，所以 index_of_x 取容差內「最近」的點，
// 完全相等者優先；不能取第一個命中的點。

pub const X_TOLERANCE: f64 = 1e-10;

pub(crate) mod sealed {
    use crate::functions::point::Point;

    pub trait Sealed {
        /// Sample at an index the caller has already validated.
        fn sample(&self, index: usize) -> Point;
    }
}

/// A function known at `count() >= 2` samples with strictly increasing x,
/// evaluated everywhere else by linear interpolation and extrapolation.
///
/// The set of implementations is closed: the array and linked-list storage
/// variants plus the decorators in this crate.
pub trait TabulatedFunction: MathFunction + sealed::Sealed {
    fn count(&self) -> usize;

    fn x(&self, index: usize) -> Result<f64, FunctionError>;

    fn y(&self, index: usize) -> Result<f64, FunctionError>;

    /// Overwrites a y-value. x-values and their order are untouched.
    fn set_y(&mut self, index: usize, value: f64) -> Result<(), FunctionError>;

    fn index_of_x(&self, x: f64) -> Option<usize>;

    fn index_of_y(&self, y: f64) -> Option<usize>;

    fn left_bound(&self) -> f64;

    fn right_bound(&self) -> f64;

    /// Largest index `i` with `x[i] <= x`.
    ///
    /// `x` below the left bound (or NaN) is an error; `x` at or beyond the
    /// right bound floors to `count() - 1`.
    fn floor_index_of_x(&self, x: f64) -> Result<usize, FunctionError>;

    /// Samples in ascending x order.
    fn iter(&self) -> Box<dyn Iterator<Item = Point> + '_>;

    fn points(&self) -> Vec<Point> {
        self.iter().collect()
    }
}

/// Optional capability: insert a sample, or overwrite y when x is already tabulated.
pub trait Insertable {
    fn insert(&mut self, x: f64, y: f64) -> Result<(), FunctionError>;
}

/// Optional capability: remove the sample at an index.
pub trait Removable {
    fn remove(&mut self, index: usize) -> Result<(), FunctionError>;
}

// ─────────────────────────────────────────────
// Shared evaluation
// ─────────────────────────────────────────────

/// Straight line through two samples, evaluated at `x`.
///
/// A zero-width segment evaluates to the left sample's y.
pub fn interpolate(x: f64, lhs_pt: &Point, rhs_pt: &Point) -> f64 {
    let run = rhs_pt.x() - lhs_pt.x();
    if run == 0.0 {
        return lhs_pt.y();
    }
    lhs_pt.y() + (rhs_pt.y() - lhs_pt.y()) * (x - lhs_pt.x()) / run
}

/// Evaluation used by every storage variant.
///
///   x < left bound  → extrapolate through samples 0 and 1
///   x > right bound → extrapolate through the last two samples
///   x tabulated     → that sample's y, no interpolation
///   otherwise       → interpolate inside the floor segment
pub(crate) fn evaluate<F>(function: &F, x: f64) -> f64
where
    F: TabulatedFunction + ?Sized,
{
    let count = function.count();
    if x < function.left_bound() {
        return interpolate(x, &function.sample(0), &function.sample(1));
    }
    if x > function.right_bound() {
        return interpolate(x, &function.sample(count - 2), &function.sample(count - 1));
    }
    if let Some(index) = function.index_of_x(x) {
        return function.sample(index).y();
    }
    match function.floor_index_of_x(x) {
        Ok(floor) => {
            let floor = floor.min(count - 2);
            interpolate(x, &function.sample(floor), &function.sample(floor + 1))
        }
        Err(_) => f64::NAN,
    }
}

pub(crate) fn matches(lhs: f64, rhs: f64) -> bool {
    (lhs - rhs).abs() < X_TOLERANCE
}

/// Position of the tabulated x closest to `x`, if it lies within `X_TOLERANCE`.
///
/// An exact hit always wins over a nearer-by-tolerance neighbour; on a tie
/// the leftmost sample is kept.
pub(crate) fn closest_match<I>(x_values: I, x: f64) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut closest: Option<(usize, f64)> = None;
    for (index, value) in x_values.into_iter().enumerate() {
        let distance = (value - x).abs();
        if distance < X_TOLERANCE && closest.is_none_or(|(_, best)| distance < best) {
            closest = Some((index, distance));
        }
    }
    closest.map(|(index, _)| index)
}

pub(crate) fn check_index(index: usize, count: usize) -> Result<(), FunctionError> {
    if index < count {
        Ok(())
    } else {
        Err(FunctionError::IndexOutOfBounds { index, count })
    }
}

/// Length checks shared by every constructor, trusted grids included.
pub(crate) fn check_lengths(x_values: &[f64], y_values: &[f64]) -> Result<(), FunctionError> {
    if x_values.len() != y_values.len() {
        return Err(FunctionError::LengthMismatch {
            x_len: x_values.len(),
            y_len: y_values.len(),
        });
    }
    if x_values.len() < 2 {
        return Err(FunctionError::NotEnoughPoints { count: x_values.len() });
    }
    Ok(())
}

/// Construction-time validation of raw sample arrays.
pub(crate) fn check_samples(x_values: &[f64], y_values: &[f64]) -> Result<(), FunctionError> {
    check_lengths(x_values, y_values)?;
    if let Some(&x) = x_values.iter().find(|x| x.is_infinite()) {
        return Err(FunctionError::NotFinite(x));
    }
    // `!(a < b)` also rejects NaN
    match (1..x_values.len()).find(|&i| !(x_values[i - 1] < x_values[i])) {
        Some(index) => Err(FunctionError::NotStrictlyIncreasing { index }),
        None => Ok(()),
    }
}

/// `count` evenly spaced samples of `source` over `[from, to]`.
///
/// Inverted bounds are swapped; `from == to` yields `count` identical samples.
/// Infinite bounds, or bounds too far apart for their distance to be finite,
/// are rejected.
pub(crate) fn sample_grid<S>(
    source: &S,
    from: f64,
    to: f64,
    count: usize,
) -> Result<(Vec<f64>, Vec<f64>), FunctionError>
where
    S: MathFunction + ?Sized,
{
    if count < 2 {
        return Err(FunctionError::NotEnoughPoints { count });
    }
    if from.is_nan() || to.is_nan() {
        return Err(FunctionError::NotANumber);
    }
    if !from.is_finite() || !to.is_finite() || !(to - from).is_finite() {
        return Err(FunctionError::InvalidRange { from, to });
    }
    let (from, to) = if from > to { (to, from) } else { (from, to) };
    let step = (to - from) / (count - 1) as f64;
    let x_values: Vec<f64> = (0..count)
        .map(|i| if i == count - 1 { to } else { from + step * i as f64 })
        .collect();
    let y_values = x_values.iter().map(|&x| source.apply(x)).collect();
    Ok((x_values, y_values))
}

/// x-grid copied from a tabulated function this crate built.
///
/// Its ordering was checked (or produced by sampling) when that function
/// was constructed, so factories build on it without re-checking. A collapsed
/// `from == to` grid stays usable this way. Only the crate can make one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid<'a> {
    x_values: &'a [f64]
}

impl<'a> Grid<'a> {
    pub(crate) fn of(x_values: &'a [f64]) -> Grid<'a> {
        Grid { x_values }
    }

    pub fn x_values(&self) -> &'a [f64] {
        self.x_values
    }
}

/// `Display` body shared by all tabulated functions:
/// a `"<name> size = <count>"` header, then one `[x; y]` line per sample.
pub(crate) fn write_points<F>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    function: &F,
) -> fmt::Result
where
    F: TabulatedFunction + ?Sized,
{
    write!(f, "{} size = {}", name, function.count())?;
    for point in function.iter() {
        write!(f, "\n[{}; {}]", point.x(), point.y())?;
    }
    Ok(())
}

// ─────────────────────────────────────────────
// Boxed trait objects
// ─────────────────────────────────────────────

impl<T: TabulatedFunction + ?Sized> sealed::Sealed for Box<T> {
    fn sample(&self, index: usize) -> Point {
        (**self).sample(index)
    }
}

impl<T: TabulatedFunction + ?Sized> TabulatedFunction for Box<T> {
    fn count(&self) -> usize                                 { (**self).count() }
    fn x(&self, index: usize) -> Result<f64, FunctionError>  { (**self).x(index) }
    fn y(&self, index: usize) -> Result<f64, FunctionError>  { (**self).y(index) }
    fn index_of_x(&self, x: f64) -> Option<usize>            { (**self).index_of_x(x) }
    fn index_of_y(&self, y: f64) -> Option<usize>            { (**self).index_of_y(y) }
    fn left_bound(&self) -> f64                              { (**self).left_bound() }
    fn right_bound(&self) -> f64                             { (**self).right_bound() }

    fn set_y(&mut self, index: usize, value: f64) -> Result<(), FunctionError> {
        (**self).set_y(index, value)
    }

    fn floor_index_of_x(&self, x: f64) -> Result<usize, FunctionError> {
        (**self).floor_index_of_x(x)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        (**self).iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::simplefunctions::{
        IdentityFunction,
        SqrFunction
    };

    #[test]
    fn test_interpolate_inside_and_outside() {
        let lhs = Point::new(1.0, 2.0);
        let rhs = Point::new(3.0, 6.0);
        assert_eq!(interpolate(2.0, &lhs, &rhs), 4.0);
        assert_eq!(interpolate(0.0, &lhs, &rhs), 0.0);
        assert_eq!(interpolate(5.0, &lhs, &rhs), 10.0);
    }

    #[test]
    fn test_interpolate_zero_width_segment() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(interpolate(10.0, &p, &p), 2.0);
    }

    #[test]
    fn test_check_samples() {
        assert!(check_samples(&[0.0, 1.0], &[5.0, 6.0]).is_ok());
        assert_eq!(
            check_samples(&[0.0, 1.0], &[5.0]),
            Err(FunctionError::LengthMismatch { x_len: 2, y_len: 1 })
        );
        assert_eq!(
            check_samples(&[0.0], &[5.0]),
            Err(FunctionError::NotEnoughPoints { count: 1 })
        );
        assert_eq!(
            check_samples(&[0.0, 2.0, 2.0], &[1.0, 1.0, 1.0]),
            Err(FunctionError::NotStrictlyIncreasing { index: 2 })
        );
        assert_eq!(
            check_samples(&[0.0, f64::NAN], &[1.0, 1.0]),
            Err(FunctionError::NotStrictlyIncreasing { index: 1 })
        );
    }

    #[test]
    fn test_sample_grid_swaps_inverted_bounds() {
        let (xs, ys) = sample_grid(&SqrFunction, 4.0, 0.0, 5).unwrap();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(ys, vec![0.0, 1.0, 4.0, 9.0, 16.0]);
    }

    #[test]
    fn test_sample_grid_collapses_equal_bounds() {
        let (xs, ys) = sample_grid(&IdentityFunction, 2.0, 2.0, 3).unwrap();
        assert_eq!(xs, vec![2.0, 2.0, 2.0]);
        assert_eq!(ys, vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_sample_grid_rejects_bad_arguments() {
        assert_eq!(
            sample_grid(&IdentityFunction, 0.0, 1.0, 1),
            Err(FunctionError::NotEnoughPoints { count: 1 })
        );
        assert_eq!(
            sample_grid(&IdentityFunction, f64::NAN, 1.0, 4),
            Err(FunctionError::NotANumber)
        );
    }

    #[test]
    fn test_sample_grid_rejects_unbounded_ranges() {
        assert_eq!(
            sample_grid(&SqrFunction, 0.0, f64::INFINITY, 3),
            Err(FunctionError::InvalidRange { from: 0.0, to: f64::INFINITY })
        );
        assert_eq!(
            sample_grid(&SqrFunction, f64::NEG_INFINITY, 0.0, 3),
            Err(FunctionError::InvalidRange { from: f64::NEG_INFINITY, to: 0.0 })
        );
        // both bounds finite, their distance is not
        assert_eq!(
            sample_grid(&IdentityFunction, -1e308, 1e308, 3),
            Err(FunctionError::InvalidRange { from: -1e308, to: 1e308 })
        );
        let (xs, _) = sample_grid(&IdentityFunction, -1e307, 1e307, 3).unwrap();
        assert_eq!(xs, vec![-1e307, 0.0, 1e307]);
    }

    #[test]
    fn test_check_samples_rejects_infinite_x() {
        assert_eq!(
            check_samples(&[0.0, 1.0, f64::INFINITY], &[0.0, 0.0, 0.0]),
            Err(FunctionError::NotFinite(f64::INFINITY))
        );
        assert_eq!(
            check_samples(&[f64::NEG_INFINITY, 0.0], &[0.0, 0.0]),
            Err(FunctionError::NotFinite(f64::NEG_INFINITY))
        );
        // y is unconstrained
        assert!(check_samples(&[0.0, 1.0], &[f64::INFINITY, f64::NAN]).is_ok());
    }

    #[test]
    fn test_closest_match_prefers_exact_hit() {
        let xs = [0.0, 5e-11, 1.0];
        assert_eq!(closest_match(xs, 0.0), Some(0));
        assert_eq!(closest_match(xs, 5e-11), Some(1));
        assert_eq!(closest_match(xs, 4e-11), Some(1));
        assert_eq!(closest_match(xs, 1.0 + 5e-11), Some(2));
        assert_eq!(closest_match(xs, 0.5), None);
        assert_eq!(closest_match(xs, f64::NAN), None);
        // collapsed grid keeps the leftmost sample
        assert_eq!(closest_match([2.0, 2.0, 2.0], 2.0), Some(0));
    }

    #[test]
    fn test_matches_uses_tolerance() {
        assert!(matches(1.0, 1.0 + 1e-11));
        assert!(!matches(1.0, 1.0 + 1e-9));
    }
}
