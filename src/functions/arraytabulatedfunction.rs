use std::fmt;

use tracing::debug;

use crate::functions::functionerror::FunctionError;
use crate::functions::mathfunction::MathFunction;
use crate::functions::point::Point;
use crate::functions::tabulatedfunction::{
    Grid,
    Insertable,
    Removable,
    TabulatedFunction,
    check_index,
    check_lengths,
    check_samples,
    closest_match,
    evaluate,
    matches,
    sample_grid,
    sealed
};

/// Tabulated function backed by two parallel contiguous arrays.
///
/// Positional access is O(1) and the floor search is a binary search;
/// `insert` and `remove` shift the tail of both arrays, O(n).
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayTabulatedFunction {
    x_values: Vec<f64>,
    y_values: Vec<f64>
}

impl ArrayTabulatedFunction {
    /// Takes ownership of the sample arrays.
    /// Rejects mismatched lengths, fewer than 2 points and unsorted x.
    pub fn new(x_values: Vec<f64>, y_values: Vec<f64>) -> Result<ArrayTabulatedFunction, FunctionError> {
        check_samples(&x_values, &y_values)?;
        Ok(ArrayTabulatedFunction { x_values, y_values })
    }

    pub fn from_slices(x_values: &[f64], y_values: &[f64]) -> Result<ArrayTabulatedFunction, FunctionError> {
        Self::new(x_values.to_vec(), y_values.to_vec())
    }

    /// Samples `source` at `count` evenly spaced points of `[from, to]`.
    pub fn from_function<S>(
        source: &S,
        from: f64,
        to: f64,
        count: usize,
    ) -> Result<ArrayTabulatedFunction, FunctionError>
    where
        S: MathFunction + ?Sized,
    {
        let (x_values, y_values) = sample_grid(source, from, to, count)?;
        Ok(ArrayTabulatedFunction { x_values, y_values })
    }

    /// Builds on a grid taken from an existing function; ordering is not re-checked.
    pub(crate) fn from_grid(grid: Grid<'_>, y_values: &[f64]) -> Result<ArrayTabulatedFunction, FunctionError> {
        check_lengths(grid.x_values(), y_values)?;
        Ok(ArrayTabulatedFunction {
            x_values: grid.x_values().to_vec(),
            y_values: y_values.to_vec(),
        })
    }

    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    pub fn y_values(&self) -> &[f64] {
        &self.y_values
    }
}

impl sealed::Sealed for ArrayTabulatedFunction {
    fn sample(&self, index: usize) -> Point {
        Point::new(self.x_values[index], self.y_values[index])
    }
}

impl MathFunction for ArrayTabulatedFunction {
    fn apply(&self, x: f64) -> f64 {
        evaluate(self, x)
    }
}

impl TabulatedFunction for ArrayTabulatedFunction {
    fn count(&self) -> usize {
        self.x_values.len()
    }

    fn x(&self, index: usize) -> Result<f64, FunctionError> {
        check_index(index, self.count())?;
        Ok(self.x_values[index])
    }

    fn y(&self, index: usize) -> Result<f64, FunctionError> {
        check_index(index, self.count())?;
        Ok(self.y_values[index])
    }

    fn set_y(&mut self, index: usize, value: f64) -> Result<(), FunctionError> {
        check_index(index, self.count())?;
        self.y_values[index] = value;
        Ok(())
    }

    fn index_of_x(&self, x: f64) -> Option<usize> {
        closest_match(self.x_values.iter().copied(), x)
    }

    fn index_of_y(&self, y: f64) -> Option<usize> {
        self.y_values.iter().position(|&v| matches(v, y))
    }

    fn left_bound(&self) -> f64 {
        self.x_values[0]
    }

    fn right_bound(&self) -> f64 {
        self.x_values[self.x_values.len() - 1]
    }

    fn floor_index_of_x(&self, x: f64) -> Result<usize, FunctionError> {
        let left_bound = self.left_bound();
        if !(x >= left_bound) {
            return Err(FunctionError::BelowLeftBound { x, left_bound });
        }
        Ok(self.x_values.partition_point(|&v| v <= x) - 1)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        Box::new(
            self.x_values
                .iter()
                .zip(self.y_values.iter())
                .map(|(&x, &y)| Point::new(x, y)),
        )
    }
}

impl Insertable for ArrayTabulatedFunction {
    fn insert(&mut self, x: f64, y: f64) -> Result<(), FunctionError> {
        if x.is_nan() {
            return Err(FunctionError::NotANumber);
        }
        if x.is_infinite() {
            return Err(FunctionError::NotFinite(x));
        }
        if let Some(index) = self.index_of_x(x) {
            self.y_values[index] = y;
            return Ok(());
        }
        let index = self.x_values.partition_point(|&v| v < x);
        self.x_values.insert(index, x);
        self.y_values.insert(index, y);
        debug!(x, y, index, count = self.count(), "inserted point");
        Ok(())
    }
}

impl Removable for ArrayTabulatedFunction {
    fn remove(&mut self, index: usize) -> Result<(), FunctionError> {
        let count = self.count();
        check_index(index, count)?;
        if count <= 2 {
            return Err(FunctionError::NotEnoughPoints { count: count - 1 });
        }
        self.x_values.remove(index);
        self.y_values.remove(index);
        debug!(index, count = self.count(), "removed point");
        Ok(())
    }
}

impl fmt::Display for ArrayTabulatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::functions::tabulatedfunction::write_points(f, "ArrayTabulatedFunction", self)
    }
}
