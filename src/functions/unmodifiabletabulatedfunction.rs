use std::fmt;

use crate::functions::functionerror::FunctionError;
use crate::functions::mathfunction::MathFunction;
use crate::functions::point::Point;
use crate::functions::tabulatedfunction::{
    TabulatedFunction,
    sealed
};

/// Read-only view over a tabulated function: reads delegate, `set_y` fails.
#[derive(Debug, Clone)]
pub struct UnmodifiableTabulatedFunction<F> {
    function: F
}

impl<F: TabulatedFunction> UnmodifiableTabulatedFunction<F> {
    pub fn new(function: F) -> UnmodifiableTabulatedFunction<F> {
        UnmodifiableTabulatedFunction { function }
    }

    pub fn into_inner(self) -> F {
        self.function
    }
}

impl<F: TabulatedFunction> sealed::Sealed for UnmodifiableTabulatedFunction<F> {
    fn sample(&self, index: usize) -> Point {
        self.function.sample(index)
    }
}

impl<F: TabulatedFunction> MathFunction for UnmodifiableTabulatedFunction<F> {
    fn apply(&self, x: f64) -> f64 {
        self.function.apply(x)
    }
}

impl<F: TabulatedFunction> TabulatedFunction for UnmodifiableTabulatedFunction<F> {
    fn count(&self) -> usize                                 { self.function.count() }
    fn x(&self, index: usize) -> Result<f64, FunctionError>  { self.function.x(index) }
    fn y(&self, index: usize) -> Result<f64, FunctionError>  { self.function.y(index) }
    fn index_of_x(&self, x: f64) -> Option<usize>            { self.function.index_of_x(x) }
    fn index_of_y(&self, y: f64) -> Option<usize>            { self.function.index_of_y(y) }
    fn left_bound(&self) -> f64                              { self.function.left_bound() }
    fn right_bound(&self) -> f64                             { self.function.right_bound() }

    fn set_y(&mut self, _index: usize, _value: f64) -> Result<(), FunctionError> {
        Err(FunctionError::Unmodifiable)
    }

    fn floor_index_of_x(&self, x: f64) -> Result<usize, FunctionError> {
        self.function.floor_index_of_x(x)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        self.function.iter()
    }
}

impl<F: TabulatedFunction> fmt::Display for UnmodifiableTabulatedFunction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::functions::tabulatedfunction::write_points(f, "UnmodifiableTabulatedFunction", self)
    }
}
