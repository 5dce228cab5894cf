use serde::{
    Deserialize,
    Serialize
};

use crate::functions::arraytabulatedfunction::ArrayTabulatedFunction;
use crate::functions::functionerror::FunctionError;
use crate::functions::linkedlisttabulatedfunction::LinkedListTabulatedFunction;
use crate::functions::mathfunction::MathFunction;
use crate::functions::tabulatedfunction::{
    Grid,
    TabulatedFunction
};

/// Builds tabulated functions of one storage variant.
pub trait TabulatedFunctionFactory {
    type Output: TabulatedFunction;

    fn create(&self, x_values: &[f64], y_values: &[f64]) -> Result<Self::Output, FunctionError>;

    /// `count` evenly spaced samples of `source` over `[from, to]`.
    fn create_from_function<S>(
        &self,
        source: &S,
        from: f64,
        to: f64,
        count: usize,
    ) -> Result<Self::Output, FunctionError>
    where
        S: MathFunction + ?Sized;

    /// New y-values on the grid of an existing function, as produced by
    /// pointwise operations and derivatives.
    fn create_on_grid(&self, grid: Grid<'_>, y_values: &[f64]) -> Result<Self::Output, FunctionError> {
        self.create(grid.x_values(), y_values)
    }
}

pub type BoxedTabulatedFunction = Box<dyn TabulatedFunction + Send + Sync>;

/// Storage variant chosen at runtime, e.g. from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabulatedFunctionKind {
    #[default]
    Array,
    LinkedList,
}

impl TabulatedFunctionFactory for TabulatedFunctionKind {
    type Output = BoxedTabulatedFunction;

    fn create(&self, x_values: &[f64], y_values: &[f64]) -> Result<BoxedTabulatedFunction, FunctionError> {
        let function: BoxedTabulatedFunction = match self {
            TabulatedFunctionKind::Array => {
                Box::new(ArrayTabulatedFunction::from_slices(x_values, y_values)?)
            }
            TabulatedFunctionKind::LinkedList => {
                Box::new(LinkedListTabulatedFunction::new(x_values, y_values)?)
            }
        };
        Ok(function)
    }

    fn create_from_function<S>(
        &self,
        source: &S,
        from: f64,
        to: f64,
        count: usize,
    ) -> Result<BoxedTabulatedFunction, FunctionError>
    where
        S: MathFunction + ?Sized,
    {
        let function: BoxedTabulatedFunction = match self {
            TabulatedFunctionKind::Array => {
                Box::new(ArrayTabulatedFunction::from_function(source, from, to, count)?)
            }
            TabulatedFunctionKind::LinkedList => {
                Box::new(LinkedListTabulatedFunction::from_function(source, from, to, count)?)
            }
        };
        Ok(function)
    }

    fn create_on_grid(&self, grid: Grid<'_>, y_values: &[f64]) -> Result<BoxedTabulatedFunction, FunctionError> {
        let function: BoxedTabulatedFunction = match self {
            TabulatedFunctionKind::Array => Box::new(ArrayTabulatedFunction::from_grid(grid, y_values)?),
            TabulatedFunctionKind::LinkedList => {
                Box::new(LinkedListTabulatedFunction::from_grid(grid, y_values)?)
            }
        };
        Ok(function)
    }
}
