use crate::functions::arraytabulatedfunction::ArrayTabulatedFunction;
use crate::functions::factory::tabulatedfunctionfactory::TabulatedFunctionFactory;
use crate::functions::functionerror::FunctionError;
use crate::functions::mathfunction::MathFunction;
use crate::functions::tabulatedfunction::Grid;

#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayTabulatedFunctionFactory;

impl TabulatedFunctionFactory for ArrayTabulatedFunctionFactory {
    type Output = ArrayTabulatedFunction;

    fn create(&self, x_values: &[f64], y_values: &[f64]) -> Result<ArrayTabulatedFunction, FunctionError> {
        ArrayTabulatedFunction::from_slices(x_values, y_values)
    }

    fn create_from_function<S>(
        &self,
        source: &S,
        from: f64,
        to: f64,
        count: usize,
    ) -> Result<ArrayTabulatedFunction, FunctionError>
    where
        S: MathFunction + ?Sized,
    {
        ArrayTabulatedFunction::from_function(source, from, to, count)
    }

    fn create_on_grid(&self, grid: Grid<'_>, y_values: &[f64]) -> Result<ArrayTabulatedFunction, FunctionError> {
        ArrayTabulatedFunction::from_grid(grid, y_values)
    }
}
