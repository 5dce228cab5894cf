use crate::functions::factory::tabulatedfunctionfactory::TabulatedFunctionFactory;
use crate::functions::functionerror::FunctionError;
use crate::functions::linkedlisttabulatedfunction::LinkedListTabulatedFunction;
use crate::functions::mathfunction::MathFunction;
use crate::functions::tabulatedfunction::Grid;

#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedListTabulatedFunctionFactory;

impl TabulatedFunctionFactory for LinkedListTabulatedFunctionFactory {
    type Output = LinkedListTabulatedFunction;

    fn create(&self, x_values: &[f64], y_values: &[f64]) -> Result<LinkedListTabulatedFunction, FunctionError> {
        LinkedListTabulatedFunction::new(x_values, y_values)
    }

    fn create_from_function<S>(
        &self,
        source: &S,
        from: f64,
        to: f64,
        count: usize,
    ) -> Result<LinkedListTabulatedFunction, FunctionError>
    where
        S: MathFunction + ?Sized,
    {
        LinkedListTabulatedFunction::from_function(source, from, to, count)
    }

    fn create_on_grid(&self, grid: Grid<'_>, y_values: &[f64]) -> Result<LinkedListTabulatedFunction, FunctionError> {
        LinkedListTabulatedFunction::from_grid(grid, y_values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::point::Point;
    use crate::functions::simplefunctions::ConstantFunction;
    use crate::functions::tabulatedfunction::TabulatedFunction;

    #[test]
    fn test_create() {
        let f = LinkedListTabulatedFunctionFactory.create(&[1.0, 2.0], &[3.0, 4.0]).unwrap();
        assert_eq!(f.points(), vec![Point::new(1.0, 3.0), Point::new(2.0, 4.0)]);
    }

    #[test]
    fn test_create_from_function() {
        let f = LinkedListTabulatedFunctionFactory
            .create_from_function(&ConstantFunction::new(2.0), -1.0, 1.0, 5)
            .unwrap();
        assert_eq!(f.count(), 5);
        assert_eq!(f.index_of_y(2.0), Some(0));
        assert_eq!(f.x(1), Ok(-0.5));
    }
}
