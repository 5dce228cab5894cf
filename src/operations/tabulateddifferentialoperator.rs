use tracing::debug;

use crate::concurrent::synchronizedtabulatedfunction::SynchronizedTabulatedFunction;
use crate::functions::factory::arraytabulatedfunctionfactory::ArrayTabulatedFunctionFactory;
use crate::functions::factory::tabulatedfunctionfactory::TabulatedFunctionFactory;
use crate::functions::functionerror::FunctionError;
use crate::functions::point::Point;
use crate::functions::tabulatedfunction::{
    Grid,
    TabulatedFunction
};
use crate::operations::differentialoperator::DifferentialOperator;
use crate::operations::tabulatedfunctionoperationservice::as_points;

/// Three-point numeric derivative on the sample grid.
///
///   i = 0          forward difference  (p[0], p[1])
///   0 < i < n - 1  central difference  (p[i-1], p[i+1])
///   i = n - 1      backward difference (p[n-2], p[n-1])
///
/// A single sample has derivative 0.
pub fn differentiate(points: &[Point]) -> Vec<f64> {
    let n = points.len();
    if n < 2 {
        return vec![0.0; n];
    }
    (0..n)
        .map(|i| {
            let lhs = if i == 0 { 0 } else { i - 1 };
            let rhs = if i == n - 1 { n - 1 } else { i + 1 };
            Point::slope(&points[lhs], &points[rhs])
        })
        .collect()
}

/// Derives a tabulated function into a new one on the same x-grid; the
/// result's storage variant comes from the factory (array by default).
#[derive(Debug, Clone, Default)]
pub struct TabulatedDifferentialOperator<Fac = ArrayTabulatedFunctionFactory> {
    factory: Fac
}

impl<Fac: TabulatedFunctionFactory> TabulatedDifferentialOperator<Fac> {
    pub fn new(factory: Fac) -> TabulatedDifferentialOperator<Fac> {
        TabulatedDifferentialOperator { factory }
    }

    pub fn factory(&self) -> &Fac {
        &self.factory
    }

    pub fn set_factory(&mut self, factory: Fac) {
        self.factory = factory;
    }

    /// Derivation as one atomic step under the wrapper's lock.
    ///
    /// Takes the wrapper itself, so a function that is already shared is
    /// never wrapped a second time.
    pub fn derive_synchronously<F>(
        &self,
        function: &SynchronizedTabulatedFunction<F>,
    ) -> Result<Fac::Output, FunctionError>
    where
        F: TabulatedFunction,
    {
        function.do_synchronously(|inner| {
            debug!(count = inner.count(), "deriving under lock");
            self.derive(&*inner)
        })
    }
}

impl<'a, Fac, F> DifferentialOperator<&'a F> for TabulatedDifferentialOperator<Fac>
where
    Fac: TabulatedFunctionFactory,
    F: TabulatedFunction + ?Sized,
{
    type Output = Result<Fac::Output, FunctionError>;

    fn derive(&self, function: &'a F) -> Result<Fac::Output, FunctionError> {
        let points = as_points(function);
        let x_values: Vec<f64> = points.iter().map(|pt| pt.x()).collect();
        let y_values = differentiate(&points);
        self.factory.create_on_grid(Grid::of(&x_values), &y_values)
    }
}
