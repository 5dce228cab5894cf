use tracing::warn;

use crate::functions::factory::arraytabulatedfunctionfactory::ArrayTabulatedFunctionFactory;
use crate::functions::factory::tabulatedfunctionfactory::TabulatedFunctionFactory;
use crate::functions::functionerror::FunctionError;
use crate::functions::point::Point;
use crate::functions::tabulatedfunction::{
    Grid,
    TabulatedFunction,
    X_TOLERANCE
};

/// Divisor y-values closer to zero than this are rejected by `divide`.
pub const DIVISOR_TOLERANCE: f64 = 1e-12;

/// Every sample of `function`, in order, using only the iteration contract.
pub fn as_points<F>(function: &F) -> Vec<Point>
where
    F: TabulatedFunction + ?Sized,
{
    function.iter().collect()
}

// ─────────────────────────────────────────────
// TabulatedFunctionOperationService
// ─────────────────────────────────────────────
//
// 兩個函數逐點運算：
//   1. 點數必須相同
//   2. 依迭代順序比對 x，差距需 < X_TOLERANCE
//   3. 結果由 factory 建立，與輸入的儲存方式無關；沿用 a 的 x 網格，不再檢查遞增

/// Pointwise arithmetic between two tabulated functions sharing an x-grid.
///
/// Inputs may use different storage variants; the result type is decided by
/// the configured factory alone.
#[derive(Debug, Clone, Default)]
pub struct TabulatedFunctionOperationService<Fac = ArrayTabulatedFunctionFactory> {
    factory: Fac
}

impl<Fac: TabulatedFunctionFactory> TabulatedFunctionOperationService<Fac> {
    pub fn new(factory: Fac) -> TabulatedFunctionOperationService<Fac> {
        TabulatedFunctionOperationService { factory }
    }

    pub fn factory(&self) -> &Fac {
        &self.factory
    }

    pub fn set_factory(&mut self, factory: Fac) {
        self.factory = factory;
    }

    pub fn add<A, B>(&self, a: &A, b: &B) -> Result<Fac::Output, FunctionError>
    where
        A: TabulatedFunction + ?Sized,
        B: TabulatedFunction + ?Sized,
    {
        self.combine(a, b, |lhs, rhs| lhs + rhs)
    }

    pub fn subtract<A, B>(&self, a: &A, b: &B) -> Result<Fac::Output, FunctionError>
    where
        A: TabulatedFunction + ?Sized,
        B: TabulatedFunction + ?Sized,
    {
        self.combine(a, b, |lhs, rhs| lhs - rhs)
    }

    pub fn multiply<A, B>(&self, a: &A, b: &B) -> Result<Fac::Output, FunctionError>
    where
        A: TabulatedFunction + ?Sized,
        B: TabulatedFunction + ?Sized,
    {
        self.combine(a, b, |lhs, rhs| lhs * rhs)
    }

    /// Fails with `DivisionByZero` when any divisor y is within
    /// `DIVISOR_TOLERANCE` of zero.
    pub fn divide<A, B>(&self, a: &A, b: &B) -> Result<Fac::Output, FunctionError>
    where
        A: TabulatedFunction + ?Sized,
        B: TabulatedFunction + ?Sized,
    {
        let divisors = as_points(b);
        if let Some(index) = divisors.iter().position(|pt| pt.y().abs() < DIVISOR_TOLERANCE) {
            let x = divisors[index].x();
            warn!(index, x, "divisor vanishes");
            return Err(FunctionError::DivisionByZero { index, x });
        }
        self.combine(a, b, |lhs, rhs| lhs / rhs)
    }

    fn combine<A, B>(
        &self,
        a: &A,
        b: &B,
        operation: impl Fn(f64, f64) -> f64,
    ) -> Result<Fac::Output, FunctionError>
    where
        A: TabulatedFunction + ?Sized,
        B: TabulatedFunction + ?Sized,
    {
        let lhs_points = as_points(a);
        let rhs_points = as_points(b);
        check_consistency(&lhs_points, &rhs_points)?;

        let (x_values, y_values): (Vec<f64>, Vec<f64>) = lhs_points
            .iter()
            .zip(rhs_points.iter())
            .map(|(lhs, rhs)| (lhs.x(), operation(lhs.y(), rhs.y())))
            .unzip();
        self.factory.create_on_grid(Grid::of(&x_values), &y_values)
    }
}

fn check_consistency(lhs_points: &[Point], rhs_points: &[Point]) -> Result<(), FunctionError> {
    if lhs_points.len() != rhs_points.len() {
        warn!(left = lhs_points.len(), right = rhs_points.len(), "point counts differ");
        return Err(FunctionError::InconsistentCount {
            left: lhs_points.len(),
            right: rhs_points.len(),
        });
    }
    let mismatch = lhs_points
        .iter()
        .zip(rhs_points.iter())
        .position(|(lhs, rhs)| !((lhs.x() - rhs.x()).abs() < X_TOLERANCE));
    match mismatch {
        Some(index) => {
            warn!(index, "x grids differ");
            Err(FunctionError::InconsistentGrid {
                index,
                left_x: lhs_points[index].x(),
                right_x: rhs_points[index].x(),
            })
        }
        None => Ok(()),
    }
}
