use std::sync::Arc;

use tracing::{
    debug,
    info
};

use crate::concurrent::synchronizedtabulatedfunction::SynchronizedTabulatedFunction;
use crate::functions::functionerror::FunctionError;
use crate::functions::tabulatedfunction::TabulatedFunction;

/// Doubles every y-value of a shared function.
///
/// Each point's read-multiply-write runs under the wrapper lock, so several
/// tasks on the same function never lose an update: `n` tasks scale every
/// y-value by exactly `2^n`.
pub struct MultiplyingTask<F> {
    function: Arc<SynchronizedTabulatedFunction<F>>
}

impl<F: TabulatedFunction> MultiplyingTask<F> {
    pub fn new(function: Arc<SynchronizedTabulatedFunction<F>>) -> MultiplyingTask<F> {
        MultiplyingTask { function }
    }

    pub fn run(&self) -> Result<(), FunctionError> {
        let count = self.function.count();
        for index in 0..count {
            self.function.do_synchronously(|inner| {
                let y = inner.y(index)?;
                inner.set_y(index, y * 2.0)
            })?;
            debug!(index, "point doubled");
        }
        info!(count, "multiplying task finished");
        Ok(())
    }
}
