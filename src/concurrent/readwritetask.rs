use std::sync::Arc;

use tracing::{
    debug,
    info
};

use crate::concurrent::synchronizedtabulatedfunction::SynchronizedTabulatedFunction;
use crate::functions::functionerror::FunctionError;
use crate::functions::tabulatedfunction::TabulatedFunction;

/// Adds one to every y-value of a shared function, reading and writing each
/// point as a single locked step.
pub struct ReadWriteTask<F> {
    function: Arc<SynchronizedTabulatedFunction<F>>
}

impl<F: TabulatedFunction> ReadWriteTask<F> {
    pub fn new(function: Arc<SynchronizedTabulatedFunction<F>>) -> ReadWriteTask<F> {
        ReadWriteTask { function }
    }

    pub fn run(&self) -> Result<(), FunctionError> {
        let count = self.function.count();
        for index in 0..count {
            let (x, before, after) = self.function.do_synchronously(|inner| {
                let x = inner.x(index)?;
                let before = inner.y(index)?;
                inner.set_y(index, before + 1.0)?;
                Ok::<_, FunctionError>((x, before, before + 1.0))
            })?;
            debug!(index, x, before, after, "point incremented");
        }
        info!(count, "read-write task finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::arraytabulatedfunction::ArrayTabulatedFunction;
    use std::thread;

    #[test]
    fn test_concurrent_increments() {
        let inner = ArrayTabulatedFunction::new(vec![0.0, 1.0, 2.0], vec![0.0, 10.0, 20.0]).unwrap();
        let function = Arc::new(SynchronizedTabulatedFunction::new(inner));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let task = ReadWriteTask::new(Arc::clone(&function));
                thread::spawn(move || task.run())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }
        assert_eq!(function.y(0), Ok(4.0));
        assert_eq!(function.y(1), Ok(14.0));
        assert_eq!(function.y(2), Ok(24.0));
        assert_eq!(function.x(2), Ok(2.0));
    }
}
