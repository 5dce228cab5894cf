use std::fmt;
use std::sync::{
    Mutex,
    MutexGuard,
    PoisonError
};

use tracing::trace;

use crate::functions::functionerror::FunctionError;
use crate::functions::mathfunction::MathFunction;
use crate::functions::point::Point;
use crate::functions::tabulatedfunction::{
    Insertable,
    Removable,
    TabulatedFunction,
    sealed
};

// ─────────────────────────────────────────────
// SynchronizedTabulatedFunction
// ─────────────────────────────────────────────
//
// 每個 wrapper 持有一把 Mutex，所有讀寫都經過同一把鎖。
//
// iter() 在鎖內複製全部點後即釋放鎖，回傳的 iterator 走的是快照：
//   - 之後對函數的修改不影響它
//   - 迭代期間不持鎖，不會阻塞寫入者
//
// do_synchronously() 的 closure 拿到的是 &mut F（已上鎖的內部函數），
// 而不是 wrapper 本身；Mutex 不可重入，從 closure 內再呼叫 wrapper 的方法會自鎖。

/// Tabulated function that can be shared across threads: every operation
/// takes the wrapper's single lock for the duration of the call.
///
/// Share it as `Arc<SynchronizedTabulatedFunction<F>>`. Once wrapped, the
/// inner function is reachable only through the lock.
pub struct SynchronizedTabulatedFunction<F> {
    function: Mutex<F>
}

impl<F: TabulatedFunction> SynchronizedTabulatedFunction<F> {
    pub fn new(function: F) -> SynchronizedTabulatedFunction<F> {
        SynchronizedTabulatedFunction { function: Mutex::new(function) }
    }

    pub fn into_inner(self) -> F {
        self.function
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // A poisoned lock is taken over. Single-call operations never leave the
    // samples half-written, but a closure that panics inside
    // `do_synchronously` keeps whatever writes it made before the panic.
    fn lock(&self) -> MutexGuard<'_, F> {
        self.function.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `operation` on the inner function while holding the lock for its
    /// whole duration, making composite read-then-write sequences atomic.
    ///
    /// `operation` must not call back into this wrapper: the lock is not re-entrant.
    /// If it panics, writes made before the panic stay in place and the
    /// wrapper remains usable.
    pub fn do_synchronously<R>(&self, operation: impl FnOnce(&mut F) -> R) -> R {
        let mut guard = self.lock();
        trace!("entering synchronized section");
        operation(&mut guard)
    }

    pub fn count(&self) -> usize {
        self.lock().count()
    }

    pub fn x(&self, index: usize) -> Result<f64, FunctionError> {
        self.lock().x(index)
    }

    pub fn y(&self, index: usize) -> Result<f64, FunctionError> {
        self.lock().y(index)
    }

    pub fn set_y(&self, index: usize, value: f64) -> Result<(), FunctionError> {
        self.lock().set_y(index, value)
    }

    pub fn index_of_x(&self, x: f64) -> Option<usize> {
        self.lock().index_of_x(x)
    }

    pub fn index_of_y(&self, y: f64) -> Option<usize> {
        self.lock().index_of_y(y)
    }

    pub fn left_bound(&self) -> f64 {
        self.lock().left_bound()
    }

    pub fn right_bound(&self) -> f64 {
        self.lock().right_bound()
    }

    pub fn floor_index_of_x(&self, x: f64) -> Result<usize, FunctionError> {
        self.lock().floor_index_of_x(x)
    }

    /// Snapshot of all samples taken under the lock.
    pub fn points(&self) -> Vec<Point> {
        self.lock().points()
    }

    /// Iterator over a snapshot; independent of later writes and of other iterators.
    pub fn iter(&self) -> std::vec::IntoIter<Point> {
        self.points().into_iter()
    }
}

impl<F: TabulatedFunction + Insertable> SynchronizedTabulatedFunction<F> {
    pub fn insert(&self, x: f64, y: f64) -> Result<(), FunctionError> {
        self.lock().insert(x, y)
    }
}

impl<F: TabulatedFunction + Removable> SynchronizedTabulatedFunction<F> {
    pub fn remove(&self, index: usize) -> Result<(), FunctionError> {
        self.lock().remove(index)
    }
}

impl<F: TabulatedFunction> From<F> for SynchronizedTabulatedFunction<F> {
    fn from(function: F) -> Self {
        SynchronizedTabulatedFunction::new(function)
    }
}

impl<F: TabulatedFunction> sealed::Sealed for SynchronizedTabulatedFunction<F> {
    fn sample(&self, index: usize) -> Point {
        self.lock().sample(index)
    }
}

impl<F: TabulatedFunction> MathFunction for SynchronizedTabulatedFunction<F> {
    fn apply(&self, x: f64) -> f64 {
        self.lock().apply(x)
    }
}

impl<F: TabulatedFunction> TabulatedFunction for SynchronizedTabulatedFunction<F> {
    fn count(&self) -> usize                                 { self.lock().count() }
    fn x(&self, index: usize) -> Result<f64, FunctionError>  { self.lock().x(index) }
    fn y(&self, index: usize) -> Result<f64, FunctionError>  { self.lock().y(index) }
    fn index_of_x(&self, x: f64) -> Option<usize>            { self.lock().index_of_x(x) }
    fn index_of_y(&self, y: f64) -> Option<usize>            { self.lock().index_of_y(y) }
    fn left_bound(&self) -> f64                              { self.lock().left_bound() }
    fn right_bound(&self) -> f64                             { self.lock().right_bound() }

    fn set_y(&mut self, index: usize, value: f64) -> Result<(), FunctionError> {
        self.lock().set_y(index, value)
    }

    fn floor_index_of_x(&self, x: f64) -> Result<usize, FunctionError> {
        self.lock().floor_index_of_x(x)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        Box::new(self.lock().points().into_iter())
    }
}

impl<F: TabulatedFunction> fmt::Debug for SynchronizedTabulatedFunction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SynchronizedTabulatedFunction")
            .field("points", &self.points())
            .finish()
    }
}

impl<F: TabulatedFunction> fmt::Display for SynchronizedTabulatedFunction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::functions::tabulatedfunction::write_points(f, "SynchronizedTabulatedFunction", self)
    }
}
