use serde::{
    Deserialize,
    Serialize
};

use crate::functions::functionerror::FunctionError;
use crate::functions::mathfunction::MathFunction;
use crate::operations::differentialoperator::DifferentialOperator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceScheme {
    /// `(f(x) - f(x - h)) / h`
    Left,
    /// `(f(x + h) - f(x)) / h`
    Right,
    /// `(f(x + h) - f(x - h)) / 2h`
    Middle,
}

fn check_step(step: f64) -> Result<f64, FunctionError> {
    if step.is_finite() && step > 0.0 {
        Ok(step)
    } else {
        Err(FunctionError::InvalidStep(step))
    }
}

/// Finite-difference derivative with a fixed step over any `MathFunction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteppingDifferentialOperator {
    scheme: DifferenceScheme,
    step: f64
}

impl SteppingDifferentialOperator {
    /// Rejects a step that is not strictly positive and finite.
    pub fn new(scheme: DifferenceScheme, step: f64) -> Result<SteppingDifferentialOperator, FunctionError> {
        Ok(SteppingDifferentialOperator { scheme, step: check_step(step)? })
    }

    pub fn left(step: f64) -> Result<SteppingDifferentialOperator, FunctionError> {
        Self::new(DifferenceScheme::Left, step)
    }

    pub fn right(step: f64) -> Result<SteppingDifferentialOperator, FunctionError> {
        Self::new(DifferenceScheme::Right, step)
    }

    pub fn middle(step: f64) -> Result<SteppingDifferentialOperator, FunctionError> {
        Self::new(DifferenceScheme::Middle, step)
    }

    pub fn scheme(&self) -> DifferenceScheme {
        self.scheme
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Same validation as construction; an invalid step leaves the operator unchanged.
    pub fn set_step(&mut self, step: f64) -> Result<(), FunctionError> {
        self.step = check_step(step)?;
        Ok(())
    }
}

impl<F: MathFunction> DifferentialOperator<F> for SteppingDifferentialOperator {
    type Output = SteppedDerivative<F>;

    fn derive(&self, function: F) -> SteppedDerivative<F> {
        SteppedDerivative { function, step: self.step, scheme: self.scheme }
    }
}

/// Lazily evaluated derivative: every `apply` re-evaluates the wrapped function.
#[derive(Debug, Clone)]
pub struct SteppedDerivative<F> {
    function: F,
    step: f64,
    scheme: DifferenceScheme
}

impl<F> SteppedDerivative<F> {
    pub fn function(&self) -> &F {
        &self.function
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn scheme(&self) -> DifferenceScheme {
        self.scheme
    }
}

impl<F: MathFunction> MathFunction for SteppedDerivative<F> {
    fn apply(&self, x: f64) -> f64 {
        let h = self.step;
        match self.scheme {
            DifferenceScheme::Left   => (self.function.apply(x) - self.function.apply(x - h)) / h,
            DifferenceScheme::Right  => (self.function.apply(x + h) - self.function.apply(x)) / h,
            DifferenceScheme::Middle => {
                (self.function.apply(x + h) - self.function.apply(x - h)) / (2.0 * h)
            }
        }
    }
}
