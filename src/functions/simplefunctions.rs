use crate::functions::mathfunction::MathFunction;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IdentityFunction;

impl MathFunction for IdentityFunction {
    fn apply(&self, x: f64) -> f64 {
        x
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SqrFunction;

impl MathFunction for SqrFunction {
    fn apply(&self, x: f64) -> f64 {
        x * x
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantFunction {
    constant: f64
}

impl ConstantFunction {
    pub fn new(constant: f64) -> ConstantFunction {
        ConstantFunction { constant }
    }

    pub fn zero() -> ConstantFunction {
        ConstantFunction::new(0.0)
    }

    pub fn unit() -> ConstantFunction {
        ConstantFunction::new(1.0)
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }
}

impl MathFunction for ConstantFunction {
    fn apply(&self, _x: f64) -> f64 {
        self.constant
    }
}
