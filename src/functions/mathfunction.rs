use std::sync::Arc;

/// Any real function that can be evaluated at a real x.
pub trait MathFunction {
    fn apply(&self, x: f64) -> f64;

    /// `g(f(x))`, where `f` is `self` and `g` is `after`.
    fn and_then<G>(self, after: G) -> CompositeFunction<Self, G>
    where
        Self: Sized,
        G: MathFunction,
    {
        CompositeFunction::new(self, after)
    }
}

impl<F: MathFunction + ?Sized> MathFunction for &F {
    fn apply(&self, x: f64) -> f64 {
        (**self).apply(x)
    }
}

impl<F: MathFunction + ?Sized> MathFunction for Box<F> {
    fn apply(&self, x: f64) -> f64 {
        (**self).apply(x)
    }
}

impl<F: MathFunction + ?Sized> MathFunction for Arc<F> {
    fn apply(&self, x: f64) -> f64 {
        (**self).apply(x)
    }
}

/// Composition of two functions, `second(first(x))`.
#[derive(Debug, Clone)]
pub struct CompositeFunction<F, G> {
    first: F,
    second: G
}

impl<F, G> CompositeFunction<F, G>
where
    F: MathFunction,
    G: MathFunction,
{
    pub fn new(first: F, second: G) -> CompositeFunction<F, G> {
        CompositeFunction { first, second }
    }

    pub fn first(&self) -> &F {
        &self.first
    }

    pub fn second(&self) -> &G {
        &self.second
    }
}

impl<F, G> MathFunction for CompositeFunction<F, G>
where
    F: MathFunction,
    G: MathFunction,
{
    fn apply(&self, x: f64) -> f64 {
        self.second.apply(self.first.apply(x))
    }
}
