/// Produces the derivative of a function of type `T`.
pub trait DifferentialOperator<T> {
    type Output;

    fn derive(&self, function: T) -> Self::Output;
}
