use thiserror::Error;

/// Rejected position passed to [`BlockDeque::try_insert`](crate::BlockDeque::try_insert).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DequeError {
    /// The position was produced by another deque (or is the null position).
    #[error("position does not belong to this deque")]
    ForeignPosition,
    /// The position lies outside `[begin, end]`.
    #[error("position index {index} is out of bounds for insertion into a deque of length {len}")]
    OutOfBounds { index: isize, len: usize },
}

/// Failure of [`Polynomial::sqrt`](crate::Polynomial::sqrt).
#[cfg(feature = "polynomial")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PolynomialError {
    #[error("leading coefficient {coef} is negative")]
    NegativeLeadingCoefficient { coef: i64 },
    #[error("leading exponent {expon} is odd")]
    OddLeadingExponent { expon: u32 },
    #[error("polynomial is not a perfect square")]
    NotPerfectSquare,
}
