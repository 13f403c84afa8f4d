use std::{fmt::Debug, ops::Add};

/// An edge cost or path length.
///
/// `Default` must be the additive identity. Implemented for every type that
/// is ordered, addable and debuggable, which covers the primitive integers
/// and floats.
pub trait Measure: Debug + PartialOrd + Add<Self, Output = Self> + Default + Clone {}

impl<M> Measure for M where M: Debug + PartialOrd + Add<M, Output = M> + Default + Clone {}

/// A [`Measure`] with an explicit infinity, for algorithms that start every
/// distance at "unreached".
pub trait FloatMeasure: Measure + Copy {
    /// The additive identity.
    fn zero() -> Self;
    /// A value larger than every finite distance.
    fn infinite() -> Self;
}

impl FloatMeasure for f32 {
    fn zero() -> Self {
        0.0
    }

    fn infinite() -> Self {
        f32::INFINITY
    }
}

impl FloatMeasure for f64 {
    fn zero() -> Self {
        0.0
    }

    fn infinite() -> Self {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum<M: Measure>(items: &[M]) -> M {
        items.iter().cloned().fold(M::default(), |acc, m| acc + m)
    }

    #[test]
    fn test_measure_blanket() {
        assert_eq!(sum(&[1u32, 2, 3]), 6);
        assert_eq!(sum(&[0.5f64, 0.25]), 0.75);
    }

    #[test]
    fn test_float_measure_bounds() {
        assert!(f64::infinite() > 1e300);
        assert_eq!(f32::zero() + 1.0, 1.0);
        assert_eq!(f64::infinite() + -5.0, f64::INFINITY);
    }
}
