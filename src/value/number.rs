use std::cmp::Ordering;

/// Common numeric view used by the comparison helpers of the value cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberRepr {
    Integral(i128),
    Floating(f64),
}

impl NumberRepr {
    pub fn as_f64(self) -> f64 {
        match self {
            NumberRepr::Integral(v) => v as f64,
            NumberRepr::Floating(v) => v,
        }
    }

    /// Integral pairs compare exactly; any floating participant compares as
    /// `f64`. `None` when a NaN is involved.
    pub fn compare(self, other: NumberRepr) -> Option<Ordering> {
        match (self, other) {
            (NumberRepr::Integral(a), NumberRepr::Integral(b)) => Some(a.cmp(&b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

/// Anything a value cell can be compared against.
pub trait Number {
    fn to_repr(&self) -> NumberRepr;
}

macro_rules! integral_number {
    ($($t:ty),*) => {
        $(
            impl Number for $t {
                fn to_repr(&self) -> NumberRepr {
                    NumberRepr::Integral(i128::from(*self))
                }
            }
        )*
    };
}

macro_rules! floating_number {
    ($($t:ty),*) => {
        $(
            impl Number for $t {
                fn to_repr(&self) -> NumberRepr {
                    NumberRepr::Floating(f64::from(*self))
                }
            }
        )*
    };
}

integral_number!(i8, i16, i32, i64, i128, u8, u16, u32, u64);
floating_number!(f32, f64);

impl Number for isize {
    fn to_repr(&self) -> NumberRepr {
        NumberRepr::Integral(*self as i128)
    }
}

impl Number for usize {
    fn to_repr(&self) -> NumberRepr {
        NumberRepr::Integral(*self as i128)
    }
}

impl<N: Number + ?Sized> Number for &N {
    fn to_repr(&self) -> NumberRepr {
        (**self).to_repr()
    }
}

/// Comparison helpers shared by every numeric cell.
pub trait NumericCompare: Number {
    fn is_equal_to(&self, other: impl Number) -> bool {
        self.to_repr().compare(other.to_repr()) == Some(Ordering::Equal)
    }

    fn is_less_than(&self, other: impl Number) -> bool {
        self.to_repr().compare(other.to_repr()) == Some(Ordering::Less)
    }

    fn is_less_than_or_equal_to(&self, other: impl Number) -> bool {
        matches!(
            self.to_repr().compare(other.to_repr()),
            Some(Ordering::Less | Ordering::Equal)
        )
    }

    fn is_greater_than(&self, other: impl Number) -> bool {
        self.to_repr().compare(other.to_repr()) == Some(Ordering::Greater)
    }

    fn is_greater_than_or_equal_to(&self, other: impl Number) -> bool {
        matches!(
            self.to_repr().compare(other.to_repr()),
            Some(Ordering::Greater | Ordering::Equal)
        )
    }
}

impl<N: Number + ?Sized> NumericCompare for N {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_helpers() {
        assert!(5i32.is_greater_than(4.5f64));
        assert!(5u8.is_less_than_or_equal_to(5i64));
        assert!(2.0f32.is_equal_to(2u16));
        assert!(!f64::NAN.is_equal_to(f64::NAN));
    }

    #[test]
    fn test_integral_comparison_is_exact() {
        let big = i64::MAX.to_repr();
        let bigger = (i64::MAX as i128 + 1).to_repr();
        assert_eq!(big.compare(bigger), Some(Ordering::Less));
        assert_eq!(u64::MAX.to_repr().compare((-1i8).to_repr()), Some(Ordering::Greater));
    }

    #[test]
    fn test_mixed_comparison_uses_floating() {
        assert_eq!(3i32.to_repr().compare(2.5f64.to_repr()), Some(Ordering::Greater));
        assert_eq!(1u8.to_repr().compare(1.0f32.to_repr()), Some(Ordering::Equal));
        assert_eq!(1i32.to_repr().compare(f64::NAN.to_repr()), None);
    }
}
