#![allow(missing_docs)]

//! This module defines various unit types and their conversions.
//!
//! Annual quantities (energy use, emissions, running costs) are all expressed per year, so
//! `Energy` is kWh per year, `Co2` is kg per year and so on.

macro_rules! unit_struct {
    ($name:ident) => {
        /// Represents a type of quantity.
        #[derive(
            Debug,
            Default,
            Clone,
            Copy,
            PartialEq,
            PartialOrd,
            derive_more::Add,
            derive_more::Sub,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub f64);

        impl $name {
            /// Creates a new instance of the unit type from a f64 value.
            pub const fn new(val: f64) -> Self {
                Self(val)
            }

            /// Returns the value of the unit type as a f64.
            pub fn value(self) -> f64 {
                self.0
            }

            /// Round to the nearest whole unit
            pub fn round(self) -> Self {
                Self(self.0.round())
            }

            /// Whether the underlying value is neither infinite nor NaN
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }

            /// The larger of `self` and `other`
            pub fn max(self, other: Self) -> Self {
                Self(self.0.max(other.0))
            }
        }

        impl std::ops::Mul<Dimensionless> for $name {
            type Output = $name;
            fn mul(self, rhs: Dimensionless) -> $name {
                $name(self.0 * rhs.0)
            }
        }

        impl std::ops::Mul<$name> for Dimensionless {
            type Output = $name;
            fn mul(self, rhs: $name) -> $name {
                $name(self.0 * rhs.0)
            }
        }

        impl std::ops::Div<Dimensionless> for $name {
            type Output = $name;
            fn div(self, rhs: Dimensionless) -> $name {
                $name(self.0 / rhs.0)
            }
        }

        impl std::ops::Div<$name> for $name {
            type Output = Dimensionless;
            fn div(self, rhs: $name) -> Dimensionless {
                Dimensionless(self.0 / rhs.0)
            }
        }

        impl std::iter::Sum for $name {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold($name(0.0), |acc, x| acc + x)
            }
        }

        impl float_cmp::ApproxEq for $name {
            type Margin = float_cmp::F64Margin;

            fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
                float_cmp::ApproxEq::approx_eq(self.0, other.0, margin)
            }
        }
    };
}

macro_rules! impl_mul {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Mul<$Rhs> for $Lhs {
            type Output = $Out;
            fn mul(self, rhs: $Rhs) -> $Out {
                <$Out>::new(self.0 * rhs.0)
            }
        }
        impl std::ops::Mul<$Lhs> for $Rhs {
            type Output = $Out;
            fn mul(self, lhs: $Lhs) -> $Out {
                <$Out>::new(self.0 * lhs.0)
            }
        }
    };
}

macro_rules! impl_div {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Div<$Rhs> for $Lhs {
            type Output = $Out;
            fn div(self, rhs: $Rhs) -> $Out {
                <$Out>::new(self.0 / rhs.0)
            }
        }
    };
}

/// Represents a dimensionless quantity.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    derive_more::Add,
    derive_more::Sub,
    derive_more::Display,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Dimensionless(pub f64);

impl std::ops::Mul for Dimensionless {
    type Output = Dimensionless;

    fn mul(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless(self.0 * rhs.0)
    }
}

impl std::ops::Div for Dimensionless {
    type Output = Dimensionless;

    fn div(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless(self.0 / rhs.0)
    }
}

impl Dimensionless {
    pub const fn new(val: f64) -> Self {
        Self(val)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Restrict the value to the closed range `[min, max]`
    pub fn clamp(self, min: Dimensionless, max: Dimensionless) -> Self {
        Dimensionless(self.0.clamp(min.0, max.0))
    }
}

impl From<f64> for Dimensionless {
    fn from(val: f64) -> Self {
        Self(val)
    }
}

impl float_cmp::ApproxEq for Dimensionless {
    type Margin = float_cmp::F64Margin;

    fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
        float_cmp::ApproxEq::approx_eq(self.0, other.0, margin)
    }
}

// Base quantities
unit_struct!(Area);
unit_struct!(Energy);
unit_struct!(Co2);
unit_struct!(Money);
unit_struct!(Years);

// Derived quantities
unit_struct!(MoneyPerYear);
unit_struct!(EnergyPerArea);
unit_struct!(Co2PerEnergy);
unit_struct!(MoneyPerEnergy);
unit_struct!(MoneyPerArea);

// Multiplication rules
impl_mul!(Area, EnergyPerArea, Energy);
impl_mul!(Energy, Co2PerEnergy, Co2);
impl_mul!(Energy, MoneyPerEnergy, MoneyPerYear);
impl_mul!(Area, MoneyPerArea, Money);

// Division rules
impl_div!(Money, MoneyPerYear, Years);

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_unit_arithmetic() {
        let usage = Area(100.0) * EnergyPerArea(150.0);
        assert_eq!(usage, Energy(15_000.0));

        let cost = usage * MoneyPerEnergy(0.08);
        assert_approx_eq!(MoneyPerYear, cost, MoneyPerYear(1200.0));

        let payback = Money(6000.0) / cost;
        assert_approx_eq!(Years, payback, Years(5.0));
    }

    #[test]
    fn test_payback_zero_savings_is_not_finite() {
        let payback = Money(6000.0) / MoneyPerYear(0.0);
        assert!(!payback.is_finite());
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money(1.0), Money(2.5), Money(3.5)].into_iter().sum();
        assert_eq!(total, Money(7.0));

        let empty: Money = std::iter::empty().sum();
        assert_eq!(empty, Money(0.0));
    }

    #[test]
    fn test_clamp() {
        let (lo, hi) = (Dimensionless(0.8), Dimensionless(1.5));
        assert_eq!(Dimensionless(0.1).clamp(lo, hi), lo);
        assert_eq!(Dimensionless(9.0).clamp(lo, hi), hi);
        assert_eq!(Dimensionless(1.1).clamp(lo, hi), Dimensionless(1.1));
    }
}
