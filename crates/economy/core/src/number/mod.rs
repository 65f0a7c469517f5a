//! Extended-range decimal numbers.
//!
//! Incremental economies routinely overflow `f64` (costs grow geometrically, and
//! a few hundred levels of a 1.15 growth curve already pass 10^300). [`ExtendedNumber`]
//! stores a value as `mantissa × 10^exponent` with an `f64` mantissa and an `i64`
//! exponent, trading exactness for range: relative error stays bounded by the
//! mantissa's precision while the exponent never overflows in practice.
//!
//! # Invariant
//!
//! Every value is kept normalized: either the value is zero (`mantissa == 0.0`,
//! `exponent == 0`), or `1 <= |mantissa| < 10`. All constructors and operators
//! re-establish the invariant, so equality and ordering can compare fields
//! directly.
mod format;

use core::cmp::Ordering;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

pub use format::{NumberParseError, SUFFIXES};

/// Number of decimal digits an `f64` mantissa can carry.
///
/// When two operands differ by more than this many orders of magnitude the
/// smaller one cannot change the larger one's mantissa.
const MAX_SIGNIFICANT_DIGITS: i64 = 17;

/// Largest power of ten applied in a single `f64` scaling step.
const SCALE_STEP: i64 = 300;

/// Decimal value with an unbounded exponent.
#[derive(Clone, Copy, Debug)]
pub struct ExtendedNumber {
    mantissa: f64,
    exponent: i64,
}

impl ExtendedNumber {
    pub const ZERO: Self = Self {
        mantissa: 0.0,
        exponent: 0,
    };

    pub const ONE: Self = Self {
        mantissa: 1.0,
        exponent: 0,
    };

    /// Largest finite `f64`, used when non-finite inputs saturate.
    pub const F64_MAX: Self = Self {
        mantissa: 1.797_693_134_862_315_7,
        exponent: 308,
    };

    /// Builds a value from an arbitrary mantissa/exponent pair and normalizes it.
    ///
    /// NaN becomes zero; infinities saturate to the largest finite `f64`
    /// magnitude (scaled by `exponent`) with the matching sign.
    pub fn from_parts(mantissa: f64, exponent: i64) -> Self {
        if mantissa.is_nan() || mantissa == 0.0 {
            return Self::ZERO;
        }

        if mantissa.is_infinite() {
            return Self {
                mantissa: Self::F64_MAX.mantissa.copysign(mantissa),
                exponent: exponent.saturating_add(Self::F64_MAX.exponent),
            };
        }

        let magnitude = mantissa.abs();
        if (1.0..10.0).contains(&magnitude) {
            return Self { mantissa, exponent };
        }

        let shift = magnitude.log10().floor() as i64;
        let mut m = scale_pow10(mantissa, -shift);
        let mut e = exponent.saturating_add(shift);

        // log10 can misjudge by one near exact powers of ten.
        if m.abs() >= 10.0 {
            m /= 10.0;
            e = e.saturating_add(1);
        } else if m.abs() < 1.0 {
            m *= 10.0;
            e = e.saturating_sub(1);
        }

        Self {
            mantissa: m,
            exponent: e,
        }
    }

    /// Builds a value from stored fields, rejecting pairs that cannot be normalized.
    ///
    /// Used by decoders: unlike [`ExtendedNumber::from_parts`], a non-finite
    /// mantissa is an error instead of being silently repaired.
    pub fn try_from_parts(mantissa: f64, exponent: i64) -> Result<Self, NumberParseError> {
        if !mantissa.is_finite() {
            return Err(NumberParseError::NonFinite);
        }
        Ok(Self::from_parts(mantissa, exponent))
    }

    /// Returns `10^log`.
    pub fn from_log10(log: f64) -> Self {
        if log.is_nan() || log == f64::NEG_INFINITY {
            return Self::ZERO;
        }
        if log == f64::INFINITY {
            return Self::F64_MAX;
        }
        let exponent = log.floor();
        Self::from_parts(10f64.powf(log - exponent), exponent as i64)
    }

    #[inline]
    pub const fn mantissa(&self) -> f64 {
        self.mantissa
    }

    #[inline]
    pub const fn exponent(&self) -> i64 {
        self.exponent
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mantissa == 0.0
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.mantissa < 0.0
    }

    pub fn abs(self) -> Self {
        Self {
            mantissa: self.mantissa.abs(),
            exponent: self.exponent,
        }
    }

    /// Subtraction clamped at zero, used wherever a gameplay quantity is debited.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        let difference = self - rhs;
        if difference.is_negative() {
            Self::ZERO
        } else {
            difference
        }
    }

    /// Clamps negative values to zero.
    pub fn non_negative(self) -> Self {
        if self.is_negative() { Self::ZERO } else { self }
    }

    /// Decimal logarithm. Zero maps to negative infinity, negatives to NaN.
    pub fn log10(&self) -> f64 {
        if self.is_zero() {
            return f64::NEG_INFINITY;
        }
        self.exponent as f64 + self.mantissa.log10()
    }

    /// Natural logarithm.
    pub fn ln(&self) -> f64 {
        self.log10() * core::f64::consts::LN_10
    }

    /// Raises the value to a real power.
    ///
    /// Integer powers are computed by repeated squaring so that small curves
    /// such as `1.5^2` stay exact; fractional powers go through `log10`, with the
    /// exponent's integral part split off so that exponents in the millions
    /// keep their mantissa precision.
    pub fn pow(self, power: f64) -> Self {
        if power.is_nan() {
            return Self::ZERO;
        }
        if power.fract() == 0.0 && power.abs() <= i64::MAX as f64 {
            return self.powi(power as i64);
        }
        if self.is_zero() {
            return if power > 0.0 { Self::ZERO } else { Self::F64_MAX };
        }
        if self.is_negative() {
            // Fractional powers of negative numbers have no real value.
            return Self::ZERO;
        }

        let exponent_part = power * self.exponent as f64;
        let whole = exponent_part.floor();
        let fraction = (exponent_part - whole) + power * self.mantissa.log10();
        let scaled = Self::from_log10(fraction);
        Self::from_parts(scaled.mantissa, scaled.exponent.saturating_add(whole as i64))
    }

    /// Raises the value to an integer power by repeated squaring.
    pub fn powi(self, power: i64) -> Self {
        if power == 0 {
            return Self::ONE;
        }
        if self.is_zero() {
            return if power > 0 { Self::ZERO } else { Self::F64_MAX };
        }

        let mut base = self;
        let mut remaining = power.unsigned_abs();
        let mut result = Self::ONE;
        while remaining > 0 {
            if remaining & 1 == 1 {
                result *= base;
            }
            remaining >>= 1;
            if remaining > 0 {
                base *= base;
            }
        }

        if power < 0 { Self::ONE / result } else { result }
    }

    /// Approximate conversion back to `f64`, saturating to infinity outside its range.
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        if self.exponent > 308 {
            return f64::INFINITY.copysign(self.mantissa);
        }
        if self.exponent < -343 {
            return 0.0;
        }
        scale_pow10(self.mantissa, self.exponent)
    }

    /// Largest of two values.
    pub fn max(self, other: Self) -> Self {
        if other > self { other } else { self }
    }

    /// Smallest of two values.
    pub fn min(self, other: Self) -> Self {
        if other < self { other } else { self }
    }

    fn sign(&self) -> i8 {
        if self.mantissa > 0.0 {
            1
        } else if self.mantissa < 0.0 {
            -1
        } else {
            0
        }
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        self.exponent.cmp(&other.exponent).then_with(|| {
            self.mantissa
                .abs()
                .partial_cmp(&other.mantissa.abs())
                .unwrap_or(Ordering::Equal)
        })
    }
}

/// Multiplies `value` by `10^power` without overflowing intermediate powers.
fn scale_pow10(value: f64, power: i64) -> f64 {
    let mut value = value;
    let mut remaining = power;
    while remaining != 0 {
        let step = remaining.clamp(-SCALE_STEP, SCALE_STEP);
        if step > 0 {
            value *= 10f64.powi(step as i32);
        } else {
            value /= 10f64.powi((-step) as i32);
        }
        remaining -= step;
    }
    value
}

impl Default for ExtendedNumber {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for ExtendedNumber {
    fn eq(&self, other: &Self) -> bool {
        self.exponent == other.exponent && self.mantissa == other.mantissa
    }
}

// Normalization rules out NaN mantissas, so equality is total.
impl Eq for ExtendedNumber {}

impl PartialOrd for ExtendedNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExtendedNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign().cmp(&other.sign()) {
            Ordering::Equal => match self.sign() {
                0 => Ordering::Equal,
                1 => self.cmp_magnitude(other),
                _ => other.cmp_magnitude(self),
            },
            unequal => unequal,
        }
    }
}

impl From<f64> for ExtendedNumber {
    fn from(value: f64) -> Self {
        Self::from_parts(value, 0)
    }
}

impl From<u32> for ExtendedNumber {
    fn from(value: u32) -> Self {
        Self::from_parts(f64::from(value), 0)
    }
}

impl From<u64> for ExtendedNumber {
    fn from(value: u64) -> Self {
        Self::from_parts(value as f64, 0)
    }
}

impl Neg for ExtendedNumber {
    type Output = Self;

    fn neg(self) -> Self {
        if self.is_zero() {
            return self;
        }
        Self {
            mantissa: -self.mantissa,
            exponent: self.exponent,
        }
    }
}

impl Add for ExtendedNumber {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        if self.is_zero() {
            return rhs;
        }
        if rhs.is_zero() {
            return self;
        }

        let (large, small) = if self.exponent >= rhs.exponent {
            (self, rhs)
        } else {
            (rhs, self)
        };
        let gap = large.exponent.abs_diff(small.exponent);
        if gap > MAX_SIGNIFICANT_DIGITS as u64 {
            return large;
        }

        let mantissa = large.mantissa + small.mantissa / 10f64.powi(gap as i32);
        Self::from_parts(mantissa, large.exponent)
    }
}

impl Sub for ExtendedNumber {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Mul for ExtendedNumber {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::ZERO;
        }
        Self::from_parts(
            self.mantissa * rhs.mantissa,
            self.exponent.saturating_add(rhs.exponent),
        )
    }
}

impl Div for ExtendedNumber {
    type Output = Self;

    /// Division by zero yields zero.
    fn div(self, rhs: Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::ZERO;
        }
        Self::from_parts(
            self.mantissa / rhs.mantissa,
            self.exponent.saturating_sub(rhs.exponent),
        )
    }
}

impl AddAssign for ExtendedNumber {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for ExtendedNumber {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for ExtendedNumber {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for ExtendedNumber {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl Sum for ExtendedNumber {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, value| acc + value)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::ExtendedNumber;

    #[derive(serde::Serialize)]
    struct Parts {
        mantissa: f64,
        exponent: i64,
    }

    /// Accepted input shapes: stored pairs, plain numbers, or short-form strings.
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Parts { mantissa: f64, exponent: i64 },
        Number(f64),
        Text(String),
    }

    impl serde::Serialize for ExtendedNumber {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            Parts {
                mantissa: self.mantissa,
                exponent: self.exponent,
            }
            .serialize(serializer)
        }
    }

    impl<'de> serde::Deserialize<'de> for ExtendedNumber {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            match Repr::deserialize(deserializer)? {
                Repr::Parts { mantissa, exponent } => {
                    ExtendedNumber::try_from_parts(mantissa, exponent)
                        .map_err(serde::de::Error::custom)
                }
                Repr::Number(value) if value.is_finite() => Ok(ExtendedNumber::from(value)),
                Repr::Number(_) => Err(serde::de::Error::custom("non-finite number")),
                Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
            }
        }
    }
}
