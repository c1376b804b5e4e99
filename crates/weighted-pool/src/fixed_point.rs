//! Checked fixed-point arithmetic on the common 9-decimal basis.
//!
//! Every pool amount is normalized onto nine decimals before any invariant
//! math runs (`raw_amount * 10^(9 - decimals)`). A [`Fixed9`] wraps such a
//! normalized value: the raw integer is interpreted as a real number scaled
//! by `10^9`. All operations are checked; there is no silent wrap-around or
//! truncation anywhere in the math.

use crate::error::Error;

/// Scale of one whole unit on the common basis.
pub const ONE: u128 = 1_000_000_000;

/// Basis points in one; weights and fees are expressed in this scale.
pub const BPS: u64 = 10_000;

/// Number of binary fraction bits used to expand a basis-point exponent in
/// [`Fixed9::pow_frac`].
const FRACTION_BITS: u32 = 16;

/// Fixed point number stored in 128 bits holding exactly 9 decimal digits.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub struct Fixed9(u128);

impl Fixed9 {
    pub fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    pub fn as_raw(self) -> u128 {
        self.0
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn one() -> Self {
        Self(ONE)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Multiplication rounding toward zero.
    pub fn mul_down(self, other: Self) -> Result<Self, Error> {
        Ok(Self(
            self.0.checked_mul(other.0).ok_or(Error::Overflow)? / ONE,
        ))
    }

    /// Division rounding toward zero.
    pub fn div_down(self, other: Self) -> Result<Self, Error> {
        if other.0 == 0 {
            return Err(Error::ZeroDivision);
        }
        Ok(Self(
            self.0.checked_mul(ONE).ok_or(Error::Overflow)? / other.0,
        ))
    }

    /// Division rounding away from zero.
    pub fn div_up(self, other: Self) -> Result<Self, Error> {
        if other.0 == 0 {
            return Err(Error::ZeroDivision);
        }
        if self.0 == 0 {
            return Ok(Self::zero());
        }
        let numerator = self.0.checked_mul(ONE).ok_or(Error::Overflow)?;
        Ok(Self(1 + (numerator - 1) / other.0))
    }

    /// Square root, rounding toward zero.
    pub fn sqrt(self) -> Result<Self, Error> {
        let widened = self.0.checked_mul(ONE).ok_or(Error::Overflow)?;
        Ok(Self(isqrt(widened)))
    }

    /// Raises `self` to the fractional power `weight_bps / 10_000`.
    ///
    /// The exponent is expanded into a 16-bit binary fraction and the result
    /// assembled from chained square roots: `x^(Σ bᵢ·2⁻ⁱ) = Π x^(2⁻ⁱ)` over
    /// the set bits. A weight of 5000 is represented exactly (one square
    /// root); other weights carry a relative error bounded by
    /// `2⁻¹⁶ · ln(x)`, rounding toward zero at every step so share issuance
    /// never exceeds the exact value.
    pub fn pow_frac(self, weight_bps: u64) -> Result<Self, Error> {
        if weight_bps == 0 {
            return Ok(Self::one());
        }
        if weight_bps >= BPS {
            return Err(Error::WeightsSumInvalid);
        }

        let exponent = u128::from(weight_bps) * (1 << FRACTION_BITS) / u128::from(BPS);
        let mut result = Self::one();
        let mut root = self;
        for bit in (0..FRACTION_BITS).rev() {
            root = root.sqrt()?;
            if exponent & (1 << bit) != 0 {
                result = result.mul_down(root)?;
            }
        }
        Ok(result)
    }
}

/// Integer square root by Newton's method, rounding toward zero.
fn isqrt(value: u128) -> u128 {
    if value < 2 {
        return value;
    }
    // Initial guess is a power of two at least as large as the root.
    let bits = 128 - value.leading_zeros();
    let mut x = 1u128 << ((bits + 1) / 2);
    loop {
        let next = (x + value / x) / 2;
        if next >= x {
            return x;
        }
        x = next;
    }
}
