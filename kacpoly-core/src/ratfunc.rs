use crate::poly::UniPoly;
use crate::{KacError, KacResult};
use num_rational::BigRational;
use num_traits::{One, Zero};
use std::fmt;

/// Element of ℚ(w), stored in lowest terms with a monic denominator.
///
/// Negative powers of `w` are folded into the denominator, so `1 - w^-1`
/// is kept as `(w - 1) / w`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RatFunc {
    num: UniPoly,
    den: UniPoly,
}

impl RatFunc {
    pub fn new(num: UniPoly, den: UniPoly) -> KacResult<Self> {
        if den.is_zero() {
            return Err(KacError::DivisionByZero);
        }
        Ok(Self::reduced(num, den))
    }

    // Caller guarantees `den` is non-zero.
    fn reduced(num: UniPoly, den: UniPoly) -> Self {
        if num.is_zero() {
            return Self::zero();
        }
        let g = num.gcd(&den);
        let (num, den) = if g.is_one() {
            (num, den)
        } else {
            // g divides both exactly
            match (num.div_rem(&g), den.div_rem(&g)) {
                (Ok((n, _)), Ok((d, _))) => (n, d),
                _ => (num, den),
            }
        };
        match den.leading().cloned() {
            Some(lead) if !lead.is_one() => {
                let inv = lead.recip();
                Self {
                    num: num.scale(&inv),
                    den: den.scale(&inv),
                }
            }
            _ => Self { num, den },
        }
    }

    pub fn zero() -> Self {
        Self {
            num: UniPoly::zero(),
            den: UniPoly::one(),
        }
    }

    pub fn one() -> Self {
        Self::from_poly(UniPoly::one())
    }

    pub fn from_poly(p: UniPoly) -> Self {
        Self {
            num: p,
            den: UniPoly::one(),
        }
    }

    pub fn constant(c: BigRational) -> Self {
        Self::from_poly(UniPoly::constant(c))
    }

    /// `w^k` for any integer `k`.
    pub fn w_power(k: i64) -> Self {
        let mono = UniPoly::monomial(BigRational::one(), k.unsigned_abs() as usize);
        if k >= 0 {
            Self::from_poly(mono)
        } else {
            Self {
                num: UniPoly::one(),
                den: mono,
            }
        }
    }

    pub fn numer(&self) -> &UniPoly {
        &self.num
    }

    pub fn denom(&self) -> &UniPoly {
        &self.den
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.num.is_one() && self.den.is_one()
    }

    pub fn is_polynomial(&self) -> bool {
        self.den.is_one()
    }

    pub fn into_poly(self) -> KacResult<UniPoly> {
        if self.is_polynomial() {
            Ok(self.num)
        } else {
            Err(KacError::NonPolynomial(self.to_string()))
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }
        if self.den == other.den {
            return Self::reduced(self.num.add(&other.num), self.den.clone());
        }
        let g = self.den.gcd(&other.den);
        let (a_cof, b_cof) = if g.is_one() {
            (other.den.clone(), self.den.clone())
        } else {
            match (other.den.div_rem(&g), self.den.div_rem(&g)) {
                (Ok((a, _)), Ok((b, _))) => (a, b),
                _ => (other.den.clone(), self.den.clone()),
            }
        };
        let num = self.num.mul(&a_cof).add(&other.num.mul(&b_cof));
        let den = self.den.mul(&a_cof);
        Self::reduced(num, den)
    }

    pub fn neg(&self) -> Self {
        Self {
            num: self.num.neg(),
            den: self.den.clone(),
        }
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        Self::reduced(self.num.mul(&other.num), self.den.mul(&other.den))
    }

    pub fn scale(&self, c: &BigRational) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        Self {
            num: self.num.scale(c),
            den: self.den.clone(),
        }
    }

    pub fn recip(&self) -> KacResult<Self> {
        Self::new(self.den.clone(), self.num.clone())
    }

    pub fn div(&self, other: &Self) -> KacResult<Self> {
        Ok(self.mul(&other.recip()?))
    }

    /// Integer power; negative exponents invert first.
    pub fn pow(&self, n: i64) -> KacResult<Self> {
        let base = if n < 0 { self.recip()? } else { self.clone() };
        let e = n.unsigned_abs() as u32;
        Ok(Self {
            num: base.num.pow(e),
            den: base.den.pow(e),
        })
    }

    /// Substitute `w -> w^d`. Fails when the substitution sends the
    /// denominator to zero, which can only happen for `d == 0`.
    pub fn substitute_power(&self, d: usize) -> KacResult<Self> {
        let den = self.den.substitute_power(d);
        if den.is_zero() {
            return Err(KacError::DegenerateWeight);
        }
        Self::new(self.num.substitute_power(d), den)
    }

    pub fn display_in<'a>(&'a self, var: &'a str) -> DisplayRatFunc<'a> {
        DisplayRatFunc { value: self, var }
    }
}

pub struct DisplayRatFunc<'a> {
    value: &'a RatFunc,
    var: &'a str,
}

impl fmt::Display for DisplayRatFunc<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_polynomial() {
            write!(f, "{}", self.value.num.display_in(self.var))
        } else {
            write!(
                f,
                "({})/({})",
                self.value.num.display_in(self.var),
                self.value.den.display_in(self.var)
            )
        }
    }
}

impl fmt::Display for RatFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_in("w"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::rat;

    #[test]
    fn test_reduces_to_lowest_terms() {
        // (w^2 - 1) / (2w - 2) = (w + 1) / 2
        let r = RatFunc::new(UniPoly::from_ints(&[-1, 0, 1]), UniPoly::from_ints(&[-2, 2])).unwrap();
        assert!(r.is_polynomial());
        assert_eq!(r.numer(), &UniPoly::from_ints(&[1, 1]).scale(&BigRational::new(1.into(), 2.into())));
        assert_eq!(RatFunc::new(UniPoly::one(), UniPoly::zero()), Err(KacError::DivisionByZero));
    }

    #[test]
    fn test_negative_powers() {
        // 1 - w^-1 = (w - 1)/w
        let r = RatFunc::one().sub(&RatFunc::w_power(-1));
        assert_eq!(r.numer(), &UniPoly::from_ints(&[-1, 1]));
        assert_eq!(r.denom(), &UniPoly::from_ints(&[0, 1]));
        assert_eq!(r.to_string(), "(w - 1)/(w)");
        assert!(RatFunc::w_power(3).mul(&RatFunc::w_power(-3)).is_one());
        assert_eq!(RatFunc::w_power(2).pow(-2).unwrap(), RatFunc::w_power(-4));
        assert_eq!(RatFunc::zero().pow(-1), Err(KacError::DivisionByZero));
    }

    #[test]
    fn test_add_with_common_factor() {
        // 1/(w^2-1) + 1/(w-1) = (w + 2)/(w^2 - 1)
        let a = RatFunc::new(UniPoly::one(), UniPoly::from_ints(&[-1, 0, 1])).unwrap();
        let b = RatFunc::new(UniPoly::one(), UniPoly::from_ints(&[-1, 1])).unwrap();
        let s = a.add(&b);
        assert_eq!(s.numer(), &UniPoly::from_ints(&[2, 1]));
        assert_eq!(s.denom(), &UniPoly::from_ints(&[-1, 0, 1]));
        assert!(s.sub(&s).is_zero());
    }

    #[test]
    fn test_substitute_power() {
        // w/(w-1) with w -> w^2
        let r = RatFunc::new(UniPoly::x(), UniPoly::from_ints(&[-1, 1])).unwrap();
        let s = r.substitute_power(2).unwrap();
        assert_eq!(s.denom(), &UniPoly::from_ints(&[-1, 0, 1]));
        assert_eq!(r.substitute_power(0), Err(KacError::DegenerateWeight));
        assert_eq!(RatFunc::constant(rat(5)).substitute_power(0).unwrap(), RatFunc::constant(rat(5)));
    }

    #[test]
    fn test_into_poly() {
        let r = RatFunc::new(UniPoly::from_ints(&[-1, 0, 1]), UniPoly::from_ints(&[-1, 1])).unwrap();
        assert_eq!(r.into_poly().unwrap(), UniPoly::from_ints(&[1, 1]));
        assert!(matches!(RatFunc::w_power(-1).into_poly(), Err(KacError::NonPolynomial(_))));
    }
}
