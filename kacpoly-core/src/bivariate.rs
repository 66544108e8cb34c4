use crate::poly::UniPoly;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::collections::BTreeMap;
use std::fmt;

/// Sparse polynomial in (t, q) with exact rational coefficients.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BiPoly {
    /// (t-degree, q-degree) -> non-zero coefficient
    terms: BTreeMap<(u32, u32), BigRational>,
}

impl BiPoly {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::term(BigRational::one(), 0, 0)
    }

    /// `c * t^i * q^j`
    pub fn term(c: BigRational, i: u32, j: u32) -> Self {
        let mut p = Self::zero();
        p.add_term(i, j, c);
        p
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn terms(&self) -> impl Iterator<Item = (&(u32, u32), &BigRational)> {
        self.terms.iter()
    }

    pub fn coeff(&self, i: u32, j: u32) -> BigRational {
        self.terms.get(&(i, j)).cloned().unwrap_or_else(BigRational::zero)
    }

    pub fn add_term(&mut self, i: u32, j: u32, c: BigRational) {
        if c.is_zero() {
            return;
        }
        let entry = self.terms.entry((i, j)).or_insert_with(BigRational::zero);
        *entry += c;
        if entry.is_zero() {
            self.terms.remove(&(i, j));
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (&(i, j), c) in &other.terms {
            out.add_term(i, j, c.clone());
        }
        out
    }

    pub fn neg(&self) -> Self {
        Self {
            terms: self.terms.iter().map(|(k, c)| (*k, -c)).collect(),
        }
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Product keeping only t-degrees `<= t_limit` when a limit is given.
    pub fn mul_truncated(&self, other: &Self, t_limit: Option<u32>) -> Self {
        let mut out = Self::zero();
        for (&(i1, j1), c1) in &self.terms {
            for (&(i2, j2), c2) in &other.terms {
                let i = i1 + i2;
                if t_limit.map_or(false, |l| i > l) {
                    continue;
                }
                out.add_term(i, j1 + j2, c1 * c2);
            }
        }
        out
    }

    pub fn mul(&self, other: &Self) -> Self {
        self.mul_truncated(other, None)
    }

    pub fn max_t_degree(&self) -> Option<u32> {
        self.terms.keys().map(|&(i, _)| i).max()
    }

    /// Coefficient of t^i as a polynomial in q.
    pub fn t_coefficient(&self, i: u32) -> UniPoly {
        let mut out = UniPoly::zero();
        for (&(ti, qj), c) in self.terms.range((i, 0)..=(i, u32::MAX)) {
            debug_assert_eq!(ti, i);
            out = out.add(&UniPoly::monomial(c.clone(), qj as usize));
        }
        out
    }
}

impl fmt::Display for BiPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for (n, (&(i, j), c)) in self.terms.iter().rev().enumerate() {
            let mut factors = Vec::new();
            if !c.abs().is_one() || (i == 0 && j == 0) {
                factors.push(c.abs().to_string());
            }
            match i {
                0 => {}
                1 => factors.push("t".to_string()),
                _ => factors.push(format!("t^{}", i)),
            }
            match j {
                0 => {}
                1 => factors.push("q".to_string()),
                _ => factors.push(format!("q^{}", j)),
            }
            let body = factors.join("*");
            match (n == 0, c.is_negative()) {
                (true, false) => write!(f, "{}", body)?,
                (true, true) => write!(f, "-{}", body)?,
                (false, false) => write!(f, " + {}", body)?,
                (false, true) => write!(f, " - {}", body)?,
            }
        }
        Ok(())
    }
}
