use crate::{KacError, KacResult};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

/// Dense univariate polynomial with exact rational coefficients.
///
/// `coeffs[k]` is the coefficient of `x^k`. Trailing zeros are never stored,
/// so the zero polynomial has no coefficients at all.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct UniPoly {
    coeffs: Vec<BigRational>,
}

pub(crate) fn rat(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

impl UniPoly {
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    pub fn one() -> Self {
        Self::constant(BigRational::one())
    }

    pub fn constant(c: BigRational) -> Self {
        Self::monomial(c, 0)
    }

    /// `c * x^degree`
    pub fn monomial(c: BigRational, degree: usize) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        let mut coeffs = vec![BigRational::zero(); degree + 1];
        coeffs[degree] = c;
        Self { coeffs }
    }

    /// The variable itself.
    pub fn x() -> Self {
        Self::monomial(BigRational::one(), 1)
    }

    /// Build from ascending coefficients.
    pub fn from_coeffs(coeffs: Vec<BigRational>) -> Self {
        let mut p = Self { coeffs };
        p.trim();
        p
    }

    /// Build from ascending integer coefficients.
    pub fn from_ints(coeffs: &[i64]) -> Self {
        Self::from_coeffs(coeffs.iter().map(|&c| rat(c)).collect())
    }

    fn trim(&mut self) {
        while self.coeffs.last().map_or(false, |c| c.is_zero()) {
            self.coeffs.pop();
        }
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_one()
    }

    pub fn is_constant(&self) -> bool {
        self.coeffs.len() <= 1
    }

    /// Degree, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    pub fn coeff(&self, k: usize) -> BigRational {
        self.coeffs.get(k).cloned().unwrap_or_else(BigRational::zero)
    }

    pub fn leading(&self) -> Option<&BigRational> {
        self.coeffs.last()
    }

    /// Ascending coefficients.
    pub fn coeffs(&self) -> &[BigRational] {
        &self.coeffs
    }

    /// Non-zero terms as `(degree, coefficient)`, ascending.
    pub fn terms(&self) -> impl Iterator<Item = (usize, &BigRational)> {
        self.coeffs.iter().enumerate().filter(|(_, c)| !c.is_zero())
    }

    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len).map(|k| self.coeff(k) + other.coeff(k)).collect();
        Self::from_coeffs(coeffs)
    }

    pub fn neg(&self) -> Self {
        Self {
            coeffs: self.coeffs.iter().map(|c| -c).collect(),
        }
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let mut coeffs = vec![BigRational::zero(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.terms() {
            for (j, b) in other.terms() {
                coeffs[i + j] += a * b;
            }
        }
        Self::from_coeffs(coeffs)
    }

    pub fn scale(&self, c: &BigRational) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        Self {
            coeffs: self.coeffs.iter().map(|a| a * c).collect(),
        }
    }

    /// Multiply by `x^k`.
    pub fn shift(&self, k: usize) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let mut coeffs = vec![BigRational::zero(); k];
        coeffs.extend(self.coeffs.iter().cloned());
        Self { coeffs }
    }

    pub fn pow(&self, n: u32) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mul(&base);
            }
        }
        result
    }

    /// `p(x) -> p(x^d)`.
    pub fn substitute_power(&self, d: usize) -> Self {
        if d == 0 {
            return Self::constant(self.evaluate(&BigRational::one()));
        }
        let mut out = Self::zero();
        for (k, c) in self.terms() {
            out = out.add(&Self::monomial(c.clone(), k * d));
        }
        out
    }

    pub fn evaluate(&self, at: &BigRational) -> BigRational {
        self.coeffs
            .iter()
            .rev()
            .fold(BigRational::zero(), |acc, c| acc * at + c)
    }

    /// Long division, `self = q * divisor + r` with `deg r < deg divisor`.
    pub fn div_rem(&self, divisor: &Self) -> KacResult<(Self, Self)> {
        let d_deg = divisor.degree().ok_or(KacError::DivisionByZero)?;
        let lead = &divisor.coeffs[d_deg];
        let mut rem = self.coeffs.clone();
        let q_len = rem.len().saturating_sub(d_deg);
        let mut quot = vec![BigRational::zero(); q_len];
        for k in (0..q_len).rev() {
            let c = &rem[k + d_deg] / lead;
            if c.is_zero() {
                continue;
            }
            for (j, dc) in divisor.coeffs.iter().enumerate() {
                rem[k + j] -= &c * dc;
            }
            quot[k] = c;
        }
        rem.truncate(d_deg);
        Ok((Self::from_coeffs(quot), Self::from_coeffs(rem)))
    }

    /// Division that must leave no remainder.
    pub fn div_exact(&self, divisor: &Self) -> KacResult<Self> {
        let (q, r) = self.div_rem(divisor)?;
        if !r.is_zero() {
            return Err(KacError::NonPolynomial(format!("({}) / ({})", self, divisor)));
        }
        Ok(q)
    }

    /// Scale so the leading coefficient is one.
    pub fn monic(&self) -> Self {
        match self.leading() {
            Some(lead) if !lead.is_one() => self.scale(&lead.recip()),
            _ => self.clone(),
        }
    }

    /// Monic greatest common divisor; zero only when both inputs are zero.
    pub fn gcd(&self, other: &Self) -> Self {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            // b is non-zero so the division cannot fail
            let r = match a.div_rem(&b) {
                Ok((_, r)) => r,
                Err(_) => break,
            };
            a = b;
            b = r;
        }
        a.monic()
    }

    /// Render with an explicit variable name.
    pub fn display_in<'a>(&'a self, var: &'a str) -> DisplayPoly<'a> {
        DisplayPoly { poly: self, var }
    }
}

fn fmt_rational(c: &BigRational) -> String {
    if c.is_integer() {
        c.to_integer().to_string()
    } else {
        format!("{}/{}", c.numer(), c.denom())
    }
}

/// Canonical descending-degree rendering, e.g. `q^9 + q^7 - 2*q + 1/2`.
pub struct DisplayPoly<'a> {
    poly: &'a UniPoly,
    var: &'a str,
}

impl fmt::Display for DisplayPoly<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.poly.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for (k, c) in self.poly.terms().collect::<Vec<_>>().into_iter().rev() {
            let negative = c.is_negative();
            let abs = c.abs();
            let body = match (k, abs.is_one()) {
                (0, _) => fmt_rational(&abs),
                (1, true) => self.var.to_string(),
                (1, false) => format!("{}*{}", fmt_rational(&abs), self.var),
                (_, true) => format!("{}^{}", self.var, k),
                (_, false) => format!("{}*{}^{}", fmt_rational(&abs), self.var, k),
            };
            match (first, negative) {
                (true, false) => write!(f, "{}", body)?,
                (true, true) => write!(f, "-{}", body)?,
                (false, false) => write!(f, " + {}", body)?,
                (false, true) => write!(f, " - {}", body)?,
            }
            first = false;
        }
        Ok(())
    }
}

impl fmt::Display for UniPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_in("q"))
    }
}

impl FromStr for UniPoly {
    type Err = KacError;

    /// Parses the canonical rendering. Any single alphabetic identifier is
    /// accepted as the variable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(KacError::Parse("empty polynomial".into()));
        }
        let mut terms: Vec<String> = Vec::new();
        let mut current = String::new();
        for ch in compact.chars() {
            if (ch == '+' || ch == '-') && !current.is_empty() {
                terms.push(std::mem::take(&mut current));
            }
            current.push(ch);
        }
        terms.push(current);

        let mut var: Option<String> = None;
        let mut out = UniPoly::zero();
        for term in terms {
            let (negative, body) = match term.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, term.strip_prefix('+').unwrap_or(term.as_str())),
            };
            let (coeff, degree) = parse_term(body, &mut var)?;
            let coeff = if negative { -coeff } else { coeff };
            out = out.add(&UniPoly::monomial(coeff, degree));
        }
        Ok(out)
    }
}

fn parse_term(body: &str, var: &mut Option<String>) -> KacResult<(BigRational, usize)> {
    if body.is_empty() {
        return Err(KacError::Parse("dangling sign".into()));
    }
    let (coeff_part, var_part) = match body.find(|c: char| c.is_alphabetic()) {
        None => (body, None),
        Some(0) => ("", Some(body)),
        Some(pos) => {
            let coeff = body[..pos]
                .strip_suffix('*')
                .ok_or_else(|| KacError::Parse(format!("expected '*' in term '{}'", body)))?;
            (coeff, Some(&body[pos..]))
        }
    };
    let coeff = if coeff_part.is_empty() {
        BigRational::one()
    } else {
        BigRational::from_str(coeff_part)
            .map_err(|_| KacError::Parse(format!("bad coefficient '{}'", coeff_part)))?
    };
    let degree = match var_part {
        None => 0,
        Some(v) => {
            let (name, exp) = match v.split_once('^') {
                Some((name, exp)) => {
                    let exp = exp
                        .parse::<usize>()
                        .map_err(|_| KacError::Parse(format!("bad exponent '{}'", exp)))?;
                    (name, exp)
                }
                None => (v, 1),
            };
            if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return Err(KacError::Parse(format!("bad variable '{}'", name)));
            }
            match var.as_deref() {
                Some(seen) if seen != name => {
                    return Err(KacError::Parse(format!(
                        "mixed variables '{}' and '{}'",
                        seen, name
                    )))
                }
                Some(_) => {}
                None => *var = Some(name.to_string()),
            }
            exp
        }
    };
    Ok((coeff, degree))
}

impl Add for &UniPoly {
    type Output = UniPoly;
    fn add(self, other: Self) -> UniPoly {
        UniPoly::add(self, other)
    }
}

impl Sub for &UniPoly {
    type Output = UniPoly;
    fn sub(self, other: Self) -> UniPoly {
        UniPoly::sub(self, other)
    }
}

impl Mul for &UniPoly {
    type Output = UniPoly;
    fn mul(self, other: Self) -> UniPoly {
        UniPoly::mul(self, other)
    }
}

impl Neg for &UniPoly {
    type Output = UniPoly;
    fn neg(self) -> UniPoly {
        UniPoly::neg(self)
    }
}
