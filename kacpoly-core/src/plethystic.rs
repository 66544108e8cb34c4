use crate::bivariate::BiPoly;
use crate::{KacError, KacResult};
use log::trace;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

/// Plethystic exponential ∏ (1 - t^i q^j)^{-c} over the terms c·t^i q^j of
/// `poly`, as a power series truncated to t-degree `<= limit`.
///
/// Each factor is expanded with the generalised binomial series
/// Σ_k binom(c + k - 1, k) (t^i q^j)^k, which terminates on its own when
/// `-c` is a non-negative integer.
pub fn pexp(poly: &BiPoly, limit: u32) -> KacResult<BiPoly> {
    let mut result = BiPoly::one();
    for (&(i, j), c) in poly.terms() {
        let factor = binomial_factor(i, j, c, limit)?;
        result = result.mul_truncated(&factor, Some(limit));
        trace!("pexp factor t^{} q^{}: {} terms", i, j, result.len());
    }
    Ok(result)
}

/// (1 - t^i q^j)^{-c} up to t-degree `limit`.
fn binomial_factor(i: u32, j: u32, c: &BigRational, limit: u32) -> KacResult<BiPoly> {
    let terminates = c.is_integer() && *c <= BigRational::zero();
    if i == 0 && (j == 0 || !terminates) {
        return Err(KacError::UnboundedSeries);
    }
    let mut factor = BiPoly::zero();
    let mut coeff = BigRational::one();
    let mut k: u32 = 0;
    while !coeff.is_zero() && (i == 0 || i * k <= limit) {
        factor.add_term(i * k, j * k, coeff.clone());
        // binom(c + k, k + 1) = binom(c + k - 1, k) * (c + k) / (k + 1)
        coeff = coeff * (c + BigRational::from_integer(BigInt::from(k)))
            / BigRational::from_integer(BigInt::from(k + 1));
        k += 1;
    }
    Ok(factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::rat;

    fn bi(terms: &[(u32, u32, i64)]) -> BiPoly {
        let mut p = BiPoly::zero();
        for &(i, j, c) in terms {
            p.add_term(i, j, rat(c));
        }
        p
    }

    #[test]
    fn test_negative_coefficients_give_polynomials() {
        // (1 - t q)(1 - t^2) truncated at t^3
        let out = pexp(&bi(&[(1, 1, -1), (2, 0, -1)]), 3).unwrap();
        assert_eq!(out, bi(&[(0, 0, 1), (1, 1, -1), (2, 0, -1), (3, 1, 1)]));
    }

    #[test]
    fn test_positive_coefficient_is_truncated() {
        // 1/(1 - t q) = Σ (t q)^k, cut at t^3
        let out = pexp(&bi(&[(1, 1, 1)]), 3).unwrap();
        assert_eq!(out, bi(&[(0, 0, 1), (1, 1, 1), (2, 2, 1), (3, 3, 1)]));
        assert_eq!(out.max_t_degree(), Some(3));
    }

    #[test]
    fn test_rational_exponent() {
        // (1 - t)^{-1/2} = 1 + t/2 + 3t^2/8 + ...
        let half = BigRational::new(BigInt::from(1), BigInt::from(2));
        let out = pexp(&BiPoly::term(half, 1, 0), 2).unwrap();
        assert_eq!(out.coeff(1, 0), BigRational::new(BigInt::from(1), BigInt::from(2)));
        assert_eq!(out.coeff(2, 0), BigRational::new(BigInt::from(3), BigInt::from(8)));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_truncation_bound_holds() {
        let input = bi(&[(1, 0, 2), (1, 3, -1), (2, 1, 5)]);
        for limit in 0..5 {
            let out = pexp(&input, limit).unwrap();
            assert!(out.max_t_degree().unwrap_or(0) <= limit);
        }
        assert_eq!(pexp(&input, 0).unwrap(), BiPoly::one());
    }

    #[test]
    fn test_unbounded_factor_rejected() {
        assert_eq!(pexp(&bi(&[(0, 2, 1)]), 3), Err(KacError::UnboundedSeries));
        assert_eq!(pexp(&bi(&[(0, 0, -1)]), 3), Err(KacError::UnboundedSeries));
        // terminating q-only factor: (1 - q)^2
        let out = pexp(&bi(&[(0, 1, -2)]), 3).unwrap();
        assert_eq!(out, bi(&[(0, 0, 1), (0, 1, -2), (0, 2, 1)]));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(pexp(&BiPoly::zero(), 4).unwrap(), BiPoly::one());
    }
}
