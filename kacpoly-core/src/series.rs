use crate::context::AlgebraContext;
use crate::ratfunc::RatFunc;
use num_rational::BigRational;
use std::collections::BTreeMap;

/// Polynomial in the vertex variables x_1..x_n with coefficients in ℚ(w).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XSeries {
    n_vars: usize,
    /// x-exponent vector -> non-zero coefficient
    terms: BTreeMap<Vec<u32>, RatFunc>,
}

impl XSeries {
    pub fn zero(n_vars: usize) -> Self {
        Self {
            n_vars,
            terms: BTreeMap::new(),
        }
    }

    pub fn one(n_vars: usize) -> Self {
        let mut s = Self::zero(n_vars);
        s.add_term(vec![0; n_vars], RatFunc::one());
        s
    }

    pub fn n_vars(&self) -> usize {
        self.n_vars
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.terms.len() == 1 && self.constant_term().is_one()
    }

    pub fn terms(&self) -> impl Iterator<Item = (&Vec<u32>, &RatFunc)> {
        self.terms.iter()
    }

    pub fn add_term(&mut self, exps: Vec<u32>, coeff: RatFunc) {
        if coeff.is_zero() {
            return;
        }
        let merged = match self.terms.get(&exps) {
            Some(existing) => existing.add(&coeff),
            None => coeff,
        };
        if merged.is_zero() {
            self.terms.remove(&exps);
        } else {
            self.terms.insert(exps, merged);
        }
    }

    pub fn coefficient(&self, exps: &[u32]) -> RatFunc {
        self.terms.get(exps).cloned().unwrap_or_else(RatFunc::zero)
    }

    pub fn constant_term(&self) -> RatFunc {
        self.coefficient(&vec![0; self.n_vars])
    }

    pub fn add(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (e, c) in &other.terms {
            out.add_term(e.clone(), c.clone());
        }
        out
    }

    pub fn sub(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (e, c) in &other.terms {
            out.add_term(e.clone(), c.neg());
        }
        out
    }

    pub fn scale(&self, c: &BigRational) -> Self {
        let mut out = Self::zero(self.n_vars);
        for (e, v) in &self.terms {
            out.add_term(e.clone(), v.scale(c));
        }
        out
    }

    /// Product keeping only monomials whose exponents stay inside `bound`
    /// componentwise. `None` keeps everything.
    pub fn mul_truncated(&self, other: &Self, bound: Option<&[u32]>) -> Self {
        let mut out = Self::zero(self.n_vars.max(other.n_vars));
        for (e1, c1) in &self.terms {
            if !within(e1, bound) {
                continue;
            }
            for (e2, c2) in &other.terms {
                let exps: Vec<u32> = e1.iter().zip(e2).map(|(a, b)| a + b).collect();
                if !within(&exps, bound) {
                    continue;
                }
                out.add_term(exps, c1.mul(c2));
            }
        }
        out
    }

    pub fn mul(&self, other: &Self) -> Self {
        self.mul_truncated(other, None)
    }

    /// Human-readable rendering using the context's variable names.
    pub fn render(&self, ctx: &AlgebraContext) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        self.terms
            .iter()
            .map(|(exps, c)| {
                let mono: Vec<String> = exps
                    .iter()
                    .enumerate()
                    .filter(|&(_, &e)| e > 0)
                    .map(|(i, &e)| match e {
                        1 => ctx.vertex_var(i).to_string(),
                        _ => format!("{}^{}", ctx.vertex_var(i), e),
                    })
                    .collect();
                let coeff = c.display_in(ctx.weight_var()).to_string();
                if mono.is_empty() {
                    format!("[{}]", coeff)
                } else {
                    format!("[{}]*{}", coeff, mono.join("*"))
                }
            })
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

fn within(exps: &[u32], bound: Option<&[u32]>) -> bool {
    match bound {
        None => true,
        Some(b) => exps.iter().zip(b).all(|(e, m)| e <= m),
    }
}
