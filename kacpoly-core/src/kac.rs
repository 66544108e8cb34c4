use crate::arith::{divisors, mobius};
use crate::context::AlgebraContext;
use crate::logexp::h_gamma;
use crate::poly::{rat, UniPoly};
use crate::quiver::Quiver;
use crate::ratfunc::RatFunc;
use crate::KacResult;
use log::debug;
use num_bigint::BigInt;
use num_rational::BigRational;
use std::collections::BTreeMap;

/// Kac polynomial A_Γ(q) of the quiver at its own dimension vector.
///
/// With a = gcd(α): A_Γ = (q - 1)/a · Σ_{i | a} μ(i) H_Γ(α/i, q^i).
/// The all-zero dimension vector gives 0.
pub fn a_gamma(ctx: &AlgebraContext, quiver: &Quiver) -> KacResult<UniPoly> {
    ctx.check_quiver(quiver)?;
    let a = quiver.dimension_gcd();
    if a == 0 {
        return Ok(UniPoly::zero());
    }
    let mut sum = RatFunc::zero();
    for i in divisors(a) {
        let mu = mobius(i);
        if mu == 0 {
            continue;
        }
        let scaled: Vec<u32> = quiver.dimension().iter().map(|d| d / i).collect();
        let h = h_gamma(ctx, &quiver.with_dimension(scaled)?)?;
        sum = sum.add(&h.substitute_power(i as usize)?.scale(&rat(mu as i64)));
    }
    let b = UniPoly::from_ints(&[-1, 1]).scale(&BigRational::new(BigInt::from(1), BigInt::from(a)));
    let result = RatFunc::from_poly(b).mul(&sum).into_poly()?;
    debug!("A for dimension {:?} = {}", quiver.dimension(), result);
    Ok(result)
}

/// Computes A_Γ for one graph at many dimension vectors, remembering
/// every value it has produced.
pub struct KacEngine<'a> {
    ctx: &'a AlgebraContext,
    quiver: &'a Quiver,
    cache: BTreeMap<Vec<u32>, UniPoly>,
}

impl<'a> KacEngine<'a> {
    pub fn new(ctx: &'a AlgebraContext, quiver: &'a Quiver) -> Self {
        Self {
            ctx,
            quiver,
            cache: BTreeMap::new(),
        }
    }

    pub fn context(&self) -> &AlgebraContext {
        self.ctx
    }

    pub fn quiver(&self) -> &Quiver {
        self.quiver
    }

    /// A_Γ at `dimension` for this engine's graph.
    pub fn a_gamma(&mut self, dimension: &[u32]) -> KacResult<UniPoly> {
        if let Some(hit) = self.cache.get(dimension) {
            return Ok(hit.clone());
        }
        let q = self.quiver.with_dimension(dimension.to_vec())?;
        let value = a_gamma(self.ctx, &q)?;
        self.cache.insert(dimension.to_vec(), value.clone());
        Ok(value)
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}
