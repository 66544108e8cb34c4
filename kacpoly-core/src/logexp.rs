//! Truncated logarithm of the P-series and extraction of H_Γ.

use crate::context::AlgebraContext;
use crate::partition::Partition;
use crate::poly::rat;
use crate::pseries::{candidate_lists, p_series};
use crate::quiver::Quiver;
use crate::ratfunc::RatFunc;
use crate::series::XSeries;
use crate::{KacError, KacResult};
use log::{debug, trace};
use num_bigint::BigInt;
use num_rational::BigRational;

/// Σ_{i=1}^{|α|} (-1)^{i-1} (P_Γ - 1)^i / i.
///
/// P_Γ - 1 has no constant term, so powers beyond |α| cannot reach x^α and
/// the finite sum is exact for every coefficient inside the α box.
pub fn log_p(
    ctx: &AlgebraContext,
    quiver: &Quiver,
    lists: &[Vec<Partition>],
    alpha: &[u32],
) -> KacResult<XSeries> {
    if alpha.len() != ctx.n_vertices() {
        return Err(KacError::InvalidQuiverDefinition(format!(
            "target exponent has {} entries, context has {} vertices",
            alpha.len(),
            ctx.n_vertices()
        )));
    }
    let dim = alpha.iter().sum::<u32>() + 1;
    let bound = if ctx.config().truncate_to_target {
        Some(alpha)
    } else {
        None
    };

    let f = p_series(ctx, quiver, lists)?.sub(&ctx.series_one());
    let mut power = f.mul_truncated(&ctx.series_one(), bound);
    let mut out = ctx.series_zero();
    for i in 1..dim {
        if i > 1 {
            power = power.mul_truncated(&f, bound);
        }
        if power.is_zero() {
            break;
        }
        let sign = if i % 2 == 1 { 1 } else { -1 };
        let c = BigRational::new(BigInt::from(sign), BigInt::from(i));
        out = out.add(&power.scale(&c));
        ctx.config().check_terms(power.len().max(out.len()))?;
        trace!("log term {}: {} monomials", i, power.len());
    }
    Ok(out)
}

/// H_Γ(α, w) = gcd(α) · [x^α] log P_Γ.
pub fn h_gamma(ctx: &AlgebraContext, quiver: &Quiver) -> KacResult<RatFunc> {
    let alpha = quiver.dimension();
    let a = quiver.dimension_gcd();
    let lists = candidate_lists(quiver);
    let log = log_p(ctx, quiver, &lists, alpha)?;
    let h = log.coefficient(alpha).scale(&rat(a as i64));
    debug!("H for dimension {:?} = {}", alpha, h);
    Ok(h)
}
