//! C_Γ for one-vertex quivers, built from a sequence K_1..K_m of
//! invariants through the plethystic exponential.

use crate::bivariate::BiPoly;
use crate::context::AlgebraContext;
use crate::kac::KacEngine;
use crate::plethystic::pexp;
use crate::poly::UniPoly;
use crate::quiver::Quiver;
use crate::{KacError, KacResult};
use log::debug;

/// Supplies K_i(q) for i = 1..m.
pub trait InvariantSource {
    fn invariant(&mut self, index: u32) -> KacResult<UniPoly>;

    /// How many indices the source can serve, when that is known up front.
    fn available(&self) -> Option<usize> {
        None
    }
}

/// K_i = A_Γ at dimension [i], computed on demand.
pub struct Recursive<'a> {
    engine: KacEngine<'a>,
}

impl<'a> Recursive<'a> {
    pub fn new(ctx: &'a AlgebraContext, quiver: &'a Quiver) -> Self {
        Self {
            engine: KacEngine::new(ctx, quiver),
        }
    }
}

impl InvariantSource for Recursive<'_> {
    fn invariant(&mut self, index: u32) -> KacResult<UniPoly> {
        self.engine.a_gamma(&[index])
    }
}

/// K_i read from a precomputed table, `table[i - 1]`.
pub struct Table<'a> {
    values: &'a [UniPoly],
}

impl<'a> Table<'a> {
    pub fn new(values: &'a [UniPoly]) -> Self {
        Self { values }
    }
}

impl InvariantSource for Table<'_> {
    fn invariant(&mut self, index: u32) -> KacResult<UniPoly> {
        index
            .checked_sub(1)
            .and_then(|i| self.values.get(i as usize))
            .cloned()
            .ok_or(KacError::InconsistentPrecomputedTable {
                needed: index as usize,
                available: self.values.len(),
            })
    }

    fn available(&self) -> Option<usize> {
        Some(self.values.len())
    }
}

impl<F> InvariantSource for F
where
    F: FnMut(u32) -> KacResult<UniPoly>,
{
    fn invariant(&mut self, index: u32) -> KacResult<UniPoly> {
        self(index)
    }
}

/// Shared algorithm behind [`c_gamma`] and [`c_gamma_list`].
///
/// With m = gcd(α): inpol = -Σ_{i=1}^{m} K_i(q) t^i, and C_Γ is the t^m
/// coefficient of 1 - PExp(inpol).
pub fn c_gamma_with<S: InvariantSource + ?Sized>(quiver: &Quiver, source: &mut S) -> KacResult<UniPoly> {
    if quiver.vertex_count() != 1 {
        return Err(KacError::UnsupportedOperation {
            vertices: quiver.vertex_count(),
        });
    }
    let m = quiver.dimension_gcd();
    if m == 0 {
        return Ok(UniPoly::zero());
    }
    if let Some(available) = source.available() {
        if available < m as usize {
            return Err(KacError::InconsistentPrecomputedTable {
                needed: m as usize,
                available,
            });
        }
    }

    let mut inpol = BiPoly::zero();
    for i in 1..=m {
        let k = source.invariant(i)?;
        for (deg, c) in k.terms() {
            inpol.add_term(i, deg as u32, -c.clone());
        }
    }
    let plethystic = pexp(&inpol, m)?;
    let pe = BiPoly::one().sub(&plethystic);
    let result = pe.t_coefficient(m);
    debug!("C for m = {}: {}", m, result);
    Ok(result)
}

/// C_Γ with every K_i recomputed as A_Γ.
pub fn c_gamma(ctx: &AlgebraContext, quiver: &Quiver) -> KacResult<UniPoly> {
    c_gamma_with(quiver, &mut Recursive::new(ctx, quiver))
}

/// C_Γ with K_i taken from `table`, which is trusted as given.
pub fn c_gamma_list(quiver: &Quiver, table: &[UniPoly]) -> KacResult<UniPoly> {
    c_gamma_with(quiver, &mut Table::new(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::three_loop_reference;

    #[test]
    fn test_recursive_matches_table() {
        let ctx = AlgebraContext::new(1);
        let quiver = Quiver::loops(3, 3);
        let table: Vec<UniPoly> = (1..=3)
            .map(|i| crate::kac::a_gamma(&ctx, &Quiver::loops(3, i)).unwrap())
            .collect();
        assert_eq!(c_gamma(&ctx, &quiver).unwrap(), c_gamma_list(&quiver, &table).unwrap());
    }

    #[test]
    fn test_small_values() {
        let table = three_loop_reference().unwrap();
        assert_eq!(c_gamma_list(&Quiver::loops(3, 1), &table).unwrap().to_string(), "q^3");
        assert_eq!(
            c_gamma_list(&Quiver::loops(3, 2), &table).unwrap().to_string(),
            "q^9 + q^7 + q^5"
        );
        assert!(c_gamma_list(&Quiver::loops(3, 0), &table).unwrap().is_zero());
    }

    #[test]
    fn test_multi_vertex_not_applicable() {
        let q = Quiver::from_strs(&["a", "b"], &[("a", "b")], &[1, 1]).unwrap();
        let ctx = AlgebraContext::new(2);
        assert_eq!(
            c_gamma(&ctx, &q),
            Err(KacError::UnsupportedOperation { vertices: 2 })
        );
        assert_eq!(
            c_gamma_list(&q, &[]),
            Err(KacError::UnsupportedOperation { vertices: 2 })
        );
    }

    #[test]
    fn test_short_table() {
        let table = vec![UniPoly::from_ints(&[0, 0, 0, 1])];
        assert_eq!(
            c_gamma_list(&Quiver::loops(3, 2), &table),
            Err(KacError::InconsistentPrecomputedTable {
                needed: 2,
                available: 1
            })
        );
    }

    #[test]
    fn test_closure_source() {
        // K_i = q^i for every i
        let mut source = |i: u32| -> KacResult<UniPoly> { Ok(UniPoly::monomial(num_traits::One::one(), i as usize)) };
        let c = c_gamma_with(&Quiver::loops(1, 1), &mut source).unwrap();
        assert_eq!(c.to_string(), "q");
    }
}
