use crate::context::AlgebraContext;
use crate::partition::{b_pi, inner_product, partitions_up_to, Partition};
use crate::quiver::Quiver;
use crate::ratfunc::RatFunc;
use crate::series::XSeries;
use crate::{KacError, KacResult};
use log::debug;

/// Per-vertex candidate lists: every partition of every size `0..=α_i`.
pub fn candidate_lists(quiver: &Quiver) -> Vec<Vec<Partition>> {
    quiver.dimension().iter().map(|&a| partitions_up_to(a)).collect()
}

/// Number of tuples in the Cartesian product of `lists`.
pub fn tuple_count(lists: &[Vec<Partition>]) -> usize {
    lists
        .iter()
        .try_fold(1usize, |acc, l| acc.checked_mul(l.len()))
        .unwrap_or(usize::MAX)
}

/// Lazy walk over the Cartesian product of per-vertex partition lists.
/// Finite; build a new one to walk the product again.
#[derive(Clone, Debug)]
pub struct PartitionTuples<'a> {
    lists: &'a [Vec<Partition>],
    indices: Vec<usize>,
    done: bool,
}

impl<'a> PartitionTuples<'a> {
    pub fn new(lists: &'a [Vec<Partition>]) -> Self {
        Self {
            lists,
            indices: vec![0; lists.len()],
            done: lists.iter().any(|l| l.is_empty()),
        }
    }
}

impl<'a> Iterator for PartitionTuples<'a> {
    type Item = Vec<&'a Partition>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let tuple = self
            .indices
            .iter()
            .zip(self.lists)
            .map(|(&i, l)| &l[i])
            .collect();
        // odometer step, last vertex fastest
        self.done = true;
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.lists[pos].len() {
                self.done = false;
                break;
            }
            self.indices[pos] = 0;
        }
        Some(tuple)
    }
}

/// Pairwise edge multiplicities indexed by vertex position.
fn edge_matrix(quiver: &Quiver) -> Vec<Vec<u64>> {
    let n = quiver.vertex_count();
    (0..n)
        .map(|i| (0..n).map(|j| quiver.edge_count_at(i, j) as u64).collect())
        .collect()
}

/// w^{Σ_{i≤j} e_ij ⟨λ_i,λ_j⟩} / ∏_i w^{⟨λ_i,λ_i⟩} b_{λ_i}
fn tuple_weight(edges: &[Vec<u64>], tuple: &[&Partition]) -> KacResult<RatFunc> {
    let n = tuple.len();
    let mut power: i64 = 0;
    for i in 0..n {
        for j in i..n {
            if edges[i][j] > 0 {
                power += (edges[i][j] * inner_product(tuple[i], tuple[j])) as i64;
            }
        }
    }
    let mut den = RatFunc::one();
    for p in tuple {
        power -= inner_product(p, p) as i64;
        den = den.mul(&b_pi(p));
    }
    RatFunc::w_power(power).div(&den)
}

/// P_Γ = Σ over partition tuples of weight · ∏ x_i^{|λ_i|}.
pub fn p_series(
    ctx: &AlgebraContext,
    quiver: &Quiver,
    lists: &[Vec<Partition>],
) -> KacResult<XSeries> {
    ctx.check_quiver(quiver)?;
    if lists.len() != quiver.vertex_count() {
        return Err(KacError::InvalidQuiverDefinition(format!(
            "{} candidate lists for {} vertices",
            lists.len(),
            quiver.vertex_count()
        )));
    }
    let count = tuple_count(lists);
    ctx.config().check_tuples(count)?;
    debug!("building P-series over {} partition tuples", count);

    let edges = edge_matrix(quiver);
    let mut series = ctx.series_zero();
    for tuple in PartitionTuples::new(lists) {
        let exps: Vec<u32> = tuple.iter().map(|p| p.size()).collect();
        series.add_term(exps, tuple_weight(&edges, &tuple)?);
    }
    ctx.config().check_terms(series.len())?;
    Ok(series)
}
