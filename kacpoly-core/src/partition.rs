//! Integer partitions and the auxiliary functions Φ and b_π over ℚ(w).

use crate::ratfunc::RatFunc;
use crate::{KacError, KacResult};
use std::fmt;

/// Non-increasing sequence of positive parts. The empty partition is the
/// unique partition of zero.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Partition(Vec<u32>);

impl Partition {
    pub fn new(parts: Vec<u32>) -> KacResult<Self> {
        if parts.iter().any(|&p| p == 0) {
            return Err(KacError::Parse(format!("partition {:?} has a zero part", parts)));
        }
        if parts.windows(2).any(|w| w[0] < w[1]) {
            return Err(KacError::Parse(format!("partition {:?} is not non-increasing", parts)));
        }
        Ok(Self(parts))
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn parts(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of the parts.
    pub fn size(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Transpose of the Young diagram.
    pub fn conjugate(&self) -> Partition {
        let first = self.0.first().copied().unwrap_or(0);
        Partition(
            (0..first)
                .map(|i| self.0.iter().filter(|&&p| p > i).count() as u32)
                .collect(),
        )
    }

    /// `(part, multiplicity)` for each distinct part, largest part first.
    pub fn exponent_multiset(&self) -> Vec<(u32, u32)> {
        let mut out: Vec<(u32, u32)> = Vec::new();
        for &p in &self.0 {
            match out.last_mut() {
                Some((part, mult)) if *part == p => *mult += 1,
                _ => out.push((p, 1)),
            }
        }
        out
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|p| p.to_string()).collect();
        write!(f, "({})", parts.join(","))
    }
}

/// All partitions of `n`, in reverse lexicographic order.
pub fn partitions_of(n: u32) -> Vec<Partition> {
    let mut out = Vec::new();
    let mut prefix = Vec::new();
    fill_partitions(n, n, &mut prefix, &mut out);
    out
}

fn fill_partitions(remaining: u32, max_part: u32, prefix: &mut Vec<u32>, out: &mut Vec<Partition>) {
    if remaining == 0 {
        out.push(Partition(prefix.clone()));
        return;
    }
    for part in (1..=remaining.min(max_part)).rev() {
        prefix.push(part);
        fill_partitions(remaining - part, part, prefix, out);
        prefix.pop();
    }
}

/// Every partition of every size `0..=n`, smallest sizes first.
pub fn partitions_up_to(n: u32) -> Vec<Partition> {
    (0..=n).flat_map(partitions_of).collect()
}

/// ⟨λ, μ⟩ = Σ_i λ'_i μ'_i over the conjugates.
pub fn inner_product(p1: &Partition, p2: &Partition) -> u64 {
    p1.conjugate()
        .0
        .iter()
        .zip(p2.conjugate().0.iter())
        .map(|(&a, &b)| a as u64 * b as u64)
        .sum()
}

/// Φ(n) = ∏_{i=1}^{n} (1 - w^{-i}), with Φ(0) = 1.
pub fn phi(n: u32) -> RatFunc {
    (1..=n as i64).fold(RatFunc::one(), |acc, i| {
        acc.mul(&RatFunc::one().sub(&RatFunc::w_power(-i)))
    })
}

/// b_π = ∏ Φ(m) over the part multiplicities m of π.
pub fn b_pi(p: &Partition) -> RatFunc {
    p.exponent_multiset()
        .into_iter()
        .fold(RatFunc::one(), |acc, (_, mult)| acc.mul(&phi(mult)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::UniPoly;
    use proptest::prelude::*;

    fn part(v: &[u32]) -> Partition {
        Partition::new(v.to_vec()).unwrap()
    }

    #[test]
    fn test_partition_counts() {
        let counts: Vec<usize> = (0..8).map(|n| partitions_of(n).len()).collect();
        assert_eq!(counts, vec![1, 1, 2, 3, 5, 7, 11, 15]);
        assert_eq!(partitions_of(0), vec![Partition::empty()]);
        assert_eq!(partitions_up_to(3).len(), 1 + 1 + 2 + 3);
    }

    #[test]
    fn test_partition_order() {
        let p4: Vec<String> = partitions_of(4).iter().map(|p| p.to_string()).collect();
        assert_eq!(p4, vec!["(4)", "(3,1)", "(2,2)", "(2,1,1)", "(1,1,1,1)"]);
    }

    #[test]
    fn test_new_rejects_bad_input() {
        assert!(Partition::new(vec![1, 2]).is_err());
        assert!(Partition::new(vec![2, 0]).is_err());
    }

    #[test]
    fn test_conjugate() {
        assert_eq!(part(&[4, 2]).conjugate(), part(&[2, 2, 1, 1]));
        assert_eq!(part(&[3, 1, 1]).conjugate(), part(&[3, 1, 1]));
        assert_eq!(Partition::empty().conjugate(), Partition::empty());
    }

    #[test]
    fn test_inner_product_values() {
        assert_eq!(inner_product(&part(&[1]), &part(&[1])), 1);
        assert_eq!(inner_product(&part(&[2]), &part(&[2])), 2);
        assert_eq!(inner_product(&part(&[1, 1]), &part(&[1, 1])), 4);
        assert_eq!(inner_product(&part(&[2]), &part(&[1, 1])), 2);
        assert_eq!(inner_product(&Partition::empty(), &part(&[3, 2])), 0);
    }

    #[test]
    fn test_exponent_multiset() {
        assert_eq!(part(&[3, 3, 2, 1, 1, 1]).exponent_multiset(), vec![(3, 2), (2, 1), (1, 3)]);
        assert!(Partition::empty().exponent_multiset().is_empty());
    }

    #[test]
    fn test_phi() {
        assert!(phi(0).is_one());
        // Φ(2) = (w - 1)(w^2 - 1) / w^3
        let p2 = phi(2);
        assert_eq!(p2.numer(), &UniPoly::from_ints(&[-1, 0, 1]).mul(&UniPoly::from_ints(&[-1, 1])));
        assert_eq!(p2.denom(), &UniPoly::monomial(num_traits::One::one(), 3));
        for n in 1..6u32 {
            // n factors, each contributing w^i to the denominator
            assert_eq!(phi(n).denom().degree(), Some((n * (n + 1) / 2) as usize));
            assert!(!phi(n).is_zero());
        }
    }

    #[test]
    fn test_b_pi() {
        assert_eq!(b_pi(&part(&[2, 1, 1])), phi(1).mul(&phi(2)));
        assert!(b_pi(&Partition::empty()).is_one());
    }

    fn arb_partition() -> impl Strategy<Value = Partition> {
        prop::collection::vec(1u32..6, 0..6).prop_map(|mut v| {
            v.sort_unstable_by(|a, b| b.cmp(a));
            Partition(v)
        })
    }

    proptest! {
        #[test]
        fn test_inner_product_symmetric(a in arb_partition(), b in arb_partition()) {
            prop_assert_eq!(inner_product(&a, &b), inner_product(&b, &a));
        }

        #[test]
        fn test_conjugate_involution(a in arb_partition()) {
            prop_assert_eq!(a.conjugate().conjugate(), a.clone());
            prop_assert_eq!(a.conjugate().size(), a.size());
        }
    }
}
