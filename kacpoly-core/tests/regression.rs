use kacpoly_core::{
    a_gamma, c_gamma, c_gamma_list, candidate_lists, h_gamma, p_series, three_loop_reference,
    AlgebraContext, KacError, Quiver, RatFunc, UniPoly,
};

const FOUR_LOOP_DIM4_FROM_REFERENCE: &str = "q^33 + q^31 + q^30 + 2*q^29 + q^28 + 3*q^27 + 2*q^26 \
    + 4*q^25 + 3*q^24 + 5*q^23 + 3*q^22 + 7*q^21 + 4*q^20 + 7*q^19 + 5*q^18 + 8*q^17 + 3*q^16 \
    + 7*q^15 + 2*q^14 + 4*q^13 + q^12 + 2*q^11 + q^9";

const FOUR_LOOP_DIM3: &str = "q^28 + q^26 + q^25 + q^24 + q^23 + 2*q^22 + q^21 + 2*q^20 \
    + 2*q^19 + 2*q^18 + q^17 + 3*q^16 + q^15 + 2*q^14 + q^13 + q^12 + q^10";

#[test]
fn three_loop_kac_polynomials() {
    let ctx = AlgebraContext::new(1);
    assert_eq!(a_gamma(&ctx, &Quiver::loops(3, 1)).unwrap().to_string(), "q^3");
    assert_eq!(
        a_gamma(&ctx, &Quiver::loops(3, 2)).unwrap().to_string(),
        "q^9 + q^7 + q^5"
    );
}

#[test]
fn zero_dimension_vector() {
    let q = Quiver::from_strs(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "c")], &[0, 0, 0]).unwrap();
    let ctx = AlgebraContext::new(3);
    assert!(p_series(&ctx, &q, &candidate_lists(&q)).unwrap().is_one());
    assert!(a_gamma(&ctx, &q).unwrap().is_zero());
}

#[test]
fn coprime_dimension_uses_single_mobius_term() {
    let q = Quiver::loops(3, 1);
    let ctx = AlgebraContext::new(1);
    let h = h_gamma(&ctx, &q).unwrap().substitute_power(1).unwrap();
    let expected = RatFunc::from_poly(UniPoly::from_ints(&[-1, 1]))
        .mul(&h)
        .into_poly()
        .unwrap();
    assert_eq!(a_gamma(&ctx, &q).unwrap(), expected);
}

#[test]
fn four_loop_table_golden() {
    let table = three_loop_reference().unwrap();
    let c = c_gamma_list(&Quiver::loops(4, 4), &table).unwrap();
    let golden: UniPoly = FOUR_LOOP_DIM4_FROM_REFERENCE.parse().unwrap();
    assert_eq!(c, golden);
}

#[test]
fn four_loop_recursive_matches_table() {
    let ctx = AlgebraContext::new(1);
    let quiver = Quiver::loops(4, 3);
    let table: Vec<UniPoly> = (1..=3)
        .map(|i| a_gamma(&ctx, &Quiver::loops(4, i)).unwrap())
        .collect();
    assert_eq!(table[1].to_string(), "q^13 + q^11 + q^9 + q^7");

    let recursive = c_gamma(&ctx, &quiver).unwrap();
    let listed = c_gamma_list(&quiver, &table).unwrap();
    assert_eq!(recursive, listed);
    assert_eq!(recursive, FOUR_LOOP_DIM3.parse::<UniPoly>().unwrap());
}

#[test]
fn wall_crossing_rejects_multi_vertex() {
    let q = Quiver::from_strs(&["a", "b"], &[("a", "b"), ("b", "a")], &[2, 2]).unwrap();
    let ctx = AlgebraContext::new(2);
    assert!(matches!(
        c_gamma(&ctx, &q),
        Err(KacError::UnsupportedOperation { vertices: 2 })
    ));
    let table = three_loop_reference().unwrap();
    assert!(matches!(
        c_gamma_list(&q, &table),
        Err(KacError::UnsupportedOperation { vertices: 2 })
    ));
}

#[test]
fn short_table_is_reported() {
    let table = three_loop_reference().unwrap();
    assert!(matches!(
        c_gamma_list(&Quiver::loops(4, 6), &table),
        Err(KacError::InconsistentPrecomputedTable { needed: 6, available: 5 })
    ));
}
