//! Property-based tests for the multiplication kernels
//!
//! Every strategy must agree with the reference triple loop on the same
//! inputs, whichever path the dispatcher is forced down.

use super::*;
use proptest::prelude::*;

/// Dimensions plus operand buffers of matching length
fn operands(max_dim: usize) -> impl Strategy<Value = (usize, usize, usize, Vec<f64>, Vec<f64>)> {
    (1..=max_dim, 1..=max_dim, 1..=max_dim).prop_flat_map(|(l, m, n)| {
        (
            Just(l),
            Just(m),
            Just(n),
            prop::collection::vec(-10.0f64..10.0, m * l),
            prop::collection::vec(-10.0f64..10.0, l * n),
        )
    })
}

fn close(x: &[f64], y: &[f64], l: usize) -> bool {
    // error grows with the inner dimension and the recursion's extra additions
    let tol = 1e-10 * (l as f64 + 1.0) * 100.0;
    x.len() == y.len() && x.iter().zip(y).all(|(a, b)| (a - b).abs() <= tol)
}

proptest! {
    /// Tiny kernels agree with the reference on every shape they accept
    #[test]
    fn test_tiny_matches_reference((l, m, n, a, b) in operands(3)) {
        let mut c = vec![0.0f64; m * n];
        multiply_tiny(
            MatView::new(&a, m, l),
            MatView::new(&b, l, n),
            &mut MatViewMut::new(&mut c, m, n),
        ).unwrap();
        let expected = multiply_reference(l, m, n, &a, &b).unwrap();
        prop_assert!(close(&c, &expected, l));
    }

    /// The direct Winograd kernel agrees with the reference
    #[test]
    fn test_direct_matches_reference((l, m, n, a, b) in operands(24)) {
        let c = multiply_direct(l, m, n, &a, &b).unwrap();
        let expected = multiply_reference(l, m, n, &a, &b).unwrap();
        prop_assert!(close(&c, &expected, l));
    }

    /// Forced recursion agrees with the reference, odd sizes included
    #[test]
    fn test_recursive_matches_reference((l, m, n, a, b) in operands(24)) {
        let c = multiply_with(&MulConfig::always_recurse(), l, m, n, &a, &b).unwrap();
        let expected = multiply_reference(l, m, n, &a, &b).unwrap();
        prop_assert!(close(&c, &expected, l));
    }

    /// All three strategies agree with each other
    #[test]
    fn test_strategies_cross_validate((l, m, n, a, b) in operands(16)) {
        let default = multiply(l, m, n, &a, &b).unwrap();
        let direct = multiply_with(&MulConfig::direct_only(), l, m, n, &a, &b).unwrap();
        let recursive = multiply_with(&MulConfig::always_recurse(), l, m, n, &a, &b).unwrap();
        prop_assert!(close(&default, &direct, l));
        prop_assert!(close(&direct, &recursive, l));
    }

    /// Multiplying by the identity returns the operand
    #[test]
    fn test_identity_is_neutral((l, m, _n, a, _b) in operands(20)) {
        let mut id = vec![0.0f64; l * l];
        for i in 0..l {
            id[i * l + i] = 1.0;
        }
        let c = multiply_with(&MulConfig::always_recurse(), l, m, l, &a, &id).unwrap();
        prop_assert!(close(&c, &a, l));
    }

    /// A^(p+q) = A^p · A^q
    #[test]
    fn test_power_adds_exponents(n in 1usize..6, p in 0u32..4, q in 0u32..4) {
        let a: Vec<f64> = (0..n * n).map(|x| ((x % 5) as f64 - 2.0) * 0.25).collect();
        let config = MulConfig::default();
        let lhs = matrix_power(n, &a, p + q, &config).unwrap();
        let ap = matrix_power(n, &a, p, &config).unwrap();
        let aq = matrix_power(n, &a, q, &config).unwrap();
        let rhs = multiply(n, n, n, &ap, &aq).unwrap();
        prop_assert!(close(&lhs, &rhs, n));
    }
}
