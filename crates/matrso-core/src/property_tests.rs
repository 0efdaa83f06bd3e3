//! Property-based tests for the dense matrix and its decompositions
//!
//! These tests use proptest to check the algebraic identities every
//! factorization must satisfy on arbitrary inputs.

#[cfg(test)]
mod tests {
    use crate::{Matrix, MulConfig};
    use proptest::prelude::*;

    // Decompositions are comparatively slow; keep the case count small
    fn proptest_config() -> ProptestConfig {
        ProptestConfig {
            cases: 32,
            max_local_rejects: 1000,
            max_global_rejects: 10000,
            ..ProptestConfig::default()
        }
    }

    fn matrix(max_rows: usize, max_cols: usize) -> impl Strategy<Value = Matrix> {
        (1..=max_rows, 1..=max_cols).prop_flat_map(|(r, c)| {
            prop::collection::vec(-10.0f64..10.0, r * c)
                .prop_map(move |data| Matrix::from_vec(r, c, data).unwrap())
        })
    }

    fn square(max_n: usize) -> impl Strategy<Value = Matrix> {
        (1..=max_n).prop_flat_map(|n| {
            prop::collection::vec(-10.0f64..10.0, n * n)
                .prop_map(move |data| Matrix::from_vec(n, n, data).unwrap())
        })
    }

    /// Diagonally dominant, hence invertible
    fn dominant(a: &Matrix) -> Matrix {
        let n = a.rows();
        let shift = Matrix::identity(n).unwrap().scale(10.0 * n as f64 + 1.0);
        a.add(&shift).unwrap()
    }

    // ========================================================================
    // Dense Matrix
    // ========================================================================

    proptest! {
        #[test]
        fn transpose_is_an_involution(a in matrix(9, 9)) {
            prop_assert_eq!(a.transpose().transpose().to_vec(), a.to_vec());
            let mut b = a.clone();
            b.transpose_inplace();
            b.transpose_inplace();
            prop_assert_eq!(b.to_vec(), a.to_vec());
        }

        #[test]
        fn flip_and_mirror_are_involutions(a in matrix(7, 7)) {
            prop_assert_eq!(a.flip().flip().to_vec(), a.to_vec());
            prop_assert_eq!(a.mirror().mirror().to_vec(), a.to_vec());
        }

        #[test]
        fn display_parse_round_trip(a in matrix(6, 6)) {
            let parsed: Matrix = a.to_string().parse().unwrap();
            prop_assert_eq!(parsed.to_vec(), a.to_vec());
        }

        #[test]
        fn product_independent_of_strategy(
            (a, b) in (1usize..40, 1usize..40, 1usize..40).prop_flat_map(|(l, m, n)| {
                (
                    prop::collection::vec(-10.0f64..10.0, m * l)
                        .prop_map(move |d| Matrix::from_vec(m, l, d).unwrap()),
                    prop::collection::vec(-10.0f64..10.0, l * n)
                        .prop_map(move |d| Matrix::from_vec(l, n, d).unwrap()),
                )
            })
        ) {
            let recursive = a.mul_with(&b, &MulConfig::always_recurse()).unwrap();
            let direct = a.mul_with(&b, &MulConfig::never_recurse()).unwrap();
            let tol = 1e-12 * (a.cols() as f64 + 1.0) * 100.0;
            prop_assert!(recursive.max_abs_diff(&direct).unwrap() <= tol);
        }

        #[test]
        fn frobenius_bounds_two_norm(a in matrix(6, 6)) {
            let two = a.norm2().unwrap();
            prop_assert!(two <= a.norm_frobenius() * (1.0 + 1e-12));
            prop_assert!(two * two >= a.norm_frobenius().powi(2) / a.rows().min(a.cols()) as f64 * (1.0 - 1e-9));
        }
    }

    // ========================================================================
    // Decompositions
    // ========================================================================

    proptest! {
        #![proptest_config(proptest_config())]

        #[test]
        fn lu_reconstructs_permuted_input(a in square(8)) {
            let lu = a.lu_decompose().unwrap();
            let pa = lu.permutation().mul(&a).unwrap();
            let product = lu.l().mul(&lu.u()).unwrap();
            prop_assert!(pa.approx_eq(&product, 1e-9));
        }

        #[test]
        fn inverse_agrees_with_solve(a in square(8)) {
            let a = dominant(&a);
            let id = Matrix::identity(a.rows()).unwrap();
            let inv = a.invert().unwrap();
            prop_assert!(a.solve(&id).unwrap().approx_eq(&inv, 1e-9));
            prop_assert!(a.mul(&inv).unwrap().approx_eq(&id, 1e-9));
        }

        #[test]
        fn qr_reconstructs_input(a in matrix(9, 6)) {
            let qr = a.qr_decompose().unwrap();
            prop_assert!(qr.q().mul(&qr.r()).unwrap().approx_eq(&a, 1e-9));
        }

        #[test]
        fn cholesky_of_gram_matrix(b in square(7)) {
            // B·Bᵀ + n·I is symmetric positive definite
            let n = b.rows();
            let mut a = b.mul(&b.transpose()).unwrap();
            a.add_inplace(&Matrix::identity(n).unwrap().scale(n as f64)).unwrap();
            // symmetrize exactly so the SPD flag is not defeated by rounding
            let a = a.add(&a.transpose()).unwrap().scale(0.5);

            let chol = a.cholesky_decompose().unwrap();
            prop_assert!(chol.is_symmetric_positive_definite());
            let l = chol.l();
            prop_assert!(l.mul(&l.transpose()).unwrap().approx_eq(&a, 1e-9));
        }

        #[test]
        fn svd_reconstructs_input(a in matrix(8, 8)) {
            let svd = a.singular_value_decompose(true, true).unwrap();
            let u = svd.u().unwrap();
            let v = svd.v().unwrap();
            let rebuilt = u.mul(&svd.s()).unwrap().mul(&v.transpose()).unwrap();
            prop_assert!(rebuilt.approx_eq(&a, 1e-9));

            let s = svd.singular_values();
            prop_assert_eq!(s.len(), a.rows().min(a.cols()));
            prop_assert!(s.iter().all(|&x| x >= 0.0));
            prop_assert!(s.windows(2).all(|w| w[0] >= w[1]));
        }

        #[test]
        fn symmetric_eigen_reconstructs_input(b in square(7)) {
            let a = b.add(&b.transpose()).unwrap();
            let eig = a.eigen_decompose().unwrap();
            prop_assert!(eig.is_symmetric());
            prop_assert!(eig.imag_eigenvalues().iter().all(|&x| x == 0.0));

            let v = eig.v();
            let rebuilt = v.mul(&eig.d()).unwrap().mul(&v.transpose()).unwrap();
            prop_assert!(rebuilt.approx_eq(&a, 1e-9));
        }

        #[test]
        fn general_eigen_satisfies_av_equals_vd(a in square(6)) {
            let eig = a.eigen_decompose().unwrap();
            let v = eig.v();
            let av = a.mul(&v).unwrap();
            let vd = v.mul(&eig.d()).unwrap();
            // eigenvectors are not normalized; scale the residual by the operands
            let scale = (a.norm_inf() + 1.0) * (v.norm_inf() + 1.0);
            prop_assert!(av.max_abs_diff(&vd).unwrap() <= 1e-10 * scale);
        }
    }
}
