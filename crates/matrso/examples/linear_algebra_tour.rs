//! A walk through the matrso API
//!
//! Run with:
//!
//! ```text
//! RUST_LOG=matrso_core=debug,matrso_kernels=debug cargo run -p matrso --features tracing --example linear_algebra_tour
//! ```

use anyhow::Result;
use matrso::prelude::*;
use matrso::tracing_support::{init_tracing, record_metric, record_product, TracingConfig};
use std::time::Instant;

fn main() -> Result<()> {
    init_tracing(TracingConfig::default())?;

    println!("=== Multiplication strategies ===");
    let config = MulConfig::default();
    for &n in &[3usize, 64, 300] {
        let a = Matrix::random_uniform(n, n, -1.0, 1.0)?;
        let b = Matrix::random_uniform(n, n, -1.0, 1.0)?;
        let start = Instant::now();
        let c = a.mul_with(&b, &config)?;
        record_product(n, n, n, start.elapsed());
        println!(
            "{n}x{n}: {:?} in {:?}, |C|_F = {:.4}",
            config.strategy_for(n, n, n),
            start.elapsed(),
            c.norm_frobenius()
        );
    }

    println!("\n=== Linear systems ===");
    let a = Matrix::from_rows(&[[4.0, -2.0, 1.0], [-2.0, 4.0, -2.0], [1.0, -2.0, 4.0]])?;
    let b = Matrix::from_rows(&[[11.0], [-16.0], [17.0]])?;
    let x = a.solve(&b)?;
    println!("A = {a}\nb = {b}\nx = {}", x.to_string_rounded(6));
    let residual = a.mul(&x)?.sub(&b)?.norm_inf();
    record_metric("residual", residual);
    println!("det(A) = {:.6}, cond(A) = {:.6}", a.det()?, a.cond()?);

    println!("\n=== Decompositions ===");
    let chol = a.cholesky_decompose()?;
    println!("Cholesky SPD: {}", chol.is_symmetric_positive_definite());
    for row in chol.l().to_strings(&matrso::core::StringOptions {
        decimals: Some(4),
        aligned: true,
    }) {
        println!("  {row}");
    }

    let eig = a.eigen_decompose()?;
    println!("eigenvalues: {:?}", eig.real_eigenvalues());

    let svd = a.singular_value_decompose(true, true)?;
    println!(
        "singular values: {:?}, rank {}",
        svd.singular_values(),
        svd.rank()
    );

    println!("\n=== Matrix functions ===");
    let g = Matrix::from_rows(&[[0.0, -1.0], [1.0, 0.0]])?.scale(std::f64::consts::FRAC_PI_4);
    println!("exp(pi/4 * J) = {}", g.exp()?.to_string_rounded(6));
    println!("power(-2) of A = {}", a.power(-2)?.to_string_rounded(6));

    println!("\n=== Sliding window ===");
    let mut window = Matrix::with_capacity(1, 2, 6)?;
    for t in 1..=5 {
        let sample = Matrix::from_rows(&[[t as f64, (t * t) as f64]])?;
        let dropped = window.append_rows_circular(&sample)?;
        println!("t={t}: height {} dropped {dropped} -> {window}", window.rows());
    }

    Ok(())
}
