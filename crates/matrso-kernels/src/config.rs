//! Kernel selection configuration
//!
//! The multiplication dispatcher chooses between three strategies using a
//! cost heuristic over the operand dimensions `l` (inner), `m` (rows of the
//! left operand) and `n` (columns of the right operand). The cutoffs driving
//! that heuristic live in [`MulConfig`] so callers and tests can pin a
//! specific code path.

use std::env;

/// Default per-dimension cutoff
pub const DEFAULT_CUTOFF: usize = 25;

/// Default cutoff that the largest dimension must exceed before recursing
pub const DEFAULT_CUTOFF_COMBINED: usize = 100;

/// Largest dimension handled by the unrolled kernels
pub const TINY_MAX_DIM: usize = 3;

/// Multiplication strategy selected for a given problem size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulStrategy {
    /// Fully unrolled kernel for `l, m, n <= 3`
    Tiny,
    /// Direct Winograd inner-product kernel
    Direct,
    /// Strassen/Winograd recursive decomposition
    Recursive,
}

/// Cutoff constants for the multiplication dispatcher
///
/// Recursion is chosen when
///
/// ```text
/// l*m*n > cutoff_l*m*n + cutoff_m*l*n + cutoff_n*l*m   and   max(l, m, n) > cutoff_combined
/// ```
///
/// and every dimension is at least 2.
///
/// # Examples
///
/// ```
/// use matrso_kernels::{MulConfig, MulStrategy};
///
/// let config = MulConfig::default();
/// assert_eq!(config.strategy_for(2, 2, 2), MulStrategy::Tiny);
/// assert_eq!(config.strategy_for(40, 40, 40), MulStrategy::Direct);
/// assert_eq!(config.strategy_for(512, 512, 512), MulStrategy::Recursive);
///
/// let forced = MulConfig::always_recurse();
/// assert_eq!(forced.strategy_for(8, 8, 8), MulStrategy::Recursive);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MulConfig {
    /// Cutoff weight for the inner dimension
    pub cutoff_l: usize,
    /// Cutoff weight for the row dimension
    pub cutoff_m: usize,
    /// Cutoff weight for the column dimension
    pub cutoff_n: usize,
    /// The largest dimension must exceed this before recursion is considered
    pub cutoff_combined: usize,
    /// Use the unrolled kernels when every dimension is at most 3
    pub tiny_kernels: bool,
}

impl Default for MulConfig {
    fn default() -> Self {
        Self {
            cutoff_l: DEFAULT_CUTOFF,
            cutoff_m: DEFAULT_CUTOFF,
            cutoff_n: DEFAULT_CUTOFF,
            cutoff_combined: DEFAULT_CUTOFF_COMBINED,
            tiny_kernels: true,
        }
    }
}

impl MulConfig {
    /// Recurse whenever every dimension can be halved
    pub fn always_recurse() -> Self {
        Self {
            cutoff_l: 0,
            cutoff_m: 0,
            cutoff_n: 0,
            cutoff_combined: 0,
            tiny_kernels: true,
        }
    }

    /// Never recurse; everything above the tiny sizes uses the direct kernel
    pub fn never_recurse() -> Self {
        Self {
            cutoff_combined: usize::MAX,
            ..Self::default()
        }
    }

    /// Always use the direct kernel, including for tiny sizes
    pub fn direct_only() -> Self {
        Self {
            tiny_kernels: false,
            ..Self::never_recurse()
        }
    }

    /// Build a configuration from `MATRSO_CUTOFF_L`, `MATRSO_CUTOFF_M`,
    /// `MATRSO_CUTOFF_N` and `MATRSO_CUTOFF_COMBINED`.
    ///
    /// Unset or unparsable variables keep their default value.
    pub fn from_env() -> Self {
        fn read(name: &str, default: usize) -> usize {
            env::var(name)
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        }

        let defaults = Self::default();
        Self {
            cutoff_l: read("MATRSO_CUTOFF_L", defaults.cutoff_l),
            cutoff_m: read("MATRSO_CUTOFF_M", defaults.cutoff_m),
            cutoff_n: read("MATRSO_CUTOFF_N", defaults.cutoff_n),
            cutoff_combined: read("MATRSO_CUTOFF_COMBINED", defaults.cutoff_combined),
            tiny_kernels: defaults.tiny_kernels,
        }
    }

    /// Whether the recursive decomposition should be applied at this size
    pub fn should_recurse(&self, l: usize, m: usize, n: usize) -> bool {
        if l < 2 || m < 2 || n < 2 {
            return false;
        }
        let largest = l.max(m).max(n);
        if largest <= self.cutoff_combined {
            return false;
        }

        // u128 keeps the weighted sum exact for any usize dimensions
        let (l, m, n) = (l as u128, m as u128, n as u128);
        let volume = l * m * n;
        let weighted = self.cutoff_l as u128 * m * n
            + self.cutoff_m as u128 * l * n
            + self.cutoff_n as u128 * l * m;
        volume > weighted
    }

    /// Strategy the dispatcher picks for a product of `m×l` by `l×n`
    pub fn strategy_for(&self, l: usize, m: usize, n: usize) -> MulStrategy {
        if self.tiny_kernels && l <= TINY_MAX_DIM && m <= TINY_MAX_DIM && n <= TINY_MAX_DIM {
            MulStrategy::Tiny
        } else if self.should_recurse(l, m, n) {
            MulStrategy::Recursive
        } else {
            MulStrategy::Direct
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cutoffs() {
        let config = MulConfig::default();
        assert_eq!(config.cutoff_l, 25);
        assert_eq!(config.cutoff_m, 25);
        assert_eq!(config.cutoff_n, 25);
        assert_eq!(config.cutoff_combined, 100);
        assert!(config.tiny_kernels);
    }

    #[test]
    fn test_default_strategy_boundaries() {
        let config = MulConfig::default();
        // 3*25*n*n dominates n^3 until n > 75, and the largest must exceed 100
        assert_eq!(config.strategy_for(100, 100, 100), MulStrategy::Direct);
        assert_eq!(config.strategy_for(101, 101, 101), MulStrategy::Recursive);
        // thin operands never recurse
        assert_eq!(config.strategy_for(1000, 1000, 20), MulStrategy::Direct);
    }

    #[test]
    fn test_no_recursion_below_two() {
        let config = MulConfig::always_recurse();
        assert!(!config.should_recurse(1, 50, 50));
        assert!(!config.should_recurse(50, 1, 50));
        assert!(!config.should_recurse(50, 50, 1));
        assert!(config.should_recurse(2, 4, 2));
    }

    #[test]
    fn test_direct_only_skips_tiny() {
        let config = MulConfig::direct_only();
        assert_eq!(config.strategy_for(2, 3, 1), MulStrategy::Direct);
        assert_eq!(config.strategy_for(4096, 4096, 4096), MulStrategy::Direct);
    }

    #[test]
    fn test_from_env_falls_back_to_defaults() {
        // The variables are not set in the test environment
        let config = MulConfig::from_env();
        assert_eq!(config.cutoff_combined, DEFAULT_CUTOFF_COMBINED);
    }
}
