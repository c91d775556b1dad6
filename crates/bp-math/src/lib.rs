//! Numerical kernels for Bayesian estimation of binomial proportions.

pub mod math;

pub use math::beta::*;
pub use math::histogram::*;
pub use math::interval::*;
pub use math::kde::*;
pub use math::bayes_factor;
pub use math::verbal;
