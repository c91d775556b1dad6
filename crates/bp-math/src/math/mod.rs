//! Core math modules.

pub mod beta;
pub mod histogram;
pub mod interval;
pub mod kde;
pub mod bayes_factor;
pub mod verbal;
