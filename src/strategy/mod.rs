//! Pluggable automated-opponent policies.

pub mod policy;

pub use policy::{ActionPolicy, FirstLegal, RandomPolicy};
