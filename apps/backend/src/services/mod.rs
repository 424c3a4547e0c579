//! Services: orchestrate repos and domain logic under locks and transactions.

pub mod games;
pub mod leadership;
pub mod questions;
pub mod round_flow;
pub mod scope;
