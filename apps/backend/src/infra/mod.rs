//! Infrastructure layer - database, locks, state building and error mapping.

pub mod db;
pub mod db_errors;
pub mod locks;
pub mod state;
