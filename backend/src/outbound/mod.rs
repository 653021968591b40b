//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Follows the hexagonal architecture pattern: the only infrastructure this
//! service talks to is PostgreSQL, adapted under [`persistence`].

pub mod persistence;
