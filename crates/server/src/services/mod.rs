//! # Domain Services
//!
//! Services orchestrate entity CRUD and enforce cross-entity invariants.
//! Each service is constructed once at startup with an injected connection
//! pool handle.

pub mod accounts;
pub mod auth;
pub mod cars;
pub mod categories;
pub mod purchases;
pub mod users;
