//! # HTTP Middleware
//!
//! Authentication and role-based authorization gates composed per route.

pub mod auth;
