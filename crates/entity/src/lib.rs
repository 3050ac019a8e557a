//! Dealership Entities
//!
//! Sea-ORM entity definitions for the dealership domain: account collections
//! (admins, managers, customers), vehicle inventory (cars, categories) and
//! sales records (purchases).

pub mod admins;
pub mod cars;
pub mod categories;
pub mod customers;
pub mod managers;
pub mod purchases;
pub mod roles;

pub use cars::CarStatus;
pub use purchases::PaymentMethod;
pub use roles::UserRole;
