pub mod db;
pub mod domain;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod payment;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod search;
pub mod services;

/// Role granting access to the back-office.
pub const ADMIN_ROLE: &str = "admin";
/// Role assigned to self-registered shoppers.
pub const CUSTOMER_ROLE: &str = "customer";
