pub mod auth;
pub mod banner;
pub mod cart;
pub mod category;
pub mod order;
pub mod product;
pub mod settings;
pub mod user;
