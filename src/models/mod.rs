pub mod account;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod common;
pub mod order;
