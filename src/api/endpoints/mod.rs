pub mod appointments;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod employees;
pub mod health;
pub mod sales;
pub mod services;
