pub mod config;
pub mod organizations;
pub mod shared;
pub mod tenancy;
pub mod trips;
pub mod users;
