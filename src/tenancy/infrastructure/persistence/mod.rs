pub mod connections;
pub mod repositories;
