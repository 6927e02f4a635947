pub mod catalog;
pub mod config;
pub mod fallible;
pub mod graphql;
pub mod seed;
