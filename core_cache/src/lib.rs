pub mod bits;
pub mod cache;
pub mod config;
pub mod exercise;
pub mod stat;
