pub mod config;
pub mod entities;
pub mod family;
