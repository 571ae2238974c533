pub mod db;
pub mod feed;
pub mod rpc;
pub mod store;
pub mod transformations;
pub mod types;
