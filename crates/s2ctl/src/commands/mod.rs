//! Command implementations, one module per resource group

pub mod ansible;
pub mod context;
pub mod domain;
pub mod metainfo;
pub mod network;
pub mod project;
pub mod server;
pub mod ssh_key;
pub mod task;
pub mod wait;
