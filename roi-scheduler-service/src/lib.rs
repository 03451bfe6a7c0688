pub mod capital_release;
pub mod config;
pub mod distributor;
pub mod dto;
pub mod notify;
pub mod profit_share;
pub mod scheduler;
