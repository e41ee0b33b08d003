pub mod api;
pub mod birth;
pub mod charts;
pub mod client;
pub mod config;
pub mod humanize;
pub mod normalize;
pub mod observability;
pub mod report;
