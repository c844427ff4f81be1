pub mod access;
pub mod api;
pub mod builder;
pub mod catalog;
pub mod config;
pub mod models;
pub mod pricing;
pub mod report;
