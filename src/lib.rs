#[macro_use]
extern crate diesel;

pub mod analytics;
pub mod config;
pub mod export;
pub mod form;
pub mod import;
pub mod local_mirror;
pub mod logging;
pub mod record;
pub mod record_store;
pub mod storage;
pub mod tracker;
