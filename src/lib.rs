//! Employee roster service: a spreadsheet-backed employee list with
//! filtering, sorting and distribution charts.

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod roster;
pub mod utils;
