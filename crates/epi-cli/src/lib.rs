//! Library components of the epidemiological-week ETL runner.

pub mod config;
pub mod logging;
pub mod pipeline;
