//! Run log written through log4rs.

pub mod setup;

pub use setup::{log_file_name, setup_file_logging};
