//! Integration tests

mod cli_test;
mod config_test;
mod csv_log_test;
mod helpers;
mod session_storage_test;
