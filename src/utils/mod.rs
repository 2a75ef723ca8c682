pub mod csv_format;
pub mod csv_utils;
pub mod names;
pub mod time_policy;
