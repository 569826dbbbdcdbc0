pub mod date;

pub use date::{format_date, format_date_time, format_relative_time};
