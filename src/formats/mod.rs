//! Output formatters for fib2tem
//!
//! All formatters write through `std::io::Write` for WASM compatibility.

pub mod report;
pub mod table;

pub use report::{render_result, write_result};
pub use table::{orientation_table, write_table, TableRow};
