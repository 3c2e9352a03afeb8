//! Sales data loading.
//!
//! - where the CSV comes from and how it is fetched (`source`)
//! - parsing into the immutable in-memory table (`table`)

pub mod source;
pub mod table;

pub use source::{DataSource, DEFAULT_SOURCE_URL};
pub use table::{SalesTable, TableStats};
