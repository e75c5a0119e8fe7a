//! Catalog module — the caller-owned product collection.
//!
//! This crate holds the raw product records and their lifecycle
//! (add/update/remove, ignore, mark-as-sold) plus the CSV export of the
//! full collection. It performs no risk computation; derived views live in
//! `shelfwatch-engine`, which reads the catalog as an immutable snapshot.

pub mod catalog;
pub mod export;
pub mod product;

pub use catalog::{Catalog, NewProduct, ProductPatch};
pub use export::{render_csv, report_file_name};
pub use product::Product;
