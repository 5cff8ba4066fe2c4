//! ProtoAi Catalog - CSV Catalog Store
//!
//! File-backed implementation of [`protoai_core::CatalogRepository`] plus the
//! row codec and a writer that round-trips with the reader.

pub mod codec;
pub mod csv_store;
pub mod writer;

pub use codec::{decode_tags, encode_tags, CatalogRow, HEADER};
pub use csv_store::{read_catalog, CsvCatalog};
pub use writer::{catalog_to_string, write_catalog};
