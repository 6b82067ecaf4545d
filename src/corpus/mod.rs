// Corpus ingestion: raw rows in, typed submissions out.

pub mod reader;
pub mod record;
