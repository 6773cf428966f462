pub mod importer;
pub mod source;

pub use importer::*;
pub use source::*;

use thiserror::Error;

use crate::db::DatabaseError;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source contains no rows")]
    EmptySource,

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}
