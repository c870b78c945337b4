use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum OrthologError {
    #[error("FASTA file not found: {}", .0.display())]
    FastaNotFound(PathBuf),

    #[error("failed to parse FASTA: {0}")]
    FastaParse(String),

    #[error(
        "Could not determine FungiDB organism. Provide an organism key (e.g. 'AfumigatusA1163') \
         or use a FASTA with a recognizable locus_tag. \
         Run 'fungidb-orthologs list-genomes' to see available genomes."
    )]
    UnresolvedOrganism,

    #[error(
        "FungiDB returned 422 for organism '{organism}'. Try the full name or run \
         'fungidb-orthologs list-genomes' to see valid keys."
    )]
    UnknownOrganism { organism: String },

    #[error("invalid organism key: {0:?}")]
    InvalidOrganismKey(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("genome listing request failed: {0}")]
    ListingHttp(String),

    #[error("genome listing returned status {status}: {message}")]
    ListingStatus { status: u16, message: String },

    #[error("FungiDB request failed: {0}")]
    FungidbHttp(String),

    #[error("FungiDB returned status {status}: {message}")]
    FungidbStatus { status: u16, message: String },

    #[error("failed to parse ortholog report: {0}")]
    CsvParse(String),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("failed to write TSV: {0}")]
    TsvWrite(String),

    #[error("background task failed: {0}")]
    Worker(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}

impl OrthologError {
    /// A local input (FASTA file) does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, OrthologError::FastaNotFound(_))
    }

    /// The caller supplied something that cannot be resolved or was rejected
    /// by FungiDB as unprocessable.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            OrthologError::UnresolvedOrganism
                | OrthologError::UnknownOrganism { .. }
                | OrthologError::InvalidOrganismKey(_)
                | OrthologError::InvalidRequest(_)
        )
    }
}
