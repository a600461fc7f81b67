//! pharmyx-retrieval — Source clients for drug-safety data.
//! - ANVISA Bulário label lookup and PDF text extraction
//! - openFDA structured label fields
//! - PubMed literature excerpts (esearch/efetch)
//! - Harvester orchestration over literature + guideline sources

pub mod harvester;
pub mod models;
pub mod pdf;
pub mod sources;

// Re-export the types every consumer of this crate touches
pub use models::{BulaOutcome, FdaLabel, FdaOutcome, PubMedArticle};
