//! Source clients for the three external drug-safety databases.

pub mod anvisa;
pub mod guidelines;
pub mod openfda;
pub mod pubmed;

use async_trait::async_trait;

use crate::models::{BulaOutcome, FdaOutcome};

/// Regulatory label source (ANVISA Bulário). Degrades into a tagged
/// outcome instead of failing: every transport or extraction problem in
/// the chain maps to one of the `BulaOutcome` failure variants.
#[async_trait]
pub trait RegulatorySource: Send + Sync {
    async fn fetch_bula(&self, medicamento: &str) -> BulaOutcome;
}

/// Structured label source (openFDA). `Unavailable` covers any transport
/// or decode failure; `NoMatch` means the API answered with no results.
#[async_trait]
pub trait LabelSource: Send + Sync {
    async fn fetch_label(&self, medicamento: &str) -> FdaOutcome;
}

/// Literature source (PubMed). Returns formatted excerpt blocks; a failed
/// stage yields whatever was accumulated before it, so the result is
/// possibly empty but never an error.
#[async_trait]
pub trait LiteratureSource: Send + Sync {
    async fn search_excerpts(&self, medicamento: &str, max_results: usize) -> Vec<String>;
}

/// Clinical-guideline source. Same excerpt-block contract as
/// [`LiteratureSource`].
#[async_trait]
pub trait GuidelineSource: Send + Sync {
    async fn fetch_guidelines(&self, medicamento: &str) -> Vec<String>;
}
