//! Clinical-guideline source.
//!
//! Extension point for consensus documents and clinical guidelines. The
//! excerpt-block contract is the same as the literature source, so fusion
//! already renders whatever this produces.

use async_trait::async_trait;
use tracing::debug;

use super::GuidelineSource;

/// Stub implementation: always yields an empty list.
pub struct GuidelineStub;

#[async_trait]
impl GuidelineSource for GuidelineStub {
    async fn fetch_guidelines(&self, medicamento: &str) -> Vec<String> {
        // TODO: back this with a curated guideline corpus
        debug!("Guideline source is a stub, nothing collected for '{medicamento}'");
        Vec::new()
    }
}
