//! Harvester orchestration over literature + guideline sources.

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::sources::{GuidelineSource, LiteratureSource};

pub const DEFAULT_MAX_ARTICLES: usize = 3;

/// Collects the "extra sources" block of the fused context: literature
/// excerpts first, guideline blocks after. Each source already degrades to
/// an empty list on its own, so the harvester never fails either.
pub struct KnowledgeHarvester {
    literature: Arc<dyn LiteratureSource>,
    guidelines: Arc<dyn GuidelineSource>,
    max_articles: usize,
}

impl KnowledgeHarvester {
    pub fn new(
        literature: Arc<dyn LiteratureSource>,
        guidelines: Arc<dyn GuidelineSource>,
        max_articles: usize,
    ) -> Self {
        Self { literature, guidelines, max_articles }
    }

    /// Returns every usable extra text block for a drug, blanks dropped.
    #[instrument(skip(self))]
    pub async fn collect_extra_sources(&self, medicamento: &str) -> Vec<String> {
        let mut textos = Vec::new();
        textos.extend(
            self.literature
                .search_excerpts(medicamento, self.max_articles)
                .await,
        );
        textos.extend(self.guidelines.fetch_guidelines(medicamento).await);

        textos.retain(|texto| !texto.trim().is_empty());
        debug!(blocks = textos.len(), "Extra sources collected");
        textos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedLiterature(Vec<String>);

    #[async_trait]
    impl LiteratureSource for FixedLiterature {
        async fn search_excerpts(&self, _medicamento: &str, _max: usize) -> Vec<String> {
            self.0.clone()
        }
    }

    struct FixedGuidelines(Vec<String>);

    #[async_trait]
    impl GuidelineSource for FixedGuidelines {
        async fn fetch_guidelines(&self, _medicamento: &str) -> Vec<String> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn test_collect_merges_and_drops_blanks() {
        let harvester = KnowledgeHarvester::new(
            Arc::new(FixedLiterature(vec![
                "[TEXTO PUBMED]\nTítulo: A\n\nResumo:\nB".to_string(),
                "   ".to_string(),
            ])),
            Arc::new(FixedGuidelines(vec![String::new(), "Diretriz X".to_string()])),
            DEFAULT_MAX_ARTICLES,
        );

        let textos = harvester.collect_extra_sources("dipirona").await;
        assert_eq!(textos.len(), 2);
        assert!(textos[0].contains("Título: A"));
        assert_eq!(textos[1], "Diretriz X");
    }

    #[tokio::test]
    async fn test_collect_empty_when_sources_empty() {
        let harvester = KnowledgeHarvester::new(
            Arc::new(FixedLiterature(vec![])),
            Arc::new(FixedGuidelines(vec![])),
            DEFAULT_MAX_ARTICLES,
        );
        assert!(harvester.collect_extra_sources("x").await.is_empty());
    }
}
