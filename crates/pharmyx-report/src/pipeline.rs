//! End-to-end report pipeline: fan out the three retrievals, fuse their
//! results, and ask the language model for the clinical narrative.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use pharmyx_llm::{LlmBackend, LlmError, LlmRequest};
use pharmyx_retrieval::harvester::KnowledgeHarvester;
use pharmyx_retrieval::sources::{LabelSource, RegulatorySource};

use crate::{fusion, prompt};

/// Summary of one completed pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRun {
    pub request_id: Uuid,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    /// Drug name as queried, before any normalization.
    pub medicamento: String,
    /// Clinical report in Markdown, trimmed, exactly as the model wrote it.
    pub relatorio: String,
    /// Reason code of the ANVISA chain ("texto", "not_found", ...).
    pub bula_outcome: &'static str,
    /// Reason code of the openFDA query ("found", "no_match", "unavailable").
    pub fda_outcome: &'static str,
    pub extras_collected: usize,
    pub duration_ms: u64,
}

/// Orchestrates retrieval, fusion and analysis for one drug name.
///
/// Retrieval never fails this pipeline: each source degrades inside its own
/// client and arrives here as a typed outcome that the fusion step renders
/// as fallback prose. The only error this pipeline surfaces is a failed
/// language-model call.
pub struct ReportPipeline {
    regulatory: Arc<dyn RegulatorySource>,
    labels: Arc<dyn LabelSource>,
    harvester: KnowledgeHarvester,
    llm: Arc<dyn LlmBackend>,
}

impl ReportPipeline {
    pub fn new(
        regulatory: Arc<dyn RegulatorySource>,
        labels: Arc<dyn LabelSource>,
        harvester: KnowledgeHarvester,
        llm: Arc<dyn LlmBackend>,
    ) -> Self {
        Self { regulatory, labels, harvester, llm }
    }

    /// Runs the full pipeline for one drug name.
    #[instrument(skip(self))]
    pub async fn generate_report(&self, medicamento: &str) -> Result<ReportRun, LlmError> {
        let request_id = Uuid::new_v4();
        let started = Instant::now();
        info!(request_id = %request_id, medicamento, "Starting report pipeline");

        // The three retrievals are independent; run them concurrently and
        // join before fusion.
        let (bula, fda, fontes_extras) = tokio::join!(
            self.regulatory.fetch_bula(medicamento),
            self.labels.fetch_label(medicamento),
            self.harvester.collect_extra_sources(medicamento),
        );

        info!(
            request_id = %request_id,
            bula = bula.code(),
            fda = fda.code(),
            extras = fontes_extras.len(),
            "Retrieval complete"
        );

        let contexto = fusion::build_context(
            medicamento,
            Some(bula.as_texto()),
            fda.label(),
            &fontes_extras,
        );

        let request = LlmRequest {
            messages: prompt::build_analysis_messages(&contexto),
            model: None,
            max_tokens: None,
            temperature: None,
        };
        let response = self.llm.complete(request).await?;

        let run = ReportRun {
            request_id,
            generated_at: chrono::Utc::now(),
            medicamento: medicamento.to_string(),
            relatorio: response.content.trim().to_string(),
            bula_outcome: bula.code(),
            fda_outcome: fda.code(),
            extras_collected: fontes_extras.len(),
            duration_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            request_id = %request_id,
            model = self.llm.model_id(),
            duration_ms = run.duration_ms,
            "Report pipeline complete"
        );
        Ok(run)
    }
}
