//! Offline route tests, driven through the full router with stub sources
//! and a stub language model.
//!
//! Run with: cargo test --package pharmyx-web --test test_routes

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use pharmyx_llm::{LlmBackend, LlmError, LlmRequest, LlmResponse};
use pharmyx_report::ReportPipeline;
use pharmyx_retrieval::harvester::{KnowledgeHarvester, DEFAULT_MAX_ARTICLES};
use pharmyx_retrieval::sources::{GuidelineSource, LabelSource, LiteratureSource, RegulatorySource};
use pharmyx_retrieval::{BulaOutcome, FdaOutcome};
use pharmyx_web::{build_router, AppState};

// ── Stubs ─────────────────────────────────────────────────────────────────────

struct StaticBula;

#[async_trait]
impl RegulatorySource for StaticBula {
    async fn fetch_bula(&self, _medicamento: &str) -> BulaOutcome {
        BulaOutcome::Texto("Texto da bula de teste.".to_string())
    }
}

struct NoFda;

#[async_trait]
impl LabelSource for NoFda {
    async fn fetch_label(&self, _medicamento: &str) -> FdaOutcome {
        FdaOutcome::NoMatch
    }
}

struct NoLiterature;

#[async_trait]
impl LiteratureSource for NoLiterature {
    async fn search_excerpts(&self, _medicamento: &str, _max_results: usize) -> Vec<String> {
        Vec::new()
    }
}

struct NoGuidelines;

#[async_trait]
impl GuidelineSource for NoGuidelines {
    async fn fetch_guidelines(&self, _medicamento: &str) -> Vec<String> {
        Vec::new()
    }
}

struct FixedLlm(&'static str);

#[async_trait]
impl LlmBackend for FixedLlm {
    async fn complete(&self, _req: LlmRequest) -> Result<LlmResponse, LlmError> {
        Ok(LlmResponse {
            content: self.0.to_string(),
            model: "fixed-stub".to_string(),
            prompt_tokens: 0,
            completion_tokens: 0,
        })
    }

    fn model_id(&self) -> &str {
        "fixed-stub"
    }
}

struct FailingLlm;

#[async_trait]
impl LlmBackend for FailingLlm {
    async fn complete(&self, _req: LlmRequest) -> Result<LlmResponse, LlmError> {
        Err(LlmError::Api {
            status: 429,
            message: "rate limited".to_string(),
        })
    }

    fn model_id(&self) -> &str {
        "failing-stub"
    }
}

fn test_router(llm: Arc<dyn LlmBackend>) -> Router {
    let harvester = KnowledgeHarvester::new(
        Arc::new(NoLiterature),
        Arc::new(NoGuidelines),
        DEFAULT_MAX_ARTICLES,
    );
    let pipeline = ReportPipeline::new(Arc::new(StaticBula), Arc::new(NoFda), harvester, llm);
    build_router(AppState::new(pipeline))
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_root_banner() {
    let router = test_router(Arc::new(FixedLlm("relatório")));
    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "Pharmyx AI rodando 💥");
    assert_eq!(body["online"], true);
}

#[tokio::test]
async fn test_status_endpoint() {
    let router = test_router(Arc::new(FixedLlm("relatório")));
    let response = router
        .oneshot(Request::builder().uri("/status").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["API"], "Pharmyx AI ativa e operacional");
}

#[tokio::test]
async fn test_interacoes_returns_report() {
    let router = test_router(Arc::new(FixedLlm("## Relatório de Teste")));
    let response = router
        .oneshot(
            Request::builder()
                .uri("/interacoes/dipirona")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["medicamento"], "DIPIRONA");
    assert_eq!(body["fonte_principal"], "ANVISA + OpenFDA");
    assert_eq!(body["relatorio_clinico"], "## Relatório de Teste");
}

#[tokio::test]
async fn test_interacoes_llm_failure_is_bad_gateway() {
    let router = test_router(Arc::new(FailingLlm));
    let response = router
        .oneshot(
            Request::builder()
                .uri("/interacoes/dipirona")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("report generation failed"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let router = test_router(Arc::new(FixedLlm("relatório")));
    let response = router
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
