//! Drug-interaction report endpoint.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct InteracoesResponse {
    pub medicamento: String,
    pub fonte_principal: &'static str,
    pub relatorio_clinico: String,
}

/// GET /interacoes/{medicamento} - Full drug-safety report
///
/// Runs the whole pipeline: ANVISA label, openFDA record and literature
/// excerpts are retrieved concurrently, fused into one context document and
/// analyzed by the language model. Sources that produced nothing appear in
/// the report as their fallback prose; only a failed model call errors.
pub async fn verificar_interacoes(
    State(state): State<SharedState>,
    Path(medicamento): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let run = state.pipeline.generate_report(&medicamento).await?;

    Ok(Json(InteracoesResponse {
        medicamento: medicamento.to_uppercase(),
        fonte_principal: "ANVISA + OpenFDA",
        relatorio_clinico: run.relatorio,
    }))
}
