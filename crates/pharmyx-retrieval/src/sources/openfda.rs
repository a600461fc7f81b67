//! openFDA drug-label client.
//!
//! Endpoint: https://api.fda.gov/drug/label.json
//!
//! One query with `limit=1`; the first record's eight clinical fields map
//! onto `FdaLabel`. openFDA answers "no match" as HTTP 404 with a JSON
//! error body, so status codes are not treated as transport failure here.
//! Only connection and decode errors degrade to `Unavailable`.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use super::LabelSource;
use crate::models::{FdaLabel, FdaOutcome};

const FDA_LABEL_URL: &str = "https://api.fda.gov/drug/label.json";

pub struct OpenFdaClient {
    client: Client,
}

impl OpenFdaClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// `Ok(None)` means openFDA answered without a usable `results` entry.
    async fn query_label(&self, medicamento: &str) -> anyhow::Result<Option<FdaLabel>> {
        let resp = self.client
            .get(FDA_LABEL_URL)
            .query(&[("search", medicamento), ("limit", "1")])
            .send()
            .await?
            .json::<serde_json::Value>()
            .await?;

        let Some(first) = resp["results"].as_array().and_then(|results| results.first()) else {
            return Ok(None);
        };
        Ok(Some(map_label_record(first)))
    }
}

#[async_trait]
impl LabelSource for OpenFdaClient {
    #[instrument(skip(self))]
    async fn fetch_label(&self, medicamento: &str) -> FdaOutcome {
        match self.query_label(medicamento).await {
            Ok(Some(label)) => FdaOutcome::Found(label),
            Ok(None) => {
                debug!("openFDA matched no label for '{medicamento}'");
                FdaOutcome::NoMatch
            }
            Err(e) => {
                warn!("openFDA lookup failed for '{medicamento}': {e}");
                FdaOutcome::Unavailable
            }
        }
    }
}

/// openFDA stores each clinical field as an array of text blocks; blocks
/// are joined so the record holds plain text per field.
fn field_text(record: &serde_json::Value, key: &str) -> Option<String> {
    match &record[key] {
        serde_json::Value::Array(parts) => {
            let joined = parts
                .iter()
                .filter_map(|part| part.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            if joined.is_empty() {
                None
            } else {
                Some(joined)
            }
        }
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn map_label_record(record: &serde_json::Value) -> FdaLabel {
    FdaLabel {
        interacoes:       field_text(record, "drug_interactions"),
        advertencias:     field_text(record, "warnings"),
        contraindicacoes: field_text(record, "contraindications"),
        reacoes_adversas: field_text(record, "adverse_reactions"),
        posologia:        field_text(record, "dosage_and_administration"),
        gravidez:         field_text(record, "pregnancy"),
        pediatria:        field_text(record, "pediatric_use"),
        idosos:           field_text(record, "geriatric_use"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_label_record_full() {
        let record = json!({
            "drug_interactions": ["Interacts with warfarin.", "Avoid with NSAIDs."],
            "warnings": ["May cause drowsiness."],
            "contraindications": ["Hypersensitivity."],
            "adverse_reactions": ["Nausea."],
            "dosage_and_administration": ["One tablet daily."],
            "pregnancy": ["Category C."],
            "pediatric_use": ["Not established."],
            "geriatric_use": ["Use caution."]
        });

        let label = map_label_record(&record);
        assert_eq!(
            label.interacoes.as_deref(),
            Some("Interacts with warfarin.\nAvoid with NSAIDs.")
        );
        assert_eq!(label.advertencias.as_deref(), Some("May cause drowsiness."));
        assert_eq!(label.idosos.as_deref(), Some("Use caution."));
    }

    #[test]
    fn test_map_label_record_partial() {
        let record = json!({
            "drug_interactions": ["Risco X"]
        });

        let label = map_label_record(&record);
        assert_eq!(label.interacoes.as_deref(), Some("Risco X"));
        assert!(label.advertencias.is_none());
        assert!(label.posologia.is_none());
        assert!(label.idosos.is_none());
    }

    #[test]
    fn test_field_text_empty_array_is_none() {
        let record = json!({ "warnings": [] });
        assert!(field_text(&record, "warnings").is_none());
    }
}
