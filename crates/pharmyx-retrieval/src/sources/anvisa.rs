//! ANVISA Bulário client.
//!
//! Endpoints used:
//!   search:  https://consultas.anvisa.gov.br/api/consultaMedicamento
//!   bulário: https://consultas.anvisa.gov.br/api/bulario/{idProduto}
//!
//! The chain is search → bulário lookup → PDF download → text extraction.
//! Each stage that gives up maps to its own `BulaOutcome` variant; the
//! shared client already carries the process-wide request timeout, so every
//! call in the chain is bounded.

use async_trait::async_trait;
use reqwest::Client;
use tempfile::NamedTempFile;
use tracing::{debug, instrument, warn};

use super::RegulatorySource;
use crate::models::BulaOutcome;
use crate::pdf::extract_pdf_text;

const ANVISA_BASE_URL: &str = "https://consultas.anvisa.gov.br/api";

pub struct AnvisaClient {
    client: Client,
}

impl AnvisaClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Search the product registry and return the first match's id.
    /// `Ok(None)` means the registry answered but nothing matched.
    #[instrument(skip(self))]
    async fn search_product(&self, medicamento: &str) -> anyhow::Result<Option<String>> {
        let url = format!("{ANVISA_BASE_URL}/consultaMedicamento");
        let resp = self.client
            .get(&url)
            .query(&[("nomeProduto", medicamento)])
            .send()
            .await?;

        if !resp.status().is_success() {
            anyhow::bail!("ANVISA search returned HTTP {}", resp.status());
        }

        let dados: serde_json::Value = resp.json().await?;
        let content = dados["content"].as_array().cloned().unwrap_or_default();
        debug!(matches = content.len(), "ANVISA search results");

        // Only the first result is ever used; there is no disambiguation
        // among candidate products.
        let Some(first) = content.first() else {
            return Ok(None);
        };
        let id = match &first["idProduto"] {
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::String(s) => s.clone(),
            _ => return Ok(None),
        };
        Ok(Some(id))
    }

    /// Fetch the bulário entry for a product; returns the PDF link if the
    /// entry carries one.
    #[instrument(skip(self))]
    async fn fetch_bula_metadata(&self, product_id: &str) -> anyhow::Result<Option<String>> {
        let url = format!("{ANVISA_BASE_URL}/bulario/{product_id}");
        let resp = self.client.get(&url).send().await?;

        if !resp.status().is_success() {
            anyhow::bail!("ANVISA bulário returned HTTP {}", resp.status());
        }

        let bula: serde_json::Value = resp.json().await?;
        Ok(bula["urlPdf"]
            .as_str()
            .filter(|link| !link.is_empty())
            .map(String::from))
    }

    /// Download the label PDF and extract text from every page.
    #[instrument(skip(self))]
    async fn download_and_extract(&self, pdf_url: &str) -> anyhow::Result<String> {
        let resp = self.client.get(pdf_url).send().await?;
        if !resp.status().is_success() {
            anyhow::bail!("PDF download failed: HTTP {}", resp.status());
        }
        let pdf_bytes = resp.bytes().await?;

        // lopdf parsing is CPU-bound, so it runs off the async runtime
        let mut temp_file = NamedTempFile::new()?;
        std::io::Write::write_all(&mut temp_file, &pdf_bytes)?;
        let temp_path = temp_file.path().to_path_buf();

        let texto = tokio::task::spawn_blocking(move || extract_pdf_text(&temp_path)).await??;
        Ok(texto)
    }
}

#[async_trait]
impl RegulatorySource for AnvisaClient {
    #[instrument(skip(self))]
    async fn fetch_bula(&self, medicamento: &str) -> BulaOutcome {
        let product_id = match self.search_product(medicamento).await {
            Ok(Some(id)) => id,
            Ok(None) => return BulaOutcome::NotFound,
            Err(e) => {
                warn!("ANVISA search failed for '{medicamento}': {e}");
                return BulaOutcome::ServerUnreachable;
            }
        };

        let pdf_url = match self.fetch_bula_metadata(&product_id).await {
            Ok(Some(url)) => url,
            Ok(None) => return BulaOutcome::PdfMissing,
            Err(e) => {
                warn!("ANVISA bulário lookup failed for product {product_id}: {e}");
                return BulaOutcome::LabelLookupFailed;
            }
        };

        match self.download_and_extract(&pdf_url).await {
            Ok(texto) if !texto.trim().is_empty() => BulaOutcome::Texto(texto),
            Ok(_) => BulaOutcome::ExtractionFailed,
            Err(e) => {
                warn!("Bula PDF extraction failed for '{medicamento}': {e}");
                BulaOutcome::ExtractionFailed
            }
        }
    }
}
