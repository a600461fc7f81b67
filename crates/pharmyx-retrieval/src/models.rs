//! Data models for the retrieval layer.
//!
//! Each source degrades into a typed outcome instead of an error: callers
//! can branch on the variant (or log its `code()`), while the fusion layer
//! only ever sees the rendered Portuguese prose.

use serde::{Deserialize, Serialize};

// ── ANVISA ────────────────────────────────────────────────────────────────────

pub const ANVISA_UNREACHABLE: &str = "❌ Não foi possível acessar o servidor da ANVISA.";
pub const ANVISA_NOT_FOUND: &str = "❌ Nenhum medicamento encontrado na ANVISA.";
pub const ANVISA_BULA_NOT_FOUND: &str = "❌ Bula não encontrada para este medicamento.";
pub const ANVISA_PDF_MISSING: &str = "❌ Não existe PDF para este medicamento.";
pub const ANVISA_EXTRACTION_FAILED: &str = "⚠ Não foi possível extrair o texto da bula.";

/// Outcome of the ANVISA label chain (search → bulário lookup → PDF → text).
/// Failure variants identify the stage that gave up; `as_texto` renders each
/// as the fixed sentence shown to the clinician.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum BulaOutcome {
    /// Full text extracted from the label PDF.
    Texto(String),
    /// The product-search call failed or answered non-2xx.
    ServerUnreachable,
    /// Search succeeded but matched no product.
    NotFound,
    /// The bulário lookup for the matched product failed.
    LabelLookupFailed,
    /// Bulário metadata carried no PDF link.
    PdfMissing,
    /// The PDF was located but no text could be extracted from it.
    ExtractionFailed,
}

impl BulaOutcome {
    /// The prose handed downstream: extracted label text, or the fixed
    /// sentence for the failure variant.
    pub fn as_texto(&self) -> &str {
        match self {
            BulaOutcome::Texto(t)          => t,
            BulaOutcome::ServerUnreachable => ANVISA_UNREACHABLE,
            BulaOutcome::NotFound          => ANVISA_NOT_FOUND,
            BulaOutcome::LabelLookupFailed => ANVISA_BULA_NOT_FOUND,
            BulaOutcome::PdfMissing        => ANVISA_PDF_MISSING,
            BulaOutcome::ExtractionFailed  => ANVISA_EXTRACTION_FAILED,
        }
    }

    /// Short reason code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            BulaOutcome::Texto(_)          => "texto",
            BulaOutcome::ServerUnreachable => "server_unreachable",
            BulaOutcome::NotFound          => "not_found",
            BulaOutcome::LabelLookupFailed => "label_lookup_failed",
            BulaOutcome::PdfMissing        => "pdf_missing",
            BulaOutcome::ExtractionFailed  => "extraction_failed",
        }
    }

    pub fn is_texto(&self) -> bool {
        matches!(self, BulaOutcome::Texto(_))
    }
}

// ── openFDA ───────────────────────────────────────────────────────────────────

pub const FDA_NOT_REPORTED: &str = "Não informado pelo FDA.";

/// The eight clinical fields extracted from one openFDA label record.
/// A `None` field means openFDA did not report it for this product, which
/// is distinct from the whole record being absent (`FdaOutcome::NoMatch`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FdaLabel {
    pub interacoes: Option<String>,
    pub advertencias: Option<String>,
    pub contraindicacoes: Option<String>,
    pub reacoes_adversas: Option<String>,
    pub posologia: Option<String>,
    pub gravidez: Option<String>,
    pub pediatria: Option<String>,
    pub idosos: Option<String>,
}

impl FdaLabel {
    /// The eight fields in render order, each paired with its sub-heading
    /// label. Missing or empty fields yield the fixed "not reported" marker
    /// here, so the default travels with the mapping rather than with the
    /// document template.
    pub fn campos(&self) -> [(&'static str, &str); 8] {
        [
            ("Interações medicamentosas (FDA)",            field_or_default(&self.interacoes)),
            ("Advertências e precauções (FDA)",            field_or_default(&self.advertencias)),
            ("Contraindicações (FDA)",                     field_or_default(&self.contraindicacoes)),
            ("Reações adversas / efeitos colaterais (FDA)", field_or_default(&self.reacoes_adversas)),
            ("Posologia e modo de usar (FDA)",             field_or_default(&self.posologia)),
            ("Uso na gravidez (FDA)",                      field_or_default(&self.gravidez)),
            ("Uso pediátrico (FDA)",                       field_or_default(&self.pediatria)),
            ("Uso em idosos (FDA)",                        field_or_default(&self.idosos)),
        ]
    }
}

fn field_or_default(field: &Option<String>) -> &str {
    field.as_deref().filter(|v| !v.is_empty()).unwrap_or(FDA_NOT_REPORTED)
}

/// Outcome of the openFDA query. `NoMatch` (the API answered, nothing
/// matched) and `Unavailable` (transport or parse failure) render the same
/// way in the fused document but stay distinguishable for logs and tests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum FdaOutcome {
    Found(FdaLabel),
    NoMatch,
    Unavailable,
}

impl FdaOutcome {
    pub fn label(&self) -> Option<&FdaLabel> {
        match self {
            FdaOutcome::Found(label) => Some(label),
            _ => None,
        }
    }

    /// Short reason code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            FdaOutcome::Found(_)    => "found",
            FdaOutcome::NoMatch     => "no_match",
            FdaOutcome::Unavailable => "unavailable",
        }
    }
}

// ── PubMed ────────────────────────────────────────────────────────────────────

pub const PUBMED_TITLE_FALLBACK: &str = "Título não disponível";

/// One PubMed citation after XML extraction. The parser drops records
/// whose abstract assembles to an empty string, so every `PubMedArticle`
/// carries a non-empty abstract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PubMedArticle {
    pub title: String,
    pub abstract_text: String,
}

impl PubMedArticle {
    /// Renders the citation as the excerpt block embedded in the fused
    /// context document.
    pub fn as_excerpt(&self) -> String {
        format!(
            "[TEXTO PUBMED]\nTítulo: {}\n\nResumo:\n{}",
            self.title, self.abstract_text
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
