//! PubMed E-utilities client.
//!
//! Endpoints used:
//!   esearch: https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi
//!   efetch:  https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi
//!
//! The harvest runs in three stages (esearch for PMIDs, efetch for the XML
//! batch, then extraction) and each stage handles its own failure, so a
//! parse defect is distinguishable from a network defect in the logs. The
//! public contract never fails: whatever was assembled before a stage gave
//! up is what the caller gets.

use async_trait::async_trait;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use super::LiteratureSource;
use crate::models::{PubMedArticle, PUBMED_TITLE_FALLBACK};

const ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";
const EFETCH_URL:  &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

pub struct PubMedClient {
    client: Client,
    email: Option<String>,
    tool: Option<String>,
}

impl PubMedClient {
    /// `email` and `tool` are the NCBI-recommended identification
    /// parameters; both are optional and never block the harvest.
    pub fn new(client: Client, email: Option<String>, tool: Option<String>) -> Self {
        Self { client, email, tool }
    }

    /// Build the safety-focused search term for a drug name.
    pub fn build_term(medicamento: &str) -> String {
        format!(
            "{medicamento}[Title/Abstract] AND \
             (drug interactions OR adverse effects OR safety OR toxicity)"
        )
    }

    fn ident_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(email) = &self.email {
            params.push(("email", email.clone()));
        }
        if let Some(tool) = &self.tool {
            params.push(("tool", tool.clone()));
        }
        params
    }

    /// Search PubMed and return a list of PMIDs.
    #[instrument(skip(self))]
    async fn esearch(&self, term: &str, max: usize) -> anyhow::Result<Vec<String>> {
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("retmode", "json".to_string()),
            ("retmax", max.to_string()),
            ("term", term.to_string()),
        ];
        params.extend(self.ident_params());

        let resp = self.client.get(ESEARCH_URL).query(&params).send().await?;
        if !resp.status().is_success() {
            anyhow::bail!("esearch returned HTTP {}", resp.status());
        }
        let body: serde_json::Value = resp.json().await?;

        let ids = body["esearchresult"]["idlist"]
            .as_array()
            .unwrap_or(&vec![])
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect();

        debug!(?ids, "PubMed esearch returned PMIDs");
        Ok(ids)
    }

    /// Fetch the XML batch for a list of PMIDs in one call.
    #[instrument(skip(self))]
    async fn efetch_xml(&self, pmids: &[String]) -> anyhow::Result<String> {
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("id", pmids.join(",")),
            ("retmode", "xml".to_string()),
        ];
        params.extend(self.ident_params());

        let resp = self.client.get(EFETCH_URL).query(&params).send().await?;
        if !resp.status().is_success() {
            anyhow::bail!("efetch returned HTTP {}", resp.status());
        }
        Ok(resp.text().await?)
    }
}

#[async_trait]
impl LiteratureSource for PubMedClient {
    #[instrument(skip(self))]
    async fn search_excerpts(&self, medicamento: &str, max_results: usize) -> Vec<String> {
        let term = Self::build_term(medicamento);

        let pmids = match self.esearch(&term, max_results).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!("PubMed esearch failed for '{medicamento}': {e}");
                return Vec::new();
            }
        };
        if pmids.is_empty() {
            debug!("No PubMed articles found for '{medicamento}'");
            return Vec::new();
        }

        let xml = match self.efetch_xml(&pmids).await {
            Ok(xml) => xml,
            Err(e) => {
                warn!("PubMed efetch failed for '{medicamento}': {e}");
                return Vec::new();
            }
        };

        let articles = match parse_pubmed_articles(&xml) {
            Ok(articles) => articles,
            Err(e) => {
                warn!("PubMed XML parse failed for '{medicamento}': {e}");
                return Vec::new();
            }
        };

        articles.iter().map(PubMedArticle::as_excerpt).collect()
    }
}

/// Parse PubMed efetch XML into articles.
/// Handles the <PubmedArticleSet><PubmedArticle> structure. Abstract
/// segments carrying a Label (or NlmCategory) attribute render as
/// "label: text"; segments join with newlines, and records whose joined
/// abstract is empty are dropped.
fn parse_pubmed_articles(xml: &str) -> anyhow::Result<Vec<PubMedArticle>> {
    let mut articles = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    // State machine for XML parsing
    let mut in_article     = false;
    let mut in_title       = false;
    let mut in_segment     = false;
    let mut title          = String::new();
    let mut segments: Vec<String> = Vec::new();
    let mut current_text   = String::new();
    let mut current_label: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"PubmedArticle" => {
                    in_article = true;
                    title.clear();
                    segments.clear();
                }
                b"ArticleTitle" if in_article => in_title = true,
                b"AbstractText" if in_article => {
                    in_segment = true;
                    current_text.clear();
                    current_label = segment_label(e);
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default().to_string();
                if in_title {
                    title.push_str(&text);
                } else if in_segment {
                    current_text.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"ArticleTitle" => in_title = false,
                b"AbstractText" => {
                    if in_segment {
                        segments.push(match current_label.take() {
                            Some(label) => format!("{label}: {current_text}"),
                            None => current_text.clone(),
                        });
                        in_segment = false;
                    }
                }
                b"PubmedArticle" => {
                    let abstract_text = segments.join("\n").trim().to_string();
                    if abstract_text.is_empty() {
                        debug!("Skipping article with empty abstract");
                    } else {
                        let article_title = if title.is_empty() {
                            PUBMED_TITLE_FALLBACK.to_string()
                        } else {
                            title.clone()
                        };
                        articles.push(PubMedArticle {
                            title: article_title,
                            abstract_text,
                        });
                    }
                    in_article = false;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!("XML parse error: {}", e);
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(articles)
}

/// Label takes precedence over NlmCategory; empty attribute values count
/// as absent.
fn segment_label(e: &BytesStart) -> Option<String> {
    let mut label = None;
    let mut category = None;
    for attr in e.attributes().flatten() {
        let value = attr.unescape_value().unwrap_or_default().to_string();
        if value.is_empty() {
            continue;
        }
        match attr.key.as_ref() {
            b"Label"       => label = Some(value),
            b"NlmCategory" => category = Some(value),
            _ => {}
        }
    }
    label.or(category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_pubmed_xml() {
        let xml = r#"<?xml version="1.0"?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <PMID>12345678</PMID>
      <Article>
        <ArticleTitle>Dipyrone and warfarin interaction</ArticleTitle>
        <Abstract><AbstractText>Case report of potentiated anticoagulation.</AbstractText></Abstract>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

        let articles = parse_pubmed_articles(xml).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Dipyrone and warfarin interaction");
        assert_eq!(
            articles[0].abstract_text,
            "Case report of potentiated anticoagulation."
        );
    }

    #[test]
    fn test_parse_labeled_abstract_segments() {
        let xml = r#"<?xml version="1.0"?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <Article>
        <ArticleTitle>Ibuprofen safety profile</ArticleTitle>
        <Abstract>
          <AbstractText Label="BACKGROUND">NSAIDs are widely used.</AbstractText>
          <AbstractText NlmCategory="RESULTS">GI bleeding risk increased.</AbstractText>
          <AbstractText>Unlabeled closing remark.</AbstractText>
        </Abstract>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

        let articles = parse_pubmed_articles(xml).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(
            articles[0].abstract_text,
            "BACKGROUND: NSAIDs are widely used.\n\
             RESULTS: GI bleeding risk increased.\n\
             Unlabeled closing remark."
        );
    }

    #[test]
    fn test_parse_skips_articles_without_abstract() {
        let xml = r#"<?xml version="1.0"?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <Article>
        <ArticleTitle>No abstract here</ArticleTitle>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
  <PubmedArticle>
    <MedlineCitation>
      <Article>
        <Abstract><AbstractText>Kept because it has a summary.</AbstractText></Abstract>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

        let articles = parse_pubmed_articles(xml).unwrap();
        assert_eq!(articles.len(), 1);
        // The second record has no title element, so the placeholder is used
        assert_eq!(articles[0].title, PUBMED_TITLE_FALLBACK);
        assert_eq!(articles[0].abstract_text, "Kept because it has a summary.");
    }

    #[test]
    fn test_parsed_article_renders_as_excerpt() {
        let xml = r#"<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <Article>
        <ArticleTitle>T</ArticleTitle>
        <Abstract><AbstractText>R</AbstractText></Abstract>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

        let articles = parse_pubmed_articles(xml).unwrap();
        assert_eq!(
            articles[0].as_excerpt(),
            "[TEXTO PUBMED]\nTítulo: T\n\nResumo:\nR"
        );
    }

    #[test]
    fn test_build_term() {
        let term = PubMedClient::build_term("sibutramine");
        assert!(term.starts_with("sibutramine[Title/Abstract] AND "));
        assert!(term.contains("drug interactions OR adverse effects OR safety OR toxicity"));
    }
}
