//! Deterministic fusion of the three drug-safety sources into one
//! prompt-ready document.
//!
//! Pure string assembly: no I/O, no clock, no randomness. Identical inputs
//! always yield a byte-identical document, whatever mix of sources actually
//! answered, so the downstream analysis prompt is fully reproducible.

use pharmyx_retrieval::FdaLabel;

// ── Fixed template fragments ──────────────────────────────────────────────────

/// Shown inside the ANVISA block when no usable label text was retrieved.
pub const ANVISA_EMPTY_SECTION: &str =
    "Nenhum dado relevante encontrado na ANVISA para este medicamento.";

/// Replaces the structured field list when openFDA produced no record.
pub const FDA_ABSENT_BLOCK: &str = "### Dados FDA (EUA)

Não foram encontrados registros relevantes no OpenFDA para este medicamento
ou ocorreu alguma falha na obtenção dos dados.";

/// Separator placed between collected literature excerpts.
pub const EXTRAS_SEPARATOR: &str = "\n\n---\n\n";

const FDA_PRESENT_HEADER: &str = "### Dados FDA (EUA) — Possível diferença de nome/composição";

const EXTRAS_PRESENT_HEADER: &str = "### Fontes adicionais (literatura científica / diretrizes)

Os textos abaixo foram coletados em bases científicas e/ou guidelines.
Eles podem conter descrições de:
- interações medicamentosas
- mecanismos de ação
- efeitos adversos
- recomendações de uso em populações especiais

TEXTOS COLETADOS:";

const EXTRAS_EMPTY_BLOCK: &str = "### Fontes adicionais (literatura científica / diretrizes)

Nenhum texto extra foi coletado para este medicamento
(não foram encontradas referências relevantes ou o coletor ainda
não está configurado para este tipo de busca).";

// ── Section builders ──────────────────────────────────────────────────────────

fn anvisa_section(bula_texto: Option<&str>) -> &str {
    match bula_texto {
        Some(texto) if !texto.trim().is_empty() => texto,
        _ => ANVISA_EMPTY_SECTION,
    }
}

fn fda_section(fda: Option<&FdaLabel>) -> String {
    match fda {
        Some(label) => {
            let mut section = String::from(FDA_PRESENT_HEADER);
            for (titulo, valor) in label.campos() {
                section.push_str(&format!("\n\n- **{}:**\n{}", titulo, valor));
            }
            section
        }
        None => FDA_ABSENT_BLOCK.to_string(),
    }
}

fn extras_section(fontes_extras: &[String]) -> String {
    if fontes_extras.is_empty() {
        return EXTRAS_EMPTY_BLOCK.to_string();
    }
    format!(
        "{}\n\n{}",
        EXTRAS_PRESENT_HEADER,
        fontes_extras.join(EXTRAS_SEPARATOR)
    )
}

// ── Document assembly ─────────────────────────────────────────────────────────

/// Builds the fused context document handed to the language model.
///
/// The document always carries the same skeleton: preamble, drug name in
/// upper case, three delimited source blocks (ANVISA, OpenFDA, literature)
/// and the fixed instruction list. A source that produced nothing is
/// rendered as its fallback prose, never omitted, so the model can reason
/// about the absence explicitly.
pub fn build_context(
    medicamento: &str,
    bula_texto: Option<&str>,
    fda: Option<&FdaLabel>,
    fontes_extras: &[String],
) -> String {
    format!(
        "Você é um assistente clínico especializado em farmacologia dentro do sistema Pharmyx.

Seu objetivo é gerar um RELATÓRIO PROFISSIONAL sobre interações medicamentosas,
riscos clínicos e recomendações de conduta para o medicamento abaixo,
usando SOMENTE as informações presentes neste contexto combinado.

Medicamento pesquisado: {}

==================== FONTE 1 — ANVISA (Brasil) ====================

Texto da bula / informações regulatórias brasileiras:
{}

==================== FONTE 2 — OpenFDA (EUA) ====================

{}

==================== FONTE 3 — LITERATURA / GUIDELINES ====================

{}

==================== INSTRUÇÕES ====================

1. Compare criticamente os dados da ANVISA, do FDA e das fontes extras.
2. Liste as principais INTERAÇÕES MEDICAMENTOSAS, sempre que possível indicando:
   - medicamento envolvido
   - mecanismo provável da interação
   - consequência clínica (aumento de toxicidade, perda de efeito, etc.)
3. Destaque RISCOS CLÍNICOS importantes (hepatotoxicidade, nefrotoxicidade,
   risco cardiovascular, risco de sangramento, etc.).
4. Dê atenção especial a:
   - gestantes
   - lactantes
   - crianças
   - idosos
   - pacientes com insuficiência renal/hepática
   - pacientes com comorbidades relevantes
   - pacientes em uso de polifarmácia
   - pacientes imunocomprometidos
   - pacientes com doenças crônicas
   - pacientes em uso de medicamentos de alto risco
   - pacientes com histórico de reações adversas graves
   - pacientes em uso de terapias específicas (quimioterapia, imunoterapia, etc.)
   - profissionais de saúde (interações com anestésicos, sedativos, etc.)
   - pacientes com transtornos psiquiátricos
   - pacientes com doenças cardiovasculares
   - pacientes com doenças metabólicas (diabetes, dislipidemias, etc.)

5. Quando houver divergência entre fontes, explique brevemente.
6. Nunca invente dados: se algo não estiver claro nas fontes, diga que não há
   informação suficiente.
7. Estruture a saída em Markdown com seções claras, por exemplo:
   - Interações Medicamentosas Principais
   - Mecanismos Prováveis
   - Riscos Clínicos
   - Recomendações para o Profissional
   - Observações sobre Populações Especiais
   - Conclusão

Responda em português, de forma objetiva, técnica e voltada ao profissional de saúde.
",
        medicamento.to_uppercase(),
        anvisa_section(bula_texto),
        fda_section(fda),
        extras_section(fontes_extras),
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
