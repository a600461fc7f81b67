//! Prompt assembly for the clinical-analysis call.

use pharmyx_llm::Message;

/// System role sent with every analysis request.
pub const SYSTEM_PROMPT: &str =
    "Você é uma IA especialista em interações medicamentosas baseadas em ANVISA.";

const ANALYSIS_HEADER: &str = "Você é um farmacêutico clínico especialista em interações medicamentosas.
Analise o contexto abaixo e responda com estrutura objetiva, em MARKDOWN.

CONTEXTO:";

const ANALYSIS_FORMAT: &str = "Responda com o seguinte formato:

## 💊 Interações Medicamentosas Principais
- ...

## 🧬 Mecanismos
- Como ocorre a interação?

## ⚠ Riscos Clínicos
- Quais efeitos adversos podem ocorrer?

## 🔄 Recomendações para o Profissional
- condutas — dose, substituição, monitoramento

## 🧾 Conclusão
- Resumo final de segurança";

/// Wraps the fused context document into the chat messages for the model.
/// The trailing Markdown skeleton pins the section layout of the report
/// that the web layer returns verbatim.
pub fn build_analysis_messages(contexto: &str) -> Vec<Message> {
    vec![
        Message {
            role: "system".to_string(),
            content: SYSTEM_PROMPT.to_string(),
        },
        Message {
            role: "user".to_string(),
            content: format!("{}\n{}\n\n{}", ANALYSIS_HEADER, contexto, ANALYSIS_FORMAT),
        },
    ]
}
