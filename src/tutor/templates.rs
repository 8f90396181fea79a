//! Prompt templates for study schedule and quiz generation
//!
//! Each template carries exactly one placeholder and is rendered with
//! split+concat so placeholder text inside user content is never rewritten.

use anyhow::{anyhow, Result};

/// Maximum number of characters of announcement text embedded in a prompt
pub const MAX_EDITAL_CHARS: usize = 30_000;

/// Study schedule prompt
/// Contains placeholder for the announcement text only
pub const STUDY_PLAN_TEMPLATE: &str = r#"
Aja como um tutor especialista. Com base no texto deste edital:
{texto_edital}

Crie um cronograma de estudos semanal detalhado e tabelado.
Saída em Markdown.
"#;

/// Quiz prompt with the prescribed answer layout
/// Contains placeholder for the topic only
pub const QUIZ_TEMPLATE: &str = r#"
Com base no edital fornecido, crie um QUIZ de 5 questões múltipla escolha sobre o tópico: {topico}.
Formate a saída assim:
**Pergunta**
a) ...
b) ...
...
**Resposta Correta:** X
**Explicação:** ...
"#;

/// Render a single-placeholder template safely without corrupting user input
fn render(template: &str, placeholder: &str, value: &str) -> Result<String> {
    let (before, after) = template
        .split_once(placeholder)
        .ok_or_else(|| anyhow!("template missing {} placeholder", placeholder))?;

    let mut rendered = String::with_capacity(before.len() + value.len() + after.len());
    rendered.push_str(before);
    rendered.push_str(value);
    rendered.push_str(after);
    Ok(rendered)
}

/// Build the study schedule prompt, embedding at most the first
/// [`MAX_EDITAL_CHARS`] characters of the announcement text
pub fn render_study_plan_prompt(edital_text: &str) -> Result<String> {
    render(
        STUDY_PLAN_TEMPLATE,
        "{texto_edital}",
        truncate_chars(edital_text, MAX_EDITAL_CHARS),
    )
}

/// Build the quiz prompt for a topic
pub fn render_quiz_prompt(topic: &str) -> Result<String> {
    render(QUIZ_TEMPLATE, "{topico}", topic)
}

/// Truncate to at most `max` characters on a char boundary
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
