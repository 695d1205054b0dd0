//! Prompt templates for the analysis pipelines

use crate::error::{Error, Result};

/// A static prompt with `{name}` placeholders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    name: &'static str,
    template: &'static str,
}

/// Extracts tasks, owners and deadlines
pub const ACTION_ITEM_TEMPLATE: PromptTemplate = PromptTemplate::new(
    "action_items",
    "
You are a smart assistant analyzing corporate documents like meeting transcripts, legal contracts, or business reports.

Your task is to extract actionable items in the following format:
1. Task description
2. Responsible person or team (if any)
3. Deadline (if mentioned)

Text:
{text}

Respond with a clear list of action items:
",
);

/// Produces a concise summary
pub const SUMMARIZATION_TEMPLATE: PromptTemplate = PromptTemplate::new(
    "summarization",
    "
You are a professional summarizer. Summarize the following document clearly and concisely.

Document:
{text}

Summary:
",
);

/// Answers a question from retrieved context
pub const QA_TEMPLATE: PromptTemplate = PromptTemplate::new(
    "qa",
    "
You are an AI assistant. Based on the following context, answer the user's question.

Context:
{context}

Question:
{question}

Answer:
",
);

impl PromptTemplate {
    /// Create a template
    pub const fn new(name: &'static str, template: &'static str) -> Self {
        Self { name, template }
    }

    /// Template name used in logs and errors
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Placeholder names in order of appearance
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.template;
        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            match placeholder_at(after) {
                Some(name) => {
                    names.push(name);
                    rest = &after[name.len() + 1..];
                }
                None => rest = after,
            }
        }
        names
    }

    /// Substitute every placeholder in one pass. Values are inserted
    /// verbatim, so braces inside them are never expanded.
    pub fn render(&self, values: &[(&str, &str)]) -> Result<String> {
        let mut out = String::with_capacity(
            self.template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>(),
        );
        let mut rest = self.template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            match placeholder_at(after) {
                Some(name) => {
                    let value = values
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| {
                            Error::Template(format!(
                                "template '{}' needs a value for '{{{}}}'",
                                self.name, name
                            ))
                        })?;
                    out.push_str(value);
                    rest = &after[name.len() + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);

        Ok(out)
    }
}

/// If `s` starts with `identifier}`, return the identifier
fn placeholder_at(s: &str) -> Option<&str> {
    let close = s.find('}')?;
    let name = &s[..close];
    let mut chars = name.chars();
    let first = chars.next()?;
    if (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Some(name)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(ACTION_ITEM_TEMPLATE.placeholders(), vec!["text"]);
        assert_eq!(SUMMARIZATION_TEMPLATE.placeholders(), vec!["text"]);
        assert_eq!(QA_TEMPLATE.placeholders(), vec!["context", "question"]);
    }

    #[test]
    fn test_render_qa() {
        let prompt = QA_TEMPLATE
            .render(&[("context", "The budget is $5k."), ("question", "What is the budget?")])
            .unwrap();
        assert!(prompt.contains("Context:\nThe budget is $5k.\n\nQuestion:\nWhat is the budget?\n\nAnswer:\n"));
        assert!(prompt.starts_with("\nYou are an AI assistant."));
    }

    #[test]
    fn test_values_are_not_reexpanded() {
        let prompt = QA_TEMPLATE
            .render(&[("context", "{question}"), ("question", "why?")])
            .unwrap();
        assert!(prompt.contains("Context:\n{question}\n"));
        assert!(prompt.contains("Question:\nwhy?\n"));
    }

    #[test]
    fn test_missing_value_is_template_error() {
        let err = QA_TEMPLATE.render(&[("context", "x")]).unwrap_err();
        match err {
            Error::Template(msg) => assert!(msg.contains("{question}")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_identifier_braces_kept() {
        let template = PromptTemplate::new("json", "Return {\"items\": []} for {text} {1} {");
        let out = template.render(&[("text", "notes")]).unwrap();
        assert_eq!(out, "Return {\"items\": []} for notes {1} {");
    }
}
