//! Prompt templates with named `{slot}` placeholders.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("no value for prompt slot {{{0}}}")]
    MissingSlot(String),
}

/// Template whose `{name}` placeholders are bound at render time.
///
/// Rendering is a single left-to-right pass: text inserted for a slot is never scanned
/// again, so retrieved context containing `{question}` stays literal. A `{` not followed by
/// an identifier and `}` is copied as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    template: &'static str,
}

impl PromptTemplate {
    pub const fn new(template: &'static str) -> Self {
        Self { template }
    }

    pub fn as_str(&self) -> &'static str {
        self.template
    }

    pub fn render(&self, values: &[(&str, &str)]) -> Result<String, PromptError> {
        let values: HashMap<&str, &str> = values.iter().copied().collect();
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let slot_len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            if slot_len > 0 && after[slot_len..].starts_with('}') {
                let name = &after[..slot_len];
                let value = values
                    .get(name)
                    .ok_or_else(|| PromptError::MissingSlot(name.to_string()))?;
                out.push_str(value);
                rest = &after[slot_len + 1..];
            } else {
                out.push('{');
                rest = after;
            }
        }
        out.push_str(rest);
        Ok(out)
    }
}

/// Direct answer for questions that do not need the product index.
pub const DIRECT_ANSWER: PromptTemplate = PromptTemplate::new(
    "You are a helpful assistant. Answer the user directly.\n\nQuestion: {question}\nAnswer:",
);

/// Relevance judge: reply must contain "yes" for the context to be accepted.
pub const GRADER: PromptTemplate = PromptTemplate::new(
    "You are a grader. Question: {question}\nDocs: {docs}\n\nAre docs relevant to the question? Answer yes or no.",
);

/// Query reformulation; the model must not answer.
pub const REWRITER: PromptTemplate = PromptTemplate::new(
    "Rewrite this user query to make it more clear and specific for a search engine. \
     Do NOT answer the query. Only rewrite it.\n\nQuery: {question}\nRewritten Query:",
);

/// Grounded product answer over retrieved or searched context.
pub const PRODUCT_BOT: PromptTemplate = PromptTemplate::new(
    "You are an expert EcommerceBot specialized in product recommendations and handling customer queries.\n\
     Analyze the provided product titles, ratings, and reviews to provide accurate, helpful responses.\n\
     Stay relevant to the context, and keep your answers concise and informative.\n\n\
     CONTEXT:\n{context}\n\n\
     QUESTION: {question}\n\n\
     YOUR ANSWER:",
);
