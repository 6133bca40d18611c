//! Conversation messages and the control markers carried in their text.
//!
//! Nodes talk to each other by appending messages. A message whose text starts with a
//! [`Marker`] is either a routing signal (`TOOL: ...`) or a tagged context block
//! (`[Source: ...]`).

use serde::{Deserialize, Serialize};

/// One entry of the conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// The user's query, or a prompt sent to the model.
    User(String),
    /// Anything produced by a node: answers, context blocks, control signals.
    Assistant(String),
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant(content.into())
    }

    /// Control message consisting of the marker literal alone.
    pub fn control(marker: Marker) -> Self {
        Self::Assistant(marker.as_str().to_string())
    }

    /// Context block prefixed with a source indicator on its own line.
    pub fn tagged(marker: Marker, body: &str) -> Self {
        Self::Assistant(format!("{}\n{}", marker.as_str(), body))
    }

    pub fn content(&self) -> &str {
        match self {
            Self::User(s) | Self::Assistant(s) => s,
        }
    }

    /// Leading marker of this message, if any.
    pub fn marker(&self) -> Option<Marker> {
        Marker::of(self.content())
    }
}

/// Text prefixes with routing or provenance meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Assistant decided the question needs the product index.
    ToolRetriever,
    /// Retrieval or generation was insufficient; escalate to web search.
    ToolWebSearch,
    /// Context (and answer) came from the product index.
    SourceDatabase,
    /// Context (and answer) came from web search.
    SourceWebSearch,
}

impl Marker {
    const ALL: [Marker; 4] = [
        Marker::ToolRetriever,
        Marker::ToolWebSearch,
        Marker::SourceDatabase,
        Marker::SourceWebSearch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Marker::ToolRetriever => "TOOL: retriever",
            Marker::ToolWebSearch => "TOOL: websearch",
            Marker::SourceDatabase => "[Source: Database]",
            Marker::SourceWebSearch => "[Source: Web Search]",
        }
    }

    pub fn is_source(self) -> bool {
        matches!(self, Marker::SourceDatabase | Marker::SourceWebSearch)
    }

    /// Marker the text starts with.
    pub fn of(text: &str) -> Option<Marker> {
        Self::ALL.into_iter().find(|m| text.starts_with(m.as_str()))
    }

    /// Splits a source indicator off the front of `text`.
    ///
    /// Returns the indicator (if the text starts with one) and the remaining body with
    /// leading whitespace removed. Routing markers are not source indicators and are left
    /// in the body.
    pub fn split_source(text: &str) -> (Option<Marker>, &str) {
        match Self::of(text) {
            Some(m) if m.is_source() => (Some(m), text[m.as_str().len()..].trim_start()),
            _ => (None, text),
        }
    }
}
