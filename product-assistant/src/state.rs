//! Conversation state threaded through the decision graph.

use serde::{Deserialize, Serialize};

use crate::message::{Marker, Message};

/// Outcome of grading retrieved context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    /// Context is sufficient; answer from it.
    Generator,
    /// Context is insufficient; rewrite the query and search the web.
    Rewriter,
}

/// State of one workflow run.
///
/// The message log is append-only: the first message is the user's original query and is
/// the question every node answers, no matter what was appended after it. Fields are
/// private so nothing outside [`push`](Self::push) can rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    messages: Vec<Message>,
    retry_count: u32,
    rewritten_query: Option<String>,
    grade: Option<Grade>,
    web_search_attempted: bool,
}

impl AgentState {
    /// Fresh state whose first message is `query`.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(query)],
            retry_count: 0,
            rewritten_query: None,
            grade: None,
            web_search_attempted: false,
        }
    }

    /// The original user question.
    pub fn question(&self) -> &str {
        self.messages
            .first()
            .map(Message::content)
            .unwrap_or_default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn last_content(&self) -> &str {
        self.last().map(Message::content).unwrap_or_default()
    }

    pub fn last_marker(&self) -> Option<Marker> {
        self.last().and_then(Message::marker)
    }

    /// True once the web search node has run in this run, whatever it found.
    pub fn web_search_attempted(&self) -> bool {
        self.web_search_attempted
    }

    pub(crate) fn mark_web_search(&mut self) {
        self.web_search_attempted = true;
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub(crate) fn record_rewrite(&mut self, rewritten: Option<String>) {
        self.retry_count += 1;
        self.rewritten_query = rewritten;
    }

    /// Latest reformulation of the question, if the rewriter produced one.
    pub fn rewritten_query(&self) -> Option<&str> {
        self.rewritten_query.as_deref()
    }

    pub fn grade(&self) -> Option<Grade> {
        self.grade
    }

    pub(crate) fn set_grade(&mut self, grade: Grade) {
        self.grade = Some(grade);
    }
}
