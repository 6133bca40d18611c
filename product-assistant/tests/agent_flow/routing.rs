//! Keyword routing and direct answers.

use std::sync::Arc;

use product_assistant::{AgentConfig, MockLlm, DEFAULT_SESSION};

use crate::common::{
    agent, iphone_hit, phone_record, CountingRetriever, FakeSearch, DIRECT_NEEDLE, GRADER_NEEDLE,
};

/// **Scenario**: Every query with a product keyword goes through the retriever, with the
/// original query.
#[tokio::test]
async fn keyword_queries_use_retriever() {
    for query in [
        "What is the price of Budget Phone A?",
        "Show me REVIEWS of Budget Phone A",
        "Which product has the best battery?",
    ] {
        let llm = Arc::new(MockLlm::new("Budget Phone A is a good pick.").with_rule(GRADER_NEEDLE, "yes"));
        let retriever = CountingRetriever::new(vec![phone_record()]);
        let a = agent(llm.clone(), retriever.clone(), None, AgentConfig::default());

        let answer = a.run(query, DEFAULT_SESSION).await.unwrap();

        assert_eq!(retriever.calls(), 1, "query: {}", query);
        assert_eq!(retriever.queries(), vec![query.to_string()]);
        assert_eq!(llm.calls_containing(DIRECT_NEEDLE), 0, "query: {}", query);
        assert!(answer.starts_with("[Source: Database]"), "{}", answer);
    }
}

/// **Scenario**: "What is the capital of France?" is answered directly; neither the
/// retriever nor web search is touched.
#[tokio::test]
async fn non_product_query_answered_directly() {
    let llm = Arc::new(MockLlm::new("The capital of France is Paris."));
    let retriever = CountingRetriever::new(vec![phone_record()]);
    let search = FakeSearch::with_hits(vec![iphone_hit()]);
    let a = agent(
        llm.clone(),
        retriever.clone(),
        Some(search.clone()),
        AgentConfig::default(),
    );

    let answer = a
        .run("What is the capital of France?", DEFAULT_SESSION)
        .await
        .unwrap();

    assert_eq!(answer, "The capital of France is Paris.");
    assert_eq!(retriever.calls(), 0);
    assert!(search.queries().is_empty());
    assert_eq!(llm.prompts().len(), 1);
    assert_eq!(llm.calls_containing(DIRECT_NEEDLE), 1);
}

/// **Scenario**: Relevant index records are graded once and answered from the database.
#[tokio::test]
async fn relevant_records_answered_from_database() {
    let llm = Arc::new(
        MockLlm::new("Budget Phone A costs ₹9,999 and is rated 4.2.")
            .with_rule(GRADER_NEEDLE, "Yes."),
    );
    let search = FakeSearch::with_hits(vec![iphone_hit()]);
    let a = agent(
        llm.clone(),
        CountingRetriever::new(vec![phone_record()]),
        Some(search.clone()),
        AgentConfig::default(),
    );

    let answer = a
        .run("What is the price of Budget Phone A?", DEFAULT_SESSION)
        .await
        .unwrap();

    assert_eq!(
        answer,
        "[Source: Database]\nBudget Phone A costs ₹9,999 and is rated 4.2."
    );
    assert_eq!(llm.calls_containing(GRADER_NEEDLE), 1);
    assert!(search.queries().is_empty());
}

/// **Scenario**: A model fault on the direct path still returns text.
#[tokio::test]
async fn direct_answer_fault_returns_text() {
    let a = agent(
        Arc::new(MockLlm::failing()),
        CountingRetriever::empty(),
        None,
        AgentConfig::default(),
    );
    let answer = a.run("Tell me a joke", DEFAULT_SESSION).await.unwrap();
    assert!(answer.starts_with("Direct answer failed:"), "{}", answer);
}
