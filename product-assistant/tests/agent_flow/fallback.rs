//! Escalation to web search, rewrite ceiling and the no-information guard.

use std::sync::Arc;

use product_assistant::{AgentConfig, MockLlm, WebHit, DEFAULT_SESSION};

use crate::common::{
    agent, iphone_hit, phone_record, BrokenRetriever, CountingRetriever, FakeSearch,
    GRADER_NEEDLE, PRODUCT_BOT_NEEDLE, REWRITER_NEEDLE,
};

const IPHONE_QUERY: &str = "What is the price of iPhone 15?";

/// **Scenario**: Empty index plus a web hit with ₹64,900 gives a web-tagged answer carrying
/// the price.
#[tokio::test]
async fn empty_index_falls_back_to_web_price() {
    let llm = Arc::new(
        MockLlm::new("unused").with_rule(PRODUCT_BOT_NEEDLE, "The iPhone 15 (128 GB) costs ₹64,900."),
    );
    let search = FakeSearch::with_hits(vec![
        WebHit::new("iPhone 15 review", "A great phone with a good camera.", "https://blog.example/iphone"),
        iphone_hit(),
    ]);
    let a = agent(
        llm.clone(),
        CountingRetriever::empty(),
        Some(search.clone()),
        AgentConfig::default(),
    );

    let answer = a.run(IPHONE_QUERY, DEFAULT_SESSION).await.unwrap();

    assert!(answer.starts_with("[Source: Web Search]"), "{}", answer);
    assert!(answer.contains("₹64,900"), "{}", answer);
    assert_eq!(
        search.queries(),
        vec![format!("{} price in India", IPHONE_QUERY)]
    );
    assert_eq!(llm.calls_containing(GRADER_NEEDLE), 0);
    let prompt = &llm.prompts()[0];
    assert!(prompt.contains("Price: ₹64,900"));
    assert!(!prompt.contains("[Source: Web Search]"));
}

/// **Scenario**: No search credential and an empty index: the answer is exactly the
/// no-information message, and the model is never called.
#[tokio::test]
async fn no_credential_and_empty_index_gives_sentinel() {
    let llm = Arc::new(MockLlm::new("should not be used"));
    let a = agent(
        llm.clone(),
        CountingRetriever::empty(),
        None,
        AgentConfig::default(),
    );

    let answer = a.run(&format!("  {}  ", IPHONE_QUERY), DEFAULT_SESSION).await.unwrap();

    assert_eq!(
        answer,
        "No price information found online for What is the price of iPhone 15?."
    );
    assert!(llm.prompts().is_empty());
}

/// **Scenario**: A provider fault is treated like no result.
#[tokio::test]
async fn search_fault_gives_sentinel() {
    let a = agent(
        Arc::new(MockLlm::new("unused")),
        CountingRetriever::empty(),
        Some(FakeSearch::failing("HTTP 503")),
        AgentConfig::default(),
    );
    let answer = a.run(IPHONE_QUERY, DEFAULT_SESSION).await.unwrap();
    assert_eq!(
        answer,
        "No price information found online for What is the price of iPhone 15?."
    );
}

/// **Scenario**: Rejected context is rewritten once; web search uses the rewritten query.
#[tokio::test]
async fn rejected_context_rewrites_then_searches() {
    let llm = Arc::new(
        MockLlm::new("The iPhone 15 costs ₹64,900.")
            .with_rule(GRADER_NEEDLE, "no")
            .with_rule(REWRITER_NEEDLE, "  Apple iPhone 15 128GB price  "),
    );
    let search = FakeSearch::with_hits(vec![iphone_hit()]);
    let a = agent(
        llm.clone(),
        CountingRetriever::new(vec![phone_record()]),
        Some(search.clone()),
        AgentConfig::default(),
    );

    let answer = a.run(IPHONE_QUERY, "rewrite").await.unwrap();

    assert!(answer.starts_with("[Source: Web Search]"), "{}", answer);
    assert_eq!(search.queries(), vec!["Apple iPhone 15 128GB price price in India"]);
    let state = a.session_state("rewrite").await.unwrap().unwrap();
    assert_eq!(state.retry_count(), 1);
    assert_eq!(state.question(), IPHONE_QUERY);
}

/// **Scenario**: Rewrites never exceed the ceiling; at the ceiling grading is skipped and the
/// context goes straight to the generator.
#[tokio::test]
async fn rewrites_bounded_by_ceiling() {
    for ceiling in 0..=3u32 {
        let llm = Arc::new(
            MockLlm::new("Budget Phone A costs ₹9,999.")
                .with_rule(GRADER_NEEDLE, "no")
                .with_rule(REWRITER_NEEDLE, "budget phone A price"),
        );
        let a = agent(
            llm.clone(),
            CountingRetriever::new(vec![phone_record()]),
            Some(FakeSearch::with_hits(vec![iphone_hit()])),
            AgentConfig::default().with_rewrite_ceiling(ceiling),
        );

        let answer = a.run("price of Budget Phone A", "ceiling").await.unwrap();
        assert!(!answer.is_empty());

        let state = a.session_state("ceiling").await.unwrap().unwrap();
        assert!(state.retry_count() <= ceiling, "ceiling {}", ceiling);
        assert_eq!(llm.calls_containing(REWRITER_NEEDLE) as u32, state.retry_count());
        if ceiling == 0 {
            assert_eq!(llm.calls_containing(GRADER_NEEDLE), 0);
            assert!(answer.starts_with("[Source: Database]"), "{}", answer);
        }
    }
}

/// **Scenario**: An apologetic answer from database context escalates to web search once.
#[tokio::test]
async fn apologetic_answer_escalates_to_web() {
    let llm = Arc::new(
        MockLlm::new("I am sorry, I cannot provide that.")
            .with_rule(GRADER_NEEDLE, "yes")
            .with_rule("Details:", "It is listed at ₹64,900."),
    );
    let search = FakeSearch::with_hits(vec![iphone_hit()]);
    let a = agent(
        llm.clone(),
        CountingRetriever::new(vec![phone_record()]),
        Some(search.clone()),
        AgentConfig::default(),
    );

    let answer = a.run(IPHONE_QUERY, DEFAULT_SESSION).await.unwrap();

    assert_eq!(answer, "[Source: Web Search]\nIt is listed at ₹64,900.");
    assert_eq!(search.queries().len(), 1);
    assert_eq!(llm.calls_containing(PRODUCT_BOT_NEEDLE), 2);
}

/// **Scenario**: An apology after web search is returned rather than looping.
#[tokio::test]
async fn apology_after_web_search_ends() {
    let llm = Arc::new(MockLlm::new("I am sorry, the price is not included."));
    let search = FakeSearch::with_hits(vec![iphone_hit()]);
    let a = agent(
        llm,
        CountingRetriever::empty(),
        Some(search.clone()),
        AgentConfig::default(),
    );

    let answer = a.run(IPHONE_QUERY, DEFAULT_SESSION).await.unwrap();

    assert!(answer.contains("I am sorry"), "{}", answer);
    assert_eq!(search.queries().len(), 1);
}

/// **Scenario**: An answer that only repeats the question is replaced by the no-information
/// message.
#[tokio::test]
async fn echoed_answer_is_replaced() {
    let llm = Arc::new(MockLlm::new("What is the price of iPhone 15"));
    let a = agent(
        llm,
        CountingRetriever::empty(),
        Some(FakeSearch::with_hits(vec![iphone_hit()])),
        AgentConfig::default(),
    );

    let answer = a.run(IPHONE_QUERY, DEFAULT_SESSION).await.unwrap();

    assert_eq!(
        answer,
        "No price information found online for What is the price of iPhone 15?."
    );
}

/// **Scenario**: A failing index escalates to web search instead of failing the run.
#[tokio::test]
async fn retriever_fault_uses_web() {
    let llm = Arc::new(MockLlm::new("It costs ₹64,900."));
    let a = agent(
        llm,
        Arc::new(BrokenRetriever),
        Some(FakeSearch::with_hits(vec![iphone_hit()])),
        AgentConfig::default(),
    );

    let answer = a.run(IPHONE_QUERY, DEFAULT_SESSION).await.unwrap();

    assert_eq!(answer, "[Source: Web Search]\nIt costs ₹64,900.");
}
