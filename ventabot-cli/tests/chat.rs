use async_trait::async_trait;
use ventabot_cli::catalog::sales_catalog;
use ventabot_cli::chat::{ChatSession, Reply};
use ventabot_core::LlmError;
use ventabot_rag::{ChainError, Responder};

/// Fails the test if the chain is ever consulted.
struct PanickingResponder;

#[async_trait]
impl Responder for PanickingResponder {
    async fn respond(&self, question: &str) -> Result<String, ChainError> {
        panic!("responder must not be invoked for {question:?}");
    }
}

struct EchoResponder;

#[async_trait]
impl Responder for EchoResponder {
    async fn respond(&self, question: &str) -> Result<String, ChainError> {
        Ok(format!("echo: {question}"))
    }
}

struct RateLimitedResponder;

#[async_trait]
impl Responder for RateLimitedResponder {
    async fn respond(&self, _question: &str) -> Result<String, ChainError> {
        Err(ChainError::from(LlmError::RateLimited { retry_after: None }))
    }
}

struct BrokenResponder;

#[async_trait]
impl Responder for BrokenResponder {
    async fn respond(&self, _question: &str) -> Result<String, ChainError> {
        Err(ChainError::from(LlmError::Provider(
            "upstream down".to_string(),
        )))
    }
}

#[tokio::test]
async fn farewell_keywords_end_the_session_without_the_responder() {
    let session = ChatSession::new(sales_catalog(), PanickingResponder);

    for line in ["salir", "exit", "quit", "EXIT", "Quit", "  salir  "] {
        assert_eq!(session.handle(line).await.unwrap(), Reply::Farewell);
    }
}

#[tokio::test]
async fn blank_lines_reprompt_without_answering() {
    let session = ChatSession::new(sales_catalog(), PanickingResponder);

    assert_eq!(session.handle("").await.unwrap(), Reply::Empty);
    assert_eq!(session.handle("   ").await.unwrap(), Reply::Empty);
}

#[tokio::test]
async fn least_sales_question_is_answered_locally() {
    let session = ChatSession::new(sales_catalog(), PanickingResponder);

    let reply = session.handle("which had the least sales?").await.unwrap();
    assert_eq!(
        reply,
        Reply::Local("The product with the least sales was Hats, with 30 units sold.".to_string())
    );
}

#[tokio::test]
async fn most_sales_question_is_answered_locally() {
    let session = ChatSession::new(sales_catalog(), PanickingResponder);

    let reply = session
        .handle("which product had the most sales?")
        .await
        .unwrap();
    assert_eq!(
        reply,
        Reply::Local("The product with the most sales was Shoes, with 120 units sold.".to_string())
    );
}

#[tokio::test]
async fn unmatched_questions_reach_the_responder() {
    let session = ChatSession::new(sales_catalog(), EchoResponder);

    let reply = session.handle("what is the weather").await.unwrap();
    assert_eq!(reply, Reply::Remote("echo: what is the weather".to_string()));
}

#[tokio::test]
async fn rate_limited_responder_keeps_the_session_alive() {
    let session = ChatSession::new(sales_catalog(), RateLimitedResponder);

    let reply = session.handle("what is the weather").await.unwrap();
    assert_eq!(reply, Reply::RateLimited);

    // the session is still usable afterwards
    let reply = session.handle("which had the least sales?").await.unwrap();
    assert!(matches!(reply, Reply::Local(_)));
}

#[tokio::test]
async fn other_responder_failures_surface_as_errors() {
    let session = ChatSession::new(sales_catalog(), BrokenResponder);

    let err = session.handle("what is the weather").await.unwrap_err();
    assert!(!err.is_rate_limited());
    assert!(matches!(err, ChainError::Llm(LlmError::Provider(_))));
}
