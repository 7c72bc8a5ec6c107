use std::process::ExitCode;
use std::sync::Arc;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ventabot_cli::catalog::{self, Catalog};
use ventabot_cli::chat::{ChatSession, Reply};
use ventabot_cli::config::AppConfig;
use ventabot_openai::{OpenAiChat, OpenAiEmbedding};
use ventabot_rag::RetrievalQa;
use ventabot_retrieval::{InMemoryVectorStore, Indexer, Retriever};

const BANNER: &str =
    "Sales catalog assistant. Ask about product sales; type 'salir', 'exit' or 'quit' to leave.";
const PROMPT: &str = "You: ";
const FAREWELL: &str = "Goodbye!";
const RATE_LIMIT_WARNING: &str = "Rate limit reached. Wait a moment and ask again.";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // a .env file is optional
    let _ = dotenvy::dotenv();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ventabot: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!(config = ?config, "loaded configuration");

    let catalog = catalog::sales_catalog();
    let session = build_session(&config, catalog).await?;

    println!("{BANNER}");
    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                match session.handle(&line).await? {
                    Reply::Farewell => {
                        println!("{FAREWELL}");
                        return Ok(());
                    }
                    Reply::Empty => {}
                    Reply::Local(answer) | Reply::Remote(answer) => println!("Bot: {answer}"),
                    Reply::RateLimited => println!("{RATE_LIMIT_WARNING}"),
                }
            }
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => {
                println!("{FAREWELL}");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Builds the full pipeline: embed and index the catalog, then wire the
/// retrieval chain behind a chat session. Any failure here is fatal.
async fn build_session(
    config: &AppConfig,
    catalog: Catalog,
) -> Result<ChatSession, Box<dyn std::error::Error>> {
    let mut embedder = OpenAiEmbedding::new(
        config.api_key.clone(),
        config.embedding_model.clone(),
        config.embedding_dimension,
    )?;
    let mut chat = OpenAiChat::new(config.api_key.clone(), config.chat_model.clone())?;
    if let Some(base_url) = &config.base_url {
        embedder = embedder.with_base_url(base_url.clone());
        chat = chat.with_base_url(base_url.clone());
    }

    let embedder = Arc::new(embedder);
    let store = Arc::new(InMemoryVectorStore::new());

    let documents = catalog.to_documents();
    let count = documents.len();
    Indexer::new(embedder.clone(), store.clone())
        .add_documents(documents)
        .await?;
    tracing::info!(count, model = %config.embedding_model, "catalog indexed");

    let retriever = Retriever::new(embedder, store, config.top_k);
    let chain = RetrievalQa::builder()
        .retriever(retriever)
        .llm(chat)
        .build()?;

    Ok(ChatSession::new(catalog, chain))
}
