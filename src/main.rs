use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tutor_core::{ChatReply, ChatService, Config};
use tutor_knowledge::{CourseContent, KnowledgeStore};
use tutor_llm::Message;
use tutor_llm::openai::OpenAiProvider;

#[derive(Debug, Parser)]
#[command(name = "tutor", version, about = "Course knowledge-base search and support chat")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, env = "TUTOR_CONFIG", default_value = "config/default.toml")]
    config: PathBuf,

    /// Course content JSON; overrides `knowledge.course_path`.
    #[arg(long)]
    course: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank knowledge base chunks for a query.
    Search {
        query: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Print each chunk's relevance score.
        #[arg(long)]
        scores: bool,
    },
    /// Ask a single question.
    Ask {
        message: String,
        /// Print the full reply as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Interactive support chat; history lives for the session only.
    Chat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    let course_path = cli
        .course
        .unwrap_or_else(|| PathBuf::from(&config.knowledge.course_path));
    let store = Arc::new(load_store(&course_path, &config)?);

    match cli.command {
        Command::Search {
            query,
            limit,
            scores,
        } => {
            run_search(&store, &query, limit, scores);
            Ok(())
        }
        Command::Ask { message, json } => {
            let service = create_service(&config, store)?;
            let reply = service.respond(&message, &[]).await;
            print_reply(&reply, json)
        }
        Command::Chat => {
            let service = create_service(&config, store)?;
            run_chat(&service).await
        }
    }
}

fn init_subscriber() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_store(path: &Path, config: &Config) -> anyhow::Result<KnowledgeStore> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read course content {}", path.display()))?;
    let content = CourseContent::from_json(&json).context("failed to parse course content")?;
    let store = KnowledgeStore::build(&content)
        .context("failed to build knowledge store")?
        .with_weights(config.search);
    tracing::info!(chunks = store.len(), path = %path.display(), "knowledge base ready");
    Ok(store)
}

fn create_service(
    config: &Config,
    store: Arc<KnowledgeStore>,
) -> anyhow::Result<ChatService<OpenAiProvider>> {
    config.validate()?;
    let api_key = config
        .secrets
        .api_key
        .as_ref()
        .map(|s| s.expose().to_owned())
        .context("TUTOR_LLM_API_KEY not set")?;

    let provider = OpenAiProvider::new(
        api_key,
        config.llm.base_url.clone(),
        config.llm.model.clone(),
        config.llm.max_tokens,
    )
    .with_timeout(config.chat.timeout());
    tracing::info!(model = provider.model(), "completion provider configured");

    Ok(ChatService::new(store, Arc::new(provider), config.chat.clone()))
}

fn run_search(store: &KnowledgeStore, query: &str, limit: usize, scores: bool) {
    let hits = store.search_scored(query, limit);
    if hits.is_empty() {
        println!("No matching chunks.");
        return;
    }
    for hit in hits {
        if scores {
            println!(
                "[{}] {} ({}) score={}",
                hit.chunk.category, hit.chunk.source, hit.chunk.id, hit.score
            );
        } else {
            println!(
                "[{}] {} ({})",
                hit.chunk.category, hit.chunk.source, hit.chunk.id
            );
        }
    }
}

fn print_reply(reply: &ChatReply, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reply)?);
    } else {
        println!("{}", reply.answer);
        if !reply.context_used.is_empty() {
            println!("\nSources: {}", reply.context_used.join("; "));
        }
    }
    Ok(())
}

async fn run_chat(service: &ChatService<OpenAiProvider>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut history: Vec<Message> = Vec::new();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if matches!(message, "exit" | "quit") {
            break;
        }

        let reply = service.respond(message, &history).await;
        print_reply(&reply, false)?;
        println!();

        history.push(Message::user(message));
        history.push(Message::assistant(reply.answer));
    }

    Ok(())
}
