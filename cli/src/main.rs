use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use search_core::corpus::load_documents;
use search_core::{DocId, DocumentStatus, SearchServer};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Query a TF-IDF index built from JSON/JSONL documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Input path (file or directory)
    #[arg(long)]
    input: String,
    /// Space-separated stop words
    #[arg(long, default_value = "")]
    stop_words: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the top documents for a query
    Query {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Query text; prefix a word with '-' to exclude documents containing it
        #[arg(long, allow_hyphen_values = true)]
        query: String,
        /// Only return documents with this status
        #[arg(long, default_value_t = DocumentStatus::Actual)]
        status: DocumentStatus,
    },
    /// Print the matched query words for every document
    Match {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[arg(long, allow_hyphen_values = true)]
        query: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Query { corpus, query, status } => {
            let server = build_server(&corpus)?;
            run_query(&server, &query, status)
        }
        Commands::Match { corpus, query } => {
            let server = build_server(&corpus)?;
            run_match(&server, &query)
        }
    }
}

fn build_server(args: &CorpusArgs) -> Result<SearchServer> {
    let mut server =
        SearchServer::with_stop_words_text(&args.stop_words).context("invalid stop words")?;
    let docs = load_documents(&args.input)?;
    let total = docs.len();
    let accepted = server.add_documents(docs);
    tracing::info!(total, accepted, input = %args.input, "indexed documents");
    Ok(server)
}

fn run_query(server: &SearchServer, query: &str, status: DocumentStatus) -> Result<()> {
    println!("Search results for: {query}");
    let found = server
        .find_top_documents_with_status(query, status)
        .with_context(|| format!("search failed for query {query:?}"))?;
    for doc in found {
        println!("{doc}");
    }
    Ok(())
}

fn run_match(server: &SearchServer, query: &str) -> Result<()> {
    println!("Matching documents for: {query}");
    for document_id in server.document_ids() {
        let (words, status) = server
            .match_document(query, document_id)
            .with_context(|| format!("matching failed for query {query:?}"))?;
        println!("{}", format_match(document_id, &words, status));
    }
    Ok(())
}

fn format_match(document_id: DocId, words: &[String], status: DocumentStatus) -> String {
    format!("{{ document_id = {document_id}, status = {status}, words = {} }}", words.join(" "))
}
