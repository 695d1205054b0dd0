//! Document analyzer binary
//!
//! Run with: cargo run -p doc-analyzer -- serve

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use doc_analyzer::{
    analyzer::DocumentAnalyzer,
    config::AnalyzerConfig,
    ingestion::{DocumentLoader, TesseractOcr, TextChunker},
    providers::build_providers,
    server::AnalyzerServer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "doc-analyzer")]
#[command(about = "Ask questions, summarize and extract action items from documents", long_about = None)]
struct Cli {
    #[arg(short, long, global = true, help = "TOML configuration file")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Start the HTTP server and web UI")]
    Serve {
        #[arg(long, help = "Bind address (overrides config)")]
        host: Option<String>,

        #[arg(short, long, help = "Port (overrides config)")]
        port: Option<u16>,
    },

    #[command(about = "Load one document and run the requested analyses")]
    Analyze {
        #[arg(help = "Document to analyze (.txt, .pdf, .docx, .png, .jpg, .jpeg)")]
        file: PathBuf,

        #[arg(short, long, help = "Question to answer from the document")]
        question: Option<String>,

        #[arg(long, help = "Chunks retrieved as context (overrides config)")]
        top_k: Option<usize>,

        #[arg(long, help = "Summarize the document")]
        summarize: bool,

        #[arg(long, help = "Extract action items")]
        action_items: bool,

        #[arg(long, help = "Print the first N characters of extracted text")]
        preview: Option<usize>,
    },

    #[command(about = "Show how a document is chunked (no models needed)")]
    Chunk {
        #[arg(help = "Document to chunk")]
        file: PathBuf,

        #[arg(long, help = "Maximum characters per chunk (overrides config)")]
        max_chars: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_analyzer=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = AnalyzerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            tracing::info!("Configuration loaded");
            tracing::info!("  - Embeddings: {:?} ({} dims)", config.embeddings.backend, config.embeddings.dimensions);
            tracing::info!("  - LLM model: {}", config.llm.generate_model);
            tracing::info!("  - Chunk size: {} chars", config.chunking.max_chars);
            tracing::info!("  - OCR: {}", config.ocr.tesseract_path.display());

            let server = AnalyzerServer::new(config).await?;

            println!("\nServer starting...");
            println!("  UI:     http://{}", server.address());
            println!("  Health: http://{}/health", server.address());
            println!("  Info:   http://{}/api/info", server.address());
            println!("\nPress Ctrl+C to stop\n");

            server.start().await?;
        }

        Commands::Analyze {
            file,
            question,
            top_k,
            summarize,
            action_items,
            preview,
        } => {
            let ocr = TesseractOcr::new(&config.ocr);
            if let Err(e) = ocr.probe() {
                tracing::warn!("{}", e);
            }
            let (embedder, generator) = build_providers(&config).await?;
            let mut analyzer =
                DocumentAnalyzer::new(&config, DocumentLoader::with_ocr(ocr), embedder, generator)?;

            let summary = analyzer.load_path(&file).await?;
            println!(
                "{} ({}): {} characters, {} chunks",
                summary.filename, summary.file_type, summary.characters, summary.chunks
            );

            let nothing_requested = question.is_none() && !summarize && !action_items;
            if preview.is_some() || nothing_requested {
                let preview = analyzer.preview(preview)?;
                println!("\n--- Preview ({} chars) ---\n{}", preview.chars, preview.text);
            }

            if let Some(question) = question {
                let answer = analyzer.ask(&question, top_k).await?;
                println!("\n--- Answer ---\n{}", answer.answer);
                for source in &answer.sources {
                    println!("  [chunk {} | distance {:.4}]", source.index, source.distance);
                }
            }

            if summarize {
                println!("\n--- Summary ---\n{}", analyzer.summarize().await?);
            }

            if action_items {
                println!("\n--- Action Items ---\n{}", analyzer.extract_action_items().await?);
            }
        }

        Commands::Chunk { file, max_chars } => {
            let loader = Arc::new(DocumentLoader::from_config(&config.ocr));
            let chunker = TextChunker::new(max_chars.unwrap_or(config.chunking.max_chars))?;

            let doc = tokio::task::spawn_blocking(move || loader.load(&file)).await??;
            let chunks = chunker.chunk(&doc.text);

            println!(
                "{} ({}): {} characters, {} chunks of at most {} chars",
                doc.filename,
                doc.file_type,
                doc.text.chars().count(),
                chunks.len(),
                chunker.max_chars()
            );
            for chunk in &chunks {
                println!(
                    "\n[{}] bytes {}..{} ({} chars)\n{}",
                    chunk.index,
                    chunk.start,
                    chunk.end,
                    chunk.char_count(),
                    chunk.content
                );
            }
        }
    }

    Ok(())
}
