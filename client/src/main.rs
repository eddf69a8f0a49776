use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use invoice_client::{ChatService, ClientConfig, DocumentProcessor, PdfExtractParser, QueryService};

/// Extract the text of a PDF and ask a local chat model about it.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// PDF files to process, one after another.
    files: Vec<PathBuf>,

    /// Chat-completion endpoint (defaults to CHAT_ENDPOINT or the local proxy).
    #[arg(long)]
    endpoint: Option<String>,

    /// Model identifier sent with the request.
    #[arg(long)]
    model: Option<String>,

    /// Sampling temperature.
    #[arg(long)]
    temperature: Option<f32>,

    /// Instruction placed in front of the extracted text.
    #[arg(long)]
    prompt_prefix: Option<String>,
}

fn load_config(args: &Args) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("Failed to load client configuration")?;
    if let Some(endpoint) = &args.endpoint {
        config = config.with_endpoint(endpoint)?;
    }
    if let Some(model) = &args.model {
        config = config.with_model(model.clone());
    }
    if let Some(prefix) = &args.prompt_prefix {
        config = config.with_prompt_prefix(prefix.clone());
    }
    if let Some(temperature) = args.temperature {
        config = config.with_temperature(temperature)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    log::info!("Using chat endpoint {}", config.endpoint);

    let document_processor = DocumentProcessor::new(Arc::new(PdfExtractParser));
    let chat_service = Arc::new(ChatService::new(config));
    let query_service = QueryService::new(document_processor, chat_service);

    let all_ok = query_service
        .run_files(&args.files, &mut std::io::stdout())
        .await
        .context("Failed to write output")?;

    Ok(if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
