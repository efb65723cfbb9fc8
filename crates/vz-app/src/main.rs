use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use vz_app::{AppConfig, ChromaClient, Orchestrator, SelectedFile, TerminalView, UiState};

/// Turn a photo into vector art with the remote image-effects service.
#[derive(Debug, Parser)]
#[command(name = "vectorize", version)]
struct Cli {
    /// Image to upload
    input: PathBuf,

    /// Directory the result is saved into
    #[arg(long, default_value = "outputs")]
    out_dir: PathBuf,

    /// Stop after the result URL is known
    #[arg(long)]
    no_download: bool,

    /// Overrides VECTORIZE_USER_ID
    #[arg(long)]
    user_id: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(user_id) = cli.user_id {
        config.user_id = user_id;
    }

    let client = ChromaClient::new(&config)?;
    let orchestrator = Arc::new(Orchestrator::new(
        client,
        TerminalView::default(),
        config.user_id.clone(),
        config.effect,
    ));

    let file = SelectedFile::read(&cli.input).await?;

    let mut flow = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move {
            orchestrator.handle_file_select(file).await;
            if orchestrator.state() == UiState::Ready {
                orchestrator.handle_generate().await;
            }
        })
    };

    tokio::select! {
        joined = &mut flow => joined?,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, resetting session");
            orchestrator.reset();
            flow.await?;
        }
    }

    match orchestrator.state() {
        UiState::Complete if !cli.no_download => {
            orchestrator.download(&cli.out_dir).await;
        }
        UiState::Error { message } => anyhow::bail!(message),
        _ => {}
    }

    Ok(())
}
