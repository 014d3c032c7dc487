use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing::info;

use compose_language_server::logging::init_logger;
use compose_language_server::lsp::backend::ComposeBackend;

/// Language server for Docker Compose manifests and Dockerfiles,
/// speaking LSP over stdio.
#[derive(Debug, Parser)]
#[command(name = "compose-language-server", version)]
struct Args {
    /// Disable ANSI colors in stderr output
    #[arg(long)]
    no_color: bool,

    /// Override the stderr log level (otherwise RUST_LOG, defaulting to "info")
    #[arg(long)]
    log_level: Option<String>,

    /// Disable the DEBUG session log file in the user cache directory
    #[arg(long)]
    no_file_log: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = init_logger(args.no_color, args.log_level.as_deref(), !args.no_file_log)?;

    info!(
        "Starting compose-language-server {}",
        env!("CARGO_PKG_VERSION")
    );

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(ComposeBackend::new);
    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}
