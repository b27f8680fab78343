use anyhow::Context;
use clap::Parser;
use lohas::FileDataSource;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "lohas-server", about = "Serves Lohas in Qingpu map data")]
struct Args {
    /// Directory holding categories.json and locations.json
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !args.data_dir.is_dir() {
        anyhow::bail!("data directory {} does not exist", args.data_dir.display());
    }

    let source = Arc::new(FileDataSource::new(args.data_dir.clone()));
    let app = lohas_server::build_router(source);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    log::info!(
        "serving {} on http://{}",
        args.data_dir.display(),
        args.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::warn!("failed to listen for shutdown signal: {}", e);
            }
        })
        .await
        .context("server error")?;

    Ok(())
}
