use clap::Parser;
use inference_proxy::{api, AppState, InitStrategy, ReadinessState, RemoteConfig};
use tokio::signal;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Inference Proxy - thin HTTP front for a remote prediction endpoint
#[derive(Parser, Debug)]
#[command(name = "inference-proxy")]
#[command(about = "HTTP proxy in front of a remote inference endpoint")]
#[command(version)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = inference_proxy::config::DEFAULT_PORT)]
    port: u16,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// When to construct the remote client
    #[arg(long, value_enum, default_value = "background")]
    init_strategy: InitStrategy,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = match cli.log_level.as_deref() {
        Some("trace") => Level::TRACE,
        Some("debug") => Level::DEBUG,
        Some("warn") => Level::WARN,
        Some("error") => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting inference proxy");

    let state = AppState::new(RemoteConfig::default(), cli.init_strategy);

    match cli.init_strategy {
        InitStrategy::Eager => {
            // Block startup on client construction; a failure is logged
            // and surfaced via /ready, the server still comes up.
            info!("Initializing remote client before accepting traffic");
            if let ReadinessState::Failed(reason) = state.readiness.initialize().await {
                warn!(error = %reason, "Serving without a usable backend");
            }
        }
        InitStrategy::Background => {
            info!("Starting remote client initialization in the background");
            state.readiness.clone().begin_initialization();
        }
        InitStrategy::Lazy => {
            info!("Remote client will initialize on the first predict request");
        }
    }

    let app = api::create_router(state);

    let addr = format!("0.0.0.0:{}", cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Inference proxy listening");

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Inference proxy shut down");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            // Sleep forever since we can't listen for signals
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                // Sleep forever since we can't listen for signals
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }
}
