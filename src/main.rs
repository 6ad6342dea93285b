use anyhow::Context;
use clap::Parser;
use resrec::{load_predictor, ApiConfig, AppState, Catalog, RestApi};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Restaurant popularity prediction service
#[derive(Parser, Debug)]
#[command(name = "resrec")]
#[command(about = "Restaurant popularity predictions and recommendations", long_about = None)]
struct Args {
    /// Path to the model bundle (fitted encoder + model)
    #[arg(short, long, default_value = "./model.json")]
    artifact: PathBuf,

    /// Path to the restaurant dataset (CSV)
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// HTTP API port
    #[arg(long, default_value_t = 8080)]
    http_port: u16,

    /// Restaurants returned per recommendation
    #[arg(long, default_value_t = resrec_catalog::DEFAULT_LIMIT)]
    recommend_limit: usize,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting resrec v{}", env!("CARGO_PKG_VERSION"));
    info!("Model bundle: {:?}", args.artifact);

    // A vocabulary or schema error here means the bundle is corrupt or mismatched.
    let predictor = load_predictor(&args.artifact)
        .with_context(|| format!("cannot serve predictions from {:?}", args.artifact))?;

    let catalog = match &args.dataset {
        Some(path) => {
            info!("Restaurant dataset: {:?}", path);
            Some(Catalog::from_path(path)?)
        }
        None => {
            info!("No restaurant dataset, recommendations disabled");
            None
        }
    };

    let config = ApiConfig {
        host: args.host.clone(),
        port: args.http_port,
        recommend_limit: args.recommend_limit,
    };
    let state = Arc::new(AppState::new(predictor, catalog, config));

    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("resrec started successfully");
    info!("HTTP API: http://{}:{}/", args.host, args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
