use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "server", version, about = "Account REST API service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Drop and recreate every table
    DbCreate,
}

async fn db_create(cfg: &configs::AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::fresh(&db).await?;
    info!(service = "server", event = "db_create", "tables dropped and recreated");
    Ok(())
}

fn main() -> std::process::ExitCode {
    // 提前加载 .env，使得 RUST_LOG 等环境变量生效
    dotenv().ok();
    let cli = Cli::parse();

    let cfg = configs::AppConfig::load_or_env();
    let log_format = cfg.as_ref().map(|c| c.logging.format.as_str()).unwrap_or("compact");
    common::utils::logging::init_logging(log_format);
    info!(service = "server", event = "logger_init", format = log_format, "tracing subscriber initialized");

    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "server", event = "config_invalid", error = %e, "cannot load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "server",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "server", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    let command = cli.command.unwrap_or(Command::Serve);
    info!(
        service = "server",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        command = ?command,
        "account service starting"
    );

    let result = rt.block_on(async move {
        match command {
            Command::Serve => server::run(cfg).await,
            Command::DbCreate => db_create(&cfg).await,
        }
    });

    match result {
        Ok(()) => {
            info!(service = "server", event = "stop", %service_id, pid, "stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "server", event = "run_failed", %service_id, error = %e, "account service exited with error");
            std::process::ExitCode::FAILURE
        }
    }
}
