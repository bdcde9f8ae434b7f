use env_logger::Env;
use groupboard_store::{config::Config, db::Db, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Info by default, overridable through RUST_LOG
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cfg = Config::load()?;
    let db = Db::connect_and_migrate(&cfg.database_path).await?;

    let report = seed::run(&db).await?;
    log::info!(
        "seeding finished: {} created, {} skipped",
        report.created,
        report.skipped
    );
    Ok(())
}
