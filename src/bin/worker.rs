use analytics_backend::{
    config::Config,
    db::create_pool,
    init_tracing,
    jobs::{ExportWorker, Mailer, RedisExportQueue},
};
use clap::{Arg, ArgAction, Command};
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("analytics-worker")
        .about("Processes queued analytics exports and e-mails the CSV")
        .arg(
            Arg::new("once")
                .long("once")
                .help("Drain the queue and exit instead of polling")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let config = Config::from_env()?;
    init_tracing(&config.logging());

    let pool = create_pool(&config.database())?;
    let export = config.export();
    let redis = redis::Client::open(config.redis_url.as_str())?;
    let queue = RedisExportQueue::new(redis, export.queue_key);
    let worker = ExportWorker::new(pool, queue, Mailer::new(config.email()));

    if matches.get_flag("once") {
        let taken = worker.drain().await?;
        info!(jobs = taken, "Export queue drained");
        return Ok(());
    }

    worker
        .run(Duration::from_millis(export.poll_interval_ms))
        .await;
    Ok(())
}
