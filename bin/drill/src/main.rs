use std::io;

use md_app::{DrillConfig, PracticeBook, SystemClock};
use md_store::FileStore;

mod ui;

fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = DrillConfig::from_env()?;

    let _log_guard = md_app::tracing::init_tracing(&config.env, config.log_dir.as_deref());
    let metrics_handle = md_app::metrics::init_metrics()?;

    let store = FileStore::open(&config.store_path)?;
    let mut book = PracticeBook::new(store, SystemClock, config.limits());
    tracing::info!(store = %config.store_path.display(), env = ?config.env, "drill started");

    let mut console = ui::Console::new(io::stdin().lock(), io::stdout());
    ui::run(&mut console, &mut book)?;

    if config.metrics_dump {
        println!("{}", metrics_handle.render());
    }

    Ok(())
}
