mod bootstrap;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use dashboard_core::settings::Settings;
use dashboard_runtime::data_manager::DataManager;
use dashboard_runtime::views::MenuOption;
use dashboard_ui::app::App;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    let app_dir = bootstrap::ensure_directories()?;
    let log_file = settings
        .log_file
        .clone()
        .unwrap_or_else(|| bootstrap::default_log_file(&app_dir));
    bootstrap::setup_logging(&settings.log_level, &log_file)?;

    tracing::info!("Bike Sharing Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data: {}, Menu: {}, Theme: {}",
        settings.data_dir.display(),
        settings.menu,
        settings.theme
    );

    let selected = MenuOption::from_key(&settings.menu)?;
    settings.validate()?;

    // Both files are read once up front; any failure ends the program before
    // the terminal is taken over.
    let manager = match DataManager::load(&settings.day_path(), &settings.hour_path()) {
        Ok(m) => m,
        Err(e) => {
            tracing::error!(error = %e, "could not load dataset");
            return Err(e).with_context(|| {
                format!(
                    "could not load the bike sharing dataset from {}",
                    settings.data_dir.display()
                )
            });
        }
    };

    let dashboard = App::new(&settings.theme, manager, selected);
    let shutdown = Arc::new(AtomicBool::new(false));

    // The event loop blocks; keep it off the runtime thread.
    let mut ui = tokio::task::spawn_blocking({
        let shutdown = Arc::clone(&shutdown);
        move || dashboard.run(&shutdown)
    });

    tokio::select! {
        joined = &mut ui => {
            joined.context("dashboard task failed")?.context("terminal error")?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received; shutting down");
            shutdown.store(true, Ordering::Relaxed);
            ui.await
                .context("dashboard task failed")?
                .context("terminal error")?;
        }
    }

    tracing::info!("Bike Sharing Dashboard exiting");
    Ok(())
}
