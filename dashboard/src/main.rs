//! Dashboard entry point.

use std::sync::Arc;

use dashboard::ui::theme::Theme;
use dashboard::App;
use lib_evm::JsonRpcProvider;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dashboard::debug::init();

    let config = match lib_core::config::init_config() {
        Ok(config) => config.clone(),
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            eprintln!("{}", e.user_message());
            return Err(e.into());
        }
    };

    // egui runs on this thread; chain tasks run on the Tokio workers
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let provider = Arc::new(JsonRpcProvider::from_config(&config)?);
    tracing::info!(rpc_url = %config.rpc_url, "Starting dashboard");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Wind Farm Insurance")
            .with_inner_size([1200.0, 860.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Wind Farm Insurance",
        options,
        Box::new(move |cc| {
            Theme::default().apply(&cc.egui_ctx);
            Ok(Box::new(App::new(config, provider)))
        }),
    )?;

    Ok(())
}
