//! overlay-pad - Touchscreen controller overlay
//!
//! Main entry point for the front-end application.

use op_ui::app;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting overlay-pad");

    // Run the application
    app::run()
}
