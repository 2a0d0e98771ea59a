use eventmap::backend::api::HttpDashboardApi;
use eventmap::config::env_loader::load_config;
use eventmap::dashboard::controller::{DashboardController, DashboardSettings};
use eventmap::dashboard::log_view::LogView;
use eventmap::tracing::setup_loki;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let loki = setup_loki().await;

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let profile: &'static str = config.profile.into();
    info!("Starting with the '{}' profile against {}", profile, config.api_url);

    let api = HttpDashboardApi::new(&config.api_url, config.max_retries);
    let settings = DashboardSettings {
        startup_description: config.startup_description,
        ..DashboardSettings::new(config.profile)
    };
    let controller = DashboardController::new(api, LogView::default(), settings);

    let outcome = controller.init().await;

    controller
        .displayed_events()
        .await
        .iter()
        .for_each(|(marker, event)| info!("{}: {} ({})", marker, event.name, event.location));

    info!("First fetch: {:?}. Panel: {}", outcome, controller.panel().await);

    if let Some((controller, handle)) = loki {
        controller.shutdown().await;
        let _ = handle.await;
    }

    ExitCode::SUCCESS
}
