use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::Config;

const HEALTH_POLL_ATTEMPTS: usize = 20;
const HEALTH_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Waits for `/health` to answer, then opens the UI in the default browser.
/// Development mode only; every failure is logged and ignored. Returns the
/// background task when one was started.
pub fn spawn_ui_launcher(config: &Config) -> Option<JoinHandle<()>> {
    if !config.is_development() {
        log::info!("Skipping browser launch ({} mode)", config.app_env);
        return None;
    }

    let health_url = config.health_url();
    let ui_url = config.ui_url();
    Some(tokio::spawn(async move {
        if wait_until_healthy(&health_url).await {
            log::info!("Server is ready at {}", ui_url);
        } else {
            log::warn!("Server did not report healthy at {}; opening UI anyway", health_url);
        }
        open_browser(&ui_url);
    }))
}

async fn wait_until_healthy(health_url: &str) -> bool {
    let client = match reqwest::Client::builder()
        .timeout(HEALTH_POLL_INTERVAL)
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            log::debug!("Could not build health check client: {}", e);
            return false;
        }
    };

    for _ in 0..HEALTH_POLL_ATTEMPTS {
        match client.get(health_url).send().await {
            Ok(response) if response.status().is_success() => return true,
            Ok(response) => log::debug!("Health check returned {}", response.status()),
            Err(e) => log::debug!("Health check not ready yet: {}", e),
        }
        tokio::time::sleep(HEALTH_POLL_INTERVAL).await;
    }
    false
}

fn browser_command() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    }
}

fn open_browser(url: &str) {
    log::info!("Opening browser at {}", url);
    if let Err(e) = std::process::Command::new(browser_command()).arg(url).spawn() {
        log::debug!("Could not open browser: {}", e);
    }
}
