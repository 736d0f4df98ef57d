//! Server startup utilities.

use roster_config::AppConfig;
use tracing::info;

/// Logs where the server can be reached.
pub fn print_startup_info(config: &AppConfig) {
    let base = format!("http://{}", config.server.addr());
    let separator = "=".repeat(60);

    info!("{}", separator);
    info!("Employees: {}/employees", base);
    info!("Health:    {}/health", base);
    info!("API Docs:  {}/swagger-ui", base);
    if config.observability.metrics_enabled {
        info!("Metrics:   {}{}", base, config.observability.metrics_path);
    }
    info!("{}", separator);
}
