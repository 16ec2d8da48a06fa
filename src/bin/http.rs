#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use turma_schedule::{AppConfig, ScheduleRegistry, http_api, logging};

    let config = AppConfig::from_env()?;
    logging::init(config.log_verbosity);

    let calendar = config.load_calendar()?;
    tracing::info!(holidays = calendar.len(), "holiday calendar ready");

    println!("turma-schedule HTTP API listening on http://{}", config.http_addr);
    let registry = ScheduleRegistry::new(calendar);
    if let Err(err) = http_api::serve(config.http_addr, registry).await {
        if err.kind() == std::io::ErrorKind::AddrInUse {
            tracing::error!(addr = %config.http_addr, "address already in use, choose another port");
        } else {
            tracing::error!(%err, "failed to start server");
        }
        return Err(err.into());
    }
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
