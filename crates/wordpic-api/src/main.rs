use wordpic_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();
    wordpic_api::telemetry::init_telemetry();

    // Load configuration
    let config = Config::from_env()?;

    // Construct long-lived service handles and routes
    let state = wordpic_api::setup::build_state(&config).await?;
    let router = wordpic_api::setup::routes::setup_routes(&config, state)?;

    // Start the server
    wordpic_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
