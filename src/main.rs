use log::{error, info};
use service::{config::Config, logging::Logger};

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to start logger: {e}");
    }

    info!("Starting up GRIP relay...");

    let publisher = match service::init_publisher(&config) {
        Ok(publisher) => publisher,
        Err(e) => {
            error!("Failed to initialize GRIP publisher: {e}");
            std::process::exit(1);
        }
    };

    let app_state = service::AppState::new(config, &publisher);

    if let Err(e) = web::init_server(app_state).await {
        error!("Error starting server: {e}");
        std::process::exit(1);
    }
}
