use std::sync::Arc;

use anyhow::Result;
use reliefai::api::AppState;
use reliefai::models::UserQuery;
use reliefai::{Assistant, ReliefAiConfig, ReliefAiError, web};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match ReliefAiConfig::load() {
        Ok(config) => config,
        Err(e) => {
            if let Some(relief) = e.downcast_ref::<ReliefAiError>() {
                eprintln!("{}", relief.user_message());
            }
            return Err(e);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    if config.logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let assistant = Assistant::new(&config)?;

    // With arguments, answer one typed question and exit; otherwise
    // serve the JSON API for the frontend.
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        let state = Arc::new(AppState { assistant });
        web::run(config.server.port, state).await
    } else {
        let question = args.join(" ");
        let language = config.default_language()?;
        let interaction = assistant.interact(UserQuery::typed(question), language).await;

        println!(
            "Detected location: {} ({})",
            interaction.city,
            interaction.position.format()
        );
        println!("{}", interaction.advisory.body);
        Ok(())
    }
}
