use axum::Router;
use reqwest::Client;

use crate::Config;

mod conditions;
mod health;

// ---

pub fn router(client: Client, config: Config) -> Router {
    // ---
    Router::new()
        .merge(conditions::router())
        .merge(health::router())
        .with_state((client, config))
}
