use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers::{self, AppState};
use crate::store::DataStore;

pub fn create_router<S: DataStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Catalog metadata
        .route("/meta", get(handlers::get_meta::<S>))
        // Builds
        .route("/builds", get(handlers::list_builds::<S>))
        .route(
            "/builds/:product_id/:build_id",
            get(handlers::get_build::<S>),
        )
        .route("/build/:product_id", post(handlers::post_build::<S>))
        // Deployments. The three-segment route is shared between methods and
        // its segments are read positionally: GET treats them as
        // environment/product/build, POST as product/build/environment.
        .route(
            "/deployments/:environment_id/:product_id",
            get(handlers::list_deployments::<S>),
        )
        .route(
            "/deployments/:environment_id/:product_id/:build_id",
            get(handlers::get_deployment::<S>).post(handlers::post_deployment::<S>),
        )
}
