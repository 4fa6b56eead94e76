use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::response::{created, ok, PrettyJson};
use crate::model::{is_valid_version, slugify, Build, CallerIdentity, Catalog, Deployment, Release};
use crate::store::{DataStore, StoreError};

/// Shared state handed to every handler: the data store and the catalog,
/// both fixed at startup.
pub struct AppState<S> {
    pub store: Arc<S>,
    pub catalog: Arc<Catalog>,
}

// Manual Clone so S itself does not need to be Clone.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            catalog: Arc::clone(&self.catalog),
        }
    }
}

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> PrettyJson<HealthResponse> {
    PrettyJson(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Payload returned by the /meta endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaResponse {
    pub identity: String,
    pub roles: Vec<String>,
    pub config: Catalog,
}

/// GET /meta — the caller's identity plus the catalog trimmed to what their
/// roles may see.
pub async fn get_meta<S: DataStore>(
    State(state): State<AppState<S>>,
    caller: CallerIdentity,
) -> (StatusCode, PrettyJson<MetaResponse>) {
    log::info!("returning metadata for {}", caller.display_name());

    let config = state.catalog.filter_by_roles(&caller.roles);

    ok(MetaResponse {
        identity: caller.display_name().to_string(),
        roles: caller.roles,
        config,
    })
}

/// GET /builds — the catalog surface backing the build listing.
pub async fn list_builds<S: DataStore>(
    State(state): State<AppState<S>>,
    caller: CallerIdentity,
) -> (StatusCode, PrettyJson<Catalog>) {
    ok(state.catalog.filter_by_roles(&caller.roles))
}

/// GET /builds/:product_id/:build_id
pub async fn get_build<S: DataStore>(
    State(state): State<AppState<S>>,
    _caller: CallerIdentity,
    Path((product_id, build_id)): Path<(String, String)>,
) -> Result<(StatusCode, PrettyJson<Build>), ApiError> {
    let product_id = slugify(&product_id);

    if state.catalog.find_product(&product_id).is_none() {
        return Err(ApiError::not_found(format!(
            "requested product \"{product_id}\" could not be found"
        )));
    }

    let build = match state.store.load_build(&product_id, &build_id).await {
        Ok(build) => build,
        Err(StoreError::NotFound(_)) => {
            return Err(ApiError::not_found(format!(
                "requested build \"{build_id}\" could not be found"
            )))
        }
        Err(err) => return Err(err.into()),
    };

    Ok(ok(build))
}

/// POST /build/:product_id — record a new build and its release notes.
pub async fn post_build<S: DataStore>(
    State(state): State<AppState<S>>,
    caller: CallerIdentity,
    Path(product_id): Path<String>,
    body: String,
) -> Result<(StatusCode, PrettyJson<Build>), ApiError> {
    require_admin(&caller)?;
    let build: Build = parse_body(&body, "build")?;

    let product_id = slugify(&product_id);
    if product_id.is_empty() {
        return Err(ApiError::bad_parameter("productId", "product ID is required"));
    }

    if !is_valid_version(&build.version) {
        return Err(ApiError::bad_parameter(
            "version",
            format!(
                "build version \"{}\" is not a valid version identifier",
                build.version
            ),
        ));
    }

    log::info!("creating build {} for {product_id}", build.version);

    state.store.save_build(&product_id, &build).await?;

    Ok(created(build))
}

/// GET /deployments/:environment_id/:product_id — catalog surface for the
/// deployment listing.
pub async fn list_deployments<S: DataStore>(
    State(state): State<AppState<S>>,
    caller: CallerIdentity,
    Path((_environment_id, _product_id)): Path<(String, String)>,
) -> (StatusCode, PrettyJson<Catalog>) {
    ok(state.catalog.filter_by_roles(&caller.roles))
}

/// GET /deployments/:environment_id/:product_id/:build_id — catalog surface
/// for a single deployment view.
pub async fn get_deployment<S: DataStore>(
    State(state): State<AppState<S>>,
    caller: CallerIdentity,
    Path((_environment_id, _product_id, _build_id)): Path<(String, String, String)>,
) -> (StatusCode, PrettyJson<Catalog>) {
    ok(state.catalog.filter_by_roles(&caller.roles))
}

/// POST /deployments/:product_id/:build_id/:environment_id — snapshot a
/// release of the given build into the given environment.
pub async fn post_deployment<S: DataStore>(
    State(state): State<AppState<S>>,
    caller: CallerIdentity,
    Path((product_id, build_id, environment_id)): Path<(String, String, String)>,
    body: String,
) -> Result<(StatusCode, PrettyJson<Release>), ApiError> {
    require_admin(&caller)?;
    let deployment: Deployment = parse_body(&body, "deployment")?;

    let product_id = slugify(&product_id);
    let environment_id = slugify(&environment_id);
    if environment_id.is_empty() {
        return Err(ApiError::bad_parameter(
            "environmentId",
            "environment ID is required",
        ));
    }

    let Some(product) = state.catalog.find_product(&product_id) else {
        return Err(ApiError::not_found(format!(
            "requested product \"{product_id}\" could not be found"
        )));
    };

    log::info!("creating a new deployment of {product_id} build {build_id} into {environment_id}");

    let build = match state.store.load_build(&product_id, &build_id).await {
        Ok(build) => build,
        Err(StoreError::NotFound(_)) => {
            return Err(ApiError::not_found(format!(
                "requested build \"{build_id}\" could not be found"
            )))
        }
        Err(err) => return Err(err.into()),
    };

    let environments = state
        .catalog
        .pathway_for_product(&product_id)
        .map(|pathway| state.catalog.pathway_environments(pathway))
        .unwrap_or_default();

    let release = Release {
        environment_id,
        product: product.clone(),
        environments,
        builds: vec![build],
        deployment,
    };

    state.store.save_release(&release).await?;

    Ok(created(release))
}

fn require_admin(caller: &CallerIdentity) -> Result<(), ApiError> {
    if caller.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

/// Deserialize a request body, mapping every failure onto a bad request
/// rather than an unhandled fault.
fn parse_body<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, ApiError> {
    serde_json::from_str(body)
        .map_err(|e| ApiError::bad_request(format!("request body is not a valid {what}: {e}")))
}
