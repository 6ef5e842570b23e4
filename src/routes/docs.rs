use axum::Router;
use utoipa::{OpenApi, openapi::server::Server};
use utoipa_swagger_ui::SwaggerUi;

use crate::{services::documentation::ApiDoc, state::SharedState};

/// Serve the Swagger UI backed by the generated OpenAPI document.
///
/// Both live under the configured base path, which the document also advertises as its server.
pub fn router(state: SharedState) -> Router<SharedState> {
    let base_path = state.config().base_path().to_owned();
    let mut doc = ApiDoc::openapi();
    if !base_path.is_empty() {
        doc.servers = Some(vec![Server::new(base_path.clone())]);
    }

    let ui: Router<SharedState> = SwaggerUi::new(format!("{base_path}/docs"))
        .url(format!("{base_path}/api-doc/openapi.json"), doc)
        .into();

    ui.with_state(state)
}
