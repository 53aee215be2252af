use axum::{
    http::{header::{CACHE_CONTROL, CONTENT_TYPE}, HeaderValue},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::models::AppState;

// Embed the default assets in the binary
const DEFAULT_STYLESHEET: &str = include_str!("../static/styles.css");
const SYSTEM_VM_ICON_SVG: &str = include_str!("../static/systemvm.svg");

pub fn build_app(state: AppState) -> Router {
    // Always serve styles.css - use custom if provided, otherwise use embedded default
    let stylesheet_content = state.custom_css.clone().unwrap_or_else(|| DEFAULT_STYLESHEET.to_string());

    let assets = Router::new()
        .route("/static/styles.css", get(move || {
            let css = stylesheet_content.clone();
            async move { ([(CONTENT_TYPE, "text/css")], css) }
        }))
        .route("/static/systemvm.svg", get(|| async {
            ([(CONTENT_TYPE, "image/svg+xml")], SYSTEM_VM_ICON_SVG)
        }))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=3600"),
        ));

    Router::new()
        .route("/", get(handlers::system_vms::root_get))
        .route("/systemvms", get(handlers::system_vms::systemvms_list))
        .route("/systemvms/:id", get(handlers::system_vms::systemvm_detail))
        .route("/systemvms/:id/confirm/:action", get(handlers::system_vms::systemvm_confirm_get))
        .route("/systemvms/:id/:action", axum::routing::post(handlers::system_vms::systemvm_action_post))
        .merge(assets)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
