//! Static landing page.

use axum::response::Html;

/// Handler for `GET /`: serves the embedded demo page.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../public/index.html"))
}
