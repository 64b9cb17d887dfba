use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../../static/index.html");

/// Minimal browser form that drives the `/pokemons` API.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
