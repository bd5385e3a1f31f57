use axum::response::IntoResponse;

/// Service banner for `/`; undocumented on purpose.
pub async fn root() -> impl IntoResponse {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
}
