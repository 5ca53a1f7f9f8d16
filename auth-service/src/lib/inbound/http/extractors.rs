use axum::extract::FromRequest;
use axum::extract::Request;
use serde::de::DeserializeOwned;

use super::handlers::ApiError;

/// JSON body extractor that keeps rejections on the API error contract.
///
/// Axum's stock `Json` answers malformed bodies with plain-text 400/422
/// responses; a body that cannot be parsed into the target type is a
/// validation failure here, so it must come back as 400 with an
/// `{"error": msg}` body like every other one.
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}
