use axum::Json;
use axum::extract::{Query, State};
use axum::http::{Method, Uri};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::core::{ConversionRequest, ConversionResult, convert as convert_amount};
use crate::server::{ApiError, AppState};

#[derive(Deserialize, Debug)]
pub struct ConvertParams {
    amount: Option<String>,
    from: Option<String>,
    to: Option<String>,
}

#[instrument(name = "Convert", skip(state))]
pub async fn convert(
    State(state): State<AppState>,
    Query(params): Query<ConvertParams>,
) -> Result<Json<ConversionResult>, ApiError> {
    let request = ConversionRequest::parse(
        params.amount.as_deref(),
        params.from.as_deref(),
        params.to.as_deref(),
    )
    .inspect_err(|e| debug!(error = %e, "Rejected conversion request"))?;

    let result = convert_amount(request.amount, &request.from, &request.to, &state.rates)
        .inspect_err(|e| debug!(error = %e, "Conversion failed"))?;

    debug!(converted_amount = result.converted_amount, rate = result.rate, "Converted");
    Ok(Json(result))
}

pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    debug!(%method, %uri, "No route");
    ApiError::NotFound
}
