//! Wizard handlers
//!
//! Each handler takes the raw form fields as a JSON object of strings and
//! returns the step view the client renders next.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::debug;

use domain_quote::{RawFields, StepView};

use crate::{error::ApiError, AppState};

type Fields = Result<Json<RawFields>, JsonRejection>;

/// Empty input form with option lists
pub async fn start(State(state): State<AppState>) -> Result<Json<StepView>, ApiError> {
    Ok(Json(state.controller.start().await?))
}

/// Input → Confirm
pub async fn confirm(
    State(state): State<AppState>,
    payload: Fields,
) -> Result<Json<StepView>, ApiError> {
    let Json(raw) = payload?;
    Ok(Json(state.controller.submit(&raw).await?))
}

/// Confirm → Input
pub async fn back_to_input(
    State(state): State<AppState>,
    payload: Fields,
) -> Result<Json<StepView>, ApiError> {
    let Json(raw) = payload?;
    Ok(Json(state.controller.back_to_input(&raw).await?))
}

/// Confirm → Estimate, or Confirm with errors
pub async fn estimate(
    State(state): State<AppState>,
    payload: Fields,
) -> Result<Json<StepView>, ApiError> {
    let Json(raw) = payload?;
    Ok(Json(state.controller.estimate(&raw).await?))
}

/// Order → Complete, or Confirm with errors
///
/// When a mailer is configured the receipt mail is sent in the background;
/// the response does not wait for it.
pub async fn order(
    State(state): State<AppState>,
    payload: Fields,
) -> Result<Json<StepView>, ApiError> {
    let Json(raw) = payload?;
    let view = state.controller.order(&raw).await?;

    if let (
        Some(mailer),
        StepView::Complete {
            receipt_no,
            insurance_name,
            order,
        },
    ) = (state.mailer.clone(), &view)
    {
        let receipt_no = *receipt_no;
        let insurance_name = insurance_name.clone().unwrap_or_default();
        let order = order.clone();
        debug!(%receipt_no, "Dispatching receipt mail");
        tokio::spawn(async move {
            // failures are logged by the mailer
            let _ = mailer.send_receipt(receipt_no, &order, &insurance_name).await;
        });
    }

    Ok(Json(view))
}

/// Order → Confirm
pub async fn back_to_confirm(
    State(state): State<AppState>,
    payload: Fields,
) -> Result<Json<StepView>, ApiError> {
    let Json(raw) = payload?;
    Ok(Json(state.controller.back_to_confirm(&raw).await?))
}
