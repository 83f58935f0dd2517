use axum::{
    extract::{rejection::FormRejection, State},
    response::{Html, Redirect},
    Form, Json,
};

use super::dto::{ControlView, StationForm};
use super::service::StationService;
use super::view::render_page;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// Control page
///
/// Shows monitored stations, the debug switch and the activity log.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let view = StationService::snapshot(&state).await;
    Html(render_page(&view))
}

/// Control page form actions
///
/// Handles `add_station`, `remove_station` and `toggle_debug`, then
/// redirects back to the page (303).
pub async fn submit(
    State(state): State<AppState>,
    form: Result<Form<StationForm>, FormRejection>,
) -> Result<Redirect, AppError> {
    let Form(form) = form?;

    StationService::apply(&state, form.action()).await?;

    Ok(Redirect::to("/"))
}

/// Current control state as JSON
pub async fn get_state(State(state): State<AppState>) -> Json<BaseResponse<ControlView>> {
    let view = StationService::snapshot(&state).await;
    Json(BaseResponse::success(view))
}
