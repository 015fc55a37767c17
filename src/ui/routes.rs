//! UI routes - server-rendered onboarding form
//!
//! GET  /?service=a,b — blank form with services pre-selected
//! POST /             — validate, forward to the onboarding API, render result

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Router,
};
use chrono::Local;
use serde::Deserialize;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::pages::{onboarding_page, FormView, Notice};
use crate::form::{preselected_services, FormDraft};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct FormQuery {
    /// Comma-separated service pre-selection
    pub service: Option<String>,
}

async fn show_form(State(state): State<AppState>, Query(query): Query<FormQuery>) -> Html<String> {
    let draft = FormDraft::with_services(&preselected_services(query.service.as_deref()));
    let today = Local::now().date_naive();
    Html(onboarding_page(&FormView::new(&state.schema, &draft, today)))
}

async fn submit_form(
    State(state): State<AppState>,
    Query(query): Query<FormQuery>,
    body: Bytes,
) -> (StatusCode, Html<String>) {
    let submission_id = Uuid::new_v4();
    let span = info_span!("form_submission", %submission_id);

    async move {
        let draft = FormDraft::from_form_pairs(url::form_urlencoded::parse(&body).into_owned());
        let today = Local::now().date_naive();

        let submission = match state.schema.validate(&draft, today) {
            Ok(submission) => submission,
            Err(errors) => {
                debug!(failed_fields = errors.len(), "Form failed validation");
                let page = onboarding_page(&FormView::new(&state.schema, &draft, today).with_errors(&errors));
                return (StatusCode::UNPROCESSABLE_ENTITY, Html(page));
            }
        };

        match state.client.submit(&submission).await {
            Ok(ack) => {
                info!(message = %ack.message, "Onboarding API accepted submission");
                // Reset to the defaults the page was opened with
                let fresh = FormDraft::with_services(&preselected_services(query.service.as_deref()));
                let page = onboarding_page(
                    &FormView::new(&state.schema, &fresh, today)
                        .with_notice(Notice::Success(submission.success_summary())),
                );
                (StatusCode::OK, Html(page))
            }
            Err(e) => {
                warn!(error = %e, "Form submission failed");
                let page = onboarding_page(
                    &FormView::new(&state.schema, &draft, today).with_notice(Notice::Error(e.to_string())),
                );
                (StatusCode::BAD_GATEWAY, Html(page))
            }
        }
    }
    .instrument(span)
    .await
}

/// Create router for UI pages
pub fn create_ui_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit_form))
        .with_state(state)
}
