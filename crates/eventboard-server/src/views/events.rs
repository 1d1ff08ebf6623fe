// Event HTML flows: add, list, search, delete

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use eventboard_core::{CatalogError, EventDraft};
use minijinja::context;

use super::forms::{DeleteEventForm, EventForm, SearchQuery};
use super::{ViewError, ViewState};

pub fn routes() -> Router<ViewState> {
    Router::new()
        .route("/add", get(add_form).post(add_submit))
        .route("/listall", get(list_all))
        .route("/search-event", get(search))
        .route("/delete-event", get(delete_form).post(delete_submit))
}

/// GET /event/{code}/add
async fn add_form(State(state): State<ViewState>) -> Result<Html<String>, ViewError> {
    let categories = state
        .categories
        .list()
        .await
        .map_err(|e| ViewError::new(&state, e))?;

    state.page(
        "event/add.html",
        context! { form => EventForm::default(), categories => categories },
    )
}

/// POST /event/{code}/add
async fn add_submit(
    State(state): State<ViewState>,
    Form(form): Form<EventForm>,
) -> Result<Response, ViewError> {
    let draft = match EventDraft::try_from(form.clone()) {
        Ok(draft) => draft,
        Err(e) => return rejected(&state, form, e).await,
    };

    match state.events.create(draft).await {
        Ok(_) => Ok(Redirect::to(&state.event_path("listall")).into_response()),
        Err(e) => match e.downcast::<CatalogError>() {
            Ok(e) => rejected(&state, form, e).await,
            Err(e) => Err(ViewError::new(&state, e)),
        },
    }
}

/// Re-render the add form with the rejection message.
async fn rejected(
    state: &ViewState,
    form: EventForm,
    err: CatalogError,
) -> Result<Response, ViewError> {
    tracing::debug!(error = %err, "event form rejected");
    let categories = state
        .categories
        .list()
        .await
        .map_err(|e| ViewError::new(state, e))?;
    state.page_with_status(
        StatusCode::BAD_REQUEST,
        "event/add.html",
        context! {
            form => form,
            categories => categories,
            error => err.to_string(),
        },
    )
}

/// GET /event/{code}/listall
async fn list_all(State(state): State<ViewState>) -> Result<Html<String>, ViewError> {
    let events = state
        .events
        .list()
        .await
        .map_err(|e| ViewError::new(&state, e))?;

    state.page("event/list.html", context! { events => events })
}

/// GET /event/{code}/search-event?keyword=
async fn search(
    State(state): State<ViewState>,
    Query(query): Query<SearchQuery>,
) -> Result<Html<String>, ViewError> {
    let events = state
        .events
        .search(&query.keyword)
        .await
        .map_err(|e| ViewError::new(&state, e))?;

    state.page(
        "event/filter.html",
        context! { events => events, keyword => query.keyword },
    )
}

/// GET /event/{code}/delete-event
async fn delete_form(State(state): State<ViewState>) -> Result<Html<String>, ViewError> {
    state.page("event/delete.html", context! {})
}

/// POST /event/{code}/delete-event
async fn delete_submit(
    State(state): State<ViewState>,
    Form(form): Form<DeleteEventForm>,
) -> Result<Response, ViewError> {
    let event_id = form.event_id.trim();
    let deleted = state
        .events
        .delete(event_id)
        .await
        .map_err(|e| ViewError::new(&state, e))?;

    match deleted {
        Some(_) => Ok(Redirect::to(&state.event_path("listall")).into_response()),
        None => state.page_with_status(
            StatusCode::NOT_FOUND,
            "event/delete.html",
            context! { not_found => event_id },
        ),
    }
}
