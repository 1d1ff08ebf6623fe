// Category HTML flows: add, list, search, delete

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use eventboard_core::{CatalogError, NewCategory};
use minijinja::context;

use super::forms::{CategoryForm, DeleteCategoryForm, SearchQuery};
use super::{ViewError, ViewState};

pub fn routes() -> Router<ViewState> {
    Router::new()
        .route("/add", get(add_form).post(add_submit))
        .route("/listall", get(list_all))
        .route("/search-category", get(search))
        .route("/delete-category", get(delete_form).post(delete_submit))
}

/// GET /category/{code}/add
async fn add_form(State(state): State<ViewState>) -> Result<Html<String>, ViewError> {
    state.page(
        "category/add.html",
        context! { form => CategoryForm::default() },
    )
}

/// POST /category/{code}/add
async fn add_submit(
    State(state): State<ViewState>,
    Form(form): Form<CategoryForm>,
) -> Result<Response, ViewError> {
    let input = match NewCategory::new(
        form.name.clone(),
        form.description.clone(),
        form.image.clone(),
    ) {
        Ok(input) => input,
        Err(e) => return rejected(&state, form, e),
    };

    match state.categories.create(input).await {
        Ok(_) => Ok(Redirect::to(&state.category_path("listall")).into_response()),
        Err(e) => match e.downcast::<CatalogError>() {
            Ok(e) => rejected(&state, form, e),
            Err(e) => Err(ViewError::new(&state, e)),
        },
    }
}

/// Re-render the add form with the rejection message.
fn rejected(
    state: &ViewState,
    form: CategoryForm,
    err: CatalogError,
) -> Result<Response, ViewError> {
    tracing::debug!(error = %err, "category form rejected");
    state.page_with_status(
        StatusCode::BAD_REQUEST,
        "category/add.html",
        context! { form => form, error => err.to_string() },
    )
}

/// GET /category/{code}/listall
async fn list_all(State(state): State<ViewState>) -> Result<Html<String>, ViewError> {
    let categories = state
        .categories
        .list()
        .await
        .map_err(|e| ViewError::new(&state, e))?;

    state.page("category/list.html", context! { categories => categories })
}

/// GET /category/{code}/search-category?keyword=
async fn search(
    State(state): State<ViewState>,
    Query(query): Query<SearchQuery>,
) -> Result<Html<String>, ViewError> {
    let categories = state
        .categories
        .search(&query.keyword)
        .await
        .map_err(|e| ViewError::new(&state, e))?;

    state.page(
        "category/filter.html",
        context! { categories => categories, keyword => query.keyword },
    )
}

/// GET /category/{code}/delete-category
async fn delete_form(State(state): State<ViewState>) -> Result<Html<String>, ViewError> {
    state.page("category/delete.html", context! {})
}

/// POST /category/{code}/delete-category
async fn delete_submit(
    State(state): State<ViewState>,
    Form(form): Form<DeleteCategoryForm>,
) -> Result<Response, ViewError> {
    let category_id = form.category_id.trim();
    let deleted = state
        .categories
        .delete(category_id)
        .await
        .map_err(|e| ViewError::new(&state, e))?;

    match deleted {
        Some(_) => Ok(Redirect::to(&state.category_path("listall")).into_response()),
        None => state.page_with_status(
            StatusCode::NOT_FOUND,
            "category/delete.html",
            context! { not_found => category_id },
        ),
    }
}
