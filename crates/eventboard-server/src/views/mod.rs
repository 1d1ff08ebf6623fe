// Server-rendered HTML views
// Decision: Templates are embedded with include_str! and compiled once at startup
// Decision: Form flows reuse the same services as the JSON API
//
// Each flow is a GET (render form or list) and, where it mutates, a POST that
// redirects to the matching list page on success.

pub mod categories;
pub mod events;
pub mod forms;

use crate::services::{CategoryService, CounterService, EventService};
use crate::storage::StorageBackend;
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use minijinja::{context, Environment, Value};
use std::sync::Arc;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("templates/layout.html")),
    ("index.html", include_str!("templates/index.html")),
    ("error.html", include_str!("templates/error.html")),
    ("category/_table.html", include_str!("templates/category/_table.html")),
    ("category/add.html", include_str!("templates/category/add.html")),
    ("category/list.html", include_str!("templates/category/list.html")),
    ("category/filter.html", include_str!("templates/category/filter.html")),
    ("category/delete.html", include_str!("templates/category/delete.html")),
    ("event/_table.html", include_str!("templates/event/_table.html")),
    ("event/add.html", include_str!("templates/event/add.html")),
    ("event/list.html", include_str!("templates/event/list.html")),
    ("event/filter.html", include_str!("templates/event/filter.html")),
    ("event/delete.html", include_str!("templates/event/delete.html")),
];

/// Compiled template set
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render(&self, name: &str, ctx: Value) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?)
    }
}

/// App state shared by all HTML routes
#[derive(Clone)]
pub struct ViewState {
    pub categories: Arc<CategoryService>,
    pub events: Arc<EventService>,
    pub counter: Arc<CounterService>,
    pub templates: Arc<Templates>,
    /// Route code embedded in every category and event path
    pub code: Arc<str>,
}

impl ViewState {
    pub fn new(db: Arc<StorageBackend>, templates: Arc<Templates>, code: &str) -> Self {
        Self {
            categories: Arc::new(CategoryService::new(db.clone())),
            events: Arc::new(EventService::new(db.clone())),
            counter: Arc::new(CounterService::new(db)),
            templates,
            code: Arc::from(code),
        }
    }

    /// Render a page, adding the route code to the context.
    pub fn page(&self, name: &str, ctx: Value) -> Result<Html<String>, ViewError> {
        let ctx = context! { code => &*self.code, ..ctx };
        self.templates
            .render(name, ctx)
            .map(Html)
            .map_err(|e| ViewError::new(self, e))
    }

    /// Render a page with a non-200 status.
    pub fn page_with_status(
        &self,
        status: StatusCode,
        name: &str,
        ctx: Value,
    ) -> Result<Response, ViewError> {
        Ok((status, self.page(name, ctx)?).into_response())
    }

    pub fn category_path(&self, action: &str) -> String {
        format!("/category/{}/{}", self.code, action)
    }

    pub fn event_path(&self, action: &str) -> String {
        format!("/event/{}/{}", self.code, action)
    }
}

/// Failure while serving a page: logged and shown as a 500 error page.
pub struct ViewError {
    message: String,
    body: Option<String>,
}

impl ViewError {
    pub fn new(state: &ViewState, err: anyhow::Error) -> Self {
        tracing::error!(error = %err, "Failed to render view");
        let message = err.to_string();
        let body = state
            .templates
            .render(
                "error.html",
                context! { code => &*state.code, message => &message },
            )
            .ok();
        Self { message, body }
    }
}

impl IntoResponse for ViewError {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response(),
            None => (StatusCode::INTERNAL_SERVER_ERROR, self.message).into_response(),
        }
    }
}

/// Create HTML routes
pub fn routes(state: ViewState) -> Router {
    let category_prefix = format!("/category/{}", state.code);
    let event_prefix = format!("/event/{}", state.code);

    Router::new()
        .route("/", get(index))
        .nest(&category_prefix, categories::routes())
        .nest(&event_prefix, events::routes())
        .with_state(state)
}

/// GET / - Landing page with the counter values
async fn index(State(state): State<ViewState>) -> Result<Html<String>, ViewError> {
    let counter = state
        .counter
        .get()
        .await
        .map_err(|e| ViewError::new(&state, e))?;

    state.page("index.html", context! { counter => counter })
}
