use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;

use super::repository::{SessionError, SessionId, SessionRepository};
use super::DirectorySession;
use crate::directory::detail::LegislatorDetail;
use crate::directory::domain::{Category, LegislatorId};
use crate::directory::handle::DirectoryHandle;
use crate::directory::render::{render_failure, render_page};
use crate::directory::report::summarize;
use crate::directory::sort::SortField;
use crate::error::AppError;

/// Shared state behind the directory routes.
pub struct DirectoryRoutes<R> {
    directory: Arc<DirectoryHandle>,
    sessions: Arc<R>,
}

impl<R> DirectoryRoutes<R> {
    pub fn new(directory: Arc<DirectoryHandle>, sessions: Arc<R>) -> Self {
        Self {
            directory,
            sessions,
        }
    }
}

impl<R> Clone for DirectoryRoutes<R> {
    fn clone(&self) -> Self {
        Self {
            directory: self.directory.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

/// Router builder exposing the directory page, its form actions and the JSON API.
pub fn directory_router<R>(directory: Arc<DirectoryHandle>, sessions: Arc<R>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/", get(index_page::<R>))
        .route("/sessions/:session_id", get(session_page::<R>))
        .route("/sessions/:session_id/filters", post(toggle_filter_form::<R>))
        .route("/sessions/:session_id/tags/remove", post(remove_tag_form::<R>))
        .route("/sessions/:session_id/name", post(search_name_form::<R>))
        .route("/sessions/:session_id/reset", post(reset_form::<R>))
        .route("/sessions/:session_id/sort/:field", post(sort_form::<R>))
        .route(
            "/sessions/:session_id/dropdowns/:category/toggle",
            post(toggle_dropdown_form::<R>),
        )
        .route(
            "/sessions/:session_id/dropdowns/:category/search",
            post(search_options_form::<R>),
        )
        .route("/api/v1/sessions", post(create_session::<R>))
        .route("/api/v1/sessions/:session_id", get(session_view::<R>))
        .route(
            "/api/v1/sessions/:session_id/filters",
            post(toggle_filter_json::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/tags/remove",
            post(remove_tag_json::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/name",
            post(search_name_json::<R>),
        )
        .route("/api/v1/sessions/:session_id/reset", post(reset_json::<R>))
        .route(
            "/api/v1/sessions/:session_id/sort/:field",
            post(sort_json::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/dropdowns/:category/toggle",
            post(toggle_dropdown_json::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/dropdowns/:category/close",
            post(close_dropdown_json::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/dropdowns/:category/search",
            post(search_options_json::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/options/:category",
            get(session_options::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/legislators",
            get(visible_legislators::<R>),
        )
        .route("/api/v1/legislators", get(all_legislators::<R>))
        .route(
            "/api/v1/legislators/:legislator_id",
            get(legislator_detail::<R>),
        )
        .route("/api/v1/options", get(filter_options::<R>))
        .route("/api/v1/summary", get(directory_summary::<R>))
        .with_state(DirectoryRoutes::new(directory, sessions))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ToggleRequest {
    pub(crate) category: String,
    pub(crate) value: String,
    pub(crate) selected: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TagRequest {
    pub(crate) category: String,
    pub(crate) value: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TextRequest {
    #[serde(default)]
    pub(crate) value: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageQuery {
    #[serde(default)]
    pub(crate) detail: Option<String>,
}

/// One user interaction, applied to a stored session.
enum SessionChange {
    Toggle(ToggleRequest),
    RemoveTag(TagRequest),
    SearchName(String),
    Reset,
    Sort(String),
    ToggleDropdown(String),
    CloseDropdown(String),
    SearchOptions(String, String),
}

impl SessionChange {
    fn apply(self, session: &mut DirectorySession) -> Result<(), AppError> {
        match self {
            SessionChange::Toggle(request) => {
                session.toggle_filter(&request.category, &request.value, request.selected)?;
            }
            SessionChange::RemoveTag(request) => {
                let category = parse_category(&request.category)?;
                session.remove_tag(category, &request.value)?;
            }
            SessionChange::SearchName(fragment) => {
                session.search_name(&fragment)?;
            }
            SessionChange::Reset => {
                session.reset()?;
            }
            SessionChange::Sort(raw) => {
                let field = SortField::parse(&raw)
                    .ok_or_else(|| AppError::BadRequest(format!("unknown sort field '{raw}'")))?;
                session.click_sort(field)?;
            }
            SessionChange::ToggleDropdown(raw) => {
                session.toggle_dropdown(parse_category(&raw)?);
            }
            SessionChange::CloseDropdown(raw) => {
                session.close_dropdown(parse_category(&raw)?);
            }
            SessionChange::SearchOptions(raw, fragment) => {
                session.search_options(parse_category(&raw)?, &fragment);
            }
        }
        Ok(())
    }
}

fn parse_category(raw: &str) -> Result<Category, AppError> {
    Category::parse(raw).ok_or_else(|| AppError::BadRequest(format!("unknown category '{raw}'")))
}

impl<R: SessionRepository> DirectoryRoutes<R> {
    async fn open_session(&self) -> Result<(SessionId, DirectorySession), AppError> {
        let directory = self.directory.current().await?;
        let session = DirectorySession::open(directory)?;
        let id = SessionId::next();
        self.sessions.insert(id.clone(), session.clone())?;
        tracing::info!(session = %id, legislators = session.deck().len(), "directory session opened");
        Ok((id, session))
    }

    fn session(&self, id: &SessionId) -> Result<DirectorySession, AppError> {
        self.sessions
            .fetch(id)?
            .ok_or(AppError::Session(SessionError::NotFound))
    }

    fn change(&self, id: &SessionId, change: SessionChange) -> Result<DirectorySession, AppError> {
        self.sessions.modify(id, |session| {
            change.apply(session)?;
            Ok(session.clone())
        })
    }
}

fn page_location(id: &SessionId) -> Redirect {
    Redirect::to(&format!("/sessions/{id}"))
}

/// Load failures become the failure notice; everything else stays JSON.
fn page_failure(error: AppError) -> Response {
    match error {
        AppError::Load(load) => {
            tracing::warn!(error = %load, "serving load failure notice");
            (StatusCode::SERVICE_UNAVAILABLE, Html(render_failure(&load))).into_response()
        }
        other => other.into_response(),
    }
}

fn form_change<R: SessionRepository>(
    routes: &DirectoryRoutes<R>,
    session_id: String,
    change: SessionChange,
) -> Result<Redirect, AppError> {
    let id = SessionId(session_id);
    routes.change(&id, change)?;
    Ok(page_location(&id))
}

fn json_change<R: SessionRepository>(
    routes: &DirectoryRoutes<R>,
    session_id: String,
    change: SessionChange,
) -> Result<Response, AppError> {
    let session = routes.change(&SessionId(session_id), change)?;
    Ok(Json(session.view()).into_response())
}

pub(crate) async fn index_page<R>(State(routes): State<DirectoryRoutes<R>>) -> Response
where
    R: SessionRepository + 'static,
{
    match routes.open_session().await {
        Ok((id, _)) => page_location(&id).into_response(),
        Err(err) => page_failure(err),
    }
}

pub(crate) async fn session_page<R>(
    State(routes): State<DirectoryRoutes<R>>,
    Path(session_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError>
where
    R: SessionRepository + 'static,
{
    let id = SessionId(session_id);
    let session = routes.session(&id)?;
    let detail = match query.detail.as_deref().filter(|raw| !raw.is_empty()) {
        Some(raw) => {
            let legislator = session
                .directory()
                .get(&LegislatorId::new(raw))
                .ok_or_else(|| AppError::NotFound(format!("legislator {raw}")))?;
            Some(LegislatorDetail::from_legislator(legislator))
        }
        None => None,
    };
    Ok(Html(render_page(&session, &id, detail.as_ref())))
}

async fn toggle_filter_form<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
    Path(session_id): Path<String>,
    Form(request): Form<ToggleRequest>,
) -> Result<Redirect, AppError> {
    form_change(&routes, session_id, SessionChange::Toggle(request))
}

async fn remove_tag_form<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
    Path(session_id): Path<String>,
    Form(request): Form<TagRequest>,
) -> Result<Redirect, AppError> {
    form_change(&routes, session_id, SessionChange::RemoveTag(request))
}

async fn search_name_form<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
    Path(session_id): Path<String>,
    Form(request): Form<TextRequest>,
) -> Result<Redirect, AppError> {
    form_change(&routes, session_id, SessionChange::SearchName(request.value))
}

async fn reset_form<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
    Path(session_id): Path<String>,
) -> Result<Redirect, AppError> {
    form_change(&routes, session_id, SessionChange::Reset)
}

async fn sort_form<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
    Path((session_id, field)): Path<(String, String)>,
) -> Result<Redirect, AppError> {
    form_change(&routes, session_id, SessionChange::Sort(field))
}

async fn toggle_dropdown_form<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
    Path((session_id, category)): Path<(String, String)>,
) -> Result<Redirect, AppError> {
    form_change(&routes, session_id, SessionChange::ToggleDropdown(category))
}

async fn search_options_form<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
    Path((session_id, category)): Path<(String, String)>,
    Form(request): Form<TextRequest>,
) -> Result<Redirect, AppError> {
    form_change(
        &routes,
        session_id,
        SessionChange::SearchOptions(category, request.value),
    )
}

pub(crate) async fn create_session<R>(State(routes): State<DirectoryRoutes<R>>) -> Response
where
    R: SessionRepository + 'static,
{
    match routes.open_session().await {
        Ok((id, session)) => {
            let payload = serde_json::json!({
                "session_id": id,
                "session": session.view(),
            });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

async fn session_view<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
    Path(session_id): Path<String>,
) -> Result<Response, AppError> {
    let session = routes.session(&SessionId(session_id))?;
    Ok(Json(session.view()).into_response())
}

async fn toggle_filter_json<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
    Path(session_id): Path<String>,
    Json(request): Json<ToggleRequest>,
) -> Result<Response, AppError> {
    json_change(&routes, session_id, SessionChange::Toggle(request))
}

async fn remove_tag_json<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
    Path(session_id): Path<String>,
    Json(request): Json<TagRequest>,
) -> Result<Response, AppError> {
    json_change(&routes, session_id, SessionChange::RemoveTag(request))
}

async fn search_name_json<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
    Path(session_id): Path<String>,
    Json(request): Json<TextRequest>,
) -> Result<Response, AppError> {
    json_change(&routes, session_id, SessionChange::SearchName(request.value))
}

async fn reset_json<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
    Path(session_id): Path<String>,
) -> Result<Response, AppError> {
    json_change(&routes, session_id, SessionChange::Reset)
}

async fn sort_json<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
    Path((session_id, field)): Path<(String, String)>,
) -> Result<Response, AppError> {
    json_change(&routes, session_id, SessionChange::Sort(field))
}

async fn toggle_dropdown_json<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
    Path((session_id, category)): Path<(String, String)>,
) -> Result<Response, AppError> {
    json_change(&routes, session_id, SessionChange::ToggleDropdown(category))
}

async fn close_dropdown_json<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
    Path((session_id, category)): Path<(String, String)>,
) -> Result<Response, AppError> {
    json_change(&routes, session_id, SessionChange::CloseDropdown(category))
}

async fn search_options_json<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
    Path((session_id, category)): Path<(String, String)>,
    Json(request): Json<TextRequest>,
) -> Result<Response, AppError> {
    json_change(
        &routes,
        session_id,
        SessionChange::SearchOptions(category, request.value),
    )
}

async fn session_options<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
    Path((session_id, category)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let category = parse_category(&category)?;
    let session = routes.session(&SessionId(session_id))?;
    Ok(Json(session.option_entries(category)).into_response())
}

async fn visible_legislators<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
    Path(session_id): Path<String>,
) -> Result<Response, AppError> {
    let session = routes.session(&SessionId(session_id))?;
    Ok(Json(session.visible()).into_response())
}

async fn all_legislators<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
) -> Result<Response, AppError> {
    let directory = routes.directory.current().await?;
    Ok(Json(directory.legislators()).into_response())
}

async fn legislator_detail<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
    Path(legislator_id): Path<String>,
) -> Result<Json<LegislatorDetail>, AppError> {
    let directory = routes.directory.current().await?;
    let legislator = directory
        .get(&LegislatorId::new(legislator_id.as_str()))
        .ok_or_else(|| AppError::NotFound(format!("legislator {legislator_id}")))?;
    Ok(Json(LegislatorDetail::from_legislator(legislator)))
}

async fn filter_options<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
) -> Result<Response, AppError> {
    let directory = routes.directory.current().await?;
    let options: BTreeMap<&'static str, Vec<&str>> = directory
        .options()
        .categories()
        .map(|(category, values)| (category.key(), values))
        .collect();
    Ok(Json(options).into_response())
}

async fn directory_summary<R: SessionRepository + 'static>(
    State(routes): State<DirectoryRoutes<R>>,
) -> Result<Response, AppError> {
    let directory = routes.directory.current().await?;
    Ok(Json(summarize(directory.legislators())).into_response())
}
