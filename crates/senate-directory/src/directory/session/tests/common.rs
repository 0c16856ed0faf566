use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use serde_json::Value;

use crate::config::DataConfig;
use crate::directory::handle::DirectoryHandle;
use crate::directory::roster::Directory;
use crate::directory::session::{
    directory_router, DirectorySession, SessionError, SessionId, SessionRepository,
};
use crate::directory::test_support::legislator;

#[derive(Default, Clone)]
pub(super) struct MemorySessions {
    sessions: Arc<Mutex<HashMap<SessionId, DirectorySession>>>,
}

impl MemorySessions {
    pub(super) fn ids(&self) -> Vec<SessionId> {
        self.sessions
            .lock()
            .expect("session mutex poisoned")
            .keys()
            .cloned()
            .collect()
    }
}

impl SessionRepository for MemorySessions {
    fn insert(&self, id: SessionId, session: DirectorySession) -> Result<(), SessionError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        if guard.contains_key(&id) {
            return Err(SessionError::Conflict);
        }
        guard.insert(id, session);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<DirectorySession>, SessionError> {
        let guard = self.sessions.lock().expect("session mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn modify<T, E, F>(&self, id: &SessionId, change: F) -> Result<T, E>
    where
        F: FnOnce(&mut DirectorySession) -> Result<T, E>,
        E: From<SessionError>,
    {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        let slot = guard.get_mut(id).ok_or(SessionError::NotFound)?;
        let mut draft = slot.clone();
        let outcome = change(&mut draft)?;
        *slot = draft;
        Ok(outcome)
    }
}

pub(super) struct UnavailableSessions;

impl SessionRepository for UnavailableSessions {
    fn insert(&self, _id: SessionId, _session: DirectorySession) -> Result<(), SessionError> {
        Err(SessionError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<DirectorySession>, SessionError> {
        Err(SessionError::Unavailable("store offline".to_string()))
    }

    fn modify<T, E, F>(&self, _id: &SessionId, _change: F) -> Result<T, E>
    where
        F: FnOnce(&mut DirectorySession) -> Result<T, E>,
        E: From<SessionError>,
    {
        Err(SessionError::Unavailable("store offline".to_string()).into())
    }
}

pub(super) fn missing_sources() -> DataConfig {
    DataConfig {
        records_path: PathBuf::from("./missing/senators.json"),
        images_path: PathBuf::from("./missing/imgSources.json"),
    }
}

pub(super) fn directory() -> Directory {
    let mut jane = legislator("D000001", "Jane", "Doe", "democrat", "CA");
    jane.gender = "female".to_string();
    jane.rank = "senior".to_string();
    jane.description = "Senior Senator for California".to_string();
    jane.leadership_title = Some("Majority Whip".to_string());

    let john = legislator("R000002", "John", "Roe", "republican", "TX");
    let ann = legislator("A000003", "Ann", "Adams", "democrat", "TX");
    let bernie = legislator("S000004", "Bernie", "Smith", "independent", "VT");

    Directory::new(vec![jane, john, ann, bernie])
}

pub(super) fn loaded_router() -> (axum::Router, MemorySessions) {
    let sessions = MemorySessions::default();
    let handle = DirectoryHandle::preloaded(missing_sources(), directory());
    let router = directory_router(Arc::new(handle), Arc::new(sessions.clone()));
    (router, sessions)
}

pub(super) fn failing_router() -> axum::Router {
    let handle = DirectoryHandle::new(missing_sources());
    directory_router(Arc::new(handle), Arc::new(MemorySessions::default()))
}

pub(super) fn json_post(uri: &str, payload: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).expect("json encodes")))
        .expect("request builds")
}

pub(super) fn form_post(uri: &str, form: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .expect("request builds")
}

pub(super) fn empty_post(uri: &str) -> Request<Body> {
    Request::post(uri).body(Body::empty()).expect("request builds")
}

pub(super) fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

pub(super) async fn read_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    serde_json::from_str(&read_body(response).await).expect("json payload")
}

pub(super) fn visible_ids(view: &Value) -> Vec<String> {
    view["cards"]
        .as_array()
        .expect("cards array")
        .iter()
        .filter(|card| card["hidden"] == Value::Bool(false))
        .filter_map(|card| card["id"].as_str().map(str::to_string))
        .collect()
}
