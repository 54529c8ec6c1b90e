//! Session persistence in local storage

use chrono::Utc;
use marks_core::supabase::Session;
use tracing::{debug, warn};

const SESSION_KEY: &str = "marks.session";

fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// The stored session, if one exists and has not expired
pub fn load_session() -> Option<Session> {
    let raw = get_storage()?.get_item(SESSION_KEY).ok().flatten()?;
    match Session::from_json(&raw) {
        Ok(session) if session.is_expired(Utc::now()) => {
            debug!("Stored session expired");
            clear_session();
            None
        }
        Ok(session) => Some(session),
        Err(e) => {
            warn!("Discarding stored session: {e}");
            clear_session();
            None
        }
    }
}

pub fn save_session(session: &Session) {
    if let Some(storage) = get_storage() {
        if storage.set_item(SESSION_KEY, &session.to_json()).is_err() {
            warn!("Could not persist session");
        }
    }
}

pub fn clear_session() {
    if let Some(storage) = get_storage() {
        let _ = storage.remove_item(SESSION_KEY);
    }
}
