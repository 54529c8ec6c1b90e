//! Supabase-backed provider: PostgREST for rows, GoTrue for identity,
//! Realtime for the change feed

use super::realtime::{
    RealtimeChannel, RealtimeTransport, TransportEvent, HEARTBEAT_INTERVAL_MS,
};
use super::session::{Session, TokenGrant};
use crate::config::ProviderConfig;
use crate::model::{Bookmark, NewBookmark, User, BOOKMARKS_TABLE};
use crate::provider::{BookmarkProvider, ProviderError, Subscription};
use async_trait::async_trait;
use chrono::Utc;
use futures::channel::mpsc;
use futures::lock::Mutex;
use reqwest::{Method, StatusCode};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};

type SessionListener = Box<dyn Fn(Option<&Session>)>;

pub struct SupabaseProvider {
    config: ProviderConfig,
    http: reqwest::Client,
    session: RefCell<Option<Session>>,
    /// Serializes token refreshes so concurrent requests rotate once
    refresh_lock: Mutex<()>,
    session_listener: Option<SessionListener>,
    transport: Option<Rc<dyn RealtimeTransport>>,
}

impl SupabaseProvider {
    pub fn new(config: ProviderConfig, session: Option<Session>) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            session: RefCell::new(session),
            refresh_lock: Mutex::new(()),
            session_listener: None,
            transport: None,
        }
    }

    /// Called whenever the session is renewed or cleared
    pub fn on_session_change(mut self, listener: impl Fn(Option<&Session>) + 'static) -> Self {
        self.session_listener = Some(Box::new(listener));
        self
    }

    /// Enable the change feed over `transport`
    pub fn with_transport(mut self, transport: Rc<dyn RealtimeTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    fn set_session(&self, session: Option<Session>) {
        if let Some(listener) = &self.session_listener {
            listener(session.as_ref());
        }
        self.session.replace(session);
    }

    /// Token sent as bearer: the user's access token, or the anon key when
    /// signed out
    fn bearer(&self) -> String {
        self.session
            .borrow()
            .as_ref()
            .map(|s| s.access_token.clone())
            .unwrap_or_else(|| self.config.anon_key.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.supabase_url, path)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer()))
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, ProviderError> {
        check_status(builder.send().await?).await
    }

    /// Send a request on behalf of the signed-in user. The session is renewed
    /// first when it is about to expire, and once more if the server rejects
    /// the token anyway.
    async fn send_authed(
        &self,
        build: impl Fn() -> reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ProviderError> {
        self.refresh_if_due().await;
        let used = self.session().map(|s| s.access_token);
        let resp = build().send().await?;
        if resp.status() != StatusCode::UNAUTHORIZED {
            return check_status(resp).await;
        }
        let Some(used) = used else {
            return check_status(resp).await;
        };
        if let Err(e) = self.refresh_session(&used).await {
            warn!("Session refresh after 401 failed: {e}");
            return check_status(resp).await;
        }
        self.send(build()).await
    }

    async fn refresh_if_due(&self) {
        let Some(session) = self.session() else {
            return;
        };
        if !session.needs_refresh(Utc::now()) {
            return;
        }
        if let Err(e) = self.refresh_session(&session.access_token).await {
            warn!("Session refresh failed: {e}");
        }
    }

    /// Trade the refresh token for a new session. `stale` is the access token
    /// the caller found expiring or rejected; if another call has already
    /// replaced it there is nothing to do.
    async fn refresh_session(&self, stale: &str) -> Result<(), ProviderError> {
        let _guard = self.refresh_lock.lock().await;
        let current = self.session().ok_or(ProviderError::NotAuthenticated)?;
        if current.access_token != stale {
            return Ok(());
        }
        let refresh_token = current
            .refresh_token
            .ok_or(ProviderError::NotAuthenticated)?;

        let builder = self
            .http
            .post(self.url(TOKEN_PATH))
            .header("apikey", &self.config.anon_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token }));
        let grant: TokenGrant = self.send(builder).await?.json().await?;
        let session = grant
            .into_session(Some(refresh_token), Utc::now())
            .map_err(|e| ProviderError::Rejected(e.to_string()))?;
        info!("Session refreshed");
        self.set_session(Some(session));
        Ok(())
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ProviderError::Status {
        status: status.as_u16(),
        body,
    })
}

const TOKEN_PATH: &str = "/auth/v1/token?grant_type=refresh_token";

fn list_path() -> String {
    format!("/rest/v1/{BOOKMARKS_TABLE}?select=*&order=created_at.desc")
}

fn insert_path() -> String {
    format!("/rest/v1/{BOOKMARKS_TABLE}")
}

fn delete_path(id: &str) -> String {
    format!(
        "/rest/v1/{BOOKMARKS_TABLE}?id=eq.{}",
        urlencoding::encode(id)
    )
}

#[async_trait(?Send)]
impl BookmarkProvider for SupabaseProvider {
    async fn current_user(&self) -> Result<Option<User>, ProviderError> {
        if self.session.borrow().is_none() {
            return Ok(None);
        }
        match self
            .send_authed(|| self.request(Method::GET, "/auth/v1/user"))
            .await
        {
            Ok(resp) => Ok(Some(resp.json::<User>().await?)),
            Err(ProviderError::Status { status, .. })
                if status == StatusCode::UNAUTHORIZED.as_u16()
                    || status == StatusCode::FORBIDDEN.as_u16() =>
            {
                debug!("Session rejected by identity provider");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn list_bookmarks(&self) -> Result<Vec<Bookmark>, ProviderError> {
        let resp = self
            .send_authed(|| self.request(Method::GET, &list_path()))
            .await?;
        Ok(resp.json::<Vec<Bookmark>>().await?)
    }

    async fn insert_bookmark(&self, bookmark: NewBookmark) -> Result<(), ProviderError> {
        self.send_authed(|| {
            self.request(Method::POST, &insert_path())
                .header("Prefer", "return=minimal")
                .json(&[&bookmark])
        })
        .await?;
        Ok(())
    }

    async fn delete_bookmark(&self, id: &str) -> Result<(), ProviderError> {
        self.send_authed(|| self.request(Method::DELETE, &delete_path(id)))
            .await?;
        Ok(())
    }

    fn subscribe(&self, table: &str) -> Result<Subscription, ProviderError> {
        let transport = self
            .transport
            .as_ref()
            .ok_or_else(|| ProviderError::Realtime("no realtime transport".to_string()))?;

        let (tx, rx) = mpsc::unbounded();
        let channel = Rc::new(RefCell::new(RealtimeChannel::new(table, self.bearer())));

        let handler_channel = channel.clone();
        let handler = move |event: TransportEvent| -> Vec<String> {
            let mut channel = handler_channel.borrow_mut();
            match event {
                TransportEvent::Open => vec![channel.join()],
                TransportEvent::Tick => vec![channel.heartbeat()],
                TransportEvent::Message(text) => {
                    match channel.receive(&text) {
                        Ok(Some(change)) => {
                            let _ = tx.unbounded_send(change);
                        }
                        Ok(None) => {}
                        Err(e) => warn!("Realtime: {e}"),
                    }
                    Vec::new()
                }
                TransportEvent::Closed => {
                    tx.close_channel();
                    Vec::new()
                }
            }
        };

        let mut connection = transport.connect(
            &self.config.realtime_url(),
            HEARTBEAT_INTERVAL_MS,
            Box::new(handler),
        )?;
        info!("Subscribed to realtime changes on {table}");

        let table = table.to_string();
        Ok(Subscription::new(rx, move || {
            let farewell = channel.borrow_mut().leave();
            connection.close(vec![farewell]);
            debug!("Released realtime subscription on {table}");
        }))
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        let had_session = self.session.borrow().is_some();
        let result = if had_session {
            self.send_authed(|| self.request(Method::POST, "/auth/v1/logout"))
                .await
                .map(|_| ())
        } else {
            Ok(())
        };
        self.set_session(None);
        result
    }
}
