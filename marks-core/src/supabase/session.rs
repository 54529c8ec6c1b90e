//! Identity provider session obtained from the OAuth redirect

use crate::config::ProviderConfig;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// OAuth provider used for sign-in
pub const OAUTH_PROVIDER: &str = "google";

/// A session is refreshed once it is this close to expiring
pub const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("sign-in was refused: {0}")]
    Denied(String),
    #[error("redirect is missing the access token")]
    MissingToken,
    #[error("stored session is unreadable: {0}")]
    Corrupt(String),
    #[error("invalid token lifetime: {0}")]
    InvalidExpiry(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// Expired or about to expire, and renewable
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        if self.refresh_token.is_none() {
            return false;
        }
        self.expires_at.is_some_and(|at| {
            at.checked_sub_signed(Duration::seconds(REFRESH_MARGIN_SECS))
                .map_or(true, |threshold| threshold <= now)
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        serde_json::from_str(json).map_err(|e| SessionError::Corrupt(e.to_string()))
    }
}

/// Body of a successful `grant_type=refresh_token` exchange
#[derive(Debug, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl TokenGrant {
    /// The renewed session. Keeps `previous_refresh` when the server did not
    /// rotate the refresh token.
    pub fn into_session(
        self,
        previous_refresh: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Session, SessionError> {
        let expires_at = match self.expires_in {
            Some(secs) => Some(expiry_after(now, secs)?),
            None => None,
        };
        Ok(Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token.or(previous_refresh),
            expires_at,
        })
    }
}

fn expiry_after(now: DateTime<Utc>, secs: i64) -> Result<DateTime<Utc>, SessionError> {
    if secs < 0 {
        return Err(SessionError::InvalidExpiry(secs.to_string()));
    }
    Duration::try_seconds(secs)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| SessionError::InvalidExpiry(secs.to_string()))
}

/// Where to send the browser to start sign-in
pub fn authorize_url(config: &ProviderConfig, redirect_to: &str) -> String {
    format!(
        "{}/auth/v1/authorize?provider={}&redirect_to={}",
        config.supabase_url,
        OAUTH_PROVIDER,
        urlencoding::encode(redirect_to)
    )
}

/// Parse the implicit-flow fragment the identity provider redirects back with.
///
/// Returns `Ok(None)` when the fragment carries no auth parameters at all.
pub fn parse_redirect_fragment(
    fragment: &str,
    now: DateTime<Utc>,
) -> Result<Option<Session>, SessionError> {
    let fragment = fragment.trim_start_matches('#');
    let params: HashMap<String, String> = fragment
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = urlencoding::decode(&value.replace('+', " ")).ok()?.into_owned();
            Some((key.to_string(), value))
        })
        .collect();

    if let Some(description) = params
        .get("error_description")
        .or_else(|| params.get("error"))
    {
        return Err(SessionError::Denied(description.clone()));
    }

    let Some(access_token) = params.get("access_token").filter(|t| !t.is_empty()) else {
        if params.contains_key("refresh_token") || params.contains_key("expires_in") {
            return Err(SessionError::MissingToken);
        }
        return Ok(None);
    };

    let expires_at = match params.get("expires_in") {
        Some(raw) => {
            let secs = raw
                .parse::<i64>()
                .map_err(|_| SessionError::InvalidExpiry(raw.clone()))?;
            Some(expiry_after(now, secs)?)
        }
        None => None,
    };

    Ok(Some(Session {
        access_token: access_token.clone(),
        refresh_token: params.get("refresh_token").cloned(),
        expires_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn parses_tokens_and_expiry() {
        let session = parse_redirect_fragment(
            "#access_token=abc&refresh_token=def&expires_in=3600&token_type=bearer",
            now(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(session.access_token, "abc");
        assert_eq!(session.refresh_token.as_deref(), Some("def"));
        assert_eq!(session.expires_at, Some(now() + Duration::seconds(3600)));
        assert!(!session.is_expired(now()));
        assert!(session.is_expired(now() + Duration::seconds(3600)));
    }

    #[test]
    fn empty_fragment_is_no_session() {
        assert_eq!(parse_redirect_fragment("", now()), Ok(None));
        assert_eq!(parse_redirect_fragment("#section-2", now()), Ok(None));
    }

    #[test]
    fn provider_error_is_reported() {
        assert_eq!(
            parse_redirect_fragment("#error=access_denied&error_description=User+denied", now()),
            Err(SessionError::Denied("User denied".into()))
        );
    }

    #[test]
    fn refresh_without_access_token_is_malformed() {
        assert_eq!(
            parse_redirect_fragment("#refresh_token=def", now()),
            Err(SessionError::MissingToken)
        );
    }

    #[test]
    fn out_of_range_expiry_is_rejected() {
        assert_eq!(
            parse_redirect_fragment("#access_token=abc&expires_in=99999999999999", now()),
            Err(SessionError::InvalidExpiry("99999999999999".into()))
        );
        assert_eq!(
            parse_redirect_fragment("#access_token=abc&expires_in=soon", now()),
            Err(SessionError::InvalidExpiry("soon".into()))
        );
    }

    #[test]
    fn refresh_is_due_near_expiry_only_when_renewable() {
        let mut session = Session {
            access_token: "abc".into(),
            refresh_token: Some("def".into()),
            expires_at: Some(now() + Duration::seconds(3600)),
        };
        assert!(!session.needs_refresh(now()));
        assert!(session.needs_refresh(now() + Duration::seconds(3600 - 30)));
        assert!(session.needs_refresh(now() + Duration::seconds(7200)));

        session.refresh_token = None;
        assert!(!session.needs_refresh(now() + Duration::seconds(7200)));
    }

    #[test]
    fn token_grant_keeps_refresh_token_unless_rotated() {
        let grant: TokenGrant =
            serde_json::from_str(r#"{"access_token":"new","expires_in":3600}"#).unwrap();
        let session = grant.into_session(Some("old-refresh".into()), now()).unwrap();
        assert_eq!(session.access_token, "new");
        assert_eq!(session.refresh_token.as_deref(), Some("old-refresh"));
        assert_eq!(session.expires_at, Some(now() + Duration::seconds(3600)));

        let grant: TokenGrant =
            serde_json::from_str(r#"{"access_token":"new","refresh_token":"rotated"}"#).unwrap();
        let session = grant.into_session(Some("old-refresh".into()), now()).unwrap();
        assert_eq!(session.refresh_token.as_deref(), Some("rotated"));
        assert_eq!(session.expires_at, None);
    }

    #[test]
    fn authorize_url_encodes_redirect() {
        let config = ProviderConfig {
            supabase_url: "https://abc.supabase.co".into(),
            anon_key: "k".into(),
        };
        assert_eq!(
            authorize_url(&config, "https://app.example/"),
            "https://abc.supabase.co/auth/v1/authorize?provider=google&redirect_to=https%3A%2F%2Fapp.example%2F"
        );
    }

    #[test]
    fn session_survives_storage() {
        let session = Session {
            access_token: "abc".into(),
            refresh_token: None,
            expires_at: Some(now()),
        };
        assert_eq!(Session::from_json(&session.to_json()), Ok(session));
    }
}
