//! Session gate and Google sign-in exchange.
//!
//! A non-empty token in the slot means "signed in"; nothing is verified
//! locally. Signing in trades the provider access token for a backend
//! session token. Both network calls run in order, and the slot is written
//! only after both have succeeded.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::{AuthError, StorageResult};
use crate::storage::{KeyValueStore, SharedStore, TOKEN_KEY, USERNAME_KEY};

/// The only failure text the login view ever shows.
pub const SIGN_IN_FAILED: &str = "Login failed. Please try again.";

const FALLBACK_NAME: &str = "Guest";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

/// Profile fields read from the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
}

impl Profile {
    /// First word of the profile name, or "Guest".
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .and_then(|name| name.split_whitespace().next())
            .unwrap_or(FALLBACK_NAME)
            .to_string()
    }
}

/// Values written to the slot after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub token: String,
    pub display_name: String,
}

/// Remote side of the sign-in flow.
pub trait IdentityClient: Send + Sync {
    fn fetch_profile(&self, access_token: &str) -> Result<Profile, AuthError>;

    /// Trades the provider access token for a backend session token.
    fn exchange(&self, access_token: &str) -> Result<String, AuthError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExchangeRequest<'a> {
    token_id: &'a str,
}

#[derive(Deserialize)]
struct ExchangeResponse {
    #[serde(default)]
    token: Option<String>,
}

/// Blocking HTTP client for the provider profile endpoint and the backend.
#[derive(Debug, Clone)]
pub struct HttpIdentityClient {
    http: Client,
    userinfo_url: String,
    backend_url: String,
}

impl HttpIdentityClient {
    pub fn new(userinfo_url: impl Into<String>, backend_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            userinfo_url: userinfo_url.into(),
            backend_url: backend_url.into(),
        }
    }

    fn login_url(&self) -> String {
        format!("{}/api/google-login", self.backend_url.trim_end_matches('/'))
    }
}

fn decode<T: serde::de::DeserializeOwned>(endpoint: &str, body: &str) -> Result<T, AuthError> {
    serde_json::from_str(body).map_err(|e| AuthError::Decode {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })
}

impl IdentityClient for HttpIdentityClient {
    fn fetch_profile(&self, access_token: &str) -> Result<Profile, AuthError> {
        let body = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()?
            .error_for_status()?
            .text()?;
        decode(&self.userinfo_url, &body)
    }

    fn exchange(&self, access_token: &str) -> Result<String, AuthError> {
        let url = self.login_url();
        let body = self
            .http
            .post(&url)
            .json(&ExchangeRequest {
                token_id: access_token,
            })
            .send()?
            .error_for_status()?
            .text()?;
        let response: ExchangeResponse = decode(&url, &body)?;
        response
            .token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)
    }
}

/// Runs profile fetch then token exchange. Writes nothing.
pub fn sign_in(client: &dyn IdentityClient, access_token: &str) -> Result<SignedIn, AuthError> {
    if access_token.trim().is_empty() {
        return Err(AuthError::Provider("no access token".to_string()));
    }
    let profile = client.fetch_profile(access_token)?;
    let token = client.exchange(access_token)?;
    Ok(SignedIn {
        token,
        display_name: profile.display_name(),
    })
}

/// Route guard over the session slot.
#[derive(Clone)]
pub struct SessionGate {
    slot: SharedStore,
}

impl SessionGate {
    pub fn new(slot: SharedStore) -> Self {
        Self { slot }
    }

    pub fn is_authenticated(&self) -> bool {
        match self.slot.get(TOKEN_KEY) {
            Ok(token) => token.is_some_and(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "failed to read session token");
                false
            }
        }
    }

    pub fn route(&self) -> Route {
        if self.is_authenticated() {
            Route::Dashboard
        } else {
            Route::Login
        }
    }

    pub fn display_name(&self) -> Option<String> {
        self.slot.get(USERNAME_KEY).ok().flatten()
    }

    /// Stores the display name, then the session token.
    ///
    /// If the token cannot be written the previous display name is put back,
    /// so a failed sign-in leaves the slot as it was.
    pub fn establish(&self, session: &SignedIn) -> StorageResult<()> {
        let previous = self.slot.get(USERNAME_KEY)?;
        self.slot.set(USERNAME_KEY, &session.display_name)?;

        if let Err(e) = self.slot.set(TOKEN_KEY, &session.token) {
            let restored = match &previous {
                Some(name) => self.slot.set(USERNAME_KEY, name),
                None => self.slot.remove(USERNAME_KEY),
            };
            if let Err(restore) = restored {
                warn!(error = %restore, "failed to restore display name");
            }
            return Err(e);
        }

        info!(user = %session.display_name, "signed in");
        Ok(())
    }

    /// Drops the session token. The display name is left in place.
    pub fn logout(&self) -> StorageResult<()> {
        self.slot.remove(TOKEN_KEY)?;
        info!("signed out");
        Ok(())
    }
}

/// Login view state: a loading flag, an error line, and the in-flight call.
#[derive(Default)]
pub struct SignInFlow {
    pending: Option<Receiver<Result<SignedIn, AuthError>>>,
    error: Option<String>,
}

impl SignInFlow {
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Starts the exchange on a worker thread.
    ///
    /// Returns `false` without doing anything while a call is in flight.
    pub fn start(&mut self, client: Arc<dyn IdentityClient>, access_token: String) -> bool {
        if self.is_loading() {
            return false;
        }
        self.error = None;

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(sign_in(client.as_ref(), &access_token));
        });
        self.pending = Some(rx);
        true
    }

    /// Collects a finished call, if any, and stores the session on success.
    ///
    /// Returns the route to show next once the call has finished.
    pub fn poll(&mut self, gate: &SessionGate) -> Option<Route> {
        let rx = self.pending.as_ref()?;
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                Err(AuthError::Provider("sign-in worker exited".to_string()))
            }
        };
        self.pending = None;

        match result.and_then(|session| gate.establish(&session).map_err(AuthError::from)) {
            Ok(()) => Some(Route::Dashboard),
            Err(e) => {
                error!(error = %e, "sign-in failed");
                self.error = Some(SIGN_IN_FAILED.to_string());
                Some(Route::Login)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    use super::*;
    use crate::error::StorageError;
    use crate::storage::MemoryStore;

    struct FakeClient {
        name: Option<&'static str>,
        token: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl FakeClient {
        fn new(name: Option<&'static str>, token: Option<&'static str>) -> Self {
            Self {
                name,
                token,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl IdentityClient for FakeClient {
        fn fetch_profile(&self, _access_token: &str) -> Result<Profile, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Profile {
                name: self.name.map(str::to_string),
            })
        }

        fn exchange(&self, _access_token: &str) -> Result<String, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.token.map(str::to_string).ok_or(AuthError::MissingToken)
        }
    }

    /// Slot that refuses writes to the session token.
    struct TokenWriteFails(MemoryStore);

    impl KeyValueStore for TokenWriteFails {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            if key == TOKEN_KEY {
                return Err(StorageError::Io(std::io::Error::other("read-only")));
            }
            self.0.set(key, value)
        }

        fn remove(&self, key: &str) -> StorageResult<()> {
            self.0.remove(key)
        }
    }

    fn wait_for(flow: &mut SignInFlow, gate: &SessionGate) -> Route {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(route) = flow.poll(gate) {
                return route;
            }
            assert!(Instant::now() < deadline, "sign-in never finished");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn display_name_is_first_word_or_guest() {
        let full = Profile {
            name: Some("Ada Lovelace".to_string()),
        };
        assert_eq!(full.display_name(), "Ada");
        assert_eq!(Profile::default().display_name(), "Guest");
        let blank = Profile {
            name: Some("  ".to_string()),
        };
        assert_eq!(blank.display_name(), "Guest");
    }

    #[test]
    fn gate_requires_non_empty_token() {
        let slot = MemoryStore::shared();
        let gate = SessionGate::new(slot.clone());
        assert_eq!(gate.route(), Route::Login);

        slot.set(TOKEN_KEY, "").unwrap();
        assert_eq!(gate.route(), Route::Login);

        slot.set(TOKEN_KEY, "opaque").unwrap();
        assert_eq!(gate.route(), Route::Dashboard);

        gate.logout().unwrap();
        assert_eq!(gate.route(), Route::Login);
    }

    #[test]
    fn successful_sign_in_stores_token_and_name() {
        let slot = MemoryStore::shared();
        let gate = SessionGate::new(slot.clone());
        let client = Arc::new(FakeClient::new(Some("Grace Hopper"), Some("session-1")));

        let mut flow = SignInFlow::default();
        assert!(flow.start(client.clone(), "provider-token".to_string()));
        assert!(flow.is_loading());

        assert_eq!(wait_for(&mut flow, &gate), Route::Dashboard);
        assert!(!flow.is_loading());
        assert_eq!(flow.error(), None);
        assert_eq!(slot.get(TOKEN_KEY).unwrap().as_deref(), Some("session-1"));
        assert_eq!(gate.display_name().as_deref(), Some("Grace"));
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failed_exchange_writes_nothing() {
        let slot = MemoryStore::shared();
        let gate = SessionGate::new(slot.clone());
        let client = Arc::new(FakeClient::new(Some("Grace Hopper"), None));

        let mut flow = SignInFlow::default();
        flow.start(client, "provider-token".to_string());

        assert_eq!(wait_for(&mut flow, &gate), Route::Login);
        assert_eq!(flow.error(), Some(SIGN_IN_FAILED));
        assert!(!flow.is_loading());
        assert_eq!(slot.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(slot.get(USERNAME_KEY).unwrap(), None);
    }

    #[test]
    fn failed_token_write_restores_display_name() {
        let slot = Arc::new(TokenWriteFails(MemoryStore::default()));
        let gate = SessionGate::new(slot.clone());
        let session = SignedIn {
            token: "session-1".to_string(),
            display_name: "Grace".to_string(),
        };

        assert!(gate.establish(&session).is_err());
        assert_eq!(slot.get(USERNAME_KEY).unwrap(), None);

        slot.set(USERNAME_KEY, "Ada").unwrap();
        assert!(gate.establish(&session).is_err());
        assert_eq!(gate.display_name().as_deref(), Some("Ada"));
        assert_eq!(gate.route(), Route::Login);
    }

    #[test]
    fn empty_provider_token_fails_before_any_call() {
        let client = FakeClient::new(Some("Grace"), Some("t"));
        let err = sign_in(&client, "").unwrap_err();
        assert!(matches!(err, AuthError::Provider(_)));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn exchange_request_uses_token_id_field() {
        let body = serde_json::to_value(ExchangeRequest { token_id: "abc" }).unwrap();
        assert_eq!(body, serde_json::json!({ "tokenId": "abc" }));

        let response: ExchangeResponse = serde_json::from_str(r#"{"token":"xyz"}"#).unwrap();
        assert_eq!(response.token.as_deref(), Some("xyz"));
    }

    #[test]
    fn login_url_joins_backend_base() {
        let client = HttpIdentityClient::new("https://idp.test/userinfo", "https://api.test/");
        assert_eq!(client.login_url(), "https://api.test/api/google-login");
    }
}
