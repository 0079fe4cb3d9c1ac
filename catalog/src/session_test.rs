use super::*;
use std::sync::Mutex;

struct MockGateway {
    sign_up: Mutex<Vec<Result<Principal, GatewayError>>>,
    sign_in: Mutex<Vec<Result<Principal, GatewayError>>>,
    seen_credentials: Mutex<Vec<Credentials>>,
}

impl MockGateway {
    fn new() -> Self {
        Self { sign_up: Mutex::new(Vec::new()), sign_in: Mutex::new(Vec::new()), seen_credentials: Mutex::new(Vec::new()) }
    }

    fn with_sign_up(self, result: Result<Principal, GatewayError>) -> Self {
        self.sign_up.lock().expect("mock mutex should lock").push(result);
        self
    }

    fn with_sign_in(self, result: Result<Principal, GatewayError>) -> Self {
        self.sign_in.lock().expect("mock mutex should lock").push(result);
        self
    }
}

#[async_trait::async_trait]
impl AuthGateway for MockGateway {
    async fn sign_up(&self, _user: &NewUser) -> Result<Principal, GatewayError> {
        self.sign_up.lock().expect("mock mutex should lock").remove(0)
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Principal, GatewayError> {
        self.seen_credentials
            .lock()
            .expect("mock mutex should lock")
            .push(credentials.clone());
        self.sign_in.lock().expect("mock mutex should lock").remove(0)
    }
}

fn ann() -> Principal {
    Principal { id: "42".into(), name: "Ann".into(), email: "a@b.com".into() }
}

fn credentials() -> Credentials {
    Credentials { email: "a@b.com".into(), password: "secret".into(), remember_me: true }
}

fn new_user() -> NewUser {
    NewUser { name: "Ann".into(), email: "a@b.com".into(), password: "secret".into() }
}

fn rejected(status: u16, message: &str) -> GatewayError {
    GatewayError::Rejected { status, message: Some(message.into()) }
}

// =============================================================================
// reduce
// =============================================================================

#[test]
fn pending_sets_loading_without_effects() {
    let mut state = SessionState::default();
    assert!(reduce(&mut state, SessionAction::LoginPending).is_empty());
    assert!(state.loading);

    let mut state = SessionState::default();
    assert!(reduce(&mut state, SessionAction::RegisterPending).is_empty());
    assert!(state.loading);
}

#[test]
fn register_fulfilled_sets_only_name() {
    let mut state = SessionState { loading: true, error: "old".into(), ..SessionState::default() };
    let effects = reduce(&mut state, SessionAction::RegisterFulfilled(ann()));
    assert_eq!(state.name, "Ann");
    assert!(state.id.is_empty());
    assert!(state.email.is_empty());
    assert!(!state.loading);
    assert!(state.error.is_empty());
    assert_eq!(effects, vec![Effect::Notify(Notification::success(REGISTERED_MESSAGE))]);
}

#[test]
fn register_rejected_keeps_identity_fields() {
    let mut state = SessionState { id: "1".into(), name: "Old".into(), loading: true, ..SessionState::default() };
    let effects = reduce(&mut state, SessionAction::RegisterRejected("Email taken".into()));
    assert_eq!(state.id, "1");
    assert_eq!(state.name, "Old");
    assert_eq!(state.error, "Email taken");
    assert!(!state.loading);
    assert_eq!(effects, vec![Effect::Notify(Notification::error("Email taken"))]);
}

#[test]
fn login_fulfilled_mirrors_principal_into_cookies_then_refreshes() {
    let mut state = SessionState { loading: true, error: "stale".into(), ..SessionState::default() };
    let effects = reduce(&mut state, SessionAction::LoginFulfilled(ann()));
    assert_eq!(
        state,
        SessionState { id: "42".into(), name: "Ann".into(), email: "a@b.com".into(), loading: false, error: String::new() }
    );
    assert_eq!(
        effects,
        vec![
            Effect::SetCookie { name: "id", value: "42".into() },
            Effect::SetCookie { name: "name", value: "Ann".into() },
            Effect::SetCookie { name: "email", value: "a@b.com".into() },
            Effect::RefreshMovies,
        ]
    );
}

#[test]
fn login_rejected_uses_fixed_message() {
    let mut state = SessionState { loading: true, ..SessionState::default() };
    let effects = reduce(&mut state, SessionAction::LoginRejected);
    assert_eq!(state.error, LOGIN_FAILED_MESSAGE);
    assert!(!state.loading);
    assert_eq!(effects, vec![Effect::Notify(Notification::error("Incorrect user or password"))]);
}

#[test]
fn logout_clears_identity_but_not_status() {
    let mut state = SessionState {
        id: "42".into(),
        name: "Ann".into(),
        email: "a@b.com".into(),
        loading: true,
        error: "boom".into(),
    };
    assert!(reduce(&mut state, SessionAction::Logout).is_empty());
    assert!(state.id.is_empty() && state.name.is_empty() && state.email.is_empty());
    assert!(state.loading);
    assert_eq!(state.error, "boom");
}

#[test]
fn logout_on_empty_state_is_still_empty() {
    let mut state = SessionState::default();
    reduce(&mut state, SessionAction::Logout);
    assert_eq!(state, SessionState::default());
}

#[test]
fn clear_cookie_effects_cover_token() {
    let names: Vec<&str> = clear_cookie_effects()
        .into_iter()
        .map(|effect| match effect {
            Effect::SetCookie { name, value } => {
                assert!(value.is_empty());
                name
            }
            other => panic!("unexpected effect {other:?}"),
        })
        .collect();
    assert_eq!(names, vec!["id", "name", "email", "token"]);
}

#[test]
fn has_user_checks_any_identity_field() {
    assert!(!SessionState::default().has_user());
    assert!(SessionState { name: "Ann".into(), ..SessionState::default() }.has_user());
    assert!(!SessionState { error: "x".into(), loading: true, ..SessionState::default() }.has_user());
}

// =============================================================================
// SessionStore
// =============================================================================

#[tokio::test]
async fn login_success_matches_upstream_payload() {
    let gateway = MockGateway::new().with_sign_in(Ok(ann()));
    let mut store = SessionStore::new();

    let dispatch = store.login(&gateway, &credentials()).await;

    assert_eq!(dispatch.result.unwrap(), ann());
    assert_eq!(store.user().id, "42");
    assert_eq!(store.user().name, "Ann");
    assert_eq!(store.user().email, "a@b.com");
    assert!(!store.is_loading());
    assert!(store.error().is_empty());
    assert!(dispatch.effects.contains(&Effect::SetCookie { name: "id", value: "42".into() }));
    assert_eq!(dispatch.effects.last(), Some(&Effect::RefreshMovies));

    let seen = gateway.seen_credentials.lock().unwrap();
    assert_eq!(seen.as_slice(), &[credentials()]);
}

#[tokio::test]
async fn login_failure_ignores_upstream_detail() {
    let gateway = MockGateway::new().with_sign_in(Err(rejected(401, "token expired")));
    let mut store = SessionStore::new();

    let dispatch = store.login(&gateway, &credentials()).await;

    assert!(dispatch.result.is_err());
    assert_eq!(store.error(), "Incorrect user or password");
    assert!(!store.is_loading());
    assert!(!store.has_user());
    assert!(!dispatch.effects.contains(&Effect::RefreshMovies));
}

#[tokio::test]
async fn login_network_failure_uses_fixed_message() {
    let gateway = MockGateway::new().with_sign_in(Err(GatewayError::Request("connection reset".into())));
    let mut store = SessionStore::new();

    store.login(&gateway, &credentials()).await;

    assert_eq!(store.error(), LOGIN_FAILED_MESSAGE);
}

#[tokio::test]
async fn register_failure_stores_upstream_message_verbatim() {
    let gateway = MockGateway::new().with_sign_up(Err(rejected(409, "Email already registered")));
    let mut store = SessionStore::new();

    let dispatch = store.register(&gateway, &new_user()).await;

    assert!(dispatch.result.is_err());
    assert_eq!(store.error(), "Email already registered");
    assert!(!store.is_loading());
    assert_eq!(dispatch.effects, vec![Effect::Notify(Notification::error("Email already registered"))]);
}

#[tokio::test]
async fn register_success_notifies_and_sets_name() {
    let gateway = MockGateway::new().with_sign_up(Ok(Principal { name: "Ann".into(), ..Principal::default() }));
    let mut store = SessionStore::new();

    let dispatch = store.register(&gateway, &new_user()).await;

    assert!(dispatch.result.is_ok());
    assert_eq!(store.user().name, "Ann");
    assert!(store.user().id.is_empty());
    assert_eq!(dispatch.effects, vec![Effect::Notify(Notification::success(REGISTERED_MESSAGE))]);
}

#[tokio::test]
async fn later_outcome_wins() {
    let gateway = MockGateway::new()
        .with_sign_in(Ok(ann()))
        .with_sign_in(Err(rejected(401, "nope")));
    let mut store = SessionStore::new();

    store.login(&gateway, &credentials()).await;
    store.login(&gateway, &credentials()).await;

    assert_eq!(store.error(), LOGIN_FAILED_MESSAGE);
    // A failed login does not evict the previous identity.
    assert_eq!(store.user().id, "42");
}

#[tokio::test]
async fn logout_after_login_resets_identity() {
    let gateway = MockGateway::new().with_sign_in(Ok(ann()));
    let mut store = SessionStore::new();
    store.login(&gateway, &credentials()).await;

    store.logout();

    assert!(!store.has_user());
    assert_eq!(store.into_state(), SessionState::default());
}

#[test]
fn from_state_resumes_preloaded_session() {
    let state = SessionState { id: "9".into(), name: "Zed".into(), ..SessionState::default() };
    let store = SessionStore::from_state(state.clone());
    assert_eq!(store.user(), &state);
    assert!(store.has_user());
}
