//! End-to-end session flows against a scripted in-memory bridge.
//!
//! These tests drive the public facade the way a host application would:
//! log in, pay, hit the recognized error codes, and let the expiry timer
//! fire under a paused tokio clock.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};
use tillpay_bridge::{
    CompletionCallback, Invocation, InvocationOutcome, NativeBridge, Operation, Session,
    SessionConfig, SessionError,
};
use tillpay_core::{Amount, Currency, LoginOutcome, TransactionRequest};

// =============================================================================
// Scripted Bridge
// =============================================================================

/// Bridge with scripted outcomes per operation, recording every call.
///
/// Unscripted operations answer `true`, matching the native side's
/// logout/prepare acknowledgements.
struct ScriptedBridge {
    responses: Mutex<HashMap<Operation, VecDeque<InvocationOutcome>>>,
    calls: Mutex<Vec<Invocation>>,
}

impl ScriptedBridge {
    fn new() -> Arc<Self> {
        Arc::new(ScriptedBridge {
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn respond(&self, operation: Operation, outcome: InvocationOutcome) {
        self.responses
            .lock()
            .unwrap()
            .entry(operation)
            .or_default()
            .push_back(outcome);
    }

    fn calls_of(&self, operation: Operation) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|invocation| invocation.operation == operation)
            .count()
    }
}

impl NativeBridge for ScriptedBridge {
    fn invoke(&self, invocation: Invocation, complete: CompletionCallback) {
        let outcome = self
            .responses
            .lock()
            .unwrap()
            .get_mut(&invocation.operation)
            .and_then(|queue| queue.pop_front())
            .unwrap_or(Ok(json!(true)));
        self.calls.lock().unwrap().push(invocation);
        complete(outcome);
    }
}

// =============================================================================
// Harness
// =============================================================================

fn harness() -> (Arc<ScriptedBridge>, Session) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let bridge = ScriptedBridge::new();
    let session = Session::new(bridge.clone(), SessionConfig::default());
    (bridge, session)
}

/// Lets spawned tasks (forced logouts, expiry) run to completion on the
/// current-thread test runtime.
async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

fn coffee() -> TransactionRequest {
    TransactionRequest::new(Amount::from_minor(1000), Currency::Eur, "Coffee")
}

// =============================================================================
// Login Flows
// =============================================================================

#[tokio::test]
async fn token_login_resolves_with_merchant_info() {
    let (bridge, session) = harness();
    bridge.respond(
        Operation::LoginWithToken,
        Ok(json!({"code": 1, "message": "ok", "merchantCode": "MX", "merchantCurrency": "EUR"})),
    );

    let outcome = session.login_with_token("tok123").await.unwrap();
    match outcome {
        LoginOutcome::Fresh(merchant) => {
            assert_eq!(merchant.merchant_code.as_deref(), Some("MX"));
            assert_eq!(merchant.merchant_currency.as_deref(), Some("EUR"));
        }
        LoginOutcome::Resumed => panic!("expected a fresh login"),
    }
    assert!(session.logged_in().await);
}

#[tokio::test]
async fn token_login_tolerates_unknown_payload_shape() {
    let (bridge, session) = harness();
    bridge.respond(Operation::LoginWithToken, Ok(json!({"merchant": "X"})));

    let outcome = session.login_with_token("tok123").await.unwrap();
    assert!(!outcome.is_resumed());
    assert!(session.logged_in().await);
}

#[tokio::test]
async fn already_logged_in_resumes_instead_of_failing() {
    let (bridge, session) = harness();
    bridge.respond(
        Operation::LoginWithToken,
        Err(json!("Error 0x00022: Merchant already logged in")),
    );

    let outcome = session.login_with_token("tok123").await.unwrap();
    assert_eq!(outcome, LoginOutcome::Resumed);
    assert!(session.logged_in().await);
}

// =============================================================================
// Checkout Flows
// =============================================================================

#[tokio::test]
async fn invalidated_checkout_session_forces_relogin() {
    let (bridge, session) = harness();
    bridge.respond(Operation::LoginWithToken, Ok(json!({})));
    bridge.respond(Operation::Pay, Err(json!("Error 0x000000205")));

    session.login_with_token("tok123").await.unwrap();
    let err = session.pay(&coffee()).await.unwrap_err();

    // The original rejection reaches the caller with its code intact
    assert_eq!(err.code(), Some(205));

    // ... and the facade logged out behind the scenes
    settle().await;
    assert_eq!(bridge.calls_of(Operation::Logout), 1);
    assert!(!session.logged_in().await);

    // The next attempt needs a fresh login, which succeeds
    bridge.respond(Operation::LoginWithToken, Ok(json!({})));
    bridge.respond(Operation::Pay, Ok(json!({"txcode": "TX2", "status": "SUCCESSFUL"})));
    let result = session.pay_with_token("tok123", &coffee()).await.unwrap();
    assert_eq!(result.txcode.as_deref(), Some("TX2"));
}

#[tokio::test]
async fn is_logged_in_inverts_a_false_answer() {
    let (bridge, session) = harness();
    bridge.respond(Operation::IsLoggedIn, Ok(json!(false)));

    let err = session.is_logged_in().await.unwrap_err();
    assert!(matches!(err, SessionError::NotLoggedIn));
    assert_eq!(err.to_string(), "Not logged in");
}

// =============================================================================
// Expiry Timer
// =============================================================================

#[tokio::test(start_paused = true)]
async fn expiry_timer_forces_logout() {
    let (bridge, session) = harness();
    bridge.respond(Operation::LoginWithToken, Ok(json!({})));

    session.login_with_token("tok123").await.unwrap();
    assert!(session.logged_in().await);

    tokio::time::advance(Duration::from_secs(2700)).await;
    settle().await;

    assert_eq!(bridge.calls_of(Operation::Logout), 1);
    assert!(!session.logged_in().await);
}

#[tokio::test(start_paused = true)]
async fn logout_cancels_pending_expiry() {
    let (bridge, session) = harness();
    bridge.respond(Operation::LoginWithToken, Ok(json!({})));

    session.login_with_token("tok123").await.unwrap();
    session.logout().await.unwrap();
    assert!(!session.logged_in().await);
    assert_eq!(bridge.calls_of(Operation::Logout), 1);

    // The canceled timer must not fire afterwards
    tokio::time::advance(Duration::from_secs(5400)).await;
    settle().await;
    assert_eq!(bridge.calls_of(Operation::Logout), 1);
}

#[tokio::test(start_paused = true)]
async fn fresh_login_replaces_pending_expiry() {
    let (bridge, session) = harness();
    bridge.respond(Operation::LoginWithToken, Ok(json!({})));
    bridge.respond(Operation::LoginWithToken, Ok(json!({})));

    session.login_with_token("tok1").await.unwrap();
    tokio::time::advance(Duration::from_secs(1000)).await;
    session.login_with_token("tok2").await.unwrap();

    // Past the first login's deadline: only the replacement timer is alive
    tokio::time::advance(Duration::from_secs(1701)).await;
    settle().await;
    assert_eq!(bridge.calls_of(Operation::Logout), 0);

    // The replacement fires at its own deadline
    tokio::time::advance(Duration::from_secs(1000)).await;
    settle().await;
    assert_eq!(bridge.calls_of(Operation::Logout), 1);
}

#[tokio::test(start_paused = true)]
async fn resume_leaves_existing_timer_running() {
    let (bridge, session) = harness();
    bridge.respond(Operation::LoginWithToken, Ok(json!({})));
    bridge.respond(
        Operation::LoginWithToken,
        Err(json!("Error 0x00022: Merchant already logged in")),
    );

    session.login_with_token("tok1").await.unwrap();
    tokio::time::advance(Duration::from_secs(1000)).await;

    let outcome = session.login_with_token("tok1").await.unwrap();
    assert!(outcome.is_resumed());

    // The original timer still fires on its original schedule
    tokio::time::advance(Duration::from_secs(1700)).await;
    settle().await;
    assert_eq!(bridge.calls_of(Operation::Logout), 1);
    assert!(!session.logged_in().await);
}

#[tokio::test(start_paused = true)]
async fn configured_lifetime_is_honored() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let bridge = ScriptedBridge::new();
    let session = Session::new(
        bridge.clone(),
        SessionConfig {
            token_lifetime: Duration::from_secs(60),
        },
    );
    bridge.respond(Operation::LoginWithToken, Ok(json!({})));

    session.login_with_token("tok123").await.unwrap();
    tokio::time::advance(Duration::from_secs(59)).await;
    settle().await;
    assert_eq!(bridge.calls_of(Operation::Logout), 0);

    tokio::time::advance(Duration::from_secs(1)).await;
    settle().await;
    assert_eq!(bridge.calls_of(Operation::Logout), 1);
}

// =============================================================================
// Settings
// =============================================================================

#[tokio::test]
async fn settings_resolves_with_native_payload() {
    let (bridge, session) = harness();
    bridge.respond(Operation::Login, Ok(json!({})));
    bridge.respond(Operation::Settings, Ok(Value::Null));

    session.login().await.unwrap();
    let payload = session.settings().await.unwrap();
    assert_eq!(payload, Value::Null);
    assert_eq!(bridge.calls_of(Operation::Settings), 1);
}
