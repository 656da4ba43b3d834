//! # Session Facade
//!
//! Single point of access to the native payment bridge; owns session
//! bookkeeping.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Session State Machine                             │
//! │                                                                         │
//! │  ┌────────────┐   login / login_with_token OK    ┌────────────┐        │
//! │  │ LoggedOut  │ ────────────────────────────────►│  LoggedIn  │        │
//! │  └────────────┘                                  └─────┬──────┘        │
//! │        ▲                                               │                │
//! │        │         logout()                              │                │
//! │        │         expiry timer fires                    │                │
//! │        │         pay fails with code 205               │                │
//! │        └───────────────────────────────────────────────┘                │
//! │                                                                         │
//! │  login_with_token on code 22 ("already logged in") stays LoggedIn      │
//! │  without touching the timer: the native session was simply resumed.    │
//! │                                                                         │
//! │  EXPIRY TIMER                                                          │
//! │  ────────────                                                          │
//! │  A fresh token login schedules one forced logout after the configured  │
//! │  token lifetime (default 2700 s). At most one timer is alive: any      │
//! │  fresh login cancels the previous one, and logout() cancels it too.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The facade never serializes concurrent operations: overlapping checkout
//! attempts are the native side's concern.

use std::sync::Arc;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::bridge::{call, NativeBridge, Operation};
use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use tillpay_core::{
    validation, LoginOutcome, MerchantInfo, TransactionRequest, TransactionResult,
};

// =============================================================================
// Session State
// =============================================================================

/// Mutable session bookkeeping, guarded by one lock so the single-timer
/// invariant holds under concurrent logins.
#[derive(Default)]
struct SessionState {
    /// Last observed login state.
    logged_in: bool,

    /// Handle of the pending forced-logout task, if one is scheduled.
    expiry_timer: Option<JoinHandle<()>>,
}

struct SessionInner {
    bridge: Arc<dyn NativeBridge>,
    config: SessionConfig,
    state: Mutex<SessionState>,
}

// =============================================================================
// Session Facade
// =============================================================================

/// The session facade over the native payment bridge.
///
/// Cheaply cloneable: clones share the same state, which is how the spawned
/// expiry task drives `logout()` on the session that scheduled it. Construct
/// one per application and inject it into callers; there is no ambient
/// global instance.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    /// Creates a session over the given bridge.
    pub fn new(bridge: Arc<dyn NativeBridge>, config: SessionConfig) -> Self {
        Session {
            inner: Arc::new(SessionInner {
                bridge,
                config,
                state: Mutex::new(SessionState::default()),
            }),
        }
    }

    /// Returns the locally tracked login flag (last observed state).
    ///
    /// Does not cross the bridge; use [`is_logged_in`](Self::is_logged_in)
    /// to ask the native side.
    pub async fn logged_in(&self) -> bool {
        self.inner.state.lock().await.logged_in
    }

    /// Presents the native merchant login screen.
    ///
    /// On success the local login flag is set and any stale expiry timer is
    /// canceled. No new timer is scheduled: an interactive login carries no
    /// token to expire.
    pub async fn login(&self) -> SessionResult<MerchantInfo> {
        let payload = call(self.inner.bridge.as_ref(), Operation::Login, Vec::new()).await?;
        let merchant = merchant_from_payload(payload);

        let mut state = self.inner.state.lock().await;
        if let Some(timer) = state.expiry_timer.take() {
            timer.abort();
        }
        state.logged_in = true;
        drop(state);

        info!(merchant_code = ?merchant.merchant_code, "merchant logged in");
        Ok(merchant)
    }

    /// Logs in a merchant with an access token acquired via OAuth.
    ///
    /// ## Flow
    /// 1. Native login with the token
    /// 2. Failure with code 22 ("already logged in") resolves as a resume;
    ///    the timer state is left untouched
    /// 3. Any other failure clears the login flag and propagates
    /// 4. A fresh success cancels any prior expiry timer and schedules the
    ///    forced logout after the configured token lifetime
    pub async fn login_with_token(&self, token: &str) -> SessionResult<LoginOutcome> {
        let result = call(
            self.inner.bridge.as_ref(),
            Operation::LoginWithToken,
            vec![Value::String(token.to_string())],
        )
        .await;

        match result {
            Ok(payload) => {
                let merchant = merchant_from_payload(payload);

                let mut state = self.inner.state.lock().await;
                if let Some(timer) = state.expiry_timer.take() {
                    timer.abort();
                }
                state.logged_in = true;
                state.expiry_timer = Some(self.spawn_expiry());
                drop(state);

                info!(
                    merchant_code = ?merchant.merchant_code,
                    lifetime_secs = self.inner.config.token_lifetime.as_secs(),
                    "merchant logged in with token"
                );
                Ok(LoginOutcome::Fresh(merchant))
            }
            Err(err) if err.is_already_logged_in() => {
                debug!("merchant already logged in, resuming session");
                self.inner.state.lock().await.logged_in = true;
                Ok(LoginOutcome::Resumed)
            }
            Err(err) => {
                self.inner.state.lock().await.logged_in = false;
                Err(err)
            }
        }
    }

    /// Initiates a payment via the card terminal.
    ///
    /// This opens a native modal view guiding through the payment process.
    /// The amount crosses the bridge as its decimal string form and the
    /// skip-success-screen flag as 1/0.
    ///
    /// A failure with code 205 means the checkout session was invalidated;
    /// a logout is triggered fire-and-forget so the next attempt starts
    /// from a clean login, and the original failure still propagates.
    pub async fn pay(&self, request: &TransactionRequest) -> SessionResult<TransactionResult> {
        validation::validate_request(request)?;

        let result = call(self.inner.bridge.as_ref(), Operation::Pay, pay_args(request)).await;

        match result {
            Ok(payload) => Ok(transaction_from_payload(payload)),
            Err(err) => {
                if err.is_session_invalidating() {
                    warn!(code = ?err.code(), "checkout session invalidated, forcing logout");
                    let session = self.clone();
                    tokio::spawn(async move {
                        if let Err(logout_err) = session.logout().await {
                            warn!(%logout_err, "forced logout failed");
                        }
                    });
                }
                Err(err)
            }
        }
    }

    /// Logs in with a token, then pays.
    ///
    /// The composed result is returned: a login failure fails the whole
    /// operation the same way it would fail [`login_with_token`](Self::login_with_token).
    pub async fn pay_with_token(
        &self,
        token: &str,
        request: &TransactionRequest,
    ) -> SessionResult<TransactionResult> {
        self.login_with_token(token).await?;
        self.pay(request).await
    }

    /// Hints that a checkout is imminent so the native side can wake a
    /// connected card terminal. The success payload carries nothing useful.
    pub async fn prepare_to_pay(&self) -> SessionResult<()> {
        call(self.inner.bridge.as_ref(), Operation::PreparePay, Vec::new()).await?;
        Ok(())
    }

    /// Logs out the current merchant.
    ///
    /// Any pending expiry timer is canceled before the native call; on
    /// success the local login flag is cleared. A native failure leaves the
    /// flag unchanged (the timer stays canceled).
    pub async fn logout(&self) -> SessionResult<()> {
        {
            let mut state = self.inner.state.lock().await;
            if let Some(timer) = state.expiry_timer.take() {
                timer.abort();
            }
        }

        call(self.inner.bridge.as_ref(), Operation::Logout, Vec::new()).await?;

        self.inner.state.lock().await.logged_in = false;
        info!("merchant logged out");
        Ok(())
    }

    /// Asks the native side whether a merchant login is active.
    ///
    /// The answer updates the local flag and determines the outcome:
    /// `Ok(true)` when logged in, otherwise [`SessionError::NotLoggedIn`].
    /// Callers branch on the error, never on a false resolution.
    pub async fn is_logged_in(&self) -> SessionResult<bool> {
        let payload = call(self.inner.bridge.as_ref(), Operation::IsLoggedIn, Vec::new()).await?;
        let active = payload.as_bool().unwrap_or(false);

        self.inner.state.lock().await.logged_in = active;

        if active {
            Ok(true)
        } else {
            Err(SessionError::NotLoggedIn)
        }
    }

    /// Opens the native checkout preferences screen.
    ///
    /// The merchant can configure checkout options and set up or change the
    /// card terminal. The native side requires an active login and no
    /// checkout in progress; that precondition is enforced there, not here.
    /// Resolves with whatever the native side returns.
    pub async fn settings(&self) -> SessionResult<Value> {
        call(self.inner.bridge.as_ref(), Operation::Settings, Vec::new()).await
    }

    /// Spawns the forced-logout task for a fresh token login.
    ///
    /// Caller holds the state lock and stores the returned handle.
    fn spawn_expiry(&self) -> JoinHandle<()> {
        let session = self.clone();
        let lifetime = self.inner.config.token_lifetime;
        tokio::spawn(async move {
            tokio::time::sleep(lifetime).await;

            // Remove our own handle first: logout() aborts whatever handle
            // is stored, which must not be the task performing the logout.
            {
                let mut state = session.inner.state.lock().await;
                state.expiry_timer = None;
            }

            info!("token lifetime elapsed, forcing logout");
            if let Err(err) = session.logout().await {
                warn!(%err, "scheduled forced logout failed");
            }
        })
    }
}

// =============================================================================
// Payload Marshalling
// =============================================================================

/// Builds the positional argument list for a checkout.
///
/// Order is part of the bridge contract: amount (decimal string), currency
/// code, title, foreign transaction id, skip-success-screen as 1/0, receipt
/// e-mail, receipt phone. Absent optionals cross as JSON null.
fn pay_args(request: &TransactionRequest) -> Vec<Value> {
    vec![
        Value::String(request.amount.to_string()),
        Value::String(request.currency.to_string()),
        Value::String(request.title.clone()),
        opt_string(request.foreign_transaction_id.as_deref()),
        Value::from(if request.skip_success_screen { 1 } else { 0 }),
        opt_string(request.receipt_email.as_deref()),
        opt_string(request.receipt_phone.as_deref()),
    ]
}

fn opt_string(value: Option<&str>) -> Value {
    match value {
        Some(s) => Value::String(s.to_string()),
        None => Value::Null,
    }
}

fn merchant_from_payload(payload: Value) -> MerchantInfo {
    serde_json::from_value(payload).unwrap_or_else(|err| {
        debug!(%err, "login payload did not match the known shape");
        MerchantInfo::default()
    })
}

fn transaction_from_payload(payload: Value) -> TransactionResult {
    serde_json::from_value(payload).unwrap_or_else(|err| {
        debug!(%err, "checkout payload did not match the known shape");
        TransactionResult::default()
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
