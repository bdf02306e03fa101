//! Visitors, one per browser tab.
//!
//! A visitor is on exactly one route. Switching routes tears down the old
//! screen's controller and mounts a fresh one for the new route:
//!
//! - `/auth`    → [`SessionGate`] (teardown unsubscribes its session listener)
//! - `/payment` → [`PaymentForm`] (teardown discards it; a running settlement is not aborted)
//! - `/profile` → [`ProfileWizard`] (teardown discards all entered data)

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::SessionGate;
use crate::errors::AppError;
use crate::identity::{AuthClient, IdentityProvider};
use crate::navigation::{Navigator, Route};
use crate::payment::{PaymentForm, PaymentSettings};
use crate::profile::ProfileWizard;
use crate::sync::lock;

pub mod extract;
pub mod handlers;
pub mod registry;

pub use extract::CurrentVisitor;
pub use registry::VisitorRegistry;

/// Oldest history entries are dropped beyond this many.
pub const MAX_HISTORY: usize = 32;

/// Per-deployment settings every visitor's controllers are built from.
#[derive(Debug, Clone)]
pub struct VisitorSettings {
    pub redirect_url: String,
    pub payment: PaymentSettings,
}

enum Screen {
    Landing,
    Auth(Arc<SessionGate>),
    Payment(Arc<PaymentForm>),
    Profile(ProfileWizard),
}

impl Screen {
    fn teardown(self) {
        match self {
            Screen::Auth(gate) => gate.unmount(),
            Screen::Payment(_) | Screen::Profile(_) | Screen::Landing => {}
        }
    }
}

struct State {
    history: Vec<Route>,
    screen: Screen,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavigationView {
    pub visitor_id: Uuid,
    pub route: Route,
    pub history: Vec<Route>,
}

pub struct Visitor {
    id: Uuid,
    auth: Arc<AuthClient>,
    settings: Arc<VisitorSettings>,
    state: Mutex<State>,
    last_seen: Mutex<Instant>,
    this: Weak<Visitor>,
}

impl Visitor {
    pub fn new(id: Uuid, provider: Arc<dyn IdentityProvider>, settings: Arc<VisitorSettings>) -> Arc<Self> {
        Arc::new_cyclic(|this| Visitor {
            id,
            auth: Arc::new(AuthClient::new(provider)),
            settings,
            state: Mutex::new(State {
                history: vec![Route::Landing],
                screen: Screen::Landing,
            }),
            last_seen: Mutex::new(Instant::now()),
            this: this.clone(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Marks the visitor as active now.
    pub fn touch(&self) {
        *lock(&self.last_seen) = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        lock(&self.last_seen).elapsed()
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    pub fn current_route(&self) -> Route {
        let state = lock(&self.state);
        state.history.last().copied().unwrap_or(Route::Landing)
    }

    pub fn navigation(&self) -> NavigationView {
        let state = lock(&self.state);
        NavigationView {
            visitor_id: self.id,
            route: state.history.last().copied().unwrap_or(Route::Landing),
            history: state.history.clone(),
        }
    }

    /// Navigates and runs the mount-time work of the new screen.
    pub async fn open(&self, route: Route) {
        if let Some(gate) = self.switch_to(route) {
            gate.check_session().await;
        }
    }

    /// Synchronous part of navigation. Returns a newly mounted gate, which still
    /// needs its one-off session check. Navigating to the current route is a no-op.
    fn switch_to(&self, route: Route) -> Option<Arc<SessionGate>> {
        let (previous, gate) = {
            let mut state = lock(&self.state);
            if state.history.last() == Some(&route) {
                return None;
            }
            let (screen, gate) = self.mount(route);
            state.history.push(route);
            if state.history.len() > MAX_HISTORY {
                let excess = state.history.len() - MAX_HISTORY;
                state.history.drain(..excess);
            }
            (std::mem::replace(&mut state.screen, screen), gate)
        };
        previous.teardown();
        info!(visitor = %self.id, %route, "Navigated");
        gate
    }

    fn mount(&self, route: Route) -> (Screen, Option<Arc<SessionGate>>) {
        match route {
            Route::Landing => (Screen::Landing, None),
            Route::Auth => {
                let navigator: Arc<dyn Navigator> = Arc::new(VisitorNavigator(self.this.clone()));
                let gate = Arc::new(SessionGate::mount(
                    Arc::clone(&self.auth),
                    navigator,
                    self.settings.redirect_url.clone(),
                ));
                (Screen::Auth(Arc::clone(&gate)), Some(gate))
            }
            Route::Payment => (
                Screen::Payment(Arc::new(PaymentForm::new(self.settings.payment.clone()))),
                None,
            ),
            Route::Profile => (Screen::Profile(ProfileWizard::new()), None),
        }
    }

    /// Tears down whatever is mounted. Used when the visitor goes away.
    pub fn close(&self) {
        let previous = std::mem::replace(&mut lock(&self.state).screen, Screen::Landing);
        previous.teardown();
        debug!(
            visitor = %self.id,
            listeners = self.auth.listener_count(),
            "Visitor closed"
        );
    }

    fn not_open(route: Route) -> AppError {
        AppError::Conflict(format!("Open {route} first"))
    }

    pub fn gate(&self) -> Result<Arc<SessionGate>, AppError> {
        match &lock(&self.state).screen {
            Screen::Auth(gate) => Ok(Arc::clone(gate)),
            _ => Err(Self::not_open(Route::Auth)),
        }
    }

    pub fn payment_form(&self) -> Result<Arc<PaymentForm>, AppError> {
        match &lock(&self.state).screen {
            Screen::Payment(form) => Ok(Arc::clone(form)),
            _ => Err(Self::not_open(Route::Payment)),
        }
    }

    pub fn with_wizard<R>(&self, f: impl FnOnce(&mut ProfileWizard) -> R) -> Result<R, AppError> {
        match &mut lock(&self.state).screen {
            Screen::Profile(wizard) => Ok(f(wizard)),
            _ => Err(Self::not_open(Route::Profile)),
        }
    }
}

/// Lets controllers navigate their visitor without keeping it alive.
struct VisitorNavigator(Weak<Visitor>);

impl Navigator for VisitorNavigator {
    fn navigate(&self, route: Route) {
        let Some(visitor) = self.0.upgrade() else {
            return;
        };
        if let Some(gate) = visitor.switch_to(route) {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(async move { gate.check_session().await });
                }
                Err(_) => debug!("No runtime; skipping session check for {route}"),
            }
        }
    }
}
