use std::sync::Mutex;

use artfolio_store::{AuthenticatedUser, NewUser};
use tracing::{error, info, warn};

use crate::commands::user_message;
use crate::state::AppState;

/// Register a new account.  `false` covers every failure: a taken email,
/// a blank field, or storage trouble.
pub fn sign_up(state: &Mutex<AppState>, request: NewUser) -> bool {
    let guard = match state.lock() {
        Ok(guard) => guard,
        Err(e) => {
            error!(error = %e, "lock poisoned");
            return false;
        }
    };
    let Ok(db) = guard.db() else {
        return false;
    };

    match db.register_user(&request) {
        Ok(true) => {
            info!(email = %request.email, role = %request.role, "signed up");
            true
        }
        Ok(false) => {
            warn!(email = %request.email, "email already exists");
            false
        }
        Err(e) => {
            error!(error = %e, email = %request.email, "sign up failed");
            false
        }
    }
}

/// Check credentials and start a session.
pub fn sign_in(
    state: &Mutex<AppState>,
    email: &str,
    password: &str,
) -> Result<AuthenticatedUser, String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;

    let user = guard
        .db()?
        .authenticate(email, password)
        .map_err(|e| user_message("sign in", e))?
        .ok_or_else(|| "Invalid email or password".to_string())?;

    info!(email = %user.email, role = %user.role, "signed in");
    guard.session = Some(user.clone());
    Ok(user)
}

pub fn sign_out(state: &Mutex<AppState>) -> Result<(), String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    if let Some(session) = guard.session.take() {
        info!(email = %session.email, "signed out");
    }
    Ok(())
}

pub fn current_session(state: &Mutex<AppState>) -> Option<AuthenticatedUser> {
    state.lock().ok().and_then(|guard| guard.session.clone())
}
