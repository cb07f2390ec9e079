//! Local stand-in for the identity provider.
//!
//! The signed-in principal is kept in `session.json` under the data
//! directory. Signing in for the first time creates the user's profile.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{OrderError, Result};
use crate::models::UserProfile;
use crate::state::{generate_document_id, write_json, FileStore};
use crate::validation::{validate_email, validate_name};

/// Display name given to profiles created without one.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// The authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub uid: String,
    pub email: String,
}

/// Sign in as `email`, creating a profile on first sign-in.
///
/// An existing profile is reused as-is; `name` only applies to new ones.
pub fn sign_in(
    session_path: &Path,
    store: &FileStore,
    email: &str,
    name: Option<&str>,
) -> Result<UserProfile> {
    let email = email.trim();
    validate_email(email)?;

    let profile = match store.find_profile_by_email(email)? {
        Some(profile) => profile,
        None => {
            let name = match name.map(str::trim) {
                Some(name) => {
                    validate_name(name)?;
                    name.to_string()
                }
                None => DEFAULT_DISPLAY_NAME.to_string(),
            };
            let profile =
                UserProfile::new(generate_document_id(), email.to_string(), name, Utc::now());
            store.put_profile(&profile)?;
            info!(uid = %profile.uid, "profile created on first sign-in");
            profile
        }
    };

    let session = Session {
        uid: profile.uid.clone(),
        email: profile.email.clone(),
    };
    write_json(session_path, &session)?;
    info!(uid = %session.uid, "signed in");
    Ok(profile)
}

/// Forget the current principal. Signing out twice is not an error.
pub fn sign_out(session_path: &Path) -> Result<()> {
    match fs::remove_file(session_path) {
        Ok(()) => {
            info!("signed out");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// The current principal, if any. An unreadable session counts as signed out.
pub fn current_user(session_path: &Path) -> Result<Option<Session>> {
    let content = match fs::read_to_string(session_path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    match serde_json::from_str(&content) {
        Ok(session) => Ok(Some(session)),
        Err(e) => {
            warn!(error = %e, "ignoring unreadable session");
            Ok(None)
        }
    }
}

/// The current principal, or `NotSignedIn` naming the blocked action.
pub fn require_user(session_path: &Path, action: &'static str) -> Result<Session> {
    current_user(session_path)?.ok_or(OrderError::NotSignedIn(action))
}
