//! Identity: registration, sign-in and profile fields.

use artfolio_shared::error::CredentialError;
use artfolio_shared::password::{hash_password, verify_password};
use artfolio_shared::types::{normalize_email, Role};
use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::{AuthenticatedUser, NewUser, Profile, User, WriteOutcome};

impl Database {
    /// Create an account.  Returns `false` if the email is already taken.
    pub fn register_user(&self, user: &NewUser) -> Result<bool> {
        user.validate()?;
        let email = normalize_email(&user.email);
        let password_hash = hash_password(&user.password)?;

        let affected = self.conn().execute(
            "INSERT INTO users (firstname, lastname, email, password, mobile, role)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(email) DO NOTHING",
            params![
                user.first_name.trim(),
                user.last_name.trim(),
                email,
                password_hash,
                user.mobile.trim(),
                user.role.as_str(),
            ],
        )?;

        if affected == 0 {
            tracing::debug!(email = %email, "registration refused, email taken");
            return Ok(false);
        }
        tracing::info!(email = %email, role = %user.role, "user registered");
        Ok(true)
    }

    /// Check credentials.  `None` for an unknown email or a wrong password;
    /// the two cases are indistinguishable to the caller.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Option<AuthenticatedUser>> {
        let email = normalize_email(email);

        let row = self
            .conn()
            .query_row(
                "SELECT firstname, lastname, profile_image, role, password
                 FROM users WHERE email = ?1",
                params![email],
                |row| {
                    let first: String = row.get(0)?;
                    let last: String = row.get(1)?;
                    let avatar: Option<String> = row.get(2)?;
                    let role = parse_role(row, 3)?;
                    let hash: String = row.get(4)?;
                    Ok((format!("{first} {last}"), avatar, role, hash))
                },
            )
            .optional()?;

        let Some((display_name, avatar, role, hash)) = row else {
            tracing::debug!(email = %email, "sign-in failed");
            return Ok(None);
        };

        match verify_password(password, &hash) {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(email = %email, "sign-in failed");
                return Ok(None);
            }
            Err(CredentialError::MalformedHash) => {
                // Rows written before hashing was introduced.
                tracing::warn!(email = %email, "stored password is not a valid hash");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Some(AuthenticatedUser {
            email,
            display_name,
            avatar_path: avatar.filter(|p| !p.is_empty()),
            role,
        }))
    }

    /// Fetch a full user record (without the password hash).
    pub fn get_user(&self, email: &str) -> Result<User> {
        self.conn()
            .query_row(
                "SELECT id, firstname, lastname, email, role, mobile, profile_image, bio,
                        social_links
                 FROM users WHERE email = ?1",
                params![normalize_email(email)],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        first_name: row.get(1)?,
                        last_name: row.get(2)?,
                        email: row.get(3)?,
                        role: parse_role(row, 4)?,
                        mobile: row.get(5)?,
                        avatar_path: row.get::<_, Option<String>>(6)?.filter(|p| !p.is_empty()),
                        bio: row.get(7)?,
                        social_links: row.get(8)?,
                    })
                },
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                other => StoreError::Sqlite(other),
            })
    }

    /// Point the user's avatar at an image path.
    pub fn update_avatar(&self, email: &str, path: &str) -> Result<WriteOutcome> {
        let email = normalize_email(email);
        let affected = self.conn().execute(
            "UPDATE users SET profile_image = ?1 WHERE email = ?2",
            params![path, email],
        )?;
        tracing::debug!(email = %email, path, affected, "avatar updated");
        Ok(WriteOutcome::from_rows(affected))
    }

    /// Replace the artist's bio and social links.
    pub fn update_profile(&self, email: &str, bio: &str, social_links: &str) -> Result<WriteOutcome> {
        let affected = self.conn().execute(
            "UPDATE users SET bio = ?1, social_links = ?2 WHERE email = ?3",
            params![bio, social_links, normalize_email(email)],
        )?;
        Ok(WriteOutcome::from_rows(affected))
    }

    /// Get bio, social links and mobile number.
    pub fn get_profile(&self, email: &str) -> Result<Profile> {
        self.conn()
            .query_row(
                "SELECT bio, social_links, mobile FROM users WHERE email = ?1",
                params![normalize_email(email)],
                |row| {
                    Ok(Profile {
                        bio: row.get(0)?,
                        social_links: row.get(1)?,
                        mobile: row.get(2)?,
                    })
                },
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                other => StoreError::Sqlite(other),
            })
    }
}

fn parse_role(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Role> {
    let raw: String = row.get(idx)?;
    raw.parse::<Role>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
