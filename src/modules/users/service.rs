use std::collections::HashMap;

use anyhow::anyhow;
use tracing::{info, instrument, warn};
use vape_core::AppError;
use vape_db::{DirectoryError, UserDirectory};
use vape_models::{UpdateUserDto, User, UserUpdate};

use crate::metrics::{track_email_queued, track_user_deleted, track_user_updated};
use crate::state::AppState;
use crate::utils::email::TemplatedEmail;

pub struct UserService;

impl UserService {
    /// Loads a user. A missing record is a 404, anything else a 500.
    #[instrument(skip(directory))]
    pub async fn get_user(directory: &dyn UserDirectory, id: i64) -> Result<User, AppError> {
        directory.get(id).await.map_err(|e| match e {
            DirectoryError::NotFound => AppError::not_found(anyhow!("user not found")),
            other => AppError::internal(anyhow::Error::new(other).context("Failed to fetch user")),
        })
    }

    /// Applies the body of an update request. Absent fields reach the
    /// directory as empty strings, which it treats as "no change".
    #[instrument(skip(directory, dto))]
    pub async fn update_user(
        directory: &dyn UserDirectory,
        id: i64,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let changes = UserUpdate::from(dto);

        let user = directory
            .update(id, changes)
            .await
            .map_err(|e| AppError::internal(anyhow::Error::new(e).context("Failed to update user")))?;

        track_user_updated();
        Ok(user)
    }

    #[instrument(skip(directory))]
    pub async fn delete_user(directory: &dyn UserDirectory, id: i64) -> Result<(), AppError> {
        directory
            .delete(id)
            .await
            .map_err(|e| AppError::internal(anyhow::Error::new(e).context("Failed to delete user")))?;

        track_user_deleted();
        Ok(())
    }

    /// Sends a templated email to a user without waiting for delivery.
    ///
    /// The user is looked up first and a failed lookup is returned to the
    /// caller with nothing sent. Rendering and delivery then run on a
    /// spawned task whose result is discarded; delivery failures are only
    /// logged.
    #[instrument(skip(state, vars))]
    pub async fn send_templated_email(
        state: &AppState,
        user_id: i64,
        template: &str,
        vars: Option<HashMap<String, String>>,
    ) -> Result<User, AppError> {
        let vars = vars.unwrap_or_default();
        let user = Self::get_user(state.directory.as_ref(), user_id).await?;

        let email = TemplatedEmail {
            to_email: user.email.clone(),
            to_name: user.name.clone(),
            template: template.to_string(),
            vars,
        };
        let mailer = state.mailer.clone();

        tokio::spawn(async move {
            let template = email.template.clone();
            match mailer.send_templated(email).await {
                Ok(()) => info!(user_id, template = %template, "Templated email sent"),
                Err(e) => warn!(user_id, template = %template, error = ?e.error, "Templated email not delivered"),
            }
        });

        track_email_queued(template);
        Ok(user)
    }
}
