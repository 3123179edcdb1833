use std::sync::Arc;

use uuid::Uuid;

use crate::domain::value_objects::AccountView;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::AccountRepository;
use crate::services::storage::{extension_for, ObjectStorage};

pub struct ProfileService {
    accounts: Arc<dyn AccountRepository>,
    storage: Arc<dyn ObjectStorage>,
    max_upload_bytes: usize,
}

impl ProfileService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        storage: Arc<dyn ObjectStorage>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            accounts,
            storage,
            max_upload_bytes,
        }
    }

    pub async fn get_profile(&self, account_id: Uuid) -> DomainResult<AccountView> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .map(AccountView::from)
            .ok_or_else(|| DomainError::not_found("Account"))
    }

    /// Store a new profile picture and drop the one it replaces
    ///
    /// The previous object is only deleted once the account points at the
    /// new one. If the account write fails the new object is deleted instead.
    pub async fn upload_picture(
        &self,
        account_id: Uuid,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> DomainResult<AccountView> {
        if bytes.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "file".to_string(),
            }
            .into());
        }
        if bytes.len() > self.max_upload_bytes {
            return Err(DomainError::Validation {
                message: format!("File exceeds the {} byte limit", self.max_upload_bytes),
            });
        }
        if extension_for(content_type).is_none() {
            return Err(ValidationError::InvalidFormat {
                field: "content_type".to_string(),
            }
            .into());
        }

        let mut account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Account"))?;

        let stored = self
            .storage
            .put(&format!("profile-{account_id}"), content_type, bytes)
            .await?;
        let new_reference = stored.reference.clone();
        let previous = account.replace_profile_picture(stored);

        if let Err(e) = self.accounts.save(&account).await {
            if let Err(cleanup) = self.storage.delete(&new_reference).await {
                tracing::warn!(reference = %new_reference, error = %cleanup, "Orphaned upload not removed");
            }
            return Err(e);
        }

        if let Some(previous) = previous {
            if let Err(e) = self.storage.delete(&previous.reference).await {
                tracing::warn!(
                    reference = %previous.reference,
                    error = %e,
                    "Previous profile picture not removed"
                );
            }
        }

        tracing::info!(
            event = "profile_picture_updated",
            account_id = %account.id,
            "Profile picture replaced"
        );
        Ok(AccountView::from(account))
    }
}
