use std::sync::Arc;

use async_trait::async_trait;
use auth::AccountId;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::CredentialValidator;

use crate::school::errors::SchoolError;
use crate::school::models::ApplyEditCommand;
use crate::school::models::EditRequest;
use crate::school::models::EditRequestId;
use crate::school::models::LoginCommand;
use crate::school::models::NewSchool;
use crate::school::models::RegisterSchoolCommand;
use crate::school::models::RequestEditCommand;
use crate::school::models::School;
use crate::school::models::SchoolId;
use crate::school::ports::EditRequestRepository;
use crate::school::ports::SchoolRepository;
use crate::school::ports::SchoolServicePort;

/// Domain service implementation for school operations.
///
/// Password hashing and verification run on the blocking thread pool so a
/// slow Argon2 computation never holds up other requests.
pub struct SchoolService<SR, ER>
where
    SR: SchoolRepository,
    ER: EditRequestRepository,
{
    schools: Arc<SR>,
    edit_requests: Arc<ER>,
    authenticator: Arc<Authenticator>,
    credential_validator: CredentialValidator,
}

impl<SR, ER> SchoolService<SR, ER>
where
    SR: SchoolRepository,
    ER: EditRequestRepository,
{
    /// Create a new school service with injected dependencies.
    ///
    /// # Arguments
    /// * `schools` - School persistence implementation
    /// * `edit_requests` - Edit request persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(schools: Arc<SR>, edit_requests: Arc<ER>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            schools,
            edit_requests,
            authenticator,
            credential_validator: CredentialValidator::new(),
        }
    }
}

#[async_trait]
impl<SR, ER> SchoolServicePort for SchoolService<SR, ER>
where
    SR: SchoolRepository,
    ER: EditRequestRepository,
{
    async fn register_school(&self, command: RegisterSchoolCommand) -> Result<School, SchoolError> {
        self.credential_validator
            .validate_registration(&command.password)?;

        // Not atomic with the insert below; storage rejects duplicates that slip through.
        if self.schools.find_by_name(&command.name).await?.is_some() {
            return Err(SchoolError::DuplicateName(command.name.to_string()));
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password)).await??;

        let school = self
            .schools
            .create(NewSchool {
                name: command.name,
                address: command.address,
                password_hash,
            })
            .await?;

        tracing::info!(school_id = %school.id, "School registered");

        Ok(school)
    }

    async fn login(&self, command: LoginCommand) -> Result<String, SchoolError> {
        let school_id = command.school_id;
        let account = self
            .schools
            .find_by_id(school_id)
            .await?
            .map(|school| (AccountId::from(school.id), school.password_hash));

        if account.is_none() {
            tracing::debug!(school_id = %school_id, "Login attempt for unknown school");
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;

        // Unknown ids pay the same Argon2 cost as a wrong password.
        let token = tokio::task::spawn_blocking(move || match account {
            Some((account_id, stored_hash)) => {
                authenticator.authenticate(&password, &stored_hash, account_id)
            }
            None => authenticator.reject_unknown_account(&password),
        })
        .await?
        .map_err(|e| match e {
            AuthenticationError::WrongPassword => SchoolError::WrongPassword,
            AuthenticationError::Token(err) => SchoolError::Token(err),
        })?;

        tracing::info!(school_id = %school_id, "Session token issued");

        Ok(token)
    }

    async fn get_school(&self, id: SchoolId) -> Result<School, SchoolError> {
        self.schools
            .find_by_id(id)
            .await?
            .ok_or(SchoolError::NotFound(id))
    }

    async fn list_schools(&self) -> Result<Vec<School>, SchoolError> {
        self.schools.list_all().await
    }

    async fn set_verified(&self, id: SchoolId, verified: bool) -> Result<(), SchoolError> {
        self.schools.set_verified(id, verified).await?;
        tracing::info!(school_id = %id, verified, "School verification changed");
        Ok(())
    }

    async fn delete_school(&self, id: SchoolId) -> Result<(), SchoolError> {
        self.schools.delete(id).await?;
        tracing::info!(school_id = %id, "School deleted");
        Ok(())
    }

    async fn request_edit(&self, command: RequestEditCommand) -> Result<EditRequest, SchoolError> {
        let edit_request = self.edit_requests.create(command).await?;
        tracing::info!(
            school_id = %edit_request.school_id,
            edit_request_id = %edit_request.id,
            "Edit request filed"
        );
        Ok(edit_request)
    }

    async fn list_edit_requests(&self) -> Result<Vec<EditRequest>, SchoolError> {
        self.edit_requests.list_all().await
    }

    async fn apply_edit(&self, command: ApplyEditCommand) -> Result<(), SchoolError> {
        let school_id = command.school_id;
        let edit_request_id = command.edit_request_id;

        self.edit_requests.apply(command).await?;

        tracing::info!(
            school_id = %school_id,
            edit_request_id = %edit_request_id,
            "Edit request applied"
        );
        Ok(())
    }

    async fn delete_edit_request(&self, id: EditRequestId) -> Result<(), SchoolError> {
        self.edit_requests.delete(id).await?;
        tracing::info!(edit_request_id = %id, "Edit request deleted");
        Ok(())
    }
}
