use async_trait::async_trait;

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
use crate::school::models::SchoolName;

/// Port for school domain service operations.
///
/// Callers are expected to have passed the relevant access gate already;
/// the service itself does no authorization.
#[async_trait]
pub trait SchoolServicePort: Send + Sync + 'static {
    /// Register a new school.
    ///
    /// # Arguments
    /// * `command` - Name, address and plaintext password
    ///
    /// # Returns
    /// Created school entity
    ///
    /// # Errors
    /// * `Validation` - Password breaks a registration rule
    /// * `DuplicateName` - Name is already taken
    /// * `DatabaseError` - Database operation failed
    async fn register_school(&self, command: RegisterSchoolCommand) -> Result<School, SchoolError>;

    /// Check a school's password and issue a session token.
    ///
    /// # Arguments
    /// * `command` - School id and plaintext password
    ///
    /// # Returns
    /// Signed session token whose subject is the school id
    ///
    /// # Errors
    /// * `WrongPassword` - Password does not match, or no such school
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<String, SchoolError>;

    /// Retrieve school by identifier.
    ///
    /// # Errors
    /// * `NotFound` - School does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_school(&self, id: SchoolId) -> Result<School, SchoolError>;

    /// Retrieve every school, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_schools(&self) -> Result<Vec<School>, SchoolError>;

    /// Set or clear a school's verified flag.
    ///
    /// # Errors
    /// * `NotFound` - School does not exist
    /// * `DatabaseError` - Database operation failed
    async fn set_verified(&self, id: SchoolId, verified: bool) -> Result<(), SchoolError>;

    /// Delete a school along with its edit requests.
    ///
    /// # Errors
    /// * `NotFound` - School does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_school(&self, id: SchoolId) -> Result<(), SchoolError>;

    /// File an edit request on behalf of an authenticated school.
    ///
    /// # Returns
    /// Created edit request, not yet done
    ///
    /// # Errors
    /// * `NotFound` - School no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn request_edit(&self, command: RequestEditCommand) -> Result<EditRequest, SchoolError>;

    /// Retrieve every edit request, done or not, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_edit_requests(&self) -> Result<Vec<EditRequest>, SchoolError>;

    /// Overwrite a school's name and address and mark the edit request done.
    ///
    /// # Errors
    /// * `NotFound` - School does not exist
    /// * `EditRequestNotFound` - Edit request does not exist
    /// * `DuplicateName` - New name is already taken
    /// * `DatabaseError` - Database operation failed
    async fn apply_edit(&self, command: ApplyEditCommand) -> Result<(), SchoolError>;

    /// Delete an edit request.
    ///
    /// # Errors
    /// * `EditRequestNotFound` - Edit request does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_edit_request(&self, id: EditRequestId) -> Result<(), SchoolError>;
}

/// Persistence operations for the school aggregate.
///
/// Implementations must enforce name uniqueness themselves and report a
/// collision as `DuplicateName`.
#[async_trait]
pub trait SchoolRepository: Send + Sync + 'static {
    /// Persist new school to storage.
    ///
    /// # Returns
    /// Created school with storage-assigned id
    ///
    /// # Errors
    /// * `DuplicateName` - Name is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, school: NewSchool) -> Result<School, SchoolError>;

    /// Retrieve school by identifier.
    ///
    /// # Returns
    /// Optional school entity (None if not found)
    async fn find_by_id(&self, id: SchoolId) -> Result<Option<School>, SchoolError>;

    /// Retrieve school by exact name.
    ///
    /// # Returns
    /// Optional school entity (None if not found)
    async fn find_by_name(&self, name: &SchoolName) -> Result<Option<School>, SchoolError>;

    /// Retrieve all schools from storage, oldest first.
    async fn list_all(&self) -> Result<Vec<School>, SchoolError>;

    /// Update the verified flag.
    ///
    /// # Errors
    /// * `NotFound` - School does not exist
    async fn set_verified(&self, id: SchoolId, verified: bool) -> Result<(), SchoolError>;

    /// Remove school from storage.
    ///
    /// # Errors
    /// * `NotFound` - School does not exist
    async fn delete(&self, id: SchoolId) -> Result<(), SchoolError>;
}

/// Persistence operations for the edit request queue.
#[async_trait]
pub trait EditRequestRepository: Send + Sync + 'static {
    /// Persist new edit request.
    ///
    /// # Errors
    /// * `NotFound` - Referenced school does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, command: RequestEditCommand) -> Result<EditRequest, SchoolError>;

    /// Retrieve all edit requests, oldest first.
    async fn list_all(&self) -> Result<Vec<EditRequest>, SchoolError>;

    /// Update the school's name and address and mark the request done, atomically.
    ///
    /// # Errors
    /// * `NotFound` - School does not exist
    /// * `EditRequestNotFound` - Edit request does not exist
    /// * `DuplicateName` - New name is already taken
    async fn apply(&self, command: ApplyEditCommand) -> Result<(), SchoolError>;

    /// Remove edit request from storage.
    ///
    /// # Errors
    /// * `EditRequestNotFound` - Edit request does not exist
    async fn delete(&self, id: EditRequestId) -> Result<(), SchoolError>;
}
