//! User service trait definition.

use crate::dto::{AccessToken, UserForm, UserListResponse};
use async_trait::async_trait;
use userdesk_core::{User, UserdeskResult};

/// User service trait.
///
/// Every operation addresses users by `uid`.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Lists users, optionally limited to `take` entries.
    async fn list_users(&self, take: Option<u32>) -> UserdeskResult<Vec<User>> {
        Ok(self.list_page(take).await?.into_data())
    }

    /// Lists users, keeping the pagination envelope.
    async fn list_page(&self, take: Option<u32>) -> UserdeskResult<UserListResponse>;

    /// Gets a user by uid.
    async fn get_user(&self, uid: &str) -> UserdeskResult<User>;

    /// Gets the user the session token belongs to.
    async fn get_authenticated_user(&self) -> UserdeskResult<User>;

    /// Validates, normalizes and creates a user.
    async fn create_user(&self, form: &UserForm) -> UserdeskResult<User>;

    /// Replaces a user.
    async fn update_user(&self, uid: &str, form: &UserForm) -> UserdeskResult<User>;

    /// Partially updates a user.
    async fn patch_user(&self, uid: &str, form: &UserForm) -> UserdeskResult<User>;

    /// Deletes a user permanently.
    async fn delete_user(&self, uid: &str) -> UserdeskResult<()>;

    /// Moves a user to the trash. Returns the updated user if the server sent one.
    async fn trash_user(&self, uid: &str) -> UserdeskResult<Option<User>>;

    /// Restores a trashed user. Returns the updated user if the server sent one.
    async fn restore_user(&self, uid: &str) -> UserdeskResult<Option<User>>;

    /// Issues an access token for a user.
    async fn issue_access_token(&self, uid: &str, expires_in: Option<u64>) -> UserdeskResult<AccessToken>;
}
