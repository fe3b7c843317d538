//! User service backed by the directory REST API.

use crate::dto::{AccessToken, TokenRequest, UserForm, UserListResponse, UserPayload};
use crate::user_service::UserService;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};
use userdesk_client::{ApiPath, ApiRequest, HttpTransport};
use userdesk_config::{Endpoint, EndpointConfig};
use userdesk_core::{User, UserdeskResult};

/// HTTP user service.
#[derive(Debug, Clone)]
pub struct HttpUserService {
    transport: HttpTransport,
    endpoints: EndpointConfig,
}

impl HttpUserService {
    /// Creates a new service using the transport's endpoint templates.
    #[must_use]
    pub fn new(transport: HttpTransport) -> Self {
        let endpoints = transport.api().endpoints.clone();
        Self {
            transport,
            endpoints,
        }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    fn path(&self, endpoint: Endpoint) -> ApiPath {
        ApiPath::new(self.endpoints.template(endpoint))
    }

    fn user_path(&self, endpoint: Endpoint, uid: &str) -> ApiPath {
        ApiPath::for_user(self.endpoints.template(endpoint), uid)
    }

    /// Decodes an optional user from a trash/restore response.
    ///
    /// Servers answer these calls with the user, an empty body, or a plain
    /// acknowledgement; only the first yields a user.
    fn optional_user(value: Value) -> Option<User> {
        match value {
            Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }
}

#[async_trait]
impl UserService for HttpUserService {
    async fn list_page(&self, take: Option<u32>) -> UserdeskResult<UserListResponse> {
        debug!("Listing users, take: {:?}", take);

        let mut request = ApiRequest::get(self.path(Endpoint::Users));
        if let Some(take) = take {
            request = request.query("take", take);
        }

        self.transport.send(request).await
    }

    async fn get_user(&self, uid: &str) -> UserdeskResult<User> {
        debug!("Getting user: {}", uid);
        self.transport.get(self.user_path(Endpoint::User, uid)).await
    }

    async fn get_authenticated_user(&self) -> UserdeskResult<User> {
        debug!("Getting authenticated user");
        self.transport.get(self.path(Endpoint::Me)).await
    }

    async fn create_user(&self, form: &UserForm) -> UserdeskResult<User> {
        debug!("Creating user: {:?}", form.uid);

        form.validate_for_create()?;
        let payload = form.normalize();

        let user: User = self.transport.post(self.path(Endpoint::Users), &payload).await?;

        info!("User created: {}", user.uid);
        Ok(user)
    }

    async fn update_user(&self, uid: &str, form: &UserForm) -> UserdeskResult<User> {
        debug!("Updating user: {}", uid);

        let payload: UserPayload = form.normalize();
        let user: User = self
            .transport
            .put(self.user_path(Endpoint::User, uid), &payload)
            .await?;

        info!("User updated: {}", uid);
        Ok(user)
    }

    async fn patch_user(&self, uid: &str, form: &UserForm) -> UserdeskResult<User> {
        debug!("Patching user: {}", uid);

        let payload = form.normalize();
        let user: User = self
            .transport
            .patch(self.user_path(Endpoint::User, uid), &payload)
            .await?;

        info!("User patched: {}", uid);
        Ok(user)
    }

    async fn delete_user(&self, uid: &str) -> UserdeskResult<()> {
        debug!("Deleting user: {}", uid);

        self.transport
            .execute_optional(ApiRequest::delete(self.user_path(Endpoint::User, uid)))
            .await?;

        info!("User deleted: {}", uid);
        Ok(())
    }

    async fn trash_user(&self, uid: &str) -> UserdeskResult<Option<User>> {
        debug!("Trashing user: {}", uid);

        let value = self
            .transport
            .execute_optional(ApiRequest::post(self.user_path(Endpoint::Trash, uid)))
            .await?;

        info!("User trashed: {}", uid);
        Ok(Self::optional_user(value))
    }

    async fn restore_user(&self, uid: &str) -> UserdeskResult<Option<User>> {
        debug!("Restoring user: {}", uid);

        let value = self
            .transport
            .execute_optional(ApiRequest::post(self.user_path(Endpoint::Restore, uid)))
            .await?;

        info!("User restored: {}", uid);
        Ok(Self::optional_user(value))
    }

    async fn issue_access_token(&self, uid: &str, expires_in: Option<u64>) -> UserdeskResult<AccessToken> {
        debug!("Issuing access token for: {}, expires_in: {:?}", uid, expires_in);

        let token: AccessToken = self
            .transport
            .post(self.user_path(Endpoint::Tokens, uid), &TokenRequest { expires_in })
            .await?;

        info!("Access token issued for: {}", uid);
        Ok(token)
    }
}
