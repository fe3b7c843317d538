//! In-memory user list backing the list view.

use super::{filter_users, sample_users, UserDraft};
use crate::user_service::UserService;
use tracing::{info, warn};
use userdesk_core::{User, UserdeskResult};

/// Where the listed users came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListSource {
    /// Nothing loaded yet.
    #[default]
    Empty,
    /// Loaded from the directory API.
    Server,
    /// The directory could not be reached; showing sample data.
    Fallback,
}

/// The list view's user collection plus its search query.
///
/// Mutating operations take `&mut self`, so a second submission cannot start
/// while one is in flight.
#[derive(Debug, Clone, Default)]
pub struct UserListState {
    users: Vec<User>,
    query: String,
    source: ListSource,
    total: Option<u64>,
    last_error: Option<String>,
}

impl UserListState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads users, falling back to the sample set on failure.
    ///
    /// Never fails: the error is recorded and available from
    /// [`UserListState::last_error`].
    pub async fn load<S>(&mut self, service: &S, take: Option<u32>)
    where
        S: UserService + ?Sized,
    {
        match service.list_page(take).await {
            Ok(page) => {
                self.total = Some(page.count);
                self.users = page.into_data();
                self.source = ListSource::Server;
                self.last_error = None;
            }
            Err(e) => {
                warn!("Failed to load users, showing sample data: {}", e);
                self.users = sample_users();
                self.total = None;
                self.source = ListSource::Fallback;
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Validates and creates a user, then appends it to the list.
    ///
    /// Validation failures return before any request is made.
    pub async fn submit_create<S>(&mut self, service: &S, draft: &UserDraft) -> UserdeskResult<User>
    where
        S: UserService + ?Sized,
    {
        draft.validate()?;
        let user = service.create_user(draft.form()).await?;
        self.users.push(user.clone());
        if let Some(total) = self.total.as_mut() {
            *total += 1;
        }
        Ok(user)
    }

    /// Deletes a user and removes it from the list.
    pub async fn delete<S>(&mut self, service: &S, uid: &str) -> UserdeskResult<()>
    where
        S: UserService + ?Sized,
    {
        service.delete_user(uid).await?;
        let before = self.users.len();
        self.users.retain(|user| user.uid != uid);
        if let Some(total) = self.total.as_mut() {
            *total = total.saturating_sub((before - self.users.len()) as u64);
        }
        info!("Removed {} from the list", uid);
        Ok(())
    }

    /// Moves a user to the trash and updates the list entry.
    pub async fn trash<S>(&mut self, service: &S, uid: &str) -> UserdeskResult<()>
    where
        S: UserService + ?Sized,
    {
        let updated = service.trash_user(uid).await?;
        self.apply(uid, updated, true);
        Ok(())
    }

    /// Restores a trashed user and updates the list entry.
    pub async fn restore<S>(&mut self, service: &S, uid: &str) -> UserdeskResult<()>
    where
        S: UserService + ?Sized,
    {
        let updated = service.restore_user(uid).await?;
        self.apply(uid, updated, false);
        Ok(())
    }

    fn apply(&mut self, uid: &str, updated: Option<User>, trashed: bool) {
        let Some(entry) = self.users.iter_mut().find(|user| user.uid == uid) else {
            return;
        };
        match updated {
            Some(user) => *entry = user,
            None => entry.is_trashed = trashed,
        }
    }

    /// Sets the search query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Users matching the current query, in list order.
    #[must_use]
    pub fn visible(&self) -> Vec<&User> {
        filter_users(&self.users, &self.query)
    }

    /// Visible users that are not trashed.
    #[must_use]
    pub fn active(&self) -> Vec<&User> {
        self.visible().into_iter().filter(|user| !user.is_trashed).collect()
    }

    /// Visible users that are trashed.
    #[must_use]
    pub fn trashed(&self) -> Vec<&User> {
        self.visible().into_iter().filter(|user| user.is_trashed).collect()
    }

    /// All loaded users, ignoring the query.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    #[must_use]
    pub const fn source(&self) -> ListSource {
        self.source
    }

    /// Returns true if the list shows sample data.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.source == ListSource::Fallback
    }

    /// Total reported by the server, if known.
    #[must_use]
    pub const fn total(&self) -> Option<u64> {
        self.total
    }

    /// Message of the last load failure.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
