//! Case-insensitive user search.

use userdesk_core::User;

/// Returns true if the query occurs in the user's uid, name or email.
///
/// Matching is a case-insensitive substring test; absent fields never match
/// and an empty query matches everyone.
#[must_use]
pub fn matches_query(user: &User, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    let contains = |field: &str| field.to_lowercase().contains(&query);

    contains(&user.uid)
        || user.name.as_deref().is_some_and(contains)
        || user.email.as_deref().is_some_and(contains)
}

/// Filters users by query, preserving order.
#[must_use]
pub fn filter_users<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    users.iter().filter(|user| matches_query(user, query)).collect()
}
