use super::{Context, ListOptions, UserFields};
use crate::render;
use anyhow::Result;
use serde_json::json;
use userdesk_core::User;
use userdesk_service::{UserListState, UserService};

/// Lists users, showing the sample set with a warning if the directory
/// cannot be reached.
pub async fn list(context: &Context, options: ListOptions) -> Result<()> {
    let service = context.service()?;

    let mut state = UserListState::new();
    state.load(&service, options.take).await;
    if let Some(error) = state.last_error() {
        eprintln!("warning: could not load users ({}); showing sample data", error);
    }
    if let Some(query) = options.search {
        state.set_query(query);
    }

    let users = if options.trashed {
        state.trashed()
    } else {
        state.active()
    };

    if context.json {
        println!("{}", render::to_json(&users)?);
    } else {
        println!("{}", render::users_table(&users));
    }
    Ok(())
}

pub async fn show(context: &Context, uid: &str) -> Result<()> {
    let user = context.service()?.get_user(uid).await?;
    print_user(context, &user)
}

pub async fn me(context: &Context) -> Result<()> {
    let user = context.service()?.get_authenticated_user().await?;
    print_user(context, &user)
}

pub async fn create(context: &Context, fields: &UserFields) -> Result<()> {
    let draft = fields.to_draft()?;
    let user = context.service()?.create_user(draft.form()).await?;
    print_user(context, &user)
}

/// Replaces a user. The positional uid is sent unless `--uid` renames it.
pub async fn update(context: &Context, uid: &str, fields: &UserFields) -> Result<()> {
    let mut fields = fields.clone();
    if fields.uid.is_none() {
        fields.uid = Some(uid.to_string());
    }
    let draft = fields.to_draft()?;
    let user = context.service()?.update_user(uid, draft.form()).await?;
    print_user(context, &user)
}

pub async fn patch(context: &Context, uid: &str, fields: &UserFields) -> Result<()> {
    let draft = fields.to_draft()?;
    let user = context.service()?.patch_user(uid, draft.form()).await?;
    print_user(context, &user)
}

pub async fn delete(context: &Context, uid: &str) -> Result<()> {
    context.service()?.delete_user(uid).await?;
    if context.json {
        println!("{}", render::to_json(&json!({ "deleted": uid }))?);
    } else {
        println!("Deleted {}", uid);
    }
    Ok(())
}

pub async fn trash(context: &Context, uid: &str) -> Result<()> {
    let user = context.service()?.trash_user(uid).await?;
    print_outcome(context, uid, user.as_ref(), &format!("Moved {} to the trash", uid))
}

pub async fn restore(context: &Context, uid: &str) -> Result<()> {
    let user = context.service()?.restore_user(uid).await?;
    print_outcome(context, uid, user.as_ref(), &format!("Restored {}", uid))
}

pub async fn token(context: &Context, uid: &str, expires_in: Option<u64>) -> Result<()> {
    let token = context.service()?.issue_access_token(uid, expires_in).await?;
    if context.json {
        println!("{}", render::to_json(&token)?);
    } else {
        println!("{}", token.token);
    }
    Ok(())
}

fn print_user(context: &Context, user: &User) -> Result<()> {
    if context.json {
        println!("{}", render::to_json(user)?);
    } else {
        println!("{}", render::user_detail(user));
    }
    Ok(())
}

fn print_outcome(context: &Context, uid: &str, user: Option<&User>, message: &str) -> Result<()> {
    match user {
        Some(user) => print_user(context, user),
        None if context.json => {
            println!("{}", render::to_json(&json!({ "uid": uid }))?);
            Ok(())
        }
        None => {
            println!("{}", message);
            Ok(())
        }
    }
}
