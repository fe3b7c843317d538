use super::{session, users, Action, Context};
use anyhow::Result;
use tracing::debug;

pub async fn execute(action: Action, context: &Context) -> Result<()> {
    debug!("Executing {:?}", action);

    match action {
        Action::List(options) => users::list(context, options).await,
        Action::Show { uid } => users::show(context, &uid).await,
        Action::Me => users::me(context).await,
        Action::Create(fields) => users::create(context, &fields).await,
        Action::Update { uid, fields } => users::update(context, &uid, &fields).await,
        Action::Patch { uid, fields } => users::patch(context, &uid, &fields).await,
        Action::Delete { uid } => users::delete(context, &uid).await,
        Action::Trash { uid } => users::trash(context, &uid).await,
        Action::Restore { uid } => users::restore(context, &uid).await,
        Action::Token { uid, expires_in } => users::token(context, &uid, expires_in).await,
        Action::Session(action) => session::execute(context, action),
    }
}
