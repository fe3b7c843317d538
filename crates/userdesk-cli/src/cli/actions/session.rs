use super::{Context, SessionAction};
use crate::render;
use anyhow::Result;
use secrecy::ExposeSecret;
use serde_json::json;

/// Where the bearer token of the next request would come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Config,
    Store,
    None,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Store => "store",
            Self::None => "none",
        }
    }
}

/// Resolves the token source without exposing the token.
///
/// # Errors
/// Returns an error if the session store cannot be read
pub fn token_source(context: &Context) -> Result<TokenSource> {
    let configured = context
        .config
        .session
        .auth_token
        .as_deref()
        .is_some_and(|token| !token.trim().is_empty());
    if configured {
        return Ok(TokenSource::Config);
    }

    let stored = context
        .session_store()?
        .load()?
        .auth_token
        .is_some_and(|token| !token.trim().is_empty());
    Ok(if stored {
        TokenSource::Store
    } else {
        TokenSource::None
    })
}

pub fn execute(context: &Context, action: SessionAction) -> Result<()> {
    let store = context.session_store()?;

    match action {
        SessionAction::SetToken(token) => {
            store.save_token(token.expose_secret())?;
            println!("Saved session token to {}", store.path().display());
        }
        SessionAction::Clear => {
            store.clear()?;
            println!("Cleared session token");
        }
        SessionAction::Show => {
            let source = token_source(context)?;
            if context.json {
                let value = json!({
                    "store": store.path().display().to_string(),
                    "source": source.as_str(),
                    "authenticated": source != TokenSource::None,
                });
                println!("{}", render::to_json(&value)?);
            } else {
                println!("store:  {}", store.path().display());
                println!("source: {}", source.as_str());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use userdesk_config::AppConfig;

    fn context(dir: &tempfile::TempDir, token: Option<&str>) -> Context {
        let mut config = AppConfig::default();
        config.session.store_path = Some(dir.path().join("session.json"));
        config.session.auth_token = token.map(ToString::to_string);
        Context::new(config, false)
    }

    #[test]
    fn test_token_source_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(token_source(&context(&dir, None)).unwrap(), TokenSource::None);
    }

    #[test]
    fn test_token_source_prefers_config() {
        let dir = tempfile::tempdir().unwrap();
        let context = context(&dir, Some("from-config"));
        context.session_store().unwrap().save_token("stored").unwrap();
        assert_eq!(token_source(&context).unwrap(), TokenSource::Config);
    }

    #[test]
    fn test_set_token_then_clear() {
        let dir = tempfile::tempdir().unwrap();
        let context = context(&dir, None);

        execute(
            &context,
            SessionAction::SetToken(SecretString::from("abc".to_string())),
        )
        .unwrap();
        assert_eq!(token_source(&context).unwrap(), TokenSource::Store);

        execute(&context, SessionAction::Clear).unwrap();
        assert_eq!(token_source(&context).unwrap(), TokenSource::None);
    }
}
