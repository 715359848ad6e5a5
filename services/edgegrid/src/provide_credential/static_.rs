use crate::config::is_test_mode;
use crate::credential::missing_fields;
use crate::Credential;
use async_trait::async_trait;
use edgegrid_core::utils::Redact;
use edgegrid_core::{Context, Error, ProvideCredential, Result};
use log::error;
use std::fmt::{Debug, Formatter};

/// StaticCredentialProvider serves credentials given as plain strings.
///
/// All four values are required; any empty one fails with
/// `InsufficientCredentials`.
#[derive(Clone)]
pub struct StaticCredentialProvider {
    client_token: String,
    client_secret: String,
    access_token: String,
    host: String,
}

impl Debug for StaticCredentialProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentialProvider")
            .field("client_token", &Redact::from(&self.client_token))
            .field("client_secret", &Redact::from(&self.client_secret))
            .field("access_token", &Redact::from(&self.access_token))
            .field("host", &self.host)
            .finish()
    }
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider.
    pub fn new(client_token: &str, client_secret: &str, access_token: &str, host: &str) -> Self {
        Self {
            client_token: client_token.to_string(),
            client_secret: client_secret.to_string(),
            access_token: access_token.to_string(),
            host: host.to_string(),
        }
    }

    pub(crate) fn load(&self, ctx: &Context) -> Result<Credential> {
        let missing = missing_fields(
            &self.client_token,
            &self.client_secret,
            &self.access_token,
            &self.host,
        );
        if !missing.is_empty() {
            if !is_test_mode(ctx) {
                for field in &missing {
                    error!("No defined {field}");
                }
            }
            return Err(Error::insufficient_credentials(
                "Insufficient Akamai credentials",
            ));
        }

        Credential::new(
            self.client_token.as_str(),
            self.client_secret.as_str(),
            self.access_token.as_str(),
            self.host.as_str(),
        )
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.load(ctx).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgegrid_core::{ErrorKind, StaticEnv};

    #[tokio::test]
    async fn test_static_credential_provider() -> anyhow::Result<()> {
        let provider = StaticCredentialProvider::new("ct", "cs", "at", "akab.example");
        let cred = provider
            .provide_credential(&Context::new())
            .await?
            .expect("credential must be loaded");

        assert_eq!(cred.host(), "https://akab.example");
        assert_eq!(cred.client_secret(), "cs");
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_secret_fails_even_in_test_mode() {
        let ctx = Context::new().with_env(StaticEnv {
            home_dir: None,
            envs: [("EDGEGRID_ENV".to_string(), "test".to_string())].into(),
        });

        let provider = StaticCredentialProvider::new("ct", "", "at", "akab.example");
        let err = provider.provide_credential(&ctx).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientCredentials);
    }
}
