use crate::provide_credential::{
    EdgercCredentialProvider, EnvCredentialProvider, StaticCredentialProvider,
};
use crate::{Credential, CredentialSource};
use async_trait::async_trait;
use edgegrid_core::{Context, ProvideCredential, Result};
use log::debug;

/// DefaultCredentialProvider resolves a [`CredentialSource`] with EdgeGrid
/// precedence.
///
/// - `FromStrings` uses the given values and nothing else.
/// - `FromFile` reads the `.edgerc` section first, so that a broken file
///   fails even when the environment could have served, then lets an
///   environment host for the same section replace it.
/// - `FromEnvironment` reads `AKAMAI_*` variables only.
#[derive(Debug, Clone)]
pub struct DefaultCredentialProvider {
    source: CredentialSource,
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider for `source`.
    pub fn new(source: CredentialSource) -> Self {
        Self { source }
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        match &self.source {
            CredentialSource::FromStrings {
                client_token,
                client_secret,
                access_token,
                host,
            } => {
                StaticCredentialProvider::new(client_token, client_secret, access_token, host)
                    .provide_credential(ctx)
                    .await
            }
            CredentialSource::FromFile {
                path,
                section,
                window,
            } => {
                let file = EdgercCredentialProvider::new(path, section)
                    .with_window(*window)
                    .provide_credential(ctx)
                    .await?;
                let env = EnvCredentialProvider::new(section)
                    .provide_credential(ctx)
                    .await?;

                if env.is_some() {
                    debug!("environment overrides section [{section}] of {path}");
                }
                Ok(env.or(file))
            }
            CredentialSource::FromEnvironment { section } => {
                EnvCredentialProvider::new(section)
                    .provide_credential(ctx)
                    .await
            }
        }
    }
}
