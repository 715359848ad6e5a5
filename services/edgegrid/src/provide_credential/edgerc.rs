use crate::constants::{DEFAULT_EDGERC_PATH, DEFAULT_SECTION};
use crate::edgerc::{load_section, SectionWindow};
use crate::Credential;
use async_trait::async_trait;
use edgegrid_core::{Context, ProvideCredential, Result};
use log::debug;

/// EdgercCredentialProvider loads credentials from one section of an
/// `.edgerc` file.
///
/// Unlike the environment provider, a missing file or section is an
/// error rather than `None`: the caller asked for this file explicitly.
#[derive(Debug, Clone)]
pub struct EdgercCredentialProvider {
    path: String,
    section: String,
    window: SectionWindow,
}

impl Default for EdgercCredentialProvider {
    fn default() -> Self {
        Self::new(DEFAULT_EDGERC_PATH, DEFAULT_SECTION)
    }
}

impl EdgercCredentialProvider {
    /// Create a provider for `section` of the file at `path`.
    pub fn new(path: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            section: section.into(),
            window: SectionWindow::default(),
        }
    }

    /// Set how section lines are collected.
    pub fn with_window(mut self, window: SectionWindow) -> Self {
        self.window = window;
        self
    }
}

#[async_trait]
impl ProvideCredential for EdgercCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        debug!(
            "loading credential from section [{}] of {}",
            self.section, self.path
        );
        let cred = load_section(ctx, &self.path, &self.section, self.window).await?;
        Ok(Some(cred))
    }
}
