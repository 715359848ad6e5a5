//! Reader for the sectioned `.edgerc` credentials file.
//!
//! ```text
//! [default]
//! client_secret = C113nt53KR3TN6N90yVuAgICxIRwsObLi0E67/N8eRN=
//! host = akab-h05tnam3wl42son7nktnlnnx-kbob3i3v.luna.akamaiapis.net
//! access_token = akab-acc35t0k3nodujqunph3w7hzp7-gtm6ij
//! client_token = akab-c113ntt0k3n4qtari252bfxxbsl-yvsdj
//! ```

use crate::constants::COMPAT_SECTION_LINES;
use crate::Credential;
use edgegrid_core::{Context, Error, Result};
use log::debug;
use std::collections::HashMap;

/// How the lines belonging to a section are collected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SectionWindow {
    /// Take every line up to the next `[section]` marker or end of file.
    ///
    /// Blank lines and `#`/`;` comments are skipped; any other line
    /// without `=` is rejected as invalid section data.
    #[default]
    UntilNextSection,
    /// Take exactly the next five raw lines after the marker, whatever
    /// they contain.
    ///
    /// A following marker inside the window is ingested as a bogus entry
    /// under the empty key. Only use this to reproduce the behavior of
    /// older EdgeGrid clients.
    Compat,
}

/// Parse `section` out of `content` into a flat key/value mapping.
///
/// Keys have `-` replaced by `_` and are trimmed; values are split at the
/// first `=` only and trimmed.
pub fn parse_section(
    content: &str,
    section: &str,
    window: SectionWindow,
) -> Result<HashMap<String, String>> {
    let lines: Vec<&str> = content.lines().collect();

    // The last matching marker wins.
    let start = lines
        .iter()
        .rposition(|line| section_name(line) == Some(section))
        .ok_or_else(|| {
            Error::invalid_section(format!(
                "section [{section}] not found in credentials file"
            ))
        })?;
    let body = &lines[start + 1..];

    let mut result = HashMap::new();
    match window {
        SectionWindow::Compat => {
            for line in body.iter().copied().take(COMPAT_SECTION_LINES) {
                let (key, value) = line.split_once('=').unwrap_or(("", line));
                result.insert(normalize_key(key), value.trim().to_string());
            }
        }
        SectionWindow::UntilNextSection => {
            for line in body
                .iter()
                .take_while(|line| section_name(line).is_none())
                .map(|line| line.trim())
                .filter(|line| !is_blank_or_comment(line))
            {
                let (key, value) = line.split_once('=').ok_or_else(|| {
                    Error::invalid_section_data(format!(
                        "line {line:?} in section [{section}] is not a key=value pair"
                    ))
                })?;
                result.insert(normalize_key(key), value.trim().to_string());
            }
        }
    }

    debug!(
        "parsed section [{section}] with keys {:?}",
        result.keys().collect::<Vec<_>>()
    );
    Ok(result)
}

/// Read the credentials file at `path` and build a [`Credential`] from
/// `section`.
///
/// The path goes through `~` expansion. I/O failures surface as-is.
pub async fn load_section(
    ctx: &Context,
    path: &str,
    section: &str,
    window: SectionWindow,
) -> Result<Credential> {
    let path = ctx
        .expand_home_dir(path)
        .ok_or_else(|| Error::unexpected("failed to expand home directory"))?;
    let content = ctx.file_read_as_string(&path).await?;

    let entries = parse_section(&content, section, window)?;
    Credential::from_section(&entries)
}

fn section_name(line: &str) -> Option<&str> {
    line.trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
}

fn is_blank_or_comment(line: &str) -> bool {
    line.is_empty() || line.starts_with('#') || line.starts_with(';')
}

fn normalize_key(key: &str) -> String {
    key.replace('-', "_").trim().to_string()
}
