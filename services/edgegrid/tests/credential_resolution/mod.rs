use crate::{init_logger, static_env};
use anyhow::Result;
use edgegrid::{Config, CredentialSource, EdgeGrid, SectionWindow};
use edgegrid_core::{Context, ErrorKind};
use edgegrid_file_read_tokio::TokioFileRead;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;
use test_case::test_case;

const EDGERC: &str = r#"[default]
client_secret = file-secret
host = akab-file.luna.akamaiapis.net
access_token = file-access
client_token = file-client

[papi]
client-secret = papi-secret
host = https://akab-papi.luna.akamaiapis.net
access-token = papi-access
client-token = papi-client
max-body = 2048
"#;

fn edgerc(content: &str) -> Result<NamedTempFile> {
    let mut f = NamedTempFile::new()?;
    f.write_all(content.as_bytes())?;
    Ok(f)
}

fn ctx(envs: &[(&str, &str)]) -> Context {
    init_logger();
    Context::new()
        .with_file_read(TokioFileRead)
        .with_env(static_env(envs))
}

fn config_for(file: &NamedTempFile) -> Config {
    Config::new().with_path(file.path().to_string_lossy())
}

#[tokio::test]
async fn test_file_credential_without_env() -> Result<()> {
    let file = edgerc(EDGERC)?;
    let client = EdgeGrid::from_config(ctx(&[]), config_for(&file)).await?;

    let cred = client.credential();
    assert_eq!(cred.client_token(), "file-client");
    assert_eq!(cred.client_secret(), "file-secret");
    assert_eq!(cred.access_token(), "file-access");
    assert_eq!(cred.host(), "https://akab-file.luna.akamaiapis.net");
    assert_eq!(cred.max_body(), None);
    Ok(())
}

#[tokio::test]
async fn test_named_section_with_dashed_keys() -> Result<()> {
    let file = edgerc(EDGERC)?;
    let client =
        EdgeGrid::from_config(ctx(&[]), config_for(&file).with_section("papi")).await?;

    let cred = client.credential();
    assert_eq!(cred.client_token(), "papi-client");
    assert_eq!(cred.host(), "https://akab-papi.luna.akamaiapis.net");
    assert_eq!(cred.max_body(), Some(2048));
    Ok(())
}

#[tokio::test]
async fn test_env_host_overrides_file() -> Result<()> {
    let file = edgerc(EDGERC)?;
    let envs = [
        ("AKAMAI_HOST", "akab-env.luna.akamaiapis.net"),
        ("AKAMAI_CLIENT_TOKEN", "env-client"),
        ("AKAMAI_CLIENT_SECRET", "env-secret"),
        ("AKAMAI_ACCESS_TOKEN", "env-access"),
    ];
    let client = EdgeGrid::from_config(ctx(&envs), config_for(&file)).await?;

    let cred = client.credential();
    assert_eq!(cred.client_token(), "env-client");
    assert_eq!(cred.client_secret(), "env-secret");
    assert_eq!(cred.access_token(), "env-access");
    assert_eq!(cred.host(), "https://akab-env.luna.akamaiapis.net");
    Ok(())
}

#[tokio::test]
async fn test_env_for_other_section_does_not_override() -> Result<()> {
    let file = edgerc(EDGERC)?;
    let envs = [
        ("AKAMAI_PAPI_HOST", "akab-env.luna.akamaiapis.net"),
        ("AKAMAI_PAPI_CLIENT_TOKEN", "env-client"),
        ("AKAMAI_PAPI_CLIENT_SECRET", "env-secret"),
        ("AKAMAI_PAPI_ACCESS_TOKEN", "env-access"),
    ];
    let client = EdgeGrid::from_config(ctx(&envs), config_for(&file)).await?;

    assert_eq!(client.credential().client_token(), "file-client");
    Ok(())
}

#[tokio::test]
async fn test_missing_section_fails_even_with_env() -> Result<()> {
    let file = edgerc(EDGERC)?;
    let envs = [
        ("AKAMAI_CCU_HOST", "akab-env.luna.akamaiapis.net"),
        ("AKAMAI_CCU_CLIENT_TOKEN", "env-client"),
        ("AKAMAI_CCU_CLIENT_SECRET", "env-secret"),
        ("AKAMAI_CCU_ACCESS_TOKEN", "env-access"),
    ];
    let err = EdgeGrid::from_config(ctx(&envs), config_for(&file).with_section("ccu"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidSection);
    Ok(())
}

#[tokio::test]
async fn test_env_host_without_tokens_fails() -> Result<()> {
    let file = edgerc(EDGERC)?;
    let envs = [("AKAMAI_HOST", "akab-env.luna.akamaiapis.net")];
    let err = EdgeGrid::from_config(ctx(&envs), config_for(&file))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InsufficientCredentials);
    Ok(())
}

#[tokio::test]
async fn test_missing_file_is_reported() {
    let config = Config::new().with_path("/nonexistent/edgegrid/.edgerc");
    let err = EdgeGrid::from_config(ctx(&[]), config).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unexpected);
    assert!(err.to_string().contains("/nonexistent/edgegrid/.edgerc"));
}

#[test_case(&[], None; "nothing set")]
#[test_case(&[("AKAMAI_CLIENT_TOKEN", "ct")], None; "tokens without host")]
#[test_case(
    &[
        ("AKAMAI_HOST", "akab-env.luna.akamaiapis.net"),
        ("AKAMAI_CLIENT_TOKEN", "ct"),
        ("AKAMAI_CLIENT_SECRET", "cs"),
        ("AKAMAI_ACCESS_TOKEN", "at"),
    ],
    Some("https://akab-env.luna.akamaiapis.net");
    "complete environment"
)]
#[tokio::test]
async fn test_config_without_path_reads_env_only(
    envs: &[(&str, &str)],
    expected_host: Option<&str>,
) {
    let result = EdgeGrid::from_config(ctx(envs), Config::new()).await;

    match expected_host {
        Some(host) => {
            let client = result.expect("environment credential must resolve");
            assert_eq!(client.credential().host(), host);
        }
        None => {
            let err = result.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InsufficientCredentials);
        }
    }
}

#[test_case("", "cs", "at", "akab.example"; "missing client token")]
#[test_case("ct", "", "at", "akab.example"; "missing secret")]
#[test_case("ct", "cs", "", "akab.example"; "missing access token")]
#[test_case("ct", "cs", "at", ""; "missing host")]
fn test_positional_credentials_must_be_complete(
    client_token: &str,
    client_secret: &str,
    access_token: &str,
    host: &str,
) {
    let err = EdgeGrid::from_strings(ctx(&[]), client_token, client_secret, access_token, host)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientCredentials);
}

#[tokio::test]
async fn test_from_strings_source_ignores_env() -> Result<()> {
    let envs = [
        ("AKAMAI_HOST", "akab-env.luna.akamaiapis.net"),
        ("AKAMAI_CLIENT_TOKEN", "env-client"),
        ("AKAMAI_CLIENT_SECRET", "env-secret"),
        ("AKAMAI_ACCESS_TOKEN", "env-access"),
    ];
    let source = CredentialSource::FromStrings {
        client_token: "ct".to_string(),
        client_secret: "cs".to_string(),
        access_token: "at".to_string(),
        host: "https://akab.example".to_string(),
    };
    let client = EdgeGrid::from_source(ctx(&envs), source).await?;

    assert_eq!(client.credential().client_token(), "ct");
    assert_eq!(client.credential().host(), "https://akab.example");
    Ok(())
}

#[test_case("", Some(1); "max_body is the fifth line")]
#[test_case("account_key = padding\n", None; "max_body is the sixth line")]
#[tokio::test]
async fn test_compat_window_reads_five_raw_lines(
    padding: &str,
    expected: Option<usize>,
) -> Result<()> {
    let file = edgerc(&format!(
        "[default]\n\
         client_secret = cs\n\
         host = akab.example\n\
         access_token = at\n\
         client_token = ct\n\
         {padding}\
         max_body = 1\n"
    ))?;
    let config = config_for(&file).with_section_window(SectionWindow::Compat);
    let client = EdgeGrid::from_config(ctx(&[]), config).await?;

    assert_eq!(client.credential().max_body(), expected);
    Ok(())
}
