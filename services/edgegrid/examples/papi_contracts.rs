use anyhow::Result;
use edgegrid::{Config, EdgeGrid, RequestSpec, DEFAULT_EDGERC_PATH};
use edgegrid_core::{Context, OsEnv};
use edgegrid_file_read_tokio::TokioFileRead;
use edgegrid_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::try_default()?)
        .with_env(OsEnv);

    let section = std::env::args().nth(1).unwrap_or_else(|| "default".to_string());
    let config = Config::new()
        .with_path(DEFAULT_EDGERC_PATH)
        .with_section(&section)
        .with_debug(true);

    let client = match EdgeGrid::from_config(ctx, config).await {
        Ok(client) => client,
        Err(e) if e.is_credential_error() => {
            eprintln!("No usable credentials in section [{section}]: {e}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let pending = client.auth(RequestSpec::new("/papi/v1/contracts")).await?;
    println!(
        "Authorization header: {:?}",
        pending.signed().headers().get("authorization")
    );

    pending
        .send_with(|outcome| match outcome {
            Ok((body, head)) => {
                println!("{}", head.status);
                println!("{}", String::from_utf8_lossy(&body));
            }
            Err(e) => eprintln!("Request failed: {e}"),
        })
        .await;
    Ok(())
}
