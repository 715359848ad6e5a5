use crate::constants::DEFAULT_MAX_REDIRECTS;
use crate::provide_credential::{DefaultCredentialProvider, StaticCredentialProvider};
use crate::{Config, Credential, CredentialSource, RequestSigner, RequestSpec, SignedRequest};
use bytes::Bytes;
use edgegrid_core::{Context, Error, ProvideCredential, Result, SignRequest};
use http::header::LOCATION;
use http::{StatusCode, Uri};
use log::{debug, log, Level};
use std::sync::Arc;
use url::Url;

/// EdgeGrid signs requests with one resolved [`Credential`] and follows
/// redirects by re-signing every hop.
///
/// ```no_run
/// use edgegrid::{Config, EdgeGrid, RequestSpec};
/// use edgegrid_core::{Context, OsEnv};
/// use edgegrid_file_read_tokio::TokioFileRead;
/// use edgegrid_http_send_reqwest::ReqwestHttpSend;
///
/// # async fn example() -> edgegrid_core::Result<()> {
/// let ctx = Context::new()
///     .with_file_read(TokioFileRead)
///     .with_http_send(ReqwestHttpSend::try_default()?)
///     .with_env(OsEnv);
///
/// let client = EdgeGrid::from_config(ctx, Config::new().with_path("~/.edgerc")).await?;
/// let resp = client
///     .auth(RequestSpec::new("/papi/v1/contracts"))
///     .await?
///     .send()
///     .await?;
/// println!("{}", resp.status());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EdgeGrid {
    ctx: Context,
    credential: Credential,
    signer: Arc<dyn SignRequest<Credential = Credential>>,
    max_redirects: Option<usize>,
    debug: bool,
}

impl EdgeGrid {
    /// Create a client for an already resolved credential.
    pub fn new(ctx: Context, credential: Credential) -> Self {
        Self {
            ctx,
            credential,
            signer: Arc::new(RequestSigner::new()),
            max_redirects: Some(DEFAULT_MAX_REDIRECTS),
            debug: false,
        }
    }

    /// Create a client from explicit credential strings.
    ///
    /// Every value must be non-empty, otherwise `InsufficientCredentials`
    /// is returned.
    pub fn from_strings(
        ctx: Context,
        client_token: &str,
        client_secret: &str,
        access_token: &str,
        host: &str,
    ) -> Result<Self> {
        let credential =
            StaticCredentialProvider::new(client_token, client_secret, access_token, host)
                .load(&ctx)?;
        Ok(Self::new(ctx, credential))
    }

    /// Create a client from the object form of configuration.
    pub async fn from_config(ctx: Context, config: Config) -> Result<Self> {
        let source = config.source(&ctx);
        Ok(Self::from_source(ctx, source)
            .await?
            .with_max_redirects(config.max_redirects)
            .with_debug(config.debug))
    }

    /// Create a client from an explicit credential source.
    pub async fn from_source(ctx: Context, source: CredentialSource) -> Result<Self> {
        let described = format!("{source:?}");
        let credential = DefaultCredentialProvider::new(source)
            .provide_credential(&ctx)
            .await?
            .ok_or_else(|| {
                Error::insufficient_credentials(format!("no credential found in {described}"))
            })?;

        debug!("resolved credential {credential:?}");
        Ok(Self::new(ctx, credential))
    }

    /// Replace the signing implementation.
    pub fn with_request_signer(
        mut self,
        signer: impl SignRequest<Credential = Credential>,
    ) -> Self {
        self.signer = Arc::new(signer);
        self
    }

    /// Set the maximum number of redirects followed by one send, `None`
    /// to follow without limit.
    pub fn with_max_redirects(mut self, max_redirects: Option<usize>) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Log every request and response at `info` level.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// The credential requests are signed with.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Sign `spec`, returning a request ready to send.
    pub async fn auth(&self, spec: RequestSpec) -> Result<PendingRequest<'_>> {
        let signed = self.sign(spec).await?;
        Ok(PendingRequest {
            client: self,
            signed,
        })
    }

    async fn sign(&self, spec: RequestSpec) -> Result<SignedRequest> {
        let (mut parts, body) = spec.build(self.credential.host())?.into_parts();
        self.signer
            .sign_request(&self.ctx, &mut parts, &body, &self.credential)
            .await?;

        log!(
            self.log_level(),
            "signed {} {}",
            parts.method,
            parts.uri
        );
        Ok(SignedRequest::new(
            spec,
            http::Request::from_parts(parts, body),
        ))
    }

    async fn send(&self, mut signed: SignedRequest) -> Result<http::Response<Bytes>> {
        let mut hops = 0;
        loop {
            let (spec, req) = signed.into_parts();
            let uri = req.uri().clone();
            let resp = self.ctx.http_send(req).await?;
            log!(self.log_level(), "received {} for {}", resp.status(), spec.path());

            if !is_redirect(resp.status()) {
                return Ok(resp);
            }

            hops += 1;
            if let Some(max) = self.max_redirects {
                if hops > max {
                    return Err(Error::redirect_loop_exceeded(format!(
                        "gave up after {max} redirects, last at {}",
                        spec.path()
                    )));
                }
            }

            let path = redirect_path(&uri, &resp)?;
            log!(
                self.log_level(),
                "following redirect {hops} from {} to {path}",
                spec.path()
            );
            signed = self.sign(spec.redirected_to(path)).await?;
        }
    }

    fn log_level(&self) -> Level {
        if self.debug {
            Level::Info
        } else {
            Level::Debug
        }
    }
}

/// A signed request bound to the client that signed it.
#[derive(Debug)]
pub struct PendingRequest<'a> {
    client: &'a EdgeGrid,
    signed: SignedRequest,
}

impl PendingRequest<'_> {
    /// The signed request about to be sent.
    pub fn signed(&self) -> &SignedRequest {
        &self.signed
    }

    /// Detach the signed request, to send it through another transport.
    pub fn into_signed(self) -> SignedRequest {
        self.signed
    }

    /// Send the request, re-signing and re-sending on redirects, and
    /// return the first non-redirect response.
    ///
    /// Transport failures are returned as `TransportError` and never
    /// retried.
    pub async fn send(self) -> Result<http::Response<Bytes>> {
        self.client.send(self.signed).await
    }

    /// Send the request and hand the outcome to `callback`.
    ///
    /// On success the callback gets the body first and the response head
    /// second.
    pub async fn send_with<F, T>(self, callback: F) -> T
    where
        F: FnOnce(Result<(Bytes, http::response::Parts)>) -> T,
    {
        let outcome = self.send().await.map(|resp| {
            let (parts, body) = resp.into_parts();
            (body, parts)
        });
        callback(outcome)
    }
}

fn is_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MULTIPLE_CHOICES
            | StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

/// Path and query of the `Location` header, resolved against `current`.
///
/// Scheme and host are dropped: redirects are taken as relative to the
/// credential host.
fn redirect_path(current: &Uri, resp: &http::Response<Bytes>) -> Result<String> {
    let location = resp
        .headers()
        .get(LOCATION)
        .ok_or_else(|| Error::request_invalid("redirect response without location"))?
        .to_str()?;

    let base = Url::parse(&current.to_string()).map_err(|e| {
        Error::request_invalid(format!("request uri {current} is not absolute")).with_source(e)
    })?;
    let target = base.join(location).map_err(|e| {
        Error::request_invalid(format!("invalid redirect location {location:?}")).with_source(e)
    })?;

    Ok(match target.query() {
        Some(query) => format!("{}?{query}", target.path()),
        None => target.path().to_string(),
    })
}
