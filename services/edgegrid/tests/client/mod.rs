use crate::{init_logger, static_env, MockHttpSend, RecordingSigner, Route};
use anyhow::Result;
use bytes::Bytes;
use edgegrid::{EdgeGrid, RequestSpec};
use edgegrid_core::{Context, ErrorKind};
use http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use test_case::test_case;

const HOST: &str = "akab-host.luna.akamaiapis.net";

fn client(http: MockHttpSend, signer: RecordingSigner) -> Result<EdgeGrid> {
    init_logger();
    let ctx = Context::new()
        .with_http_send(http)
        .with_env(static_env(&[]));
    Ok(EdgeGrid::from_strings(ctx, "ct", "cs", "at", HOST)?.with_request_signer(signer))
}

#[tokio::test]
async fn test_send_without_redirect() -> Result<()> {
    let http = MockHttpSend::default().route("/a", Route::respond(200, "hello"));
    let signer = RecordingSigner::default();
    let client = client(http.clone(), signer.clone())?;

    let resp = client.auth(RequestSpec::new("/a")).await?.send().await?;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.body(), &Bytes::from_static(b"hello"));
    assert_eq!(signer.signed(), vec!["/a"]);

    let seen = http.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].uri, format!("https://{HOST}/a"));
    assert!(seen[0]
        .authorization
        .as_deref()
        .is_some_and(|v| v.starts_with("EG1-HMAC-SHA256 client_token=ct;access_token=at;")));
    Ok(())
}

#[test_case(300)]
#[test_case(301)]
#[test_case(302)]
#[test_case(303)]
#[test_case(307)]
#[test_case(308)]
#[tokio::test]
async fn test_redirect_is_resigned_once(status: u16) -> Result<()> {
    let http = MockHttpSend::default()
        .route("/a", Route::redirect(status, "/b"))
        .route("/b", Route::respond(200, "from b"));
    let signer = RecordingSigner::default();
    let client = client(http.clone(), signer.clone())?;

    let resp = client.auth(RequestSpec::new("/a")).await?.send().await?;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.body(), &Bytes::from_static(b"from b"));
    assert_eq!(signer.signed(), vec!["/a", "/b"]);

    let seen = http.seen();
    assert_eq!(
        seen.iter().map(|s| s.uri.clone()).collect::<Vec<_>>(),
        vec![format!("https://{HOST}/a"), format!("https://{HOST}/b")]
    );
    // Every hop carries its own signature.
    assert_ne!(seen[0].authorization, seen[1].authorization);
    Ok(())
}

#[tokio::test]
async fn test_redirect_keeps_method_and_body() -> Result<()> {
    let http = MockHttpSend::default()
        .route("/a", Route::redirect(307, "https://elsewhere.example/b?x=1"))
        .route("/b?x=1", Route::respond(201, ""));
    let client = client(http.clone(), RecordingSigner::default())?;

    let spec = RequestSpec::new("/a")
        .with_method(Method::POST)
        .with_body(r#"{"k":"v"}"#);
    let resp = client.auth(spec).await?.send().await?;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let seen = http.seen();
    assert_eq!(seen.len(), 2);
    // Redirects stay on the credential host.
    assert_eq!(seen[1].uri, format!("https://{HOST}/b?x=1"));
    assert_eq!(seen[1].method, Method::POST);
    assert_eq!(seen[1].body, Bytes::from_static(br#"{"k":"v"}"#));
    Ok(())
}

#[test_case("b", "/papi/v1/b"; "bare segment")]
#[test_case("../v2/groups", "/papi/v2/groups"; "parent segment")]
#[test_case("?page=2", "/papi/v1/groups?page=2"; "query only")]
#[tokio::test]
async fn test_relative_redirect_resolves_against_request(
    location: &str,
    expected: &str,
) -> Result<()> {
    let http = MockHttpSend::default()
        .route("/papi/v1/groups", Route::redirect(302, location))
        .route(expected, Route::respond(200, "moved"));
    let signer = RecordingSigner::default();
    let client = client(http.clone(), signer.clone())?;

    let resp = client
        .auth(RequestSpec::new("/papi/v1/groups"))
        .await?
        .send()
        .await?;

    assert_eq!(resp.body(), &Bytes::from_static(b"moved"));
    assert_eq!(http.seen()[1].uri, format!("https://{HOST}{expected}"));
    Ok(())
}

#[tokio::test]
async fn test_redirect_loop_is_bounded() -> Result<()> {
    let http = MockHttpSend::default()
        .route("/a", Route::redirect(302, "/b"))
        .route("/b", Route::redirect(302, "/a"));
    let signer = RecordingSigner::default();
    let client = client(http.clone(), signer.clone())?.with_max_redirects(Some(3));

    let err = client
        .auth(RequestSpec::new("/a"))
        .await?
        .send()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RedirectLoopExceeded);
    // The first request plus three followed redirects.
    assert_eq!(http.seen().len(), 4);
    assert_eq!(signer.signed(), vec!["/a", "/b", "/a", "/b"]);
    Ok(())
}

#[tokio::test]
async fn test_unbounded_redirects_follow_long_chains() -> Result<()> {
    let mut http = MockHttpSend::default().route("/hop/19", Route::respond(200, "done"));
    for i in 0..19 {
        http = http.route(format!("/hop/{i}"), Route::redirect(301, format!("/hop/{}", i + 1)));
    }
    let client = client(http.clone(), RecordingSigner::default())?.with_max_redirects(None);

    let resp = client.auth(RequestSpec::new("/hop/0")).await?.send().await?;

    assert_eq!(resp.body(), &Bytes::from_static(b"done"));
    assert_eq!(http.seen().len(), 20);
    Ok(())
}

#[tokio::test]
async fn test_transport_error_reaches_callback() -> Result<()> {
    let http = MockHttpSend::default().route("/a", Route::Fail);
    let client = client(http.clone(), RecordingSigner::default())?;

    let kind = client
        .auth(RequestSpec::new("/a"))
        .await?
        .send_with(|outcome| outcome.map(|_| ()).unwrap_err().kind())
        .await;

    assert_eq!(kind, ErrorKind::TransportError);
    // Never retried.
    assert_eq!(http.seen().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_callback_gets_body_then_head() -> Result<()> {
    let http = MockHttpSend::default()
        .route("/a", Route::redirect(302, "/b"))
        .route("/b", Route::respond(200, "from b"));
    let client = client(http, RecordingSigner::default())?;

    let (body, status) = client
        .auth(RequestSpec::new("/a"))
        .await?
        .send_with(|outcome| {
            let (body, parts) = outcome.expect("request must succeed");
            (body, parts.status)
        })
        .await;

    assert_eq!(body, Bytes::from_static(b"from b"));
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_auth_do_not_share_state() -> Result<()> {
    let http = MockHttpSend::default()
        .route("/a", Route::respond(200, "a"))
        .route("/b", Route::respond(200, "b"));
    let client = client(http, RecordingSigner::default())?;

    let (a, b) = tokio::join!(
        client.auth(RequestSpec::new("/a")),
        client.auth(RequestSpec::new("/b")),
    );
    let (a, b) = (a?, b?);
    assert_eq!(a.signed().spec().path(), "/a");
    assert_eq!(b.signed().spec().path(), "/b");

    let (a, b) = tokio::join!(a.send(), b.send());
    assert_eq!(a?.body(), &Bytes::from_static(b"a"));
    assert_eq!(b?.body(), &Bytes::from_static(b"b"));
    Ok(())
}

#[tokio::test]
async fn test_signed_request_can_be_detached() -> Result<()> {
    let client = client(MockHttpSend::default(), RecordingSigner::default())?;

    let req = client
        .auth(RequestSpec::new("/papi/v1/contracts"))
        .await?
        .into_signed()
        .into_http();

    assert_eq!(req.uri().to_string(), format!("https://{HOST}/papi/v1/contracts"));
    assert!(req.headers().contains_key(http::header::AUTHORIZATION));
    Ok(())
}
