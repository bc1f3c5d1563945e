use self::support::{app, content_type, demo_views, into_text, serve};

mod support;

#[tokio::test]
async fn should_serve_view_as_plain_text() {
    let serve = serve(app::builder(demo_views()).build().unwrap()).await;
    let resp = serve.get("/index/dynamicViewAsPlainText").await;
    assert_eq!(content_type(&resp), "text/plain");

    let body = into_text(resp.into_body()).await;
    assert!(body.contains("<title>Roadway - dynamic content</title>"));
    assert!(body.contains("<h1>Road for hyper</h1>"));
    serve.shutdown();
}

#[tokio::test]
async fn should_serve_plain_text_as_javascript() {
    let serve = serve(app::builder(demo_views()).build().unwrap()).await;
    let resp = serve.get("/index/plainTextAsJS").await;
    assert_eq!(content_type(&resp), "application/javascript");
    assert_eq!(into_text(resp.into_body()).await, "var foo = \"bar\";");
    serve.shutdown();
}

#[tokio::test]
async fn should_serve_json() {
    let serve = serve(app::builder(demo_views()).build().unwrap()).await;
    let resp = serve.get("/index/jsonResponse").await;
    assert_eq!(content_type(&resp), "application/json");
    assert_eq!(into_text(resp.into_body()).await, r#"{"foo":"bar","baz":[1,2,3]}"#);
    serve.shutdown();
}
