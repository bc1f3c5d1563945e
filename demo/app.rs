use hyper::Method;
use roadway::prelude::*;
use roadway::{Controller, Error, Reply, Road, RoadBuilder, Views};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct Payload {
    foo: &'static str,
    baz: Vec<u8>,
}

/// The views directory, `ROADWAY_VIEWS` or the bundled `demo/views`.
pub fn views_dir() -> PathBuf {
    std::env::var_os("ROADWAY_VIEWS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/demo/views")))
}

fn index<B: Send + 'static>() -> Controller<B, Error> {
    Controller::new("index")
        .action("index", |_| async move { Ok(Reply::view()) })
        .action("dynamicView", |_| async move {
            Ok(Reply::view()
                .with("title", "Roadway - dynamic content")
                .with("heading", "Road for hyper"))
        })
        .action("dynamicViewAsPlainText", |_| async move {
            Ok(Reply::template("index/dynamicView.html")
                .with("title", "Roadway - dynamic content")
                .with("heading", "Road for hyper")
                .content_type("text/plain"))
        })
        .action("plainTextAsJS", |_| async move { Ok(Reply::js("var foo = \"bar\";")) })
        .action("jsonResponse", |_| async move {
            Reply::try_json(&Payload {
                foo: "bar",
                baz: vec![1, 2, 3],
            })
        })
}

fn foo<B: Send + 'static>() -> Controller<B, Error> {
    Controller::new("foo")
        .action("index", |_| async move { Ok(Reply::view()) })
        .action("bar", |_| async move { Ok(Reply::view()) })
        .action_with_methods(
            "baz",
            vec![Method::POST, Method::PUT, Method::DELETE],
            |req: hyper::Request<B>| async move {
                let id = req.id().map(ToOwned::to_owned).unwrap_or_default();
                Ok(Reply::text(id))
            },
        )
}

/// The demo application, without a completion hook so callers can add their own.
pub fn builder<B: Send + 'static>(views: Views) -> RoadBuilder<B, Error> {
    Road::builder()
        .views(views)
        .controller(index())
        .controller(foo())
        .get("/customPath", |_| async move { Ok(Reply::text("custom URL mapping")) })
}
