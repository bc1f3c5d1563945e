use crate::reply::Reply;
use crate::Error;
use hyper::{Method, Request};
use std::fmt::{self, Debug, Formatter};
use std::future::Future;
use std::pin::Pin;

pub(crate) type Handler<B, E> = Box<dyn Fn(Request<B>) -> HandlerReturn<E> + Send + Sync + 'static>;
pub(crate) type HandlerReturn<E> = Box<dyn Future<Output = Result<Reply, E>> + Send + 'static>;

// A boxed request handler with the methods it accepts, `None` meaning any method.
pub(crate) struct Action<B, E> {
    handler: Handler<B, E>,
    methods: Option<Vec<Method>>,
}

impl<B, E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static> Action<B, E> {
    pub(crate) fn new<H, R>(methods: Option<Vec<Method>>, handler: H) -> Action<B, E>
    where
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Reply, E>> + Send + 'static,
    {
        let handler: Handler<B, E> = Box::new(move |req: Request<B>| Box::new(handler(req)));
        Action { handler, methods }
    }

    pub(crate) async fn invoke(&self, req: Request<B>) -> crate::Result<Reply> {
        Pin::from((self.handler)(req)).await.map_err(Error::from_handler)
    }
}

impl<B, E> Action<B, E> {
    pub(crate) fn is_match_method(&self, method: &Method) -> bool {
        match self.methods {
            Some(ref methods) => methods.contains(method),
            None => true,
        }
    }
}

impl<B, E> Debug for Action<B, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.methods {
            Some(ref methods) => write!(f, "{{ methods: {:?} }}", methods),
            None => write!(f, "{{ methods: * }}"),
        }
    }
}
