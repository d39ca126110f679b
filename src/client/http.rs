use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;

pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub(crate) type TransportResult = Result<HttpResponse, Box<dyn StdError + Send + Sync>>;

#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum HttpBody {
    Form(Vec<(String, String)>),
    Json(serde_json::Value),
}

#[derive(Debug, Clone)]
pub(crate) struct HttpRequest {
    pub(crate) url: String,
    pub(crate) basic_auth: Option<(String, String)>,
    pub(crate) body: HttpBody,
}

pub(crate) trait HttpTransport: Send + Sync {
    fn post(&self, request: HttpRequest) -> BoxFuture<'_, TransportResult>;
}

#[derive(Debug, Clone)]
pub(crate) struct ReqwestTransport {
    pub(crate) client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post(&self, request: HttpRequest) -> BoxFuture<'_, TransportResult> {
        Box::pin(async move {
            let mut builder = self.client.post(&request.url);
            if let Some((user, password)) = &request.basic_auth {
                builder = builder.basic_auth(user, Some(password));
            }
            builder = match &request.body {
                HttpBody::Form(params) => builder.form(params),
                HttpBody::Json(value) => builder.json(value),
            };

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}
