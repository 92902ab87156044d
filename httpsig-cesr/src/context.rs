use async_trait::async_trait;
use bytes::Bytes;
use httpsig_cesr_core::{Env, HttpSend, OsEnv, Result};
use httpsig_cesr_http_send_reqwest::ReqwestHttpSend;
use reqwest::Client;
use std::collections::HashMap;

/// DefaultContext sends requests with reqwest and reads the OS environment.
#[derive(Debug, Default, Clone)]
pub struct DefaultContext {
    http: ReqwestHttpSend,
}

impl DefaultContext {
    /// Create a DefaultContext with a default reqwest client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a DefaultContext sending through the given reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self {
            http: ReqwestHttpSend::new(client),
        }
    }
}

#[async_trait]
impl HttpSend for DefaultContext {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.http.http_send(req).await
    }
}

impl Env for DefaultContext {
    fn var(&self, key: &str) -> Option<String> {
        OsEnv.var(key)
    }

    fn vars(&self) -> HashMap<String, String> {
        OsEnv.vars()
    }
}
