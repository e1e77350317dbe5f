//! HTTP 传输：reqwest JSON POST，带超时与请求 ID 日志

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use uuid::Uuid;

use crate::config::BackendSection;
use crate::error::AdapterError;
use crate::protocol::{FormPayload, Operation};
use crate::transport::{Transport, TransportReply};

/// 基于 reqwest 的传输实现
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// 按配置构建：base_url 去掉尾部斜杠，超时作用于整个请求
    pub fn new(backend: &BackendSection) -> Result<Self, AdapterError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(backend.request_timeout_secs))
            .build()
            .map_err(|e| AdapterError::Config(e.to_string()))?;
        Ok(Self {
            client,
            base_url: backend.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, op: Operation) -> String {
        format!("{}/{}", self.base_url, op.path())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        op: Operation,
        payload: &FormPayload,
    ) -> Result<TransportReply, AdapterError> {
        let request_id = Uuid::new_v4();
        let url = self.url_for(op);
        tracing::debug!(%request_id, %op, %url, "submitting form payload");

        let resp = self.client.post(&url).json(payload).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;

        tracing::debug!(%request_id, status, body_len = body.len(), "response received");
        Ok(TransportReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join_strips_trailing_slash() {
        let backend = BackendSection {
            base_url: "http://127.0.0.1:8000/".to_string(),
            request_timeout_secs: 5,
        };
        let transport = HttpTransport::new(&backend).unwrap();
        assert_eq!(
            transport.url_for(Operation::Detail),
            "http://127.0.0.1:8000/detail"
        );
        assert_eq!(
            transport.url_for(Operation::FillDataToCsv),
            "http://127.0.0.1:8000/fill_data_to_csv"
        );
    }
}
