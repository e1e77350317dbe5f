//! 传输层抽象与实现（HTTP / Mock）

pub mod http;
pub mod mock;

use async_trait::async_trait;

use crate::error::AdapterError;
use crate::protocol::{FormPayload, Operation};

/// 一次传输层应答：状态码 + 原始响应体
#[derive(Debug, Clone)]
pub struct TransportReply {
    pub status: u16,
    pub body: String,
}

impl TransportReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 传输接口：向指定操作 POST 一个表单载荷
///
/// 实现方只负责送达与取回原始应答，封包解析与 ret 判定在适配器里做。
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(
        &self,
        op: Operation,
        payload: &FormPayload,
    ) -> Result<TransportReply, AdapterError>;
}

pub use http::HttpTransport;
pub use mock::MockTransport;
