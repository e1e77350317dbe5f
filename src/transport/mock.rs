//! Mock 传输（测试用，无需真实后端）
//!
//! 预置应答按顺序消费，同时记录收到的每个请求，便于断言
//! 「确认被拒时不发请求」这类性质。

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AdapterError;
use crate::protocol::{FormPayload, Operation};
use crate::transport::{Transport, TransportReply};

/// 一条预置应答
pub enum MockReply {
    /// 返回指定状态码与响应体
    Reply(u16, String),
    /// 模拟网络异常
    NetworkError(String),
    /// 挂起指定毫秒后再返回（模拟慢请求，测过期丢弃用）
    DelayedReply(u64, u16, String),
}

/// Mock 传输：脚本化应答 + 请求录制
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<(Operation, FormPayload)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条成功封包应答（status 200）
    pub fn push_envelope(&self, body: &str) {
        self.push(MockReply::Reply(200, body.to_string()));
    }

    pub fn push(&self, reply: MockReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    /// 已收到的请求数
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// 已收到的请求快照
    pub fn requests(&self) -> Vec<(Operation, FormPayload)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(
        &self,
        op: Operation,
        payload: &FormPayload,
    ) -> Result<TransportReply, AdapterError> {
        self.requests.lock().unwrap().push((op, payload.clone()));

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Reply(status, body)) => Ok(TransportReply { status, body }),
            Some(MockReply::NetworkError(msg)) => Err(AdapterError::Network(msg)),
            Some(MockReply::DelayedReply(ms, status, body)) => {
                tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
                Ok(TransportReply { status, body })
            }
            // 没有预置应答时当作网络异常，避免测试悄悄通过
            None => Err(AdapterError::Network("mock: no scripted reply".to_string())),
        }
    }
}
