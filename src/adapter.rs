//! 表单提交适配器：提交 -> 封包判定 -> 结果路由
//!
//! 每次提交是一条独立的两态状态机（Pending -> Resolved | Failed），
//! 首个响应即终态，不重试。dispatch 在此之上补了两个终态：
//! - Aborted：破坏性操作确认被拒，请求根本不会发出
//! - Superseded：被更新的提交取代（在途被取消，或迟到响应按代次被丢弃）
//!
//! 输出槽与通知器都是适配器的显式成员，不依赖任何全局可变状态。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;

use crate::error::AdapterError;
use crate::notify::{AlertLevel, Notifier};
use crate::output::OutputState;
use crate::protocol::{FormPayload, Operation, ResponseEnvelope};
use crate::transport::Transport;

/// force recover 的确认提示
const FORCE_RECOVER_PROMPT: &str = "force recover 会覆盖现有数据，确认继续？";

/// 一次 dispatch 的终态
#[derive(Debug)]
pub enum SubmitOutcome {
    /// 成功，封包已按操作路由（detail 写输出槽，其余弹成功提示）
    Resolved(ResponseEnvelope),
    /// 失败，已向用户弹出告警
    Failed(AdapterError),
    /// 确认被拒，未发出请求
    Aborted,
    /// 被更新的提交取代，无任何副作用
    Superseded,
}

impl SubmitOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, SubmitOutcome::Resolved(_))
    }
}

/// 表单提交适配器
pub struct FormAdapter {
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
    output: OutputState,
    /// 提交代次，每次 dispatch 递增
    generation: AtomicU64,
    /// 最近一次在途提交的取消令牌
    inflight: Mutex<Option<CancellationToken>>,
    /// 新提交是否取消上一个在途请求
    supersede_inflight: bool,
}

impl FormAdapter {
    pub fn new(
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
        supersede_inflight: bool,
    ) -> Self {
        Self {
            transport,
            notifier,
            output: OutputState::new(),
            generation: AtomicU64::new(0),
            inflight: Mutex::new(None),
            supersede_inflight,
        }
    }

    /// detail 结果的输出槽（可 clone 共享给展示方）
    pub fn output(&self) -> OutputState {
        self.output.clone()
    }

    /// 纯提交：POST -> 状态码判定 -> 封包解析 -> ret 判定
    ///
    /// 不触发任何用户可见副作用，副作用在 [`dispatch`](Self::dispatch) 里做。
    pub async fn submit(
        &self,
        op: Operation,
        payload: &FormPayload,
    ) -> Result<ResponseEnvelope, AdapterError> {
        let reply = self.transport.post(op, payload).await?;
        if !reply.is_success() {
            return Err(AdapterError::Transport(reply.status));
        }
        let envelope: ResponseEnvelope =
            serde_json::from_str(&reply.body).map_err(|e| AdapterError::Decode(e.to_string()))?;
        if !envelope.is_ok() {
            return Err(AdapterError::Application {
                ret: envelope.ret,
                error: envelope.error.clone().unwrap_or_default(),
            });
        }
        Ok(envelope)
    }

    /// 完整提交流程：确认门禁 -> 提交 -> 结果路由 -> 告警
    pub async fn dispatch(&self, op: Operation, payload: FormPayload) -> SubmitOutcome {
        // 破坏性操作先过确认
        if op == Operation::Recover && payload.force_flag() {
            if !self.notifier.confirm(FORCE_RECOVER_PROMPT).await {
                tracing::info!(%op, "force recover declined, request not sent");
                return SubmitOutcome::Aborted;
            }
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let token = CancellationToken::new();
        {
            // 仅在同步段持锁，换出上一个令牌
            let mut guard = self.inflight.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(prev) = guard.replace(token.clone()) {
                if self.supersede_inflight {
                    prev.cancel();
                }
            }
        }

        let result = tokio::select! {
            _ = token.cancelled() => Err(AdapterError::Cancelled),
            r = self.submit(op, &payload) => r,
        };

        match result {
            Ok(envelope) => {
                if op == Operation::Detail {
                    // 只有当前代次可以写输出槽，迟到响应在这里被丢弃
                    if !self.output.commit(generation, envelope.detail_text()) {
                        return SubmitOutcome::Superseded;
                    }
                } else {
                    self.notifier
                        .alert(AlertLevel::Info, &format!("{} 完成", op))
                        .await;
                }
                SubmitOutcome::Resolved(envelope)
            }
            Err(AdapterError::Cancelled) => {
                tracing::debug!(%op, generation, "submission superseded");
                SubmitOutcome::Superseded
            }
            Err(e) => {
                tracing::warn!(%op, generation, error = %e, "submission failed");
                self.notifier.alert(AlertLevel::Error, &e.to_string()).await;
                SubmitOutcome::Failed(e)
            }
        }
    }
}
