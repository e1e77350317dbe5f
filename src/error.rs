//! 适配器错误类型
//!
//! 两大类失败（§7）：传输失败（非 2xx / 网络异常）与业务失败（`ret != 0`）。
//! 两者都只影响本次提交，不会使进程退出；由 dispatch 层转成用户可见的告警。

use thiserror::Error;

/// 一次表单提交可能出现的错误
#[derive(Error, Debug)]
pub enum AdapterError {
    /// 传输层失败：HTTP 状态码非 2xx
    #[error("Transport failure: status {0}")]
    Transport(u16),

    /// 网络异常（连接失败、超时等）
    #[error("Network error: {0}")]
    Network(String),

    /// 响应体不是合法的统一封包
    #[error("Envelope decode error: {0}")]
    Decode(String),

    /// 业务失败：`ret != 0`，携带服务端错误文案
    #[error("Application failure (ret={ret}): {error}")]
    Application { ret: i64, error: String },

    /// 提交被更新的提交取代而取消
    #[error("Request cancelled")]
    Cancelled,

    #[error("Config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for AdapterError {
    fn from(e: reqwest::Error) -> Self {
        AdapterError::Network(e.to_string())
    }
}
