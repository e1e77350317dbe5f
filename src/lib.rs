//! Kiwi Form - 内部管理工具的表单提交适配器
//!
//! 模块划分：
//! - **adapter**: 提交流程（确认门禁、封包判定、结果路由、过期响应丢弃）
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **error**: 错误类型（传输失败 / 业务失败 / 取消）
//! - **notify**: 用户通知抽象（告警、二次确认）与控制台实现
//! - **observability**: tracing 初始化
//! - **output**: detail 结果的单槽输出状态（按代次写入）
//! - **protocol**: 操作名、表单载荷、服务端统一封包
//! - **transport**: 传输层抽象（reqwest HTTP / 测试 Mock）

pub mod adapter;
pub mod config;
pub mod error;
pub mod notify;
pub mod observability;
pub mod output;
pub mod protocol;
pub mod transport;

pub use adapter::{FormAdapter, SubmitOutcome};
pub use error::AdapterError;
pub use protocol::{FormPayload, Operation, ResponseEnvelope};
