//! 协议类型：操作名、表单载荷、服务端统一封包
//!
//! 后端的所有接口都返回统一封包 `{ ret, error, result }`：
//! - `ret == 0` 表示成功，其余值为业务错误码
//! - `error` 携带服务端错误文案（失败时）
//! - `result` 为任意 JSON 结果
//!
//! 调试模式下服务端还会附带 `cmd` / `receive` / `seq` / `debug` 字段，统一保留。

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 后端操作（固定枚举，新增操作需同步扩展路由表）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// 导出表单数据为 CSV
    FillDataToCsv,
    /// 恢复角色数据（force 模式为破坏性操作，需二次确认）
    Recover,
    /// 查询角色详情
    Detail,
}

impl Operation {
    /// 请求路径 == 线上接口名
    pub fn path(&self) -> &'static str {
        match self {
            Operation::FillDataToCsv => "fill_data_to_csv",
            Operation::Recover => "recover",
            Operation::Detail => "detail",
        }
    }

    /// 按线上接口名解析（CLI 入口用）
    pub fn parse(name: &str) -> Option<Operation> {
        match name {
            "fill_data_to_csv" => Some(Operation::FillDataToCsv),
            "recover" => Some(Operation::Recover),
            "detail" => Some(Operation::Detail),
            _ => None,
        }
    }

    /// 全部操作（usage 提示用）
    pub fn all() -> &'static [Operation] {
        &[Operation::FillDataToCsv, Operation::Recover, Operation::Detail]
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// 表单载荷：字段名 -> JSON 值，每次提交新建，不复用
///
/// 已观测到的字段：`orig`、`fields`、`platform`、`role_id`、`cate`、`force`。
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct FormPayload {
    fields: BTreeMap<String, Value>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个字段（链式）
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// `force` 字段是否为真值（破坏性 recover 的判定）
    pub fn force_flag(&self) -> bool {
        match self.fields.get("force") {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_i64().unwrap_or(0) != 0,
            Some(Value::String(s)) => matches!(s.as_str(), "1" | "true" | "yes"),
            _ => false,
        }
    }

    /// fill_data_to_csv 载荷：{ orig, fields }
    pub fn fill_data(orig: impl Into<Value>, fields: impl Into<Value>) -> Self {
        Self::new().field("orig", orig).field("fields", fields)
    }

    /// recover 载荷：{ platform, role_id, cate, force }
    pub fn recover(platform: &str, role_id: &str, cate: &str, force: bool) -> Self {
        Self::new()
            .field("platform", platform)
            .field("role_id", role_id)
            .field("cate", cate)
            .field("force", force)
    }

    /// detail 载荷：{ platform, role_id, cate }
    pub fn detail(platform: &str, role_id: &str, cate: &str) -> Self {
        Self::new()
            .field("platform", platform)
            .field("role_id", role_id)
            .field("cate", cate)
    }
}

/// 服务端统一封包
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResponseEnvelope {
    /// 处理代码，0 为成功
    pub ret: i64,
    /// 错误信息（失败时）
    #[serde(default)]
    pub error: Option<String>,
    /// 请求的结果
    #[serde(default)]
    pub result: Value,
    /// 标示（服务端回显的接口名）
    #[serde(default)]
    pub cmd: Option<String>,
    /// 请求被解析的时间点
    #[serde(default)]
    pub receive: Option<i64>,
    /// 序号
    #[serde(default)]
    pub seq: Option<i64>,
    /// 调试信息（服务端 debug 模式）
    #[serde(default)]
    pub debug: Option<String>,
}

impl ResponseEnvelope {
    /// `ret == 0` 即成功
    pub fn is_ok(&self) -> bool {
        self.ret == 0
    }

    /// detail 结果的展示文本：优先取 `result.info.detail`，否则序列化整个 result
    pub fn detail_text(&self) -> String {
        match self.result.pointer("/info/detail") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => self.result.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_roundtrip() {
        for op in Operation::all() {
            assert_eq!(Operation::parse(op.path()), Some(*op));
        }
        assert_eq!(Operation::parse("unknown"), None);
    }

    #[test]
    fn test_payload_serializes_flat() {
        let payload = FormPayload::detail("p1", "42", "c1");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"platform": "p1", "role_id": "42", "cate": "c1"})
        );
    }

    #[test]
    fn test_force_flag_variants() {
        assert!(FormPayload::recover("p", "1", "c", true).force_flag());
        assert!(!FormPayload::recover("p", "1", "c", false).force_flag());
        assert!(FormPayload::new().field("force", 1).force_flag());
        assert!(FormPayload::new().field("force", "true").force_flag());
        assert!(!FormPayload::new().field("force", "0").force_flag());
        assert!(!FormPayload::new().force_flag());
    }

    #[test]
    fn test_envelope_minimal_fields() {
        let envelope: ResponseEnvelope =
            serde_json::from_str(r#"{"ret": 0, "result": {"msg": "done"}}"#).unwrap();
        assert!(envelope.is_ok());
        assert_eq!(envelope.error, None);
        assert_eq!(envelope.result["msg"], "done");
    }

    #[test]
    fn test_envelope_extra_fields_retained() {
        let envelope: ResponseEnvelope = serde_json::from_str(
            r#"{"ret": -1, "error": "boom", "result": null, "cmd": "recover", "seq": 7}"#,
        )
        .unwrap();
        assert!(!envelope.is_ok());
        assert_eq!(envelope.error.as_deref(), Some("boom"));
        assert_eq!(envelope.cmd.as_deref(), Some("recover"));
        assert_eq!(envelope.seq, Some(7));
    }

    #[test]
    fn test_detail_text_extraction() {
        let envelope: ResponseEnvelope =
            serde_json::from_str(r#"{"ret": 0, "result": {"info": {"detail": "X"}}}"#).unwrap();
        assert_eq!(envelope.detail_text(), "X");

        let envelope: ResponseEnvelope =
            serde_json::from_str(r#"{"ret": 0, "result": {"plain": 1}}"#).unwrap();
        assert_eq!(envelope.detail_text(), r#"{"plain":1}"#);
    }
}
