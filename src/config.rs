//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `KIWI__*` 覆盖
//! （双下划线表示嵌套，如 `KIWI__BACKEND__BASE_URL=http://10.0.0.2:8000`）。

use std::path::PathBuf;

use serde::Deserialize;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendSection,
    pub adapter: AdapterSection,
}

/// [backend] 段：后端地址与请求超时
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendSection {
    pub base_url: String,
    /// 单次请求超时（秒），超时属于传输层，适配器本身不设超时
    pub request_timeout_secs: u64,
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout_secs: 15,
        }
    }
}

/// [adapter] 段：并发提交策略
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdapterSection {
    /// 新提交是否取消上一个在途请求（关闭时仅按代次丢弃迟到响应）
    pub supersede_inflight: bool,
}

impl Default for AdapterSection {
    fn default() -> Self {
        Self {
            supersede_inflight: true,
        }
    }
}

/// 从 config 目录加载配置，环境变量 KIWI__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 KIWI__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("KIWI")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.backend.base_url, "http://127.0.0.1:8000");
        assert_eq!(cfg.backend.request_timeout_secs, 15);
        assert!(cfg.adapter.supersede_inflight);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kiwi.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            "[backend]\nbase_url = \"http://10.1.1.1:9000\"\nrequest_timeout_secs = 3\n\n[adapter]\nsupersede_inflight = false"
        )
        .unwrap();

        let cfg = load_config(Some(path)).unwrap();
        assert_eq!(cfg.backend.base_url, "http://10.1.1.1:9000");
        assert_eq!(cfg.backend.request_timeout_secs, 3);
        assert!(!cfg.adapter.supersede_inflight);
    }
}
