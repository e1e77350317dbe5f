//! 可观测性：tracing 初始化
//!
//! 默认 info，`RUST_LOG` 可覆盖；重复初始化静默忽略（测试里常见）。

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
}
