//! 用户通知层：告警与二次确认
//!
//! 浏览器里的 alert / confirm 在这里抽象成 Notifier trait，
//! 控制台实现走 stdout/stderr + stdin，测试用 RecordingNotifier 断言。

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

/// 告警级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    /// 操作成功的提示
    Info,
    /// 提交失败（传输或业务错误）
    Error,
}

/// 用户通知接口：告警 + 破坏性操作前的确认
#[async_trait]
pub trait Notifier: Send + Sync {
    /// 弹出一条告警/提示
    async fn alert(&self, level: AlertLevel, message: &str);

    /// 二次确认，返回用户是否同意
    async fn confirm(&self, prompt: &str) -> bool;
}

/// 控制台通知：Info 走 stdout，Error 走 stderr，确认读 stdin 一行
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    /// 免交互模式（--yes）：确认一律通过
    pub assume_yes: bool,
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn alert(&self, level: AlertLevel, message: &str) {
        match level {
            AlertLevel::Info => println!("[ok] {}", message),
            AlertLevel::Error => eprintln!("[fail] {}", message),
        }
    }

    async fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        println!("{} [y/N]", prompt);
        let mut line = String::new();
        let mut reader = BufReader::new(tokio::io::stdin());
        match reader.read_line(&mut line).await {
            Ok(_) => matches!(line.trim(), "y" | "Y" | "yes"),
            Err(e) => {
                tracing::warn!("confirm: failed to read stdin: {}", e);
                false
            }
        }
    }
}

/// 录制型通知（测试用）：记录所有告警，确认返回预设值
#[derive(Debug)]
pub struct RecordingNotifier {
    pub alerts: std::sync::Mutex<Vec<(AlertLevel, String)>>,
    pub confirm_answer: bool,
    pub confirms: std::sync::Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new(confirm_answer: bool) -> Self {
        Self {
            alerts: std::sync::Mutex::new(Vec::new()),
            confirm_answer,
            confirms: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// 指定级别的告警条数
    pub fn count(&self, level: AlertLevel) -> usize {
        self.alerts
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .count()
    }

    /// 是否有告警包含指定文本
    pub fn contains(&self, needle: &str) -> bool {
        self.alerts
            .lock()
            .unwrap()
            .iter()
            .any(|(_, msg)| msg.contains(needle))
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn alert(&self, level: AlertLevel, message: &str) {
        self.alerts
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }

    async fn confirm(&self, prompt: &str) -> bool {
        self.confirms.lock().unwrap().push(prompt.to_string());
        self.confirm_answer
    }
}
