//! Kiwi Form - 命令行入口
//!
//! 用法：`kiwi-form <operation> [key=value]... [--force] [--yes]`
//!
//! 把一次表单提交发到后端：detail 成功后打印输出槽内容，
//! 其余操作弹成功/失败提示。`--yes` 跳过 force recover 的交互确认。

use std::sync::Arc;

use anyhow::{bail, Context};
use kiwi_form::adapter::{FormAdapter, SubmitOutcome};
use kiwi_form::config::load_config;
use kiwi_form::notify::ConsoleNotifier;
use kiwi_form::protocol::{FormPayload, Operation};
use kiwi_form::transport::HttpTransport;

fn usage() -> String {
    let ops = Operation::all()
        .iter()
        .map(|op| op.path())
        .collect::<Vec<_>>()
        .join(" | ");
    format!("usage: kiwi-form <{}> [key=value]... [--force] [--yes]", ops)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    kiwi_form::observability::init();

    let mut args = std::env::args().skip(1);
    let Some(op_name) = args.next() else {
        bail!("{}", usage());
    };
    let Some(op) = Operation::parse(&op_name) else {
        bail!("unknown operation [{}]\n{}", op_name, usage());
    };

    let mut payload = FormPayload::new();
    let mut assume_yes = false;
    for arg in args {
        match arg.as_str() {
            "--force" => payload = payload.field("force", true),
            "--yes" => assume_yes = true,
            _ => {
                let Some((key, value)) = arg.split_once('=') else {
                    bail!("bad argument [{}], expected key=value\n{}", arg, usage());
                };
                payload = payload.field(key, value);
            }
        }
    }

    let cfg = load_config(None).context("Failed to load config")?;
    let transport = HttpTransport::new(&cfg.backend).context("Failed to build transport")?;
    let adapter = FormAdapter::new(
        Arc::new(transport),
        Arc::new(ConsoleNotifier { assume_yes }),
        cfg.adapter.supersede_inflight,
    );

    let output = adapter.output();
    match adapter.dispatch(op, payload).await {
        SubmitOutcome::Resolved(_) => {
            if op == Operation::Detail {
                if let Some(text) = output.snapshot() {
                    println!("{}", text);
                }
            }
            Ok(())
        }
        SubmitOutcome::Aborted => {
            tracing::info!("aborted by user");
            Ok(())
        }
        SubmitOutcome::Superseded => Ok(()),
        SubmitOutcome::Failed(e) => Err(e).context("Submission failed"),
    }
}
