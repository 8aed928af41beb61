//! 会话跟踪使用示例
//!
//! 演示一个视频观看会话：打开、开始、应用挂起与恢复、完成。

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tentacles_core::api::{
    builtin, Action, ActionStatus, AnalyticsSink, DomainActivity, IdStrategy, RawEvent, Tentacles,
    TentaclesOptions,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Video {
    video_name: String,
    language: String,
}

struct PrintSink;

impl AnalyticsSink for PrintSink {
    fn name(&self) -> &str {
        "print"
    }

    fn report(&self, event: &RawEvent) {
        println!("→ {}", serde_json::to_string(event).unwrap_or_default());
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let tentacles = Tentacles::with_options(TentaclesOptions {
        id_strategy: IdStrategy::Sequential,
        ..TentaclesOptions::default()
    });
    tentacles.register_global_middleware(builtin::calculate_domain_activity_duration(
        ActionStatus::Open,
        ActionStatus::Complete,
    ));
    tentacles.register_sink(Arc::new(PrintSink), vec![builtin::standardize_for_snake_case()]);

    let video = DomainActivity::new(
        "watchVideo",
        Video {
            video_name: "Learning Rust".to_string(),
            language: "English".to_string(),
        },
    );

    tentacles.track_domain_activity(&video, &Action::open())?;
    tentacles.track_domain_activity(&video, &Action::start())?;

    println!("\n-- app suspended --");
    tentacles.on_app_will_suspend();
    println!("-- app resumed --\n");
    tentacles.on_app_did_resume();

    tentacles.track_domain_activity(&video, &Action::complete())?;

    // 重复完成会被拒绝
    if let Err(err) = tentacles.track_domain_activity(&video, &Action::complete()) {
        println!("\nrejected: {err}");
    }

    Ok(())
}
