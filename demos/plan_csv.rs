//! 從 CSV 讀入請求並排程，結果以 JSON 輸出
//!
//! 執行：`cargo run --example plan_csv -- requests.csv [config.json]`
//!
//! CSV 需有 `time` 與 `volume` 欄位；配置檔省略時使用預設單船配置。

use anyhow::Context;
use bunker::sample::default_config;
use bunker::{PlannerConfig, Planner, RequestLoader};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let csv_path = args.next().context("用法: plan_csv <requests.csv> [config.json]")?;

    let config = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("無法讀取配置 {}", path))?;
            PlannerConfig::from_json_str(&json)?
        }
        None => default_config(),
    };

    let requests = RequestLoader::new()
        .from_path(&csv_path)
        .with_context(|| format!("無法載入請求 {}", csv_path))?;
    tracing::info!("載入 {} 筆請求", requests.len());

    let outcome = Planner::new(config).plan(&requests)?;
    match outcome.schedule {
        Some(schedule) => {
            tracing::info!("{}", schedule);
            println!("{}", schedule.to_json()?);
        }
        None => anyhow::bail!("未得到排程: {}", outcome.messages.join("; ")),
    }
    Ok(())
}
