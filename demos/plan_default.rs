//! 以預設算例排程並列印結果
//!
//! 執行：`cargo run --example plan_default -- [加油船數量]`

use anyhow::Context;
use bunker::prelude::*;
use bunker::sample::{default_config, default_requests};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let bunker_count = match std::env::args().nth(1) {
        Some(arg) => arg.parse().context("加油船數量必須是正整數")?,
        None => 1,
    };

    let config = default_config()
        .with_bunker_count(bunker_count)
        .with_formulation(FormulationConfig::default().with_tie_break(TieBreak::FewestRefills));
    let requests = default_requests();

    let outcome = Planner::new(config).plan(&requests)?;
    let Some(schedule) = outcome.schedule else {
        anyhow::bail!("未得到排程: {}", outcome.messages.join("; "));
    };

    println!("{}", schedule);
    for entry in &schedule.entries {
        let request = &requests[entry.request_index];
        match entry.bunker_index {
            Some(b) => println!(
                "  請求 {:>2} (t={:>3}, v={:>3}) → 加油船 {}{}",
                entry.request_index,
                request.start_time,
                request.volume,
                b,
                if entry.refill_before {
                    format!("，先補給 {}", entry.refill_volume)
                } else {
                    String::new()
                }
            ),
            None => println!(
                "  請求 {:>2} (t={:>3}, v={:>3}) 未服務",
                entry.request_index, request.start_time, request.volume
            ),
        }
    }
    Ok(())
}
