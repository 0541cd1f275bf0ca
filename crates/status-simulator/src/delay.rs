//! 随机延迟生成
//!
//! 相邻两步之间的等待时间：在 `[min, max]` 分钟内均匀取整分钟数，再加 0–59 秒。
//! 使用线程本地的随机数生成器，大量并发模拟之间不共享可变状态。

use std::time::Duration;

use rand::Rng;

/// 按超时区间计算一次随机延迟
pub fn calculate_delay(min_timeout_minutes: i32, max_timeout_minutes: i32) -> Duration {
    calculate_delay_with(&mut rand::rng(), min_timeout_minutes, max_timeout_minutes)
}

/// 使用给定随机源计算延迟
pub fn calculate_delay_with<R: Rng>(
    rng: &mut R,
    min_timeout_minutes: i32,
    max_timeout_minutes: i32,
) -> Duration {
    let (low, high) = delay_bounds(min_timeout_minutes, max_timeout_minutes);

    let minutes = rng.random_range(low..=high);
    let seconds = rng.random_range(0..=59u64);

    Duration::from_millis((minutes * 60 + seconds) * 1000)
}

/// 归一化后的分钟区间 `[low, high]`
///
/// 上下界顺序不做假设；下界至少 1 分钟；两个输入都不大于 0 时退化为单点 `[1, 1]`。
fn delay_bounds(min_timeout_minutes: i32, max_timeout_minutes: i32) -> (u64, u64) {
    let low = i64::from(min_timeout_minutes.min(max_timeout_minutes)).max(1);
    let high = i64::from(min_timeout_minutes.max(max_timeout_minutes)).max(low);

    (low as u64, high as u64)
}
