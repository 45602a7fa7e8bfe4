//! 可预约日期与时段计算
//!
//! 门店只在周二、周四接待上门收货预约。时段为固定的半小时网格：
//! 上午 10:00-14:00、下午 16:30-19:30 (最后可选开始时间分别是
//! 13:30 和 19:00)。这里的函数都是纯函数，可用性由调用方传入的
//! 已占用时段集合决定。

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 可接待预约的星期 (周二 / 周四)
const BOOKABLE_WEEKDAYS: [Weekday; 2] = [Weekday::Tue, Weekday::Thu];

/// 时段宽度 (分钟)
const SLOT_MINUTES: i64 = 30;

/// 上午营业区间 [开门, 关门)
const MORNING_OPEN: (u32, u32) = (10, 0);
const MORNING_CLOSE: (u32, u32) = (14, 0);

/// 下午营业区间 [开门, 关门)
const AFTERNOON_OPEN: (u32, u32) = (16, 30);
const AFTERNOON_CLOSE: (u32, u32) = (19, 30);

/// 默认返回未来几周的可预约日期
pub const DEFAULT_WEEKS_AHEAD: u32 = 4;

/// weeks_ahead 上限，防止生成过长的日期列表
pub const MAX_WEEKS_AHEAD: u32 = 12;

/// 单个时段及其可用性
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Slot {
    /// 开始时间，"HH:MM" 格式
    pub start: String,
    pub is_available: bool,
}

/// 日期是否落在可预约的星期上
pub fn is_bookable_weekday(date: NaiveDate) -> bool {
    BOOKABLE_WEEKDAYS.contains(&date.weekday())
}

/// 从 `today` (含) 起，未来 `weeks_ahead` 周内的可预约日期
///
/// `weeks_ahead` 会被截断到 [`MAX_WEEKS_AHEAD`]。纯函数，无副作用。
pub fn bookable_dates(today: NaiveDate, weeks_ahead: u32) -> Vec<NaiveDate> {
    let weeks = weeks_ahead.min(MAX_WEEKS_AHEAD);
    let horizon_days = (weeks as i64) * 7;

    (0..horizon_days)
        .filter_map(|offset| today.checked_add_signed(Duration::days(offset)))
        .filter(|date| is_bookable_weekday(*date))
        .collect()
}

/// 固定时段网格的全部开始时间
fn slot_grid() -> Vec<NaiveTime> {
    let mut starts = Vec::new();
    for (open, close) in [
        (MORNING_OPEN, MORNING_CLOSE),
        (AFTERNOON_OPEN, AFTERNOON_CLOSE),
    ] {
        let open = NaiveTime::from_hms_opt(open.0, open.1, 0).unwrap();
        let close = NaiveTime::from_hms_opt(close.0, close.1, 0).unwrap();
        let mut cursor = open;
        while cursor < close {
            starts.push(cursor);
            cursor += Duration::minutes(SLOT_MINUTES);
        }
    }
    starts
}

/// 时段是否已经过去 (按业务时区的 `today` / `now` 判断)
///
/// 当天开始时间不晚于当前时刻的时段视为已过去，不可再预订。
pub fn is_past_slot(date: NaiveDate, start: NaiveTime, today: NaiveDate, now: NaiveTime) -> bool {
    date < today || (date == today && start <= now)
}

/// 某日期的时段列表，`taken` 为已被非取消预约占用的 "HH:MM" 集合
///
/// 非可预约星期返回空列表而不是错误 (顾客端直接显示"当天不营业")。
/// 查询当天时，已经过去的时段标记为不可用。
pub fn slots_for_date(
    date: NaiveDate,
    taken: &HashSet<String>,
    today: NaiveDate,
    now: NaiveTime,
) -> Vec<Slot> {
    if !is_bookable_weekday(date) {
        return Vec::new();
    }

    slot_grid()
        .into_iter()
        .map(|start| {
            let label = start.format("%H:%M").to_string();
            let is_available = !taken.contains(&label) && !is_past_slot(date, start, today, now);
            Slot {
                start: label,
                is_available,
            }
        })
        .collect()
}

/// 开始时间是否落在固定时段网格上
pub fn is_valid_slot_start(start: &str) -> bool {
    slot_grid()
        .iter()
        .any(|t| t.format("%H:%M").to_string() == start)
}
