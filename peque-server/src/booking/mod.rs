//! 预约业务规则 (纯函数层)
//!
//! - [`availability`] - 可预约日期与时段网格
//! - [`eligibility`] - 收货资格校验 (品相 / 停收 / 数量门槛)
//!
//! 这一层不访问数据库；处理函数先从仓储层取出所需状态，再调用
//! 这里的纯函数做决策。

pub mod availability;
pub mod eligibility;

pub use availability::{
    DEFAULT_WEEKS_AHEAD, MAX_WEEKS_AHEAD, Slot, bookable_dates, is_past_slot,
    is_valid_slot_start, slots_for_date,
};
pub use eligibility::{EligibilityEntry, Rejection, validate};
