//! 收货预约资格校验
//!
//! 顾客在预约向导中填好物品清单后，先通过这里的纯函数判断这批
//! 物品是否达到上门收货的门槛，不达标时给出具体原因。规则：
//!
//! 1. 清单为空 → 拒绝
//! 2. 任何一件不是"极佳"品相 → 拒绝 (预约渠道只收极佳品相)
//! 3. 任何子类目已停收 → 拒绝，并指明是哪个子类目
//! 4. 数量门槛：服装满 20 件，或非服装满 5 件 (两类都有时任一达标即可)

use serde_json::json;
use shared::{AppError, ErrorCode};

/// 服装类最低件数 (含)
pub const MIN_CLOTHING_ITEMS: i64 = 20;

/// 非服装类最低件数 (含)
pub const MIN_NON_CLOTHING_ITEMS: i64 = 5;

/// 参与资格校验的单条物品 (已与子类目记录关联)
#[derive(Debug, Clone)]
pub struct EligibilityEntry {
    pub subcategory_name: String,
    pub is_clothing: bool,
    pub purchasing_enabled: bool,
    pub quantity: i64,
    pub is_excellent_quality: bool,
}

/// 不符合预约资格的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// 清单为空
    Empty,
    /// 存在非极佳品相的物品
    Quality,
    /// 某个子类目当前停收
    Disabled { subcategory_name: String },
    /// 数量不足
    Minimum {
        clothing_total: i64,
        non_clothing_total: i64,
    },
}

impl From<Rejection> for AppError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::Empty => AppError::new(ErrorCode::CartEmpty),
            Rejection::Quality => AppError::new(ErrorCode::QualityNotExcellent),
            Rejection::Disabled { subcategory_name } => AppError::with_message(
                ErrorCode::SubcategoryDisabled,
                format!(
                    "Subcategory '{}' is not currently accepting items",
                    subcategory_name
                ),
            )
            .with_detail("subcategory_name", json!(subcategory_name)),
            Rejection::Minimum {
                clothing_total,
                non_clothing_total,
            } => AppError::with_message(
                ErrorCode::MinimumNotMet,
                format!(
                    "Minimum not met: need at least {} clothing pieces or {} non-clothing items",
                    MIN_CLOTHING_ITEMS, MIN_NON_CLOTHING_ITEMS
                ),
            )
            .with_detail("clothing_total", json!(clothing_total))
            .with_detail("non_clothing_total", json!(non_clothing_total)),
        }
    }
}

/// 校验一批物品是否有预约资格
///
/// 纯函数，顾客每次编辑清单都会重新调用。检查顺序固定：
/// 空清单 → 品相 → 停收 → 数量门槛。
pub fn validate(entries: &[EligibilityEntry]) -> Result<(), Rejection> {
    if entries.is_empty() {
        return Err(Rejection::Empty);
    }

    if entries.iter().any(|e| !e.is_excellent_quality) {
        return Err(Rejection::Quality);
    }

    if let Some(disabled) = entries.iter().find(|e| !e.purchasing_enabled) {
        return Err(Rejection::Disabled {
            subcategory_name: disabled.subcategory_name.clone(),
        });
    }

    let clothing_total: i64 = entries
        .iter()
        .filter(|e| e.is_clothing)
        .map(|e| e.quantity)
        .sum();
    let non_clothing_total: i64 = entries
        .iter()
        .filter(|e| !e.is_clothing)
        .map(|e| e.quantity)
        .sum();

    let below_minimum = if non_clothing_total == 0 {
        // 纯服装
        clothing_total < MIN_CLOTHING_ITEMS
    } else if clothing_total == 0 {
        // 纯非服装
        non_clothing_total < MIN_NON_CLOTHING_ITEMS
    } else {
        // 两类都有：任一达标即可
        clothing_total < MIN_CLOTHING_ITEMS && non_clothing_total < MIN_NON_CLOTHING_ITEMS
    };

    if below_minimum {
        return Err(Rejection::Minimum {
            clothing_total,
            non_clothing_total,
        });
    }

    Ok(())
}
