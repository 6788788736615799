//! 列表分页参数

use serde::{Deserialize, Serialize};

use super::response::Pagination;

pub const DEFAULT_LIMIT: u64 = 20;
pub const MAX_LIMIT: u64 = 100;
/// SQL `OFFSET` 与 MongoDB `skip` 均为有符号 64 位
pub const MAX_OFFSET: u64 = i64::MAX.unsigned_abs();

/// 列表查询中的分页字段
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PageQuery {
    #[must_use]
    pub fn params(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.limit, DEFAULT_LIMIT, MAX_LIMIT)
    }
}

/// 分页参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    /// 当前页码（>= 1）
    pub page: u64,
    /// 每页条数（>= 1）
    pub limit: u64,
}

impl PaginationParams {
    /// 根据可选参数创建分页配置，并应用默认值与上限。
    #[must_use]
    pub fn new(page: Option<u64>, limit: Option<u64>, default_limit: u64, max_limit: u64) -> Self {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(default_limit).clamp(1, max_limit);
        Self { page, limit }
    }

    /// 跳过条数，超大页码饱和到存储可接受的上限
    #[must_use]
    pub const fn offset(&self) -> u64 {
        let offset = self.page.saturating_sub(1).saturating_mul(self.limit);
        if offset > MAX_OFFSET { MAX_OFFSET } else { offset }
    }
}

/// 标准分页信息
#[derive(Debug, Clone, Serialize)]
pub struct PaginationInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl From<PaginationInfo> for Pagination {
    fn from(value: PaginationInfo) -> Self {
        Self {
            page: value.page,
            limit: value.limit,
            total: value.total,
            pages: value.pages,
        }
    }
}

/// 根据总数和分页参数计算分页信息。
#[must_use]
pub const fn build_page(total: u64, params: PaginationParams) -> PaginationInfo {
    let pages = if total == 0 {
        0
    } else {
        total.div_ceil(params.limit)
    };
    PaginationInfo {
        page: params.page,
        limit: params.limit,
        total,
        pages,
    }
}
