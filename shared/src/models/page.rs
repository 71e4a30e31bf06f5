//! 分页响应

use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use super::Employee;

/// 员工列表的一页
///
/// `total` 统计所有匹配搜索条件的记录，与分页窗口无关。
#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct EmployeesPage {
    /// 当前页数据
    pub items: Vec<Employee>,
    /// 匹配的总记录数
    pub total: i64,
    /// 当前页码 (从 1 开始)
    pub page: i64,
    /// 每页数量
    pub page_size: i64,
    /// 总页数
    pub total_pages: i64,
}

impl EmployeesPage {
    pub fn new(items: Vec<Employee>, total: i64, page: i64, page_size: i64) -> Self {
        let total_pages = if page_size > 0 {
            (total + page_size - 1) / page_size
        } else {
            1
        };

        Self {
            items,
            total,
            page,
            page_size,
            total_pages,
        }
    }
}
