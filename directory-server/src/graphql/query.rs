use async_graphql::{Context, ID, Object, Result};
use shared::models::{Employee, EmployeesPage, User};

use super::{gql, service, viewer};
use crate::directory::PageRequest;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The signed-in user
    async fn me(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        gql(service(ctx)?.me(viewer(ctx)).await)
    }

    /// One page of employees
    ///
    /// `sortField`: name | company | department | status | created | updated.
    /// `sortDir`: asc | desc. Anything else fails with INVALID_SORT_PARAMETERS.
    async fn employees(
        &self,
        ctx: &Context<'_>,
        page: Option<i32>,
        page_size: Option<i32>,
        sort_field: Option<String>,
        sort_dir: Option<String>,
        search: Option<String>,
    ) -> Result<EmployeesPage> {
        let request = PageRequest {
            page: page.map(i64::from),
            page_size: page_size.map(i64::from),
            sort_field,
            sort_dir,
            search,
        };
        gql(service(ctx)?.list_employees(viewer(ctx), &request).await)
    }

    async fn employee(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Employee>> {
        gql(service(ctx)?.get_employee(viewer(ctx), &id).await)
    }
}
