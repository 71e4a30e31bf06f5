use async_graphql::{Context, ID, Object, Result};
use shared::models::{AuthPayload, Employee, EmployeeInput, LoginInput, UserInput};

use super::{gql, service, viewer};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn register(&self, ctx: &Context<'_>, input: UserInput) -> Result<AuthPayload> {
        gql(service(ctx)?.register(input).await)
    }

    async fn login(&self, ctx: &Context<'_>, input: LoginInput) -> Result<AuthPayload> {
        gql(service(ctx)?.login(input).await)
    }

    /// Admin only. Also creates a login for the employee with the default password.
    async fn create_employee(&self, ctx: &Context<'_>, input: EmployeeInput) -> Result<Employee> {
        gql(service(ctx)?.create_employee(viewer(ctx), input).await)
    }

    /// Admin only. Replaces every field in `input`.
    async fn update_employee(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: EmployeeInput,
    ) -> Result<Employee> {
        gql(service(ctx)?.update_employee(viewer(ctx), &id, input).await)
    }

    /// Admin only. Fails with NOT_FOUND when there is no such employee.
    async fn delete_employee(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        gql(service(ctx)?.delete_employee(viewer(ctx), &id).await)
    }

    async fn flag_employee(&self, ctx: &Context<'_>, id: ID, flag: bool) -> Result<Employee> {
        gql(service(ctx)?.flag_employee(viewer(ctx), &id, flag).await)
    }
}
