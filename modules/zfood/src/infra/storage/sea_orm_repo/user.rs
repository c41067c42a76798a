use anyhow::Context;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use super::{starts_with, write_error};
use crate::domain::model::User;
use crate::domain::repo::UserRepository;
use crate::infra::storage::entity::user::{Column, Entity as UserEntity};
use crate::infra::storage::mapper::{user_from_entity, user_to_active};

pub struct SeaOrmUserRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUserRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> UserRepository for SeaOrmUserRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<User>> {
        let found = UserEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find user by id failed")?;
        Ok(found.map(user_from_entity))
    }

    async fn get(&self, skip: u64, take: u64, query: Option<&str>) -> anyhow::Result<Vec<User>> {
        let mut select = UserEntity::find();
        if let Some(prefix) = query {
            select = select.filter(starts_with(Column::Name, prefix));
        }
        let rows = select
            .order_by_asc(Column::Id)
            .offset(skip)
            .limit(take)
            .all(&self.conn)
            .await
            .context("list users failed")?;
        Ok(rows.into_iter().map(user_from_entity).collect())
    }

    async fn get_total_count(&self) -> anyhow::Result<u64> {
        UserEntity::find()
            .count(&self.conn)
            .await
            .context("count users failed")
    }

    async fn email_exists(&self, email: &str, except_id: Option<&str>) -> anyhow::Result<bool> {
        let mut select = UserEntity::find().filter(Column::Email.eq(email));
        if let Some(id) = except_id {
            select = select.filter(Column::Id.ne(id));
        }
        let count = select
            .count(&self.conn)
            .await
            .context("email_exists failed")?;
        Ok(count > 0)
    }

    async fn create_user(&self, user: User) -> anyhow::Result<()> {
        user_to_active(user)
            .insert(&self.conn)
            .await
            .map_err(|e| write_error(e, "insert user failed"))?;
        Ok(())
    }

    async fn update_user(&self, user: &User) -> anyhow::Result<bool> {
        let res = UserEntity::update_many()
            .col_expr(Column::Name, Expr::value(user.name.clone()))
            .col_expr(Column::Email, Expr::value(user.email.clone()))
            .col_expr(Column::Provider, Expr::value(user.provider.clone()))
            .col_expr(Column::ProviderId, Expr::value(user.provider_id.clone()))
            .col_expr(Column::UpdatedAt, Expr::value(user.updated_at))
            .filter(Column::Id.eq(user.id.as_str()))
            .exec(&self.conn)
            .await
            .map_err(|e| write_error(e, "update user failed"))?;
        Ok(res.rows_affected > 0)
    }

    async fn delete_user(&self, id: &str) -> anyhow::Result<bool> {
        let res = UserEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete user failed")?;
        Ok(res.rows_affected > 0)
    }
}
