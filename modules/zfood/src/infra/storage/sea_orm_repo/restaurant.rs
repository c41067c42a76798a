use anyhow::Context;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use super::{starts_with, write_error};
use crate::domain::model::Restaurant;
use crate::domain::repo::RestaurantRepository;
use crate::infra::storage::entity::restaurant::{Column, Entity as RestaurantEntity};
use crate::infra::storage::mapper::{restaurant_from_entity, restaurant_to_active};

/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmRestaurantRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmRestaurantRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> RestaurantRepository for SeaOrmRestaurantRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Restaurant>> {
        let found = RestaurantEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find restaurant by id failed")?;
        Ok(found.map(restaurant_from_entity))
    }

    async fn get(
        &self,
        skip: u64,
        take: u64,
        query: Option<&str>,
    ) -> anyhow::Result<Vec<Restaurant>> {
        let mut select = RestaurantEntity::find();
        if let Some(prefix) = query {
            select = select.filter(starts_with(Column::Name, prefix));
        }
        let rows = select
            .order_by_asc(Column::Id)
            .offset(skip)
            .limit(take)
            .all(&self.conn)
            .await
            .context("list restaurants failed")?;
        Ok(rows.into_iter().map(restaurant_from_entity).collect())
    }

    async fn get_total_count(&self) -> anyhow::Result<u64> {
        RestaurantEntity::find()
            .count(&self.conn)
            .await
            .context("count restaurants failed")
    }

    async fn name_exists(&self, name: &str, except_id: Option<&str>) -> anyhow::Result<bool> {
        let mut select = RestaurantEntity::find().filter(Column::Name.eq(name));
        if let Some(id) = except_id {
            select = select.filter(Column::Id.ne(id));
        }
        let count = select
            .count(&self.conn)
            .await
            .context("restaurant name_exists failed")?;
        Ok(count > 0)
    }

    async fn create_restaurant(&self, restaurant: Restaurant) -> anyhow::Result<()> {
        restaurant_to_active(restaurant)
            .insert(&self.conn)
            .await
            .map_err(|e| write_error(e, "insert restaurant failed"))?;
        Ok(())
    }

    async fn update_restaurant(&self, restaurant: &Restaurant) -> anyhow::Result<bool> {
        let res = RestaurantEntity::update_many()
            .col_expr(Column::Name, Expr::value(restaurant.name.clone()))
            .col_expr(Column::Address, Expr::value(restaurant.address.clone()))
            .col_expr(Column::Phone, Expr::value(restaurant.phone.clone()))
            .col_expr(Column::UpdatedAt, Expr::value(restaurant.updated_at))
            .filter(Column::Id.eq(restaurant.id.as_str()))
            .exec(&self.conn)
            .await
            .map_err(|e| write_error(e, "update restaurant failed"))?;
        Ok(res.rows_affected > 0)
    }

    async fn delete_restaurant(&self, id: &str) -> anyhow::Result<bool> {
        let res = RestaurantEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete restaurant failed")?;
        Ok(res.rows_affected > 0)
    }
}
