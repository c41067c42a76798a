use anyhow::Context;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};

use super::starts_with;
use crate::domain::model::{NewVisit, Restaurant, User, Visit};
use crate::domain::repo::VisitRepository;
use crate::infra::storage::entity::{restaurant, user, visit};
use crate::infra::storage::mapper::visit_to_active;

/// A visit row joined with its restaurant and user.
#[derive(Debug, FromQueryResult)]
struct VisitRow {
    id: String,
    restaurant_id: String,
    user_id: String,
    visited_at: DateTime<Utc>,
    rating: Option<i32>,
    comment: Option<String>,
    restaurant_name: String,
    restaurant_address: String,
    restaurant_phone: Option<String>,
    restaurant_created_at: DateTime<Utc>,
    restaurant_updated_at: DateTime<Utc>,
    user_name: String,
    user_email: String,
    user_provider: String,
    user_provider_id: String,
    user_created_at: DateTime<Utc>,
    user_updated_at: DateTime<Utc>,
}

impl From<VisitRow> for Visit {
    fn from(row: VisitRow) -> Self {
        Visit {
            id: row.id,
            restaurant: Restaurant {
                id: row.restaurant_id,
                name: row.restaurant_name,
                address: row.restaurant_address,
                phone: row.restaurant_phone,
                created_at: row.restaurant_created_at,
                updated_at: row.restaurant_updated_at,
            },
            user: User {
                id: row.user_id,
                name: row.user_name,
                email: row.user_email,
                provider: row.user_provider,
                provider_id: row.user_provider_id,
                created_at: row.user_created_at,
                updated_at: row.user_updated_at,
            },
            visited_at: row.visited_at,
            rating: row.rating,
            comment: row.comment,
        }
    }
}

/// Visits inner-joined with restaurants and users, one row per visit.
fn joined() -> Select<visit::Entity> {
    visit::Entity::find()
        .select_only()
        .column(visit::Column::Id)
        .column(visit::Column::RestaurantId)
        .column(visit::Column::UserId)
        .column(visit::Column::VisitedAt)
        .column(visit::Column::Rating)
        .column(visit::Column::Comment)
        .column_as(restaurant::Column::Name, "restaurant_name")
        .column_as(restaurant::Column::Address, "restaurant_address")
        .column_as(restaurant::Column::Phone, "restaurant_phone")
        .column_as(restaurant::Column::CreatedAt, "restaurant_created_at")
        .column_as(restaurant::Column::UpdatedAt, "restaurant_updated_at")
        .column_as(user::Column::Name, "user_name")
        .column_as(user::Column::Email, "user_email")
        .column_as(user::Column::Provider, "user_provider")
        .column_as(user::Column::ProviderId, "user_provider_id")
        .column_as(user::Column::CreatedAt, "user_created_at")
        .column_as(user::Column::UpdatedAt, "user_updated_at")
        .join(JoinType::InnerJoin, visit::Relation::Restaurant.def())
        .join(JoinType::InnerJoin, visit::Relation::User.def())
}

pub struct SeaOrmVisitRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmVisitRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> VisitRepository for SeaOrmVisitRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Visit>> {
        let row = joined()
            .filter(visit::Column::Id.eq(id))
            .into_model::<VisitRow>()
            .one(&self.conn)
            .await
            .context("find visit by id failed")?;
        Ok(row.map(Visit::from))
    }

    async fn get(&self, skip: u64, take: u64, query: Option<&str>) -> anyhow::Result<Vec<Visit>> {
        let mut select = joined();
        if let Some(prefix) = query {
            select = select.filter(starts_with(visit::Column::Id, prefix));
        }
        let rows = select
            .order_by_asc(visit::Column::Id)
            .offset(skip)
            .limit(take)
            .into_model::<VisitRow>()
            .all(&self.conn)
            .await
            .context("list visits failed")?;
        Ok(rows.into_iter().map(Visit::from).collect())
    }

    async fn get_total_count(&self) -> anyhow::Result<u64> {
        visit::Entity::find()
            .count(&self.conn)
            .await
            .context("count visits failed")
    }

    async fn create_visit(&self, record: NewVisit) -> anyhow::Result<Visit> {
        let id = record.id.clone();
        visit::Entity::insert(visit_to_active(record))
            .exec_without_returning(&self.conn)
            .await
            .context("insert visit failed")?;

        self.find_by_id(&id)
            .await?
            .with_context(|| format!("visit {id} missing after insert"))
    }

    async fn update_visit(&self, record: &NewVisit) -> anyhow::Result<bool> {
        let res = visit::Entity::update_many()
            .col_expr(
                visit::Column::RestaurantId,
                Expr::value(record.restaurant_id.clone()),
            )
            .col_expr(visit::Column::UserId, Expr::value(record.user_id.clone()))
            .col_expr(visit::Column::VisitedAt, Expr::value(record.visited_at))
            .col_expr(visit::Column::Rating, Expr::value(record.rating))
            .col_expr(visit::Column::Comment, Expr::value(record.comment.clone()))
            .filter(visit::Column::Id.eq(record.id.as_str()))
            .exec(&self.conn)
            .await
            .context("update visit failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn delete_visit(&self, id: &str) -> anyhow::Result<bool> {
        let res = visit::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete visit failed")?;
        Ok(res.rows_affected > 0)
    }
}
