//! User repository with paginated, filtered listing and soft delete.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

use super::entities::user::{ActiveModel, Column, Entity as UserEntity};
use crate::config::DEFAULT_USER_ORDER_COLUMN;
use crate::domain::User;
use crate::errors::{AppError, AppResult};
use crate::types::Paginator;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Every read excludes soft-deleted records.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find active user by ID
    async fn get_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find active user by email address
    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// One page of active users; totals are written back into `paginator`.
    async fn get_all(&self, paginator: &mut Paginator) -> AppResult<Vec<User>>;

    /// Insert a new user
    async fn create(&self, user: User) -> AppResult<User>;

    /// Overwrite every writable column of an active user
    async fn update(&self, user: User) -> AppResult<User>;

    /// Insert when `user` has no id yet, update otherwise
    async fn save(&self, user: User) -> AppResult<User>;

    /// Soft delete the given user
    async fn delete(&self, user: &User) -> AppResult<()>;

    /// Soft delete user by ID (sets deleted_at timestamp)
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;
}

/// SeaORM-backed [`UserRepository`]
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Active users matching the paginator filter, unordered and unbounded.
///
/// The filter is applied as a suffix match on first or last name, and only
/// once it is longer than two characters.
pub(crate) fn filtered_query(paginator: &Paginator) -> Select<UserEntity> {
    let mut query = UserEntity::find().filter(Column::DeletedAt.is_null());

    if paginator.has_filter() {
        let pattern = format!("%{}", paginator.filter());
        query = query.filter(
            Condition::any()
                .add(Column::FirstName.like(pattern.as_str()))
                .add(Column::LastName.like(pattern.as_str())),
        );
    }

    query
}

/// The page of [`filtered_query`] selected by `paginator`.
pub(crate) fn page_query(paginator: &mut Paginator) -> AppResult<Select<UserEntity>> {
    paginator.order(DEFAULT_USER_ORDER_COLUMN);

    let column = Column::sortable(paginator.order_by()).ok_or_else(|| {
        AppError::bad_request(format!("cannot order by '{}'", paginator.order_by()))
    })?;
    let direction = parse_order_dir(paginator.order_dir())?;

    Ok(filtered_query(paginator)
        .order_by(column, direction)
        .limit(paginator.per_page())
        .offset(paginator.offset()))
}

fn parse_order_dir(value: &str) -> AppResult<Order> {
    if value.eq_ignore_ascii_case("asc") {
        Ok(Order::Asc)
    } else if value.eq_ignore_ascii_case("desc") {
        Ok(Order::Desc)
    } else {
        Err(AppError::bad_request(format!(
            "order direction must be ASC or DESC, got '{}'",
            value
        )))
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(Column::Email.eq(email))
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn get_all(&self, paginator: &mut Paginator) -> AppResult<Vec<User>> {
        let models = page_query(paginator)?.all(&self.db).await?;
        let total = filtered_query(paginator).count(&self.db).await?;

        paginator.set_totals(models.len() as u64, total);
        tracing::debug!(
            page = paginator.page(),
            per_page = paginator.per_page(),
            total,
            "Listed users"
        );

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn create(&self, user: User) -> AppResult<User> {
        let now = Utc::now();
        let mut active = ActiveModel::from_domain(user);
        active.created_at = Set(now);
        active.updated_at = Set(now);
        active.deleted_at = Set(None);

        let model = active.insert(&self.db).await?;
        Ok(User::from(model))
    }

    async fn update(&self, user: User) -> AppResult<User> {
        if !user.is_persisted() {
            return Err(AppError::NotFound);
        }

        let mut active = ActiveModel::from_domain(user);
        active.updated_at = Set(Utc::now());

        // Only active (non-deleted) users can be updated
        let model = UserEntity::update(active)
            .filter(Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => AppError::NotFound,
                other => AppError::from(other),
            })?;

        Ok(User::from(model))
    }

    async fn save(&self, user: User) -> AppResult<User> {
        if user.is_persisted() {
            self.update(user).await
        } else {
            self.create(user).await
        }
    }

    async fn delete(&self, user: &User) -> AppResult<()> {
        self.delete_by_id(user.id).await
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let now = Utc::now();
        let result = UserEntity::update_many()
            .col_expr(Column::DeletedAt, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::PostgresQueryBuilder;
    use sea_orm::QueryTrait;

    fn sql(query: Select<UserEntity>) -> String {
        query.into_query().to_string(PostgresQueryBuilder)
    }

    fn paginator(page: i64, per_page: i64, order_by: &str, order_dir: &str, filter: &str) -> Paginator {
        Paginator::new(page, per_page, order_by, order_dir, filter)
    }

    #[test]
    fn test_listing_excludes_soft_deleted() {
        let sql = sql(filtered_query(&Paginator::default()));
        assert!(sql.contains(r#""deleted_at" IS NULL"#));
        assert!(!sql.contains("LIKE"));
    }

    #[test]
    fn test_short_filter_is_ignored() {
        let sql = sql(filtered_query(&paginator(1, 20, "", "", "ab")));
        assert!(!sql.contains("LIKE"));
    }

    #[test]
    fn test_filter_matches_either_name_by_suffix() {
        let sql = sql(filtered_query(&paginator(1, 20, "", "", "smith")));
        assert!(sql.contains(r#""first_name" LIKE '%smith'"#));
        assert!(sql.contains(r#""last_name" LIKE '%smith'"#));
        assert!(sql.contains(" OR "));
    }

    #[test]
    fn test_page_query_applies_order_and_bounds() {
        let mut p = paginator(3, 10, "last_name", "desc", "");
        let sql = sql(page_query(&mut p).unwrap());

        assert!(sql.contains(r#"ORDER BY "users"."last_name" DESC"#));
        assert!(sql.contains("LIMIT 10"));
        assert!(sql.contains("OFFSET 20"));
    }

    #[test]
    fn test_page_query_defaults_order_to_id_asc() {
        let mut p = Paginator::default();
        let sql = sql(page_query(&mut p).unwrap());

        assert!(sql.contains(r#"ORDER BY "users"."id" ASC"#));
        assert_eq!(p.order_by(), "id");
        assert_eq!(p.order_dir(), "ASC");
    }

    #[test]
    fn test_count_query_has_no_bounds() {
        let mut p = paginator(2, 5, "", "", "smith");
        page_query(&mut p).unwrap();
        let sql = sql(filtered_query(&p));

        assert!(sql.contains("LIKE"));
        assert!(!sql.contains("LIMIT"));
        assert!(!sql.contains("OFFSET"));
    }

    #[test]
    fn test_unknown_order_column_rejected() {
        let mut p = paginator(1, 20, "password; DROP TABLE users", "ASC", "");
        assert!(matches!(page_query(&mut p), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_invalid_order_direction_rejected() {
        let mut p = paginator(1, 20, "id", "sideways", "");
        assert!(matches!(page_query(&mut p), Err(AppError::BadRequest(_))));
    }
}
