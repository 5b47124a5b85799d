//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};

use crate::domain::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub profile_image: String,
    pub email: String,
    pub is_email_verified: bool,
    pub bio: String,
    pub phone_number: String,
    pub is_phone_verified: bool,
    pub country: String,
    pub state: String,
    pub area: String,
    pub city: String,
    pub address: String,
    pub post_code: String,
    pub birth_date: Option<DateTimeUtc>,
    pub tos_accepted: bool,
    pub invited_by_user_id: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    /// Soft delete timestamp (NULL = active, set = deleted)
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Column {
    /// Resolve a client supplied `order_by` value to a sortable column.
    pub fn sortable(name: &str) -> Option<Self> {
        let column = match name {
            "id" => Column::Id,
            "first_name" => Column::FirstName,
            "last_name" => Column::LastName,
            "email" => Column::Email,
            "country" => Column::Country,
            "state" => Column::State,
            "area" => Column::Area,
            "city" => Column::City,
            "post_code" => Column::PostCode,
            "created_at" => Column::CreatedAt,
            "updated_at" => Column::UpdatedAt,
            _ => return None,
        };
        Some(column)
    }
}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            profile_image: model.profile_image,
            email: model.email,
            is_email_verified: model.is_email_verified,
            bio: model.bio,
            phone_number: model.phone_number,
            is_phone_verified: model.is_phone_verified,
            country: model.country,
            state: model.state,
            area: model.area,
            city: model.city,
            address: model.address,
            post_code: model.post_code,
            birth_date: model.birth_date,
            tos_accepted: model.tos_accepted,
            invited_by_user_id: model.invited_by_user_id,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}

impl ActiveModel {
    /// Every writable column set from `user`.
    ///
    /// The primary key is left unset for new records and kept unchanged for
    /// existing ones; audit columns are filled by the repository.
    pub fn from_domain(user: User) -> Self {
        Self {
            id: if user.is_persisted() {
                Unchanged(user.id)
            } else {
                NotSet
            },
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            profile_image: Set(user.profile_image),
            email: Set(user.email),
            is_email_verified: Set(user.is_email_verified),
            bio: Set(user.bio),
            phone_number: Set(user.phone_number),
            is_phone_verified: Set(user.is_phone_verified),
            country: Set(user.country),
            state: Set(user.state),
            area: Set(user.area),
            city: Set(user.city),
            address: Set(user.address),
            post_code: Set(user.post_code),
            birth_date: Set(user.birth_date),
            tos_accepted: Set(user.tos_accepted),
            invited_by_user_id: Set(user.invited_by_user_id),
            is_active: Set(user.is_active),
            created_at: NotSet,
            updated_at: NotSet,
            deleted_at: NotSet,
        }
    }
}
