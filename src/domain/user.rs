//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User domain entity
///
/// `id == 0` marks a record that has not been persisted yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
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
    pub birth_date: Option<DateTime<Utc>>,
    pub tos_accepted: bool,
    pub invited_by_user_id: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft delete timestamp (None = active, Some = deleted)
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Whether the record already exists in the store
    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }
}

/// Optional user attributes supplied on create or update.
///
/// Only provided (`Some`) values are written onto a record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub profile_image: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
    pub bio: Option<String>,
    pub phone_number: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub area: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub post_code: Option<String>,
}

impl UserFields {
    /// Overwrite the provided fields on `user`, leaving the rest untouched.
    pub fn apply_to(self, user: &mut User) {
        fn set<T>(target: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *target = value;
            }
        }

        set(&mut user.first_name, self.first_name);
        set(&mut user.last_name, self.last_name);
        set(&mut user.email, self.email);
        set(&mut user.profile_image, self.profile_image);
        set(&mut user.bio, self.bio);
        set(&mut user.phone_number, self.phone_number);
        set(&mut user.country, self.country);
        set(&mut user.state, self.state);
        set(&mut user.area, self.area);
        set(&mut user.city, self.city);
        set(&mut user.address, self.address);
        set(&mut user.post_code, self.post_code);

        if self.birth_date.is_some() {
            user.birth_date = self.birth_date;
        }
    }
}
