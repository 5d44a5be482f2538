use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,                   // unique user ID
    pub username: String,           // display name
    pub email: String,              // unique, lowercased
    pub password_hash: String,      // Argon2 PHC string; only PublicUser goes over the wire
    pub created_at: OffsetDateTime, // creation timestamp
}
