//! Tests against a live PostgreSQL database.
//!
//! Run with `DATABASE_URL=postgres://... cargo test -- --ignored`.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use user_service::domain::user::models::EmailAddress;
use user_service::domain::user::models::NewUser;
use user_service::domain::user::models::UserName;
use user_service::domain::user::ports::UserRepository;
use user_service::repositories::PostgresUserRepository;
use user_service::user::errors::UserError;
use uuid::Uuid;

async fn setup() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

fn unique_email() -> EmailAddress {
    EmailAddress::new(format!("user-{}@example.com", Uuid::new_v4())).unwrap()
}

fn new_user(email: EmailAddress) -> NewUser {
    NewUser {
        name: UserName::new("John Doe".to_string()).unwrap(),
        email,
        password_hash: "$2b$04$notarealhashbutlongenoughforthecolumn".to_string(),
    }
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_save_then_find_by_email() {
    let repository = PostgresUserRepository::new(setup().await);
    let email = unique_email();

    let saved = repository
        .save(repository.create(new_user(email.clone())))
        .await
        .unwrap();
    let found = repository.find_by_email(&email).await.unwrap().unwrap();

    assert_eq!(found.id, saved.id);
    assert_eq!(found.email.as_str(), email.as_str());
    assert_eq!(found.password_hash, saved.password_hash);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_find_by_unknown_email() {
    let repository = PostgresUserRepository::new(setup().await);

    let found = repository.find_by_email(&unique_email()).await.unwrap();

    assert!(found.is_none());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_duplicate_email_is_rejected() {
    let repository = PostgresUserRepository::new(setup().await);
    let email = unique_email();

    repository
        .save(repository.create(new_user(email.clone())))
        .await
        .unwrap();
    let result = repository.save(repository.create(new_user(email))).await;

    assert!(matches!(result, Err(UserError::AlreadyExists)));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_save_updates_existing_record() {
    let repository = PostgresUserRepository::new(setup().await);

    let mut user = repository
        .save(repository.create(new_user(unique_email())))
        .await
        .unwrap();
    user.name = UserName::new("Jane Doe".to_string()).unwrap();

    let updated = repository.save(user.clone()).await.unwrap();

    assert_eq!(updated.id, user.id);
    assert_eq!(updated.name.as_str(), "Jane Doe");
}
