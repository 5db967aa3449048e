//! User query tests.

use lightbnb_backend::error::DbError;
use lightbnb_backend::models::NewUser;
use lightbnb_tests::{connect, unique};

#[tokio::test]
#[ignore = "requires database"]
async fn test_add_user_then_get_with_email() {
    let db = connect().await.expect("Failed to connect");
    let email = format!("{}@example.com", unique("add"));

    let created = db
        .add_user(&NewUser {
            name: "Kayla Rodriguez".to_string(),
            email: email.clone(),
            password: "password".to_string(),
        })
        .await
        .expect("Failed to add user");
    assert!(created.id > 0);
    assert_eq!(created.email, email);

    let fetched = db
        .get_user_with_email(&email)
        .await
        .expect("Failed to get user")
        .expect("User should exist");
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_get_user_with_id() {
    let db = connect().await.expect("Failed to connect");
    let created = lightbnb_tests::create_user(&db)
        .await
        .expect("Failed to add user");

    let fetched = db
        .get_user_with_id(created.id)
        .await
        .expect("Failed to get user");
    assert_eq!(fetched, Some(created));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_unknown_user_is_none() {
    let db = connect().await.expect("Failed to connect");

    let by_email = db
        .get_user_with_email(&format!("{}@nowhere.invalid", unique("missing")))
        .await
        .expect("Query should succeed");
    assert!(by_email.is_none());

    let by_id = db.get_user_with_id(-1).await.expect("Query should succeed");
    assert!(by_id.is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_duplicate_email_is_conflict() {
    let db = connect().await.expect("Failed to connect");
    let user = NewUser {
        name: "Twice".to_string(),
        email: format!("{}@example.com", unique("dup")),
        password: "password".to_string(),
    };

    db.add_user(&user).await.expect("First insert should succeed");
    let second = db.add_user(&user).await;
    assert!(matches!(second, Err(DbError::Conflict(_))));
}
