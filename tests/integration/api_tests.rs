//! API integration tests against a running server
//!
//! Run with: cargo test -- --ignored

use chrono::{Duration, Local};
use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

fn today() -> String {
    Local::now().date_naive().to_string()
}

async fn create_book(client: &Client, title: &str, category: &str) -> i64 {
    let response = client
        .post(format!("{}/api/books", BASE_URL))
        .json(&json!({
            "title": title,
            "author": "Test Author",
            "isbn": "978-0-00-000000-0",
            "publication_date": "2020",
            "category": category
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No book ID")
}

async fn create_user(client: &Client) -> i64 {
    let response = client
        .post(format!("{}/api/users", BASE_URL))
        .json(&json!({
            "name": "Test User",
            "email": "test.user@example.com",
            "registration_date": today(),
            "phone_number": "44999990000"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No user ID")
}

async fn delete(client: &Client, path: String) {
    let _ = client.delete(format!("{}{}", BASE_URL, path)).send().await;
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_create_user_with_invalid_email() {
    let client = Client::new();

    let response = client
        .post(format!("{}/api/users", BASE_URL))
        .json(&json!({
            "name": "Broken",
            "email": "invalid-email",
            "registration_date": today(),
            "phone_number": "1"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_loan_lifecycle() {
    let client = Client::new();
    let book_id = create_book(&client, "Lifecycle Book", "Integration").await;
    let user_id = create_user(&client).await;

    // Check out
    let response = client
        .post(format!("{}/api/loans", BASE_URL))
        .json(&json!({"user_id": user_id, "book_id": book_id}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let loan: Value = response.json().await.expect("Failed to parse response");
    let loan_id = loan["id"].as_i64().expect("No loan ID");
    assert_eq!(loan["status"], "EMPRESTADO");

    // Second checkout of the same book is refused
    let response = client
        .post(format!("{}/api/loans", BASE_URL))
        .json(&json!({"user_id": user_id, "book_id": book_id}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Return
    let response = client
        .put(format!("{}/api/loans/{}?returnDate={}", BASE_URL, loan_id, today()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let loan: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(loan["status"], "PRESENTE");

    // Listed for the user and the book
    let loans: Value = client
        .get(format!("{}/api/loans/user/{}", BASE_URL, user_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(loans.as_array().map(Vec::len), Some(1));

    let loans: Value = client
        .get(format!("{}/api/loans/book/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(loans.as_array().map(Vec::len), Some(1));

    // Cancel
    let response = client
        .delete(format!("{}/api/loans/{}", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    delete(&client, format!("/api/books/{}", book_id)).await;
    delete(&client, format!("/api/users/{}", user_id)).await;
}

async fn check_out(client: &Client, user_id: i64, book_id: i64) -> i64 {
    let response = client
        .post(format!("{}/api/loans", BASE_URL))
        .json(&json!({"user_id": user_id, "book_id": book_id}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let loan: Value = response.json().await.expect("Failed to parse response");
    loan["id"].as_i64().expect("No loan ID")
}

#[tokio::test]
#[ignore]
async fn test_reopening_returned_loan_while_book_is_out() {
    let client = Client::new();
    let book_id = create_book(&client, "Reopen Book", "Integration").await;
    let user_id = create_user(&client).await;

    let first = check_out(&client, user_id, book_id).await;
    let response = client
        .put(format!("{}/api/loans/{}?returnDate={}", BASE_URL, first, today()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let second = check_out(&client, user_id, book_id).await;

    // Explicit status override
    let response = client
        .put(format!("{}/api/loans/{}?status=EMPRESTADO", BASE_URL, first))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "BookAlreadyLoaned");

    // Cleared return date
    let response = client
        .put(format!("{}/api/loans/{}", BASE_URL, first))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    delete(&client, format!("/api/loans/{}", second)).await;
    delete(&client, format!("/api/loans/{}", first)).await;
    delete(&client, format!("/api/books/{}", book_id)).await;
    delete(&client, format!("/api/users/{}", user_id)).await;
}

#[tokio::test]
#[ignore]
async fn test_malformed_loan_date_is_bad_request() {
    let client = Client::new();

    let response = client
        .post(format!("{}/api/loans", BASE_URL))
        .json(&json!({"user_id": 1, "book_id": 1, "loan_date": "2024-13-45"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
#[ignore]
async fn test_loan_date_in_the_past() {
    let client = Client::new();
    let book_id = create_book(&client, "Past Book", "Integration").await;
    let user_id = create_user(&client).await;

    let yesterday = (Local::now().date_naive() - Duration::days(1)).to_string();
    let response = client
        .post(format!("{}/api/loans", BASE_URL))
        .json(&json!({"user_id": user_id, "book_id": book_id, "loan_date": yesterday}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    delete(&client, format!("/api/books/{}", book_id)).await;
    delete(&client, format!("/api/users/{}", user_id)).await;
}

#[tokio::test]
#[ignore]
async fn test_recommendations() {
    let client = Client::new();
    let borrowed = create_book(&client, "Borrowed", "Recommendation-Test").await;
    let candidate = create_book(&client, "Candidate", "Recommendation-Test").await;
    let other = create_book(&client, "Other", "Unrelated-Test").await;
    let user_id = create_user(&client).await;

    let response = client
        .post(format!("{}/api/loans", BASE_URL))
        .json(&json!({"user_id": user_id, "book_id": borrowed}))
        .send()
        .await
        .expect("Failed to send request");
    let loan: Value = response.json().await.expect("Failed to parse response");
    let loan_id = loan["id"].as_i64().expect("No loan ID");

    let books: Value = client
        .get(format!("{}/api/loans/recommendations/{}", BASE_URL, user_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let ids: Vec<i64> = books
        .as_array()
        .expect("Expected an array")
        .iter()
        .filter_map(|b| b["id"].as_i64())
        .collect();
    assert!(ids.contains(&candidate));
    assert!(!ids.contains(&borrowed));
    assert!(!ids.contains(&other));

    delete(&client, format!("/api/loans/{}", loan_id)).await;
    for id in [borrowed, candidate, other] {
        delete(&client, format!("/api/books/{}", id)).await;
    }
    delete(&client, format!("/api/users/{}", user_id)).await;
}
