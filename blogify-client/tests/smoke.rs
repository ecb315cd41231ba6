use std::time::{SystemTime, UNIX_EPOCH};

use blogify_client::{BlogifyClient, ClientError, Reaction};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

fn base_url() -> String {
    std::env::var("BLOGIFY_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string())
}

#[tokio::test]
#[ignore = "requires running backend with seeded posts"]
async fn signup_login_and_read_flow() {
    let mut client = BlogifyClient::new(base_url());

    let suffix = unique_suffix();
    let username = format!("smoke_user_{suffix}");
    let email = format!("smoke_{suffix}@example.com");
    let password = "password123";

    let signup = client
        .signup(&username, &email, password, password)
        .await
        .expect("signup must succeed");
    assert!(!signup.token.is_empty());
    assert_eq!(signup.user.username, username);
    assert!(client.token().is_some());

    let login = client
        .login(&username, password)
        .await
        .expect("login must succeed");
    assert!(!login.token.is_empty());
    assert_eq!(login.user.username, username);

    let page = client.list_posts(1, 5).await.expect("list must succeed");
    assert!(page.results.len() <= 5);
    // У первой страницы не бывает ссылки previous.
    assert!(!page.has_previous());

    let categories = client
        .categories()
        .await
        .expect("categories must succeed");
    for category in &categories {
        assert!(!category.name.is_empty());
    }
}

#[tokio::test]
#[ignore = "requires running backend with seeded posts"]
async fn invalid_login_leaves_client_unauthenticated() {
    let mut client = BlogifyClient::new(base_url());

    let err = client
        .login("no_such_user", "wrong_password")
        .await
        .expect_err("login with bad credentials must fail");
    assert!(matches!(
        err,
        ClientError::Unauthorized | ClientError::InvalidRequest(_)
    ));
    assert!(client.token().is_none());
}

#[tokio::test]
#[ignore = "requires running backend with seeded posts"]
async fn comment_reply_and_react_flow() {
    let mut client = BlogifyClient::new(base_url());

    let suffix = unique_suffix();
    let username = format!("smoke_commenter_{suffix}");
    let email = format!("smoke_c_{suffix}@example.com");
    client
        .signup(&username, &email, "password123", "password123")
        .await
        .expect("signup must succeed");

    let page = client.list_posts(1, 1).await.expect("list must succeed");
    let Some(post) = page.results.first() else {
        panic!("backend must have at least one post for this flow");
    };

    let comment = client
        .create_comment(post.id, "smoke comment")
        .await
        .expect("comment must succeed");
    assert_eq!(comment.content, "smoke comment");

    let reply = client
        .reply_to_comment(comment.id, "smoke reply")
        .await
        .expect("first reply must succeed");
    assert_eq!(reply.parent, Some(comment.id));

    // Второй ответ обязан упереться в бизнес-правило «один ответ».
    let err = client
        .reply_to_comment(comment.id, "second reply")
        .await
        .expect_err("second reply must be rejected");
    assert!(matches!(err, ClientError::DuplicateReply));

    let reacted = client
        .react_to_post(post.id, Reaction::Like)
        .await
        .expect("react must succeed");
    assert_eq!(reacted.id, post.id);
    assert!(reacted.liked_by_me);
}
