use std::sync::Arc;

use blogapp_core::api::PLACEHOLDER_IMAGE;
use blogapp_core::config::Config;
use blogapp_core::context::AppContext;
use blogapp_core::navigation::{Navigator, Route, StackNavigator};
use blogapp_core::screens::{login, posts, users};
use blogapp_core::session::{MemoryStore, UserType};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn signed_in(server: &MockServer) -> (AppContext, Arc<StackNavigator>) {
    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok1",
            "user": {"_id": "u1", "name": "Ana", "userType": "professor", "isActive": true}
        })))
        .mount(server)
        .await;

    let mut config = Config::default();
    config.api.base_url = server.uri();
    let nav = Arc::new(StackNavigator::new());
    let mut ctx = AppContext::new(&config, Arc::new(MemoryStore::new()), nav.clone()).unwrap();
    ctx.start();
    login::login(&ctx, "a@x.com", "pw").await.unwrap();
    (ctx, nav)
}

fn posts_body() -> serde_json::Value {
    json!([
        {"_id": "p1", "title": "Intro to Rust", "excerpt": "ownership", "content": "...", "author": {"name": "Ana"}},
        {"_id": "p2", "title": "Cooking", "excerpt": "Rusty pans", "content": "..."},
        {"_id": "p3", "title": "History", "excerpt": "Rome", "content": "..."}
    ])
}

fn users_body() -> serde_json::Value {
    json!({"data": [
        {"_id": "t1", "name": "Ana", "email": "a@x.com", "userType": "professor", "isActive": true},
        {"_id": "t2", "name": "Old", "email": "o@x.com", "userType": "professor", "isActive": false},
        {"_id": "s1", "name": "Bia", "email": "b@x.com", "userType": "aluno", "isActive": true, "class": "8A"},
        {"_id": "s2", "name": "Caio", "email": "c@x.com", "userType": "aluno"}
    ]})
}

#[tokio::test]
async fn test_feed_accepts_raw_body_and_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts_body()))
        .mount(&server)
        .await;
    let (ctx, _nav) = signed_in(&server).await;

    let listing = posts::list_posts(&ctx, "RUST").await.unwrap();
    let ids: Vec<_> = listing.posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
    assert!(listing.can_manage);
    assert_eq!(listing.posts[0].author_name(), "Ana");
    assert_eq!(listing.posts[1].author_name(), "Unknown author");

    let all = posts::list_posts(&ctx, "").await.unwrap();
    assert_eq!(all.posts.len(), 3);
}

#[tokio::test]
async fn test_feed_failure_alert() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let (ctx, _nav) = signed_in(&server).await;

    let err = posts::list_posts(&ctx, "").await.unwrap_err();
    assert_eq!(err.alert.title, "Error");
    assert_eq!(err.alert.message, "Could not load posts.");
}

#[tokio::test]
async fn test_create_post_sends_draft_and_goes_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/posts"))
        .and(body_json(json!({
            "title": "New",
            "excerpt": "Short",
            "content": "Body",
            "imageSrc": PLACEHOLDER_IMAGE
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"_id": "p9", "title": "New", "excerpt": "Short", "content": "Body"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let (ctx, nav) = signed_in(&server).await;
    nav.navigate(Route::CreatePost);

    let alert = posts::create_post(&ctx, " New ", "Short", "Body").await.unwrap();
    assert_eq!(alert.title, "Success!");
    assert_eq!(alert.message, "Post \"New\" created!");
    assert_eq!(nav.current(), Some(Route::Main));
}

#[tokio::test]
async fn test_edit_post_prefills_and_saves() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"_id": "p1", "title": "Old", "excerpt": "e", "content": "c", "imageSrc": "img.png"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/posts/p1"))
        .and(body_partial_json(json!({"title": "Fresh", "imageSrc": "img.png"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"_id": "p1", "title": "Fresh", "excerpt": "e", "content": "c"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let (ctx, nav) = signed_in(&server).await;
    posts::edit_post(&ctx, "p1");
    assert_eq!(
        nav.current(),
        Some(Route::EditPost {
            post_id: "p1".to_string()
        })
    );

    let mut draft = posts::load_post(&ctx, "p1").await.unwrap();
    assert_eq!(draft.title, "Old");
    draft.title = "Fresh".to_string();

    let alert = posts::update_post(&ctx, "p1", &draft).await.unwrap();
    assert_eq!(alert.message, "Post \"Fresh\" updated!");
    assert_eq!(nav.current(), Some(Route::Main));

    draft.content = String::new();
    let err = posts::update_post(&ctx, "p1", &draft).await.unwrap_err();
    assert_eq!(err.alert.message, "All fields are required.");
}

#[tokio::test]
async fn test_user_lists_split_by_role_and_activity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_body()))
        .mount(&server)
        .await;
    let (ctx, _nav) = signed_in(&server).await;

    let teachers = users::list_users(&ctx, UserType::Teacher).await.unwrap();
    assert_eq!(teachers.len(), 1);
    assert_eq!(teachers[0].id, "t1");

    let students = users::list_users(&ctx, UserType::Student).await.unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].student_class.as_deref(), Some("8A"));
}

#[tokio::test]
async fn test_create_student_registers_with_role_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/register"))
        .and(body_json(json!({
            "name": "Bia",
            "email": "b@x.com",
            "password": "secret",
            "school": "Central",
            "age": 14,
            "userType": "aluno",
            "guardian": "Rita",
            "class": "8A"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "user": {"_id": "s9", "name": "Bia", "email": "b@x.com", "userType": "aluno", "isActive": true}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let (ctx, nav) = signed_in(&server).await;
    nav.navigate(Route::ListStudents);
    users::open_create(&ctx, UserType::Student);

    let form = users::UserForm {
        name: "Bia".to_string(),
        email: "b@x.com".to_string(),
        password: "secret".to_string(),
        school: "Central".to_string(),
        age: "14".to_string(),
        guardian: "Rita".to_string(),
        student_class: "8A".to_string(),
    };
    let alert = users::create_user(&ctx, UserType::Student, &form).await.unwrap();
    assert_eq!(alert.message, "Student \"Bia\" created!");
    assert_eq!(nav.current(), Some(Route::ListStudents));
}

#[tokio::test]
async fn test_create_teacher_failure_uses_generic_alert() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/register"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "email duplicado"})))
        .mount(&server)
        .await;
    let (ctx, _nav) = signed_in(&server).await;

    let form = users::UserForm {
        name: "Ana".to_string(),
        email: "a@x.com".to_string(),
        password: "pw".to_string(),
        school: "Central".to_string(),
        age: "40".to_string(),
        ..users::UserForm::default()
    };
    let err = users::create_user(&ctx, UserType::Teacher, &form).await.unwrap_err();
    assert_eq!(err.alert.message, "Could not create the teacher. Check the data.");
}

#[tokio::test]
async fn test_delete_user_shows_server_reason() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/t1"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "Teacher still owns posts"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_body()))
        .mount(&server)
        .await;
    let (ctx, _nav) = signed_in(&server).await;

    let err = users::delete_user(&ctx, UserType::Teacher, "t1").await.unwrap_err();
    assert_eq!(err.alert.title, "Delete failed");
    assert_eq!(err.alert.message, "Teacher still owns posts");

    let refreshed = users::delete_user(&ctx, UserType::Student, "s1").await.unwrap();
    assert_eq!(refreshed.alert.message, "Student deleted.");
    assert_eq!(refreshed.items.map(|u| u.len()), Some(1));
}

#[tokio::test]
async fn test_edit_teacher_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "t1", "name": "Ana", "email": "a@x.com", "userType": "professor",
            "isActive": true, "school": "Central", "age": 40
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/users/t1"))
        .and(body_json(json!({"name": "Ana Lima", "email": "a@x.com", "school": "Central", "age": 41})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"_id": "t1", "name": "Ana Lima", "email": "a@x.com", "userType": "professor"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let (ctx, nav) = signed_in(&server).await;
    nav.navigate(Route::ListTeachers);
    users::open_edit(&ctx, UserType::Teacher, "t1");

    let mut form = users::load_user(&ctx, UserType::Teacher, "t1").await.unwrap();
    assert_eq!(form.age, "40");
    form.name = "Ana Lima".to_string();
    form.age = "41".to_string();

    let alert = users::update_user(&ctx, UserType::Teacher, "t1", &form).await.unwrap();
    assert_eq!(alert.message, "Teacher \"Ana Lima\" updated!");
    assert_eq!(nav.current(), Some(Route::ListTeachers));
}

#[tokio::test]
async fn test_edit_refuses_user_of_other_role() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "s1", "name": "Bia", "email": "b@x.com", "userType": "aluno", "isActive": true
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/users/s1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (ctx, _nav) = signed_in(&server).await;

    let err = users::load_user(&ctx, UserType::Teacher, "s1").await.unwrap_err();
    assert_eq!(err.alert.title, "Error");
    assert_eq!(err.alert.message, "User s1 is not a teacher.");

    let form = users::load_user(&ctx, UserType::Student, "s1").await.unwrap();
    assert_eq!(form.name, "Bia");
}

#[tokio::test]
async fn test_post_id_stays_inside_its_route() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/posts/..%2Fusers%2Fu1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Post not found"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/u1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (ctx, _nav) = signed_in(&server).await;

    let err = posts::delete_post(&ctx, "../users/u1").await.unwrap_err();
    assert_eq!(err.alert.message, "Could not delete the post.");
    assert_eq!(err.source.server_message(), Some("Post not found"));

    let err = posts::delete_post(&ctx, "..").await.unwrap_err();
    assert_eq!(err.alert.message, "Invalid identifier: \"..\"");
}
