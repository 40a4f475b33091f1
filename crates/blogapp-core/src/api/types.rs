//! Wire records of the blog API.

use serde::{Deserialize, Serialize};

use crate::session::{UserProfile, UserType};

/// Image attached to posts created from this client.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150.png?text=Post";

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub image_src: Option<String>,
}

impl Post {
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .and_then(|a| a.name.as_deref())
            .filter(|n| !n.is_empty())
            .unwrap_or("Unknown author")
    }
}

/// Body of `POST /api/posts` and `PUT /api/posts/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image_src: String,
}

impl PostDraft {
    pub fn new(
        title: impl Into<String>,
        excerpt: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            excerpt: excerpt.into(),
            content: content.into(),
            image_src: PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

impl From<&Post> for PostDraft {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            image_src: post
                .image_src
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        }
    }
}

/// A user as returned by `/api/users` and `/api/users/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub user_type: UserType,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub guardian: Option<String>,
    #[serde(default, rename = "class")]
    pub student_class: Option<String>,
}

/// Response of `POST /api/users/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct Registered {
    pub user: UserRecord,
}

/// Body of `POST /api/users/register` for a teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeacher {
    pub name: String,
    pub email: String,
    pub password: String,
    pub school: String,
    pub age: u32,
    pub user_type: UserType,
}

/// Body of `POST /api/users/register` for a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub password: String,
    pub school: String,
    pub age: u32,
    pub user_type: UserType,
    pub guardian: String,
    #[serde(rename = "class")]
    pub student_class: String,
}

/// Body of `PUT /api/users/:id` for a teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeacherUpdate {
    pub name: String,
    pub email: String,
    pub school: String,
    pub age: u32,
}

/// Body of `PUT /api/users/:id` for a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentUpdate {
    pub name: String,
    pub email: String,
    pub school: String,
    pub age: u32,
    pub guardian: String,
    #[serde(rename = "class")]
    pub student_class: String,
}

/// Registration body for either role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Registration {
    Teacher(NewTeacher),
    Student(NewStudent),
}

/// Update body for either role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UserUpdate {
    Teacher(TeacherUpdate),
    Student(StudentUpdate),
}
