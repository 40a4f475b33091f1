//! Post views: the feed on `Main`, `ReadPost`, `CreatePost` and `EditPost`.

use super::{Refreshed, require_filled};
use crate::api::{Post, PostDraft};
use crate::context::AppContext;
use crate::error::{Alert, ScreenError};
use crate::navigation::Route;

const LOAD_FAILED: &str = "Could not load posts.";
const LOAD_ONE_FAILED: &str = "Could not load the post.";
const CREATE_FAILED: &str = "Could not create the post.";
const SAVE_FAILED: &str = "Could not save the changes.";
const DELETE_FAILED: &str = "Could not delete the post.";

/// What the feed shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostListing {
    pub posts: Vec<Post>,
    /// Whether edit and delete controls are offered.
    pub can_manage: bool,
}

/// Keeps posts whose title or excerpt contains `query`, ignoring case.
///
/// A blank query keeps everything.
pub fn filter_posts(posts: Vec<Post>, query: &str) -> Vec<Post> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return posts;
    }
    posts
        .into_iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&needle) || p.excerpt.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Loads the feed, filtered by `query`.
///
/// # Errors
/// Any failure of the list request.
pub async fn list_posts(ctx: &AppContext, query: &str) -> Result<PostListing, ScreenError> {
    let posts = ctx
        .api()
        .list_posts()
        .await
        .map_err(|e| e.into_screen(LOAD_FAILED))?;
    Ok(PostListing {
        posts: filter_posts(posts, query),
        can_manage: ctx.store().is_teacher(),
    })
}

pub fn open_post(ctx: &AppContext, post_id: &str) {
    ctx.navigator().navigate(Route::ReadPost {
        post_id: post_id.to_string(),
    });
}

pub fn edit_post(ctx: &AppContext, post_id: &str) {
    ctx.navigator().navigate(Route::EditPost {
        post_id: post_id.to_string(),
    });
}

/// # Errors
/// Any failure of the fetch.
pub async fn read_post(ctx: &AppContext, post_id: &str) -> Result<Post, ScreenError> {
    ctx.api()
        .get_post(post_id)
        .await
        .map_err(|e| e.into_screen(LOAD_ONE_FAILED))
}

/// Publishes a new post and returns to the previous view.
///
/// # Errors
/// Validation failure, missing session, or any failure of the request.
pub async fn create_post(
    ctx: &AppContext,
    title: &str,
    excerpt: &str,
    content: &str,
) -> Result<Alert, ScreenError> {
    require_filled(
        &[title, excerpt, content],
        "Please fill in title, excerpt and content.",
    )
    .map_err(|e| e.into_screen(CREATE_FAILED))?;

    let draft = PostDraft::new(title.trim(), excerpt.trim(), content.trim());
    let post = ctx
        .api()
        .create_post(&draft)
        .await
        .map_err(|e| e.into_screen(CREATE_FAILED))?;

    tracing::info!(post_id = %post.id, "post created");
    ctx.navigator().go_back();
    Ok(Alert::success(format!("Post \"{}\" created!", post.title)))
}

/// Fetches the post being edited, to prefill the form.
///
/// # Errors
/// Any failure of the fetch.
pub async fn load_post(ctx: &AppContext, post_id: &str) -> Result<PostDraft, ScreenError> {
    let post = read_post(ctx, post_id).await?;
    Ok(PostDraft::from(&post))
}

/// Saves an edited post and returns to the previous view.
///
/// # Errors
/// Validation failure, missing session, or any failure of the request.
pub async fn update_post(
    ctx: &AppContext,
    post_id: &str,
    draft: &PostDraft,
) -> Result<Alert, ScreenError> {
    require_filled(
        &[&draft.title, &draft.excerpt, &draft.content],
        "All fields are required.",
    )
    .map_err(|e| e.into_screen(SAVE_FAILED))?;

    let post = ctx
        .api()
        .update_post(post_id, draft)
        .await
        .map_err(|e| e.into_screen(SAVE_FAILED))?;

    ctx.navigator().go_back();
    Ok(Alert::success(format!("Post \"{}\" updated!", post.title)))
}

/// Deletes a post, then refetches the unfiltered feed.
///
/// # Errors
/// Missing session or any failure of the delete itself.
pub async fn delete_post(ctx: &AppContext, post_id: &str) -> Result<Refreshed<Post>, ScreenError> {
    ctx.api()
        .delete_post(post_id)
        .await
        .map_err(|e| e.into_screen(DELETE_FAILED))?;
    tracing::info!(post_id, "post deleted");

    let items = match ctx.api().list_posts().await {
        Ok(posts) => Some(posts),
        Err(err) => {
            tracing::warn!(error = %err, "refetch after delete failed");
            None
        }
    };
    Ok(Refreshed {
        alert: Alert::success("Post deleted."),
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, excerpt: &str) -> Post {
        Post {
            id: title.to_string(),
            title: title.to_string(),
            excerpt: excerpt.to_string(),
            content: String::new(),
            author: None,
            image_src: None,
        }
    }

    #[test]
    fn test_filter_matches_title_or_excerpt_case_insensitive() {
        let posts = vec![
            post("Rust basics", "ownership"),
            post("Cooking", "pasta and RUST-colored sauce"),
            post("History", "rome"),
        ];
        let hits = filter_posts(posts, "rust");
        let titles: Vec<_> = hits.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Rust basics", "Cooking"]);
    }

    #[test]
    fn test_blank_query_keeps_all() {
        let posts = vec![post("a", ""), post("b", "")];
        assert_eq!(filter_posts(posts.clone(), "  "), posts);
    }
}
