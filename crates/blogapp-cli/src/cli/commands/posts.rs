//! Post command handlers.

use anyhow::Result;
use blogapp_core::api::Post;
use blogapp_core::context::AppContext;
use blogapp_core::navigation::Route;
use blogapp_core::screens::posts;

use super::{confirm, print_success, shown};

fn print_summary(post: &Post) {
    println!("{}  {} (by {})", post.id, post.title, post.author_name());
    if !post.excerpt.is_empty() {
        println!("    {}", post.excerpt);
    }
}

pub async fn list(ctx: &AppContext, search: &str) -> Result<()> {
    let listing = posts::list_posts(ctx, search).await.map_err(shown)?;
    if listing.posts.is_empty() {
        println!("No posts found.");
        return Ok(());
    }
    for post in &listing.posts {
        print_summary(post);
    }
    if listing.can_manage {
        println!();
        println!("Manage with `blogapp posts edit <POST_ID>` or `blogapp posts delete <POST_ID>`.");
    }
    Ok(())
}

pub async fn show(ctx: &AppContext, post_id: &str) -> Result<()> {
    posts::open_post(ctx, post_id);
    let post = posts::read_post(ctx, post_id).await.map_err(shown)?;
    println!("{}", post.title);
    println!("by {}", post.author_name());
    println!();
    println!("{}", post.content);
    Ok(())
}

pub async fn create(ctx: &AppContext, title: &str, excerpt: &str, content: &str) -> Result<()> {
    ctx.navigator().navigate(Route::CreatePost);
    let alert = posts::create_post(ctx, title, excerpt, content)
        .await
        .map_err(shown)?;
    print_success(&alert);
    Ok(())
}

pub async fn edit(
    ctx: &AppContext,
    post_id: &str,
    title: Option<String>,
    excerpt: Option<String>,
    content: Option<String>,
) -> Result<()> {
    posts::edit_post(ctx, post_id);
    let mut draft = posts::load_post(ctx, post_id).await.map_err(shown)?;
    if let Some(title) = title {
        draft.title = title;
    }
    if let Some(excerpt) = excerpt {
        draft.excerpt = excerpt;
    }
    if let Some(content) = content {
        draft.content = content;
    }

    let alert = posts::update_post(ctx, post_id, &draft)
        .await
        .map_err(shown)?;
    print_success(&alert);
    Ok(())
}

pub async fn delete(ctx: &AppContext, post_id: &str, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete post {post_id}?"))? {
        println!("Delete cancelled.");
        return Ok(());
    }
    let refreshed = posts::delete_post(ctx, post_id).await.map_err(shown)?;
    print_success(&refreshed.alert);
    match refreshed.items {
        Some(items) => println!("{} posts remaining.", items.len()),
        None => eprintln!("Could not refresh the post list."),
    }
    Ok(())
}
