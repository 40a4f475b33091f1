//! Session command handlers.

use anyhow::Result;
use blogapp_core::context::AppContext;
use blogapp_core::screens::header::{self, HeaderAction};
use blogapp_core::screens::login as login_screen;
use blogapp_core::session::mask_token;

use super::{confirm, prompt, shown};

pub async fn login(ctx: &AppContext, email: Option<&str>, password: Option<&str>) -> Result<()> {
    let email = match email {
        Some(email) => email.to_string(),
        None => prompt("Email")?,
    };
    let password = match password {
        Some(password) => password.to_string(),
        None => prompt("Password")?,
    };

    let user = login_screen::login(ctx, &email, &password)
        .await
        .map_err(shown)?;
    println!("✓ Logged in as {} ({})", user.name, user.user_type.label());
    Ok(())
}

pub fn logout(ctx: &AppContext, yes: bool) -> Result<()> {
    if !ctx.store().is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }
    if !yes && !confirm("Log out of BlogApp?")? {
        println!("Logout cancelled.");
        return Ok(());
    }
    header::logout(ctx);
    println!("✓ Logged out.");
    Ok(())
}

pub fn whoami(ctx: &AppContext) {
    let Some(session) = ctx.store().snapshot() else {
        println!("Not logged in.");
        return;
    };
    let user = &session.user;
    println!("{} <{}>", user.name, user.email);
    println!("Role: {}", user.user_type.label());
    println!("Token: {}", mask_token(&session.token));

    let actions: Vec<String> = header::header_actions(Some(user))
        .into_iter()
        .filter_map(HeaderAction::route)
        .map(|route| route.to_string())
        .collect();
    if !actions.is_empty() {
        println!("Can open: {}", actions.join(", "));
    }
}
