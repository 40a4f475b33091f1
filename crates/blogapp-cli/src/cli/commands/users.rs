//! Teacher and student command handlers.

use anyhow::Result;
use blogapp_core::context::AppContext;
use blogapp_core::screens::users::{self, UserForm};
use blogapp_core::session::UserType;

use super::{confirm, print_success, shown};
use crate::cli::UserFields;

impl UserFields {
    /// Overwrites the form fields given on the command line.
    fn apply(self, form: &mut UserForm) {
        let UserFields {
            name,
            email,
            school,
            age,
            guardian,
            student_class,
        } = self;
        for (value, slot) in [
            (name, &mut form.name),
            (email, &mut form.email),
            (school, &mut form.school),
            (age, &mut form.age),
            (guardian, &mut form.guardian),
            (student_class, &mut form.student_class),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

pub async fn list(ctx: &AppContext, role: UserType) -> Result<()> {
    let records = users::list_users(ctx, role).await.map_err(shown)?;
    if records.is_empty() {
        println!("No active {}s found.", role.label());
        return Ok(());
    }
    for record in &records {
        println!("{}  {} <{}>", record.id, record.name, record.email);
    }
    Ok(())
}

pub async fn show(ctx: &AppContext, role: UserType, user_id: &str) -> Result<()> {
    let form = users::load_user(ctx, role, user_id).await.map_err(shown)?;
    println!("{} <{}>", form.name, form.email);
    println!("School: {}", form.school);
    println!("Age: {}", form.age);
    if role == UserType::Student {
        println!("Guardian: {}", form.guardian);
        println!("Class: {}", form.student_class);
    }
    Ok(())
}

pub async fn create(
    ctx: &AppContext,
    role: UserType,
    password: Option<String>,
    fields: UserFields,
) -> Result<()> {
    users::open_create(ctx, role);
    let mut form = UserForm {
        password: password.unwrap_or_default(),
        ..UserForm::default()
    };
    fields.apply(&mut form);

    let alert = users::create_user(ctx, role, &form).await.map_err(shown)?;
    print_success(&alert);
    Ok(())
}

pub async fn edit(ctx: &AppContext, role: UserType, user_id: &str, fields: UserFields) -> Result<()> {
    users::open_edit(ctx, role, user_id);
    let mut form = users::load_user(ctx, role, user_id).await.map_err(shown)?;
    fields.apply(&mut form);

    let alert = users::update_user(ctx, role, user_id, &form)
        .await
        .map_err(shown)?;
    print_success(&alert);
    Ok(())
}

pub async fn delete(ctx: &AppContext, role: UserType, user_id: &str, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete {} {user_id}?", role.label()))? {
        println!("Delete cancelled.");
        return Ok(());
    }
    let refreshed = users::delete_user(ctx, role, user_id)
        .await
        .map_err(shown)?;
    print_success(&refreshed.alert);
    match refreshed.items {
        Some(items) => println!("{} active {}s remaining.", items.len(), role.label()),
        None => eprintln!("Could not refresh the {} list.", role.label()),
    }
    Ok(())
}
