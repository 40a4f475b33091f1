//! Teacher and student management views.
//!
//! The two roles share every controller here; `role` picks the list filter,
//! the form fields and the wording of alerts.

use super::{Refreshed, parse_age, require_filled};
use crate::api::{
    NewStudent, NewTeacher, Registration, StudentUpdate, TeacherUpdate, UserRecord, UserUpdate,
};
use crate::context::AppContext;
use crate::error::{Alert, AppError, ScreenError};
use crate::navigation::Route;
use crate::session::UserType;

const LOAD_FAILED: &str = "Could not load the users.";

/// Keeps active users of `role`.
pub fn filter_users(users: Vec<UserRecord>, role: UserType) -> Vec<UserRecord> {
    users
        .into_iter()
        .filter(|u| u.user_type == role && u.is_active == Some(true))
        .collect()
}

/// # Errors
/// Missing session or any failure of the list request.
pub async fn list_users(ctx: &AppContext, role: UserType) -> Result<Vec<UserRecord>, ScreenError> {
    let users = ctx
        .api()
        .list_users()
        .await
        .map_err(|e| e.into_screen(LOAD_FAILED))?;
    Ok(filter_users(users, role))
}

pub fn open_create(ctx: &AppContext, role: UserType) {
    let route = match role {
        UserType::Teacher => Route::CreateTeacher,
        UserType::Student => Route::CreateStudent,
    };
    ctx.navigator().navigate(route);
}

pub fn open_edit(ctx: &AppContext, role: UserType, user_id: &str) {
    let user_id = user_id.to_string();
    let route = match role {
        UserType::Teacher => Route::EditTeacher { user_id },
        UserType::Student => Route::EditStudent { user_id },
    };
    ctx.navigator().navigate(route);
}

/// Contents of the create and edit forms.
///
/// `age` stays text until submission. `guardian` and `student_class` are
/// ignored for teachers; `password` is ignored on edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub school: String,
    pub age: String,
    pub guardian: String,
    pub student_class: String,
}

impl UserForm {
    /// Prefills the edit form from a fetched record.
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            password: String::new(),
            school: record.school.clone().unwrap_or_default(),
            age: record.age.map(|a| a.to_string()).unwrap_or_default(),
            guardian: record.guardian.clone().unwrap_or_default(),
            student_class: record.student_class.clone().unwrap_or_default(),
        }
    }

    fn check(&self, role: UserType, with_password: bool) -> Result<u32, AppError> {
        let mut fields = vec![
            self.name.as_str(),
            self.email.as_str(),
            self.school.as_str(),
            self.age.as_str(),
        ];
        if with_password {
            fields.push(&self.password);
        }
        if role == UserType::Student {
            fields.extend([self.guardian.as_str(), self.student_class.as_str()]);
        }
        require_filled(&fields, "Please fill in all fields.")?;
        parse_age(&self.age)
    }

    /// Registration body for `role`.
    ///
    /// # Errors
    /// A required field is blank or the age is not a whole number.
    pub fn to_registration(&self, role: UserType) -> Result<Registration, AppError> {
        let age = self.check(role, true)?;
        let name = self.name.trim().to_string();
        let email = self.email.trim().to_string();
        let school = self.school.trim().to_string();
        Ok(match role {
            UserType::Teacher => Registration::Teacher(NewTeacher {
                name,
                email,
                password: self.password.clone(),
                school,
                age,
                user_type: role,
            }),
            UserType::Student => Registration::Student(NewStudent {
                name,
                email,
                password: self.password.clone(),
                school,
                age,
                user_type: role,
                guardian: self.guardian.trim().to_string(),
                student_class: self.student_class.trim().to_string(),
            }),
        })
    }

    /// Update body for `role`.
    ///
    /// # Errors
    /// A required field is blank or the age is not a whole number.
    pub fn to_update(&self, role: UserType) -> Result<UserUpdate, AppError> {
        let age = self.check(role, false)?;
        let name = self.name.trim().to_string();
        let email = self.email.trim().to_string();
        let school = self.school.trim().to_string();
        Ok(match role {
            UserType::Teacher => UserUpdate::Teacher(TeacherUpdate {
                name,
                email,
                school,
                age,
            }),
            UserType::Student => UserUpdate::Student(StudentUpdate {
                name,
                email,
                school,
                age,
                guardian: self.guardian.trim().to_string(),
                student_class: self.student_class.trim().to_string(),
            }),
        })
    }
}

fn capitalized(role: UserType) -> &'static str {
    match role {
        UserType::Teacher => "Teacher",
        UserType::Student => "Student",
    }
}

/// Registers a new user of `role` and returns to the previous view.
///
/// # Errors
/// Validation failure or any failure of the request.
pub async fn create_user(
    ctx: &AppContext,
    role: UserType,
    form: &UserForm,
) -> Result<Alert, ScreenError> {
    let failure = format!("Could not create the {}. Check the data.", role.label());
    let body = form
        .to_registration(role)
        .map_err(|e| e.into_screen(&failure))?;

    let registered = ctx
        .api()
        .register(&body)
        .await
        .map_err(|e| e.into_screen(&failure))?;

    tracing::info!(user_id = %registered.user.id, role = role.as_str(), "user registered");
    ctx.navigator().go_back();
    Ok(Alert::success(format!(
        "{} \"{}\" created!",
        capitalized(role),
        registered.user.name
    )))
}

/// Fetches the user being edited, to prefill the form.
///
/// # Errors
/// Missing session, any failure of the fetch, or a record whose role is not
/// `role`.
pub async fn load_user(ctx: &AppContext, role: UserType, user_id: &str) -> Result<UserForm, ScreenError> {
    let failure = format!("Could not load the {}.", role.label());
    let record = ctx
        .api()
        .get_user(user_id)
        .await
        .map_err(|e| e.into_screen(&failure))?;
    if record.user_type != role {
        tracing::warn!(
            user_id,
            expected = role.as_str(),
            actual = record.user_type.as_str(),
            "user has a different role"
        );
        return Err(AppError::validation(format!("User {user_id} is not a {}.", role.label()))
            .into_screen(&failure));
    }
    Ok(UserForm::from_record(&record))
}

/// Saves an edited user and returns to the previous view.
///
/// # Errors
/// Validation failure, missing session, or any failure of the request.
pub async fn update_user(
    ctx: &AppContext,
    role: UserType,
    user_id: &str,
    form: &UserForm,
) -> Result<Alert, ScreenError> {
    let failure = format!("Could not update the {}.", role.label());
    let body = form.to_update(role).map_err(|e| e.into_screen(&failure))?;

    let record = ctx
        .api()
        .update_user(user_id, &body)
        .await
        .map_err(|e| e.into_screen(&failure))?;

    ctx.navigator().go_back();
    Ok(Alert::success(format!(
        "{} \"{}\" updated!",
        capitalized(role),
        record.name
    )))
}

/// Deletes a user, then refetches the list for `role`.
///
/// A server-provided reason is shown verbatim when the delete is refused.
///
/// # Errors
/// Missing session or any failure of the delete itself.
pub async fn delete_user(
    ctx: &AppContext,
    role: UserType,
    user_id: &str,
) -> Result<Refreshed<UserRecord>, ScreenError> {
    if let Err(err) = ctx.api().delete_user(user_id).await {
        let message = err
            .server_message()
            .map_or_else(|| format!("Could not delete the {}.", role.label()), str::to_string);
        return Err(err.into_screen(&message).titled("Delete failed"));
    }
    tracing::info!(user_id, role = role.as_str(), "user deleted");

    let items = match ctx.api().list_users().await {
        Ok(users) => Some(filter_users(users, role)),
        Err(err) => {
            tracing::warn!(error = %err, "refetch after delete failed");
            None
        }
    };
    Ok(Refreshed {
        alert: Alert::success(format!("{} deleted.", capitalized(role))),
        items,
    })
}
