//! Header shown on the main view: role-gated shortcuts and logout.

use crate::context::AppContext;
use crate::navigation::Route;
use crate::session::UserProfile;
use crate::session::lifecycle::sign_out;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    CreatePost,
    ManageTeachers,
    ManageStudents,
    Logout,
}

impl HeaderAction {
    /// View the action opens. Logout has none of its own.
    pub fn route(self) -> Option<Route> {
        match self {
            HeaderAction::CreatePost => Some(Route::CreatePost),
            HeaderAction::ManageTeachers => Some(Route::ListTeachers),
            HeaderAction::ManageStudents => Some(Route::ListStudents),
            HeaderAction::Logout => None,
        }
    }
}

/// Actions offered to `user`. Management shortcuts are for teachers only.
pub fn header_actions(user: Option<&UserProfile>) -> Vec<HeaderAction> {
    let mut actions = Vec::with_capacity(4);
    if user.is_some_and(UserProfile::is_teacher) {
        actions.extend([
            HeaderAction::CreatePost,
            HeaderAction::ManageTeachers,
            HeaderAction::ManageStudents,
        ]);
    }
    actions.push(HeaderAction::Logout);
    actions
}

/// Ends the session and returns to the login view.
pub fn logout(ctx: &AppContext) {
    sign_out(ctx.store(), ctx.credentials(), ctx.navigator());
}
