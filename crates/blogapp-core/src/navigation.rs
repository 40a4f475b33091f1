//! View routing contract.
//!
//! The session core only needs to move between named views. [`Navigator`] is
//! that capability; [`StackNavigator`] is a history-stack implementation that
//! front-ends can use directly or wrap.

use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Named view targets, with their parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Main,
    ReadPost { post_id: String },
    CreatePost,
    EditPost { post_id: String },
    ListTeachers,
    CreateTeacher,
    EditTeacher { user_id: String },
    ListStudents,
    CreateStudent,
    EditStudent { user_id: String },
}

impl Route {
    /// Screen name without parameters.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Main => "Main",
            Route::ReadPost { .. } => "ReadPost",
            Route::CreatePost => "CreatePost",
            Route::EditPost { .. } => "EditPost",
            Route::ListTeachers => "ListTeachers",
            Route::CreateTeacher => "CreateTeacher",
            Route::EditTeacher { .. } => "EditTeacher",
            Route::ListStudents => "ListStudents",
            Route::CreateStudent => "CreateStudent",
            Route::EditStudent { .. } => "EditStudent",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::ReadPost { post_id } | Route::EditPost { post_id } => {
                write!(f, "{}({post_id})", self.name())
            }
            Route::EditTeacher { user_id } | Route::EditStudent { user_id } => {
                write!(f, "{}({user_id})", self.name())
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// Capability to move between views.
pub trait Navigator: Send + Sync {
    /// Shows `route`.
    fn navigate(&self, route: Route);

    /// Returns to the previous view. Returns `false` when there is none.
    fn go_back(&self) -> bool;

    /// Drops all history and mounts `route` as the only view.
    fn reset(&self, route: Route);
}

/// Stack-based navigator.
///
/// `navigate` to a screen already on the stack pops back to it (replacing its
/// parameters); any other target is pushed.
#[derive(Debug, Default)]
pub struct StackNavigator {
    stack: Mutex<Vec<Route>>,
}

impl StackNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    fn stack(&self) -> std::sync::MutexGuard<'_, Vec<Route>> {
        self.stack.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// View on top of the stack.
    pub fn current(&self) -> Option<Route> {
        self.stack().last().cloned()
    }

    /// Whole stack, bottom first.
    pub fn history(&self) -> Vec<Route> {
        self.stack().clone()
    }
}

impl Navigator for StackNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(%route, "navigate");
        let mut stack = self.stack();
        if let Some(pos) = stack.iter().position(|r| r.name() == route.name()) {
            stack.truncate(pos);
        }
        stack.push(route);
    }

    fn go_back(&self) -> bool {
        let mut stack = self.stack();
        if stack.len() > 1 {
            stack.pop();
            true
        } else {
            false
        }
    }

    fn reset(&self, route: Route) {
        tracing::debug!(%route, "reset navigation");
        let mut stack = self.stack();
        stack.clear();
        stack.push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_back() {
        let nav = StackNavigator::new();
        nav.reset(Route::Main);
        nav.navigate(Route::ReadPost {
            post_id: "p1".to_string(),
        });
        assert_eq!(
            nav.current(),
            Some(Route::ReadPost {
                post_id: "p1".to_string()
            })
        );

        assert!(nav.go_back());
        assert_eq!(nav.current(), Some(Route::Main));
        assert!(!nav.go_back());
        assert_eq!(nav.current(), Some(Route::Main));
    }

    #[test]
    fn test_navigate_to_existing_screen_pops_back() {
        let nav = StackNavigator::new();
        nav.reset(Route::Login);
        nav.navigate(Route::Main);
        nav.navigate(Route::ListTeachers);
        nav.navigate(Route::Login);

        assert_eq!(nav.history(), vec![Route::Login]);
    }

    #[test]
    fn test_navigate_replaces_params_of_same_screen() {
        let nav = StackNavigator::new();
        nav.reset(Route::Main);
        nav.navigate(Route::EditPost {
            post_id: "a".to_string(),
        });
        nav.navigate(Route::EditPost {
            post_id: "b".to_string(),
        });
        assert_eq!(
            nav.history(),
            vec![
                Route::Main,
                Route::EditPost {
                    post_id: "b".to_string()
                }
            ]
        );
    }

    #[test]
    fn test_display_includes_params() {
        assert_eq!(
            Route::EditStudent {
                user_id: "u9".to_string()
            }
            .to_string(),
            "EditStudent(u9)"
        );
        assert_eq!(Route::Main.to_string(), "Main");
    }
}
