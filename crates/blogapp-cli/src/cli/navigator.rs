//! Navigator for a one-shot terminal process.
//!
//! Keeps the same history stack a graphical front-end would, and turns
//! redirects into a hint on stderr. The initial mount is silent.

use blogapp_core::navigation::{Navigator, Route, StackNavigator};

#[derive(Debug, Default)]
pub struct TerminalNavigator {
    stack: StackNavigator,
}

impl TerminalNavigator {
    pub fn new() -> Self {
        Self::default()
    }
}

/// What to tell the user when a command lands them on `route`.
fn hint(route: &Route) -> Option<&'static str> {
    match route {
        Route::Login => Some("Run `blogapp login` to sign in."),
        _ => None,
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        if let Some(hint) = hint(&route) {
            eprintln!("{hint}");
        }
        self.stack.navigate(route);
    }

    fn go_back(&self) -> bool {
        self.stack.go_back()
    }

    fn reset(&self, route: Route) {
        self.stack.reset(route);
    }
}
