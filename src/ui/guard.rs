#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Dashboard,
}

/// The screen actually shown for a requested route. Protected screens need a
/// session; the login screen is skipped once signed in.
pub fn resolve(requested: Route, signed_in: bool) -> Route {
    match (requested, signed_in) {
        (_, false) => Route::Login,
        (Route::Home | Route::Login | Route::Dashboard, true) => Route::Dashboard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_out_always_lands_on_login() {
        assert_eq!(resolve(Route::Home, false), Route::Login);
        assert_eq!(resolve(Route::Dashboard, false), Route::Login);
        assert_eq!(resolve(Route::Login, false), Route::Login);
    }

    #[test]
    fn signed_in_never_sees_login() {
        assert_eq!(resolve(Route::Login, true), Route::Dashboard);
        assert_eq!(resolve(Route::Home, true), Route::Dashboard);
        assert_eq!(resolve(Route::Dashboard, true), Route::Dashboard);
    }
}
