//! Route paths shared between the guard and the search selection flow.

/// Sign-in view; default redirect target for guarded routes.
pub const SIGN_IN: &str = "/sign-in";

/// Category browse view for a category id.
#[must_use]
pub fn category(category_id: &str) -> String {
    format!("/category/{category_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_route() {
        assert_eq!(category("c42"), "/category/c42");
    }
}
