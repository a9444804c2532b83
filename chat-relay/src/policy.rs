//! Site-level access policy.
//!
//! The admin rule is a placeholder heuristic kept behind one function so a real role check can
//! replace it without touching call sites. Matching is case-sensitive.

use edge_core::Role;

/// True when the email contains `stephen` or `admin`, or the user id is `1`.
pub fn is_site_admin(user_id: &str, email: &str) -> bool {
    email.contains("stephen") || email.contains("admin") || user_id == "1"
}

/// Site role shown in admin listings: `admin` for site admins, `user` otherwise.
pub fn site_role(user_id: &str, email: &str) -> Role {
    if is_site_admin(user_id, email) {
        Role::Admin
    } else {
        Role::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_substrings_grant_admin() {
        assert!(is_site_admin("42", "admin@edge-ai.space"));
        assert!(is_site_admin("42", "ops-admin@x.com"));
        assert!(is_site_admin("42", "stephen@x.com"));
    }

    #[test]
    fn test_user_id_one_is_admin() {
        assert!(is_site_admin("1", "someone@x.com"));
        assert!(!is_site_admin("11", "someone@x.com"));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert!(!is_site_admin("42", "ADMIN@x.com"));
        assert!(!is_site_admin("42", "Stephen@x.com"));
    }

    #[test]
    fn test_site_role() {
        assert_eq!(site_role("1", "a@x.com"), Role::Admin);
        assert_eq!(site_role("42", "a@x.com"), Role::User);
    }
}
