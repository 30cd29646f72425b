use serde::{Deserialize, Serialize};

/// Page mode derived from the URL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    Shop,
    Login,
    Register,
}

impl Page {
    /// Substring match on the path, checked in shop, login, register order.
    /// Query strings and hashes are not part of `pathname` and are ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        if path.contains("shop") {
            Self::Shop
        } else if path.contains("login") {
            Self::Login
        } else if path.contains("register") {
            Self::Register
        } else {
            Self::Home
        }
    }

    #[must_use]
    pub const fn is_auth(self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn paths_map_to_pages() {
        assert_eq!(Page::from_path("/shop.html"), Page::Shop);
        assert_eq!(Page::from_path("/login.html"), Page::Login);
        assert_eq!(Page::from_path("/register.html"), Page::Register);
        assert_eq!(Page::from_path("/"), Page::Home);
        assert_eq!(Page::from_path("/index.html"), Page::Home);
        assert_eq!(Page::from_path("/about"), Page::Home);
    }

    #[test]
    fn earlier_substrings_win() {
        assert_eq!(Page::from_path("/shop/login"), Page::Shop);
        assert!(Page::Register.is_auth());
        assert!(!Page::Shop.is_auth());
    }
}
