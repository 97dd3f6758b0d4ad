use std::collections::HashSet;

/// Static list of user ids allowed to triage requests
#[derive(Debug, Clone, Default)]
pub struct AdminAllowList {
    ids: HashSet<String>,
}

impl AdminAllowList {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids
                .into_iter()
                .map(Into::into)
                .map(|id: String| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),
        }
    }

    pub fn is_admin(&self, user_id: &str) -> bool {
        self.ids.contains(user_id.trim())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_admin() {
        let admins = AdminAllowList::new(["123456789", " 987654321 ", ""]);

        assert_eq!(admins.len(), 2);
        assert!(admins.is_admin("123456789"));
        assert!(admins.is_admin("987654321"));
        assert!(!admins.is_admin("555"));
        assert!(!admins.is_admin(""));
    }

    #[test]
    fn test_empty_list_has_no_admins() {
        let admins = AdminAllowList::default();
        assert!(admins.is_empty());
        assert!(!admins.is_admin("anonymous"));
    }
}
