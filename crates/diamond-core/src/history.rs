//! Navigation history tracking
//!
//! The system webview does not expose its back/forward list, so the binding
//! reconstructs availability from the navigations it sees. Traversals issued
//! through the toolbar are announced with [`NavigationHistory::begin_traversal`]
//! before the engine reports the resulting navigation.

use log::debug;

/// Direction of a history traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    Back,
    Forward,
}

/// Back/forward list of the content surface
#[derive(Debug, Default, Clone)]
pub struct NavigationHistory {
    back: Vec<String>,
    current: Option<String>,
    forward: Vec<String>,
    pending: Option<Traversal>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    /// Expect the next committed navigation to be a traversal
    pub fn begin_traversal(&mut self, traversal: Traversal) {
        self.pending = Some(traversal);
    }

    /// Forget a pending traversal, e.g. when a fresh load is started instead
    pub fn cancel_traversal(&mut self) {
        self.pending = None;
    }

    /// Record a navigation reported by the engine
    pub fn commit(&mut self, url: &str) {
        if is_placeholder(url) {
            return;
        }

        match self.pending.take() {
            Some(Traversal::Back) if self.back.last().map(String::as_str) == Some(url) => {
                if let Some(previous) = self.back.pop() {
                    if let Some(current) = self.current.replace(previous) {
                        self.forward.push(current);
                    }
                }
                return;
            }
            Some(Traversal::Forward) if self.forward.last().map(String::as_str) == Some(url) => {
                if let Some(next) = self.forward.pop() {
                    if let Some(current) = self.current.replace(next) {
                        self.back.push(current);
                    }
                }
                return;
            }
            Some(traversal) => {
                debug!("{:?} traversal landed on unexpected {}", traversal, url);
            }
            None => {}
        }

        if self.current.as_deref() == Some(url) {
            return;
        }
        if let Some(current) = self.current.replace(url.to_string()) {
            self.back.push(current);
        }
        self.forward.clear();
    }

    /// Point the current entry at the URL the engine actually settled on
    pub fn replace_current(&mut self, url: &str) {
        if is_placeholder(url) {
            return;
        }
        if let Some(current) = self.current.as_mut() {
            if current != url {
                debug!("Entry {} settled on {}", current, url);
                *current = url.to_string();
            }
        }
    }
}

pub(crate) fn is_placeholder(url: &str) -> bool {
    url.is_empty() || url.eq_ignore_ascii_case("about:blank")
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "https://a.test/";
    const B: &str = "https://b.test/";
    const C: &str = "https://c.test/";

    #[test]
    fn test_first_navigation_has_no_history() {
        let mut history = NavigationHistory::new();
        history.commit("about:blank");
        history.commit(A);
        assert_eq!(history.current(), Some(A));
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_back_and_forward() {
        let mut history = NavigationHistory::new();
        history.commit(A);
        history.commit(B);
        assert!(history.can_go_back());

        history.begin_traversal(Traversal::Back);
        history.commit(A);
        assert_eq!(history.current(), Some(A));
        assert!(!history.can_go_back());
        assert!(history.can_go_forward());

        history.begin_traversal(Traversal::Forward);
        history.commit(B);
        assert_eq!(history.current(), Some(B));
        assert!(history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_new_navigation_clears_forward() {
        let mut history = NavigationHistory::new();
        history.commit(A);
        history.commit(B);
        history.begin_traversal(Traversal::Back);
        history.commit(A);

        history.commit(C);
        assert!(!history.can_go_forward());
        assert!(history.can_go_back());
    }

    #[test]
    fn test_same_url_is_reload() {
        let mut history = NavigationHistory::new();
        history.commit(A);
        history.commit(A);
        assert!(!history.can_go_back());
    }

    #[test]
    fn test_redirected_entry_matches_on_back() {
        let redirect = "http://b.test/";
        let mut history = NavigationHistory::new();
        history.commit(A);
        history.commit(redirect);
        history.replace_current(B);
        history.commit(C);

        history.begin_traversal(Traversal::Back);
        history.commit(B);
        assert_eq!(history.current(), Some(B));
        assert!(history.can_go_back());
        assert!(history.can_go_forward());
    }

    #[test]
    fn test_replace_current_ignores_placeholders() {
        let mut history = NavigationHistory::new();
        history.replace_current(A);
        assert_eq!(history.current(), None);

        history.commit(A);
        history.replace_current("about:blank");
        assert_eq!(history.current(), Some(A));
    }

    #[test]
    fn test_mismatched_traversal_is_new_entry() {
        let mut history = NavigationHistory::new();
        history.commit(A);
        history.commit(B);
        history.begin_traversal(Traversal::Back);
        history.commit(C);
        assert_eq!(history.current(), Some(C));
        assert!(!history.can_go_forward());
    }
}
