//! Back-navigation history.

use super::Screen;
use tracing::debug;

/// Ordered history of visited screens, oldest first.
///
/// The stack is never empty: every operation that would empty it substitutes
/// a fallback root instead. The tail is the screen currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStack {
    entries: Vec<Screen>,
}

impl NavigationStack {
    /// Create a stack holding only `root`.
    pub fn new(root: Screen) -> Self {
        Self {
            entries: vec![root],
        }
    }

    /// The active screen.
    pub fn tail(&self) -> Screen {
        // Non-empty by construction.
        self.entries[self.entries.len() - 1]
    }

    /// Number of entries (always at least 1).
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Entries oldest first.
    pub fn entries(&self) -> &[Screen] {
        &self.entries
    }

    /// Count of `screen` anywhere in the history.
    pub fn occurrences(&self, screen: Screen) -> usize {
        self.entries.iter().filter(|s| **s == screen).count()
    }

    /// Append `screen`, keeping the path that led here.
    pub fn push(&mut self, screen: Screen) {
        self.entries.push(screen);
        debug!("stack push {} (depth {})", screen, self.entries.len());
    }

    /// Discard history and start over from `root`.
    pub fn reset(&mut self, root: Screen) {
        self.entries.clear();
        self.entries.push(root);
        debug!("stack reset to [{}]", root);
    }

    /// Pop the tail and return the new active screen.
    ///
    /// When only one entry is left the stack is reset to `[fallback]` instead,
    /// so popping a singleton `[home]` with fallback `home` is a no-op.
    pub fn pop_or(&mut self, fallback: Screen) -> Screen {
        if self.entries.len() > 1 {
            let left = self.entries.pop();
            debug!("stack pop {:?} (depth {})", left, self.entries.len());
        } else {
            debug!("stack pop on singleton, falling back to {}", fallback);
            self.reset(fallback);
        }
        self.tail()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_path() {
        let mut stack = NavigationStack::new(Screen::Home);
        stack.push(Screen::FullDay);
        stack.push(Screen::ItemDetail);
        assert_eq!(
            stack.entries(),
            &[Screen::Home, Screen::FullDay, Screen::ItemDetail]
        );
        assert_eq!(stack.tail(), Screen::ItemDetail);
    }

    #[test]
    fn test_pop_returns_previous() {
        let mut stack = NavigationStack::new(Screen::Profile);
        stack.push(Screen::ProfileSettings);
        assert_eq!(stack.pop_or(Screen::Home), Screen::Profile);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_pop_singleton_uses_fallback() {
        let mut stack = NavigationStack::new(Screen::Welcome);
        assert_eq!(stack.pop_or(Screen::Home), Screen::Home);
        assert_eq!(stack.entries(), &[Screen::Home]);

        // Popping the fallback root again only re-affirms it
        assert_eq!(stack.pop_or(Screen::Home), Screen::Home);
        assert_eq!(stack.entries(), &[Screen::Home]);
    }

    #[test]
    fn test_reset_discards_history() {
        let mut stack = NavigationStack::new(Screen::Home);
        stack.push(Screen::FullDay);
        stack.push(Screen::ItemDetail);
        stack.reset(Screen::Calendar);
        assert_eq!(stack.entries(), &[Screen::Calendar]);
    }

    #[test]
    fn test_occurrences() {
        let mut stack = NavigationStack::new(Screen::Calendar);
        stack.push(Screen::ItemDetail);
        stack.push(Screen::FullDay);
        stack.push(Screen::ItemDetail);
        assert_eq!(stack.occurrences(Screen::ItemDetail), 2);
        assert_eq!(stack.occurrences(Screen::Home), 0);
    }
}
