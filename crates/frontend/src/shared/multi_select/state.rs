use super::traits::SelectOption;

/// Add `key` when absent, drop it when present. Remaining order is kept.
pub fn toggle_value<K: Clone + PartialEq>(value: &[K], key: &K) -> Vec<K> {
    if value.contains(key) {
        remove_value(value, key)
    } else {
        let mut next = value.to_vec();
        next.push(key.clone());
        next
    }
}

pub fn remove_value<K: Clone + PartialEq>(value: &[K], key: &K) -> Vec<K> {
    value.iter().filter(|k| *k != key).cloned().collect()
}

/// Case-insensitive substring match on the label; blank query keeps everything
pub fn filter_options<'a, O: SelectOption>(options: &'a [O], query: &str) -> Vec<&'a O> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return options.iter().collect();
    }
    options
        .iter()
        .filter(|o| o.option_label().to_lowercase().contains(&needle))
        .collect()
}

/// Options backing the current value, in selection order
pub fn selected_options<'a, O: SelectOption>(options: &'a [O], value: &[O::Key]) -> Vec<&'a O> {
    value
        .iter()
        .filter_map(|key| options.iter().find(|o| o.option_key() == *key))
        .collect()
}

/// Selected keys with no matching option (typically options still loading)
pub fn unresolved_count<O: SelectOption>(options: &[O], value: &[O::Key]) -> usize {
    value
        .iter()
        .filter(|key| !options.iter().any(|o| o.option_key() == **key))
        .count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

impl NavKey {
    /// Maps `KeyboardEvent.key`
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" => Some(NavKey::ArrowDown),
            "ArrowUp" => Some(NavKey::ArrowUp),
            "Enter" => Some(NavKey::Enter),
            "Escape" => Some(NavKey::Escape),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Opened,
    Moved,
    /// Toggle the filtered option at this index; the list stays open
    Toggle(usize),
    Closed,
}

impl KeyOutcome {
    /// Whether the browser default (caret movement, form submit) should be suppressed
    pub fn consumed(&self) -> bool {
        !matches!(self, KeyOutcome::Ignored)
    }

    /// Escape that closed the panel must not also close an enclosing dialog
    pub fn stops_propagation(&self) -> bool {
        matches!(self, KeyOutcome::Closed)
    }
}

/// Open/closed flag, search text and keyboard highlight of the dropdown
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropdownState {
    pub open: bool,
    pub query: String,
    pub highlighted: Option<usize>,
}

impl DropdownState {
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close and forget the search text and highlight
    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.highlighted = None;
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
        self.highlighted = None;
        self.open = true;
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.highlighted = None;
    }

    /// `len` is the number of options currently visible after filtering.
    pub fn handle_key(&mut self, key: NavKey, len: usize) -> KeyOutcome {
        if !self.open {
            return match key {
                NavKey::Enter | NavKey::ArrowDown => {
                    self.open = true;
                    KeyOutcome::Opened
                }
                _ => KeyOutcome::Ignored,
            };
        }

        match key {
            NavKey::ArrowDown => {
                if len == 0 {
                    self.highlighted = None;
                    return KeyOutcome::Ignored;
                }
                self.highlighted = Some(match self.highlighted {
                    None => 0,
                    Some(i) => (i + 1).min(len - 1),
                });
                KeyOutcome::Moved
            }
            NavKey::ArrowUp => {
                self.highlighted = match self.highlighted {
                    None | Some(0) => None,
                    Some(i) => Some((i - 1).min(len.saturating_sub(1))),
                };
                KeyOutcome::Moved
            }
            NavKey::Enter => match self.highlighted {
                Some(i) if i < len => KeyOutcome::Toggle(i),
                _ => KeyOutcome::Ignored,
            },
            NavKey::Escape => {
                self.close();
                KeyOutcome::Closed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Opt(u32, &'static str);

    impl SelectOption for Opt {
        type Key = u32;
        fn option_key(&self) -> u32 {
            self.0
        }
        fn option_label(&self) -> String {
            self.1.to_string()
        }
    }

    fn options() -> Vec<Opt> {
        vec![Opt(1, "Alice Broker"), Opt(2, "Bob Agent"), Opt(3, "alicia")]
    }

    #[test]
    fn toggle_appends_then_removes_stably() {
        let v = toggle_value(&[], &1);
        let v = toggle_value(&v, &2);
        let v = toggle_value(&v, &3);
        assert_eq!(v, vec![1, 2, 3]);
        assert_eq!(toggle_value(&v, &2), vec![1, 3]);
        assert_eq!(remove_value(&v, &1), vec![2, 3]);
    }

    #[test]
    fn toggle_sequence_never_duplicates() {
        let keys = [1, 2, 1, 3, 3, 2, 1, 4, 2, 2, 4];
        let mut value: Vec<u32> = Vec::new();
        for k in keys {
            value = toggle_value(&value, &k);
            let mut sorted = value.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), value.len());
        }
        assert_eq!(value, vec![1]);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let opts = options();
        let keys: Vec<u32> = filter_options(&opts, "ALI").iter().map(|o| o.0).collect();
        assert_eq!(keys, vec![1, 3]);
        assert_eq!(filter_options(&opts, "  ").len(), 3);
        assert!(filter_options(&opts, "zzz").is_empty());
    }

    #[test]
    fn unknown_values_are_counted_not_dropped() {
        let opts = options();
        let value = vec![2, 9, 1, 7];
        assert_eq!(unresolved_count(&opts, &value), 2);
        let chips: Vec<u32> = selected_options(&opts, &value).iter().map(|o| o.0).collect();
        assert_eq!(chips, vec![2, 1]);
        assert_eq!(value.len(), 4);
    }

    #[test]
    fn closed_dropdown_opens_on_enter_or_arrow_down() {
        let mut state = DropdownState::default();
        assert_eq!(state.handle_key(NavKey::ArrowUp, 3), KeyOutcome::Ignored);
        assert_eq!(state.handle_key(NavKey::Escape, 3), KeyOutcome::Ignored);
        assert!(!state.open);
        assert_eq!(state.handle_key(NavKey::Enter, 3), KeyOutcome::Opened);
        assert!(state.open);
        assert_eq!(state.highlighted, None);

        let mut state = DropdownState::default();
        assert_eq!(state.handle_key(NavKey::ArrowDown, 3), KeyOutcome::Opened);
        assert!(state.open);
    }

    #[test]
    fn highlight_is_clamped() {
        let mut state = DropdownState { open: true, ..Default::default() };
        for _ in 0..5 {
            state.handle_key(NavKey::ArrowDown, 3);
        }
        assert_eq!(state.highlighted, Some(2));

        state.handle_key(NavKey::ArrowUp, 3);
        state.handle_key(NavKey::ArrowUp, 3);
        assert_eq!(state.highlighted, Some(0));
        state.handle_key(NavKey::ArrowUp, 3);
        assert_eq!(state.highlighted, None);
        state.handle_key(NavKey::ArrowUp, 3);
        assert_eq!(state.highlighted, None);
    }

    #[test]
    fn enter_toggles_highlighted_without_closing() {
        let mut state = DropdownState { open: true, ..Default::default() };
        assert_eq!(state.handle_key(NavKey::Enter, 3), KeyOutcome::Ignored);
        state.handle_key(NavKey::ArrowDown, 3);
        state.handle_key(NavKey::ArrowDown, 3);
        assert_eq!(state.handle_key(NavKey::Enter, 3), KeyOutcome::Toggle(1));
        assert!(state.open);
        // list shrank under the highlight
        assert_eq!(state.handle_key(NavKey::Enter, 1), KeyOutcome::Ignored);
    }

    #[test]
    fn escape_closes_and_resets() {
        let mut state = DropdownState::default();
        state.set_query("ali".to_string());
        state.handle_key(NavKey::ArrowDown, 2);
        assert_eq!(state.handle_key(NavKey::Escape, 2), KeyOutcome::Closed);
        assert_eq!(state, DropdownState::default());
    }

    #[test]
    fn only_closing_escape_is_kept_from_parent_dialog() {
        let mut state = DropdownState::default();
        // closed panel: Escape belongs to whoever is outside
        let idle = state.handle_key(NavKey::Escape, 2);
        assert!(!idle.consumed());
        assert!(!idle.stops_propagation());

        state.handle_key(NavKey::ArrowDown, 2);
        let moved = state.handle_key(NavKey::ArrowDown, 2);
        assert_eq!(moved, KeyOutcome::Moved);
        assert!(!moved.stops_propagation());

        let closed = state.handle_key(NavKey::Escape, 2);
        assert_eq!(closed, KeyOutcome::Closed);
        assert!(closed.consumed());
        assert!(closed.stops_propagation());
    }
}
