/// Element that can be offered in a [`MultiSelect`](super::MultiSelect).
///
/// `option_key` must be stable for the lifetime of the option and is what the
/// control stores in its value; `option_label` is what the user sees and what
/// the search box matches against.
pub trait SelectOption {
    type Key: Clone + PartialEq + Send + Sync + 'static;

    fn option_key(&self) -> Self::Key;
    fn option_label(&self) -> String;
}
