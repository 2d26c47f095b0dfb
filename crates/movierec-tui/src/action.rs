/// Semantic actions produced by input mapping and consumed by `App::update`.
///
/// Keys mean different things depending on the screen and on whether the
/// cart has focus; the update loop resolves that, not the input layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveDown,
    MoveUp,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    NavigateBack,

    // Catalog
    ToggleSelect,
    StartSearch,
    SearchInput(char),
    SearchBackspace,
    SearchConfirm,
    SearchCancel,
    OlderYear,
    NewerYear,
    ClearYear,
    ToggleCartFocus,
    ClearSelection,
    RemoveFromCart,
    /// Enter: get recommendations (when enabled).
    Submit,
    /// Reload the catalog page, or re-run recommendations.
    Reload,

    // Global
    ToggleHelp,
    Quit,
    ForceQuit,
    Tick,
    Resize(u16, u16),
    None,
}
