use propcast_core::ResolvedValue;

/// Holds the shared state accessible by all request handlers.
///
/// The property is resolved once before the router is built and never
/// changes afterwards, so handlers only ever read it and no lock is needed.
#[derive(Clone, Debug)]
pub struct AppState {
    pub property: ResolvedValue,
}

impl AppState {
    pub fn new(property: ResolvedValue) -> Self {
        AppState { property }
    }
}
