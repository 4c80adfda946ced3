//! Presentation-boundary callbacks

/// Fire-and-forget signals consumed by whatever renders the registry.
///
/// The engine never reads anything back through this boundary; sinks
/// must tolerate being called from worker contexts.
pub trait StatusSink: Send + Sync {
    /// The loading/progress text changed.
    fn loading_changed(&self, loading: bool, label: Option<&str>);

    /// An update-check pass settled with the given drift summary, or is
    /// in flight when `checking` is `Some(true)`.
    fn update_check(&self, has_updates: bool, checking: Option<bool>);
}

/// Sink that drops every signal
pub struct NullSink;

impl StatusSink for NullSink {
    fn loading_changed(&self, _loading: bool, _label: Option<&str>) {}
    fn update_check(&self, _has_updates: bool, _checking: Option<bool>) {}
}
