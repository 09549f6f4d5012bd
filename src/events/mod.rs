use crate::models::{NavEntry, UploadFile};
use strum::{Display, IntoStaticStr};

/// DOM event types the controllers listen for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum EventKind {
    Click,
    Input,
    Change,
    Submit,
    Resize,
}

/// Where a listener is registered, and where an effect lands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Target {
    Window,
    Document,
    Id(&'static str),
    /// Every element matching the selector.
    Selector(&'static str),
    /// The n-th element matching the selector, in document order.
    Nth(&'static str, usize),
}

/// Click details the DOM layer extracts before dispatch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ClickInfo {
    /// Tracked element ids whose subtree contains the click target.
    pub inside: Vec<&'static str>,
    /// `data-href` of the closest tagged ancestor of the click target.
    pub row_href: Option<String>,
    /// `data-bs-target` of the element the listener is registered on.
    pub toggle_target: Option<String>,
}

impl ClickInfo {
    pub fn is_inside(&self, id: &str) -> bool {
        self.inside.iter().any(|i| *i == id)
    }
}

/// Synthetic event handed to handlers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum UiEvent {
    Click(ClickInfo),
    Input { value: String },
    Change { files: Vec<UploadFile> },
    Submit { files: Vec<UploadFile> },
    Resize { viewport_width: u32 },
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::Click(_) => EventKind::Click,
            UiEvent::Input { .. } => EventKind::Input,
            UiEvent::Change { .. } => EventKind::Change,
            UiEvent::Submit { .. } => EventKind::Submit,
            UiEvent::Resize { .. } => EventKind::Resize,
        }
    }
}

/// Declarative DOM mutation produced by a handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
    PreventDefault,
    AddClass(Target, &'static str),
    RemoveClass(Target, &'static str),
    ToggleClass(Target, &'static str),
    OpenPanel(String),
    TogglePanel(String),
    RenderResults(Vec<NavEntry>),
    Navigate(String),
    Alert(String),
    ClearValue(Target),
    /// Disable the control and swap its label for the busy indicator.
    ShowBusy(Target),
}

pub(crate) type Handler<S> = fn(&mut S, &UiEvent) -> Vec<Effect>;

/// Registration table: (target, event kind) -> handler.
pub(crate) struct HandlerTable<S> {
    entries: Vec<(Target, EventKind, Handler<S>)>,
}

impl<S> HandlerTable<S> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn on(mut self, target: Target, kind: EventKind, handler: Handler<S>) -> Self {
        self.entries.push((target, kind, handler));
        self
    }

    /// Distinct (target, kind) pairs in registration order.
    pub fn bindings(&self) -> Vec<(Target, EventKind)> {
        let mut out: Vec<(Target, EventKind)> = Vec::new();
        for (target, kind, _) in &self.entries {
            if !out.iter().any(|(t, k)| t == target && k == kind) {
                out.push((target.clone(), *kind));
            }
        }
        out
    }

    /// Runs every handler bound to `target` for the event's kind, in
    /// registration order, and concatenates their effects.
    pub fn dispatch(&self, state: &mut S, target: &Target, event: &UiEvent) -> Vec<Effect> {
        let kind = event.kind();
        let mut effects = Vec::new();
        for (t, k, handler) in &self.entries {
            if t == target && *k == kind {
                effects.extend(handler(state, event));
            }
        }
        effects
    }
}

impl<S> Default for HandlerTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        clicks: u32,
    }

    fn count(state: &mut Counter, _: &UiEvent) -> Vec<Effect> {
        state.clicks += 1;
        vec![Effect::PreventDefault]
    }

    fn navigate(_: &mut Counter, _: &UiEvent) -> Vec<Effect> {
        vec![Effect::Navigate("/x".to_string())]
    }

    #[test]
    fn test_event_kind_names_match_dom() {
        let names: Vec<&'static str> = [
            EventKind::Click,
            EventKind::Input,
            EventKind::Change,
            EventKind::Submit,
            EventKind::Resize,
        ]
        .into_iter()
        .map(Into::into)
        .collect();
        assert_eq!(names, vec!["click", "input", "change", "submit", "resize"]);
        assert_eq!(EventKind::Resize.to_string(), "resize");
    }

    #[test]
    fn test_dispatch_runs_only_matching_handlers_in_order() {
        let table: HandlerTable<Counter> = HandlerTable::new()
            .on(Target::Id("a"), EventKind::Click, count)
            .on(Target::Id("a"), EventKind::Click, navigate)
            .on(Target::Id("b"), EventKind::Click, count)
            .on(Target::Id("a"), EventKind::Input, count);

        let mut state = Counter::default();
        let effects = table.dispatch(
            &mut state,
            &Target::Id("a"),
            &UiEvent::Click(ClickInfo::default()),
        );

        assert_eq!(state.clicks, 1);
        assert_eq!(
            effects,
            vec![Effect::PreventDefault, Effect::Navigate("/x".to_string())]
        );
    }

    #[test]
    fn test_dispatch_unknown_target_is_noop() {
        let table: HandlerTable<Counter> = HandlerTable::new().on(Target::Id("a"), EventKind::Click, count);
        let mut state = Counter::default();
        let effects = table.dispatch(
            &mut state,
            &Target::Document,
            &UiEvent::Click(ClickInfo::default()),
        );
        assert!(effects.is_empty());
        assert_eq!(state.clicks, 0);
    }

    #[test]
    fn test_bindings_are_deduplicated() {
        let table: HandlerTable<Counter> = HandlerTable::new()
            .on(Target::Id("a"), EventKind::Click, count)
            .on(Target::Id("a"), EventKind::Click, navigate)
            .on(Target::Window, EventKind::Resize, count);
        assert_eq!(
            table.bindings(),
            vec![
                (Target::Id("a"), EventKind::Click),
                (Target::Window, EventKind::Resize)
            ]
        );
    }

    #[test]
    fn test_click_info_is_inside() {
        let click = ClickInfo {
            inside: vec!["globalSearch"],
            ..Default::default()
        };
        assert!(click.is_inside("globalSearch"));
        assert!(!click.is_inside("searchResults"));
    }
}
