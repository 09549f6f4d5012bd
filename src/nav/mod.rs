use crate::config::DashboardConfig;
use crate::events::{Effect, EventKind, HandlerTable, Target, UiEvent};
use crate::models::{
    NavLink, ACTIVE_CLASS, NAV_LINK_SELECTOR, SHOW_CLASS, SIDEBAR_ID, SIDEBAR_OVERLAY_ID,
    SIDEBAR_TOGGLE_ID, SUBMENU_TOGGLE_SELECTOR,
};

/// `path` is `href` itself or lives under it (`/reports` covers
/// `/reports/2024`, not `/reports-old`).
pub(crate) fn route_matches(path: &str, href: &str) -> bool {
    if path == href {
        return true;
    }
    path.strip_prefix(href)
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Indices of the links that match `path`, in document order.
pub(crate) fn active_links(path: &str, links: &[NavLink]) -> Vec<usize> {
    links
        .iter()
        .enumerate()
        .filter(|(_, link)| link.target().is_some_and(|href| route_matches(path, href)))
        .map(|(i, _)| i)
        .collect()
}

/// Effects that mark the active links and open their submenus.
pub(crate) fn highlight_effects(path: &str, links: &[NavLink]) -> Vec<Effect> {
    let mut effects = Vec::new();
    let mut opened: Vec<&str> = Vec::new();

    for i in active_links(path, links) {
        effects.push(Effect::AddClass(
            Target::Nth(NAV_LINK_SELECTOR, i),
            ACTIVE_CLASS,
        ));
        if let Some(panel) = links[i].panel_id.as_deref() {
            if !opened.contains(&panel) {
                opened.push(panel);
                effects.push(Effect::OpenPanel(format!("#{panel}")));
            }
        }
    }

    effects
}

/// Sidebar show/hide, overlay and submenu triggers.
pub(crate) struct NavigationController {
    breakpoint_px: u32,
}

impl NavigationController {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            breakpoint_px: config.sidebar_breakpoint_px,
        }
    }

    pub fn handlers() -> HandlerTable<Self> {
        HandlerTable::new()
            .on(Target::Id(SIDEBAR_TOGGLE_ID), EventKind::Click, Self::on_toggle)
            .on(Target::Id(SIDEBAR_OVERLAY_ID), EventKind::Click, Self::on_overlay)
            .on(Target::Window, EventKind::Resize, Self::on_resize)
            .on(
                Target::Selector(SUBMENU_TOGGLE_SELECTOR),
                EventKind::Click,
                Self::on_submenu,
            )
    }

    fn on_toggle(&mut self, _: &UiEvent) -> Vec<Effect> {
        vec![
            Effect::ToggleClass(Target::Id(SIDEBAR_ID), SHOW_CLASS),
            Effect::ToggleClass(Target::Id(SIDEBAR_OVERLAY_ID), SHOW_CLASS),
        ]
    }

    fn on_overlay(&mut self, _: &UiEvent) -> Vec<Effect> {
        hide_sidebar()
    }

    fn on_resize(&mut self, event: &UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::Resize { viewport_width } if *viewport_width > self.breakpoint_px => {
                hide_sidebar()
            }
            _ => Vec::new(),
        }
    }

    fn on_submenu(&mut self, event: &UiEvent) -> Vec<Effect> {
        let UiEvent::Click(click) = event else {
            return Vec::new();
        };

        let mut effects = vec![Effect::PreventDefault];
        if let Some(panel) = click.toggle_target.as_deref().filter(|t| !t.is_empty()) {
            effects.push(Effect::TogglePanel(panel.to_string()));
        }
        effects
    }
}

fn hide_sidebar() -> Vec<Effect> {
    vec![
        Effect::RemoveClass(Target::Id(SIDEBAR_ID), SHOW_CLASS),
        Effect::RemoveClass(Target::Id(SIDEBAR_OVERLAY_ID), SHOW_CLASS),
    ]
}
