mod collapse;

pub(crate) use collapse::{detect_panels, CollapsePanels};

use crate::components::ui::BusyLabel;
use crate::events::{ClickInfo, Effect, EventKind, HandlerTable, Target, UiEvent};
use crate::models::{NavEntry, NavLink, UploadFile, NAV_LINK_SELECTOR, TRACKED_IDS};
use leptos::mount::mount_to;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener_untyped;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;

/// Runs `f` once the document is parsed.
pub(crate) fn when_ready(f: fn()) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    if document.ready_state() == "loading" {
        let cb = Closure::once_into_js(f);
        let _ = document.add_event_listener_with_callback("DOMContentLoaded", cb.unchecked_ref());
    } else {
        f();
    }
}

/// Snapshot of every `.sidebar-nav .nav-link`, in document order.
pub(crate) fn read_nav_links(document: &web_sys::Document) -> Vec<NavLink> {
    query_all(document, NAV_LINK_SELECTOR)
        .into_iter()
        .map(|el| NavLink {
            text: el.text_content().unwrap_or_default().trim().to_string(),
            href: el.get_attribute("href"),
            panel_id: parent_panel(document, &el),
        })
        .collect()
}

/// Enclosing `.collapse` id, when some trigger targets it.
fn parent_panel(document: &web_sys::Document, el: &web_sys::Element) -> Option<String> {
    let panel = el.closest(".collapse").ok().flatten()?;
    let id = panel.id();
    if id.is_empty() {
        return None;
    }
    document
        .query_selector(&format!("[data-bs-target=\"#{id}\"]"))
        .ok()
        .flatten()?;
    Some(id)
}

fn query_all(document: &web_sys::Document, selector: &str) -> Vec<web_sys::Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect()
}

fn read_files(input: &web_sys::HtmlInputElement) -> Vec<UploadFile> {
    let Some(list) = input.files() else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|file| UploadFile {
            name: file.name(),
            size: file.size().max(0.0) as u64,
        })
        .collect()
}

/// Applies effects to the live page and turns browser events into
/// [`UiEvent`]s.
pub(crate) struct DomHost {
    document: web_sys::Document,
    panels: Box<dyn CollapsePanels>,
    results: RwSignal<Vec<NavEntry>>,
}

impl DomHost {
    pub fn new(document: web_sys::Document, panels: Box<dyn CollapsePanels>) -> Self {
        Self {
            document,
            panels,
            results: RwSignal::new(Vec::new()),
        }
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }

    pub fn element(&self, id: &str) -> Option<web_sys::Element> {
        self.document.get_element_by_id(id)
    }

    /// Rows rendered into the search panel.
    pub fn results(&self) -> RwSignal<Vec<NavEntry>> {
        self.results
    }

    fn elements(&self, target: &Target) -> Vec<web_sys::Element> {
        match target {
            Target::Window | Target::Document => Vec::new(),
            Target::Id(id) => self.element(id).into_iter().collect(),
            Target::Selector(selector) => query_all(&self.document, selector),
            Target::Nth(selector, n) => query_all(&self.document, selector)
                .into_iter()
                .nth(*n)
                .into_iter()
                .collect(),
        }
    }

    pub fn apply(&self, effects: Vec<Effect>, event: Option<&web_sys::Event>) {
        for effect in effects {
            match effect {
                Effect::PreventDefault => {
                    if let Some(ev) = event {
                        ev.prevent_default();
                    }
                }
                Effect::AddClass(target, class) => {
                    for el in self.elements(&target) {
                        let _ = el.class_list().add_1(class);
                    }
                }
                Effect::RemoveClass(target, class) => {
                    for el in self.elements(&target) {
                        let _ = el.class_list().remove_1(class);
                    }
                }
                Effect::ToggleClass(target, class) => {
                    for el in self.elements(&target) {
                        let _ = el.class_list().toggle(class);
                    }
                }
                Effect::OpenPanel(panel) => self.panels.open(&panel),
                Effect::TogglePanel(panel) => self.panels.toggle(&panel),
                Effect::RenderResults(entries) => self.results.set(entries),
                Effect::Navigate(href) => {
                    let _ = window().location().set_href(&href);
                }
                Effect::Alert(message) => {
                    let _ = window().alert_with_message(&message);
                }
                Effect::ClearValue(target) => {
                    for el in self.elements(&target) {
                        if let Some(input) = el.dyn_ref::<web_sys::HtmlInputElement>() {
                            input.set_value("");
                        }
                    }
                }
                Effect::ShowBusy(target) => {
                    for el in self.elements(&target) {
                        let _ = el.set_attribute("disabled", "");
                        if let Ok(button) = el.dyn_into::<web_sys::HtmlElement>() {
                            button.set_inner_html("");
                            mount_to(button, || view! { <BusyLabel /> }).forget();
                        }
                    }
                }
            }
        }
    }

    /// Converts a raw browser event; `None` for events the controllers do
    /// not understand (e.g. an `input` from a non-input element).
    pub fn ui_event(&self, kind: EventKind, ev: &web_sys::Event) -> Option<UiEvent> {
        match kind {
            EventKind::Click => Some(UiEvent::Click(self.click_info(ev))),
            EventKind::Input => {
                let input = ev.target()?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
                Some(UiEvent::Input {
                    value: input.value(),
                })
            }
            EventKind::Change => {
                let input = ev.target()?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
                Some(UiEvent::Change {
                    files: read_files(&input),
                })
            }
            EventKind::Submit => {
                let form = ev.current_target()?.dyn_into::<web_sys::Element>().ok()?;
                let files = form
                    .query_selector("input[type=\"file\"]")
                    .ok()
                    .flatten()
                    .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
                    .map(|input| read_files(&input))
                    .unwrap_or_default();
                Some(UiEvent::Submit { files })
            }
            EventKind::Resize => {
                let width = window().inner_width().ok()?.as_f64()?;
                Some(UiEvent::Resize {
                    viewport_width: width.max(0.0) as u32,
                })
            }
        }
    }

    fn click_info(&self, ev: &web_sys::Event) -> ClickInfo {
        let target = ev.target();
        let node = target
            .as_ref()
            .and_then(|t| t.dyn_ref::<web_sys::Node>())
            .cloned();

        let inside = match &node {
            Some(node) => TRACKED_IDS
                .iter()
                .copied()
                .filter(|id| {
                    self.element(id)
                        .is_some_and(|el| el.contains(Some(node)))
                })
                .collect(),
            None => Vec::new(),
        };

        let row_href = target
            .as_ref()
            .and_then(|t| t.dyn_ref::<web_sys::Element>())
            .and_then(|el| el.closest(".search-item[data-href]").ok().flatten())
            .and_then(|row| row.get_attribute("data-href"));

        let toggle_target = ev
            .current_target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.get_attribute("data-bs-target"));

        ClickInfo {
            inside,
            row_href,
            toggle_target,
        }
    }
}

fn listen(target: &web_sys::EventTarget, kind: EventKind, f: impl Fn(web_sys::Event) + 'static) {
    let closure = Closure::<dyn Fn(web_sys::Event)>::new(f);
    if target
        .add_event_listener_with_callback(kind.into(), closure.as_ref().unchecked_ref())
        .is_ok()
    {
        // Listeners live as long as the page.
        closure.forget();
    }
}

/// Registers one DOM listener per (target, kind) in `table`. Targets that do
/// not resolve to any element are skipped. Returns how many listeners were
/// attached.
pub(crate) fn bind<S: 'static>(host: &Rc<DomHost>, state: S, table: HandlerTable<S>) -> usize {
    let state = Rc::new(RefCell::new(state));
    let table = Rc::new(table);
    let mut attached = 0;

    for (target, kind) in table.bindings() {
        let dispatch = {
            let host = Rc::clone(host);
            let state = Rc::clone(&state);
            let table = Rc::clone(&table);
            let target = target.clone();
            move |ev: web_sys::Event| {
                let Some(event) = host.ui_event(kind, &ev) else {
                    return;
                };
                let effects = table.dispatch(&mut state.borrow_mut(), &target, &event);
                host.apply(effects, Some(&ev));
            }
        };

        match &target {
            Target::Window => {
                let _ = window_event_listener_untyped(kind.into(), dispatch);
                attached += 1;
            }
            Target::Document => {
                listen(host.document(), kind, dispatch);
                attached += 1;
            }
            _ => {
                for el in host.elements(&target) {
                    listen(&el, kind, dispatch.clone());
                    attached += 1;
                }
            }
        }
    }

    attached
}
