use crate::models::SHOW_CLASS;
use leptos::logging::warn;
use wasm_bindgen::{JsCast, JsValue};

/// Open/close control over collapsible panels, addressed by selector
/// (`#panelId`).
pub(crate) trait CollapsePanels {
    fn open(&self, panel: &str);
    fn close(&self, panel: &str);
    fn toggle(&self, panel: &str);
}

fn find_panel(panel: &str) -> Option<web_sys::Element> {
    let document = web_sys::window()?.document()?;
    document.query_selector(panel).ok().flatten()
}

/// Drives `bootstrap.Collapse` instances, so the widget's own animation and
/// aria bookkeeping stay in charge.
pub(crate) struct BootstrapCollapse {
    collapse: JsValue,
}

impl BootstrapCollapse {
    /// `None` when the page did not load Bootstrap's bundle.
    pub fn detect() -> Option<Self> {
        let bootstrap = web_sys::window()?.get("bootstrap")?;
        let collapse = js_sys::Reflect::get(&bootstrap, &"Collapse".into()).ok()?;
        if !collapse.is_function() {
            return None;
        }
        Some(Self { collapse })
    }

    fn call(&self, panel: &str, method: &str) -> Result<(), JsValue> {
        let Some(el) = find_panel(panel) else {
            return Ok(());
        };

        let get_instance: js_sys::Function =
            js_sys::Reflect::get(&self.collapse, &"getOrCreateInstance".into())?.dyn_into()?;

        // Creating an instance must not toggle by itself.
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"toggle".into(), &JsValue::FALSE)?;

        let instance = get_instance.call2(&self.collapse, &el, &options)?;
        let action: js_sys::Function =
            js_sys::Reflect::get(&instance, &method.into())?.dyn_into()?;
        action.call0(&instance)?;
        Ok(())
    }

    fn run(&self, panel: &str, method: &str) {
        if let Err(e) = self.call(panel, method) {
            warn!("sioc: collapse {method} on {panel} failed: {e:?}");
        }
    }
}

impl CollapsePanels for BootstrapCollapse {
    fn open(&self, panel: &str) {
        self.run(panel, "show");
    }

    fn close(&self, panel: &str) {
        self.run(panel, "hide");
    }

    fn toggle(&self, panel: &str) {
        self.run(panel, "toggle");
    }
}

/// Fallback without Bootstrap: flips the `show` class, no animation.
pub(crate) struct ClassCollapse;

impl CollapsePanels for ClassCollapse {
    fn open(&self, panel: &str) {
        if let Some(el) = find_panel(panel) {
            let _ = el.class_list().add_1(SHOW_CLASS);
        }
    }

    fn close(&self, panel: &str) {
        if let Some(el) = find_panel(panel) {
            let _ = el.class_list().remove_1(SHOW_CLASS);
        }
    }

    fn toggle(&self, panel: &str) {
        if let Some(el) = find_panel(panel) {
            let _ = el.class_list().toggle(SHOW_CLASS);
        }
    }
}

/// Bootstrap when available, class flipping otherwise.
pub(crate) fn detect_panels() -> Box<dyn CollapsePanels> {
    match BootstrapCollapse::detect() {
        Some(bootstrap) => Box::new(bootstrap),
        None => {
            warn!("sioc: bootstrap.Collapse not found; submenus fall back to class toggling");
            Box::new(ClassCollapse)
        }
    }
}
