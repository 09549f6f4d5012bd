use crate::components::ui::SearchResultRows;
use crate::config::DashboardConfig;
use crate::dom::{bind, detect_panels, read_nav_links, DomHost};
use crate::models::{SEARCH_INPUT_ID, SEARCH_RESULTS_ID, SIDEBAR_ID, UPLOAD_FORM_ID};
use crate::nav::{highlight_effects, NavigationController};
use crate::search::SearchFilterController;
use crate::upload::UploadFormController;
use leptos::logging::log;
use leptos::mount::mount_to;
use leptos::prelude::*;
use std::rc::Rc;
use wasm_bindgen::JsCast;

/// Wires the three controllers into the current page. Each one only checks
/// for its own elements; a page without a sidebar still gets upload checks.
pub fn start() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let config = DashboardConfig::from_window();

    // Signals for the results panel live as long as the page.
    let owner = Owner::new();
    owner.with(|| {
        let host = Rc::new(DomHost::new(document, detect_panels()));
        start_navigation(&host, &config);
        start_search(&host, &config);
        start_upload(&host, &config);
    });
    std::mem::forget(owner);
}

fn start_navigation(host: &Rc<DomHost>, config: &DashboardConfig) {
    let path = window().location().pathname().unwrap_or_default();
    let links = read_nav_links(host.document());
    host.apply(highlight_effects(&path, &links), None);

    if host.element(SIDEBAR_ID).is_none() {
        return;
    }
    let attached = bind(
        host,
        NavigationController::new(config),
        NavigationController::handlers(),
    );
    log!("sioc: sidebar ready ({} links, {attached} listeners)", links.len());
}

fn start_search(host: &Rc<DomHost>, config: &DashboardConfig) {
    let (Some(_), Some(panel)) = (
        host.element(SEARCH_INPUT_ID),
        host.element(SEARCH_RESULTS_ID),
    ) else {
        return;
    };
    let Ok(panel) = panel.dyn_into::<web_sys::HtmlElement>() else {
        return;
    };

    let document = host.document().clone();
    let search = SearchFilterController::new(
        config,
        Box::new(move || read_nav_links(&document)),
    );
    let indexed = search.index().len();

    let results = host.results();
    panel.set_inner_html("");
    mount_to(panel, move || view! { <SearchResultRows entries=results /> }).forget();

    bind(host, search, SearchFilterController::handlers());
    log!("sioc: search ready ({indexed} entries, {:?} index)", config.index_mode);
}

fn start_upload(host: &Rc<DomHost>, config: &DashboardConfig) {
    if host.element(UPLOAD_FORM_ID).is_none() {
        return;
    }
    bind(
        host,
        UploadFormController::new(config),
        UploadFormController::handlers(),
    );
}
