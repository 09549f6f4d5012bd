use crate::models::NavEntry;
use leptos::prelude::*;

/// Rows for the global search panel. Row clicks are handled by the
/// listener on the panel itself, which reads `data-href`.
#[component]
pub fn SearchResultRows(#[prop(into)] entries: Signal<Vec<NavEntry>>) -> impl IntoView {
    move || {
        entries
            .get()
            .into_iter()
            .map(|entry| {
                view! {
                    <div class="search-item" data-href=entry.target_path>
                        <i class="bi bi-arrow-right"></i>
                        " "
                        {entry.display_text}
                    </div>
                }
            })
            .collect_view()
    }
}
