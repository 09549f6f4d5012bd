use leptos::prelude::*;

#[component]
pub fn Spinner() -> impl IntoView {
    view! { <span class="spinner-border spinner-border-sm" role="status" aria-hidden="true"></span> }
}

/// Submit button label while the native form POST is in flight.
#[component]
pub fn BusyLabel() -> impl IntoView {
    view! {
        <Spinner />
        " Procesando..."
    }
}
