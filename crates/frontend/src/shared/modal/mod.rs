use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Run `on_close` on the next tick.
///
/// Closing synchronously inside the DOM event that triggered it drops the
/// handler while Leptos is still dispatching to it.
pub fn close_deferred(on_close: Callback<()>) {
    spawn_local(async move {
        TimeoutFuture::new(0).await;
        on_close.run(());
    });
}

/// Overlay + dialog surface with a header; content renders its own `.modal-footer`.
///
/// Closes on Escape and on a click that both starts and ends on the overlay
/// (selecting text inside the dialog and releasing outside does not close it).
#[component]
pub fn Modal(
    /// Title of the modal
    #[prop(into)]
    title: String,
    /// Callback when modal should close
    on_close: Callback<()>,
    /// Close when clicking on the overlay (default: true)
    #[prop(optional)]
    close_on_overlay: Option<bool>,
    /// Extra class for the dialog surface (`div.modal`)
    #[prop(optional, into)]
    modal_class: Option<String>,
    /// Modal content
    children: Children,
) -> impl IntoView {
    let close_on_overlay = close_on_overlay.unwrap_or(true);
    let overlay_mouse_down = RwSignal::new(false);

    let escape = window_event_listener(ev::keydown, move |event| {
        // an inner widget that handled Escape marks it default-prevented
        if event.key() == "Escape" && !event.default_prevented() {
            close_deferred(on_close);
        }
    });
    on_cleanup(move || escape.remove());

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close =
            close_on_overlay && overlay_mouse_down.get_untracked() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            close_deferred(on_close);
        }
    };

    let surface_class = match modal_class {
        Some(cls) => format!("modal {cls}"),
        None => "modal".to_string(),
    };

    view! {
        <div
            class="modal-overlay"
            on:mousedown=handle_overlay_mouse_down
            on:click=handle_overlay_click
        >
            <div class=surface_class role="dialog" aria-modal="true">
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <button
                        class="button button--icon modal__close"
                        on:click=move |_| close_deferred(on_close)
                    >
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}
