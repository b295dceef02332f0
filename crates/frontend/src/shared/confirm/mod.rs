//! Promise-style confirmation dialog.
//!
//! `use_confirm().confirm(options).await` resolves to `true` only when the
//! user presses the confirm button. Cancel, Escape, the close button and an
//! overlay click all answer `false`. Overlapping requests queue up and are
//! shown one after another.

pub mod engine;

pub use engine::{ConfirmEngine, ConfirmOptions, ConfirmVariant};

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::modal::Modal;

#[derive(Clone, Copy)]
pub struct ConfirmService {
    engine: RwSignal<ConfirmEngine>,
}

impl ConfirmService {
    pub fn new() -> Self {
        Self {
            engine: RwSignal::new(ConfirmEngine::new()),
        }
    }

    /// Ask the user; `false` also when the host was torn down meanwhile.
    pub async fn confirm(&self, options: ConfirmOptions) -> bool {
        let Some(answer) = self.engine.try_update(|e| e.request(options)) else {
            return false;
        };
        answer.await.unwrap_or(false)
    }

    /// Visible question together with the id its answer must carry.
    pub fn current(&self) -> Option<(u64, ConfirmOptions)> {
        self.engine
            .with(|e| e.current_id().zip(e.current().cloned()))
    }

    /// Answer dialog `id` on the next tick so the button handler finishes
    /// before the modal unmounts. Late or repeated answers are dropped.
    pub fn resolve(&self, id: u64, accepted: bool) {
        let engine = self.engine;
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            engine.try_update(|e| e.resolve(id, accepted));
        });
    }
}

impl Default for ConfirmService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_confirm() -> ConfirmService {
    use_context::<ConfirmService>()
        .expect("ConfirmService not provided in context (provide it in app root)")
}

/// Renders the dialog at the head of the confirm queue. Mount once at the root.
#[component]
pub fn ConfirmHost() -> impl IntoView {
    let svc = use_confirm();

    view! {
        {move || svc.current().map(|(id, options)| {
            let danger = options.variant == ConfirmVariant::Danger;
            let confirm_class = if danger { "confirm-dialog__confirm confirm-dialog__confirm--danger" } else { "confirm-dialog__confirm" };
            view! {
                <Modal
                    title=options.title.clone()
                    on_close=Callback::new(move |_| svc.resolve(id, false))
                    modal_class="confirm-dialog"
                >
                    <p class="confirm-dialog__message">{options.message.clone()}</p>
                    <div class="modal-footer">
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| svc.resolve(id, false)
                        >
                            {options.cancel_text.clone()}
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            class=confirm_class
                            on_click=move |_| svc.resolve(id, true)
                        >
                            {options.confirm_text.clone()}
                        </Button>
                    </div>
                </Modal>
            }
        })}
    }
}
