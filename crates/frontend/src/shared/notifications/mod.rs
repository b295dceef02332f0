//! Transient status messages (toast).
//!
//! One slot, last call wins: a new message replaces the visible one and each
//! message expires after the configured TTL. Expiry is keyed by id so the
//! timer of a replaced message cannot clear its successor.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::icons::icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

impl NotificationKind {
    fn css_modifier(&self) -> &'static str {
        match self {
            NotificationKind::Success => "toast--success",
            NotificationKind::Error => "toast--error",
            NotificationKind::Info => "toast--info",
            NotificationKind::Warning => "toast--warning",
        }
    }

    fn icon_name(&self) -> &'static str {
        match self {
            NotificationKind::Success => "check",
            NotificationKind::Error => "alert-circle",
            NotificationKind::Info | NotificationKind::Warning => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationSlot {
    current: Option<Notification>,
    next_id: u64,
}

impl NotificationSlot {
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Replace whatever is shown; returns the id to expire later
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.current = Some(Notification {
            id,
            message: message.into(),
            kind,
        });
        id
    }

    /// Clears the slot only if `id` is still the visible notification
    pub fn expire(&mut self, id: u64) -> bool {
        if self.current.as_ref().map(|n| n.id) == Some(id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

/// Notification emitter shared through context
#[derive(Clone, Copy)]
pub struct NotificationService {
    slot: RwSignal<NotificationSlot>,
    ttl_ms: u32,
}

impl NotificationService {
    pub fn new(ttl_ms: u32) -> Self {
        Self {
            slot: RwSignal::new(NotificationSlot::default()),
            ttl_ms,
        }
    }

    pub fn show(&self, message: impl Into<String>, kind: NotificationKind) {
        let Some(id) = self.slot.try_update(|s| s.show(message, kind)) else {
            return;
        };
        let slot = self.slot;
        let ttl_ms = self.ttl_ms;
        spawn_local(async move {
            TimeoutFuture::new(ttl_ms).await;
            slot.try_update(|s| s.expire(id));
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, NotificationKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, NotificationKind::Error);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(message, NotificationKind::Info);
    }

    pub fn dismiss(&self) {
        self.slot.update(|s| s.dismiss());
    }

    pub fn current(&self) -> Option<Notification> {
        self.slot.with(|s| s.current().cloned())
    }
}

pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>()
        .expect("NotificationService not provided in context (provide it in app root)")
}

/// Renders the active notification. Mount once at the application root.
#[component]
pub fn NotificationHost() -> impl IntoView {
    let svc = use_notifications();

    view! {
        {move || svc.current().map(|n| {
            let class = format!("toast {}", n.kind.css_modifier());
            view! {
                <div class=class role="status">
                    <span class="toast__icon">{icon(n.kind.icon_name())}</span>
                    <span class="toast__message">{n.message}</span>
                    <button class="toast__close" on:click=move |_| svc.dismiss()>
                        {icon("x")}
                    </button>
                </div>
            }
        })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_call_wins() {
        let mut slot = NotificationSlot::default();
        let first = slot.show("Saved", NotificationKind::Success);
        let second = slot.show("Failed", NotificationKind::Error);
        assert_ne!(first, second);
        let shown = slot.current().unwrap();
        assert_eq!(shown.message, "Failed");
        assert_eq!(shown.kind, NotificationKind::Error);
    }

    #[test]
    fn stale_timer_does_not_clear_newer_message() {
        let mut slot = NotificationSlot::default();
        let first = slot.show("one", NotificationKind::Info);
        let second = slot.show("two", NotificationKind::Info);

        assert!(!slot.expire(first));
        assert_eq!(slot.current().map(|n| n.message.as_str()), Some("two"));

        assert!(slot.expire(second));
        assert!(slot.current().is_none());
        assert!(!slot.expire(second));
    }
}
