use std::collections::VecDeque;

use futures::channel::oneshot;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfirmVariant {
    #[default]
    Default,
    Danger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmOptions {
    pub title: String,
    pub message: String,
    pub variant: ConfirmVariant,
    pub confirm_text: String,
    pub cancel_text: String,
}

impl Default for ConfirmOptions {
    fn default() -> Self {
        Self {
            title: "Are you sure?".to_string(),
            message: String::new(),
            variant: ConfirmVariant::Default,
            confirm_text: "Confirm".to_string(),
            cancel_text: "Cancel".to_string(),
        }
    }
}

impl ConfirmOptions {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    /// Destructive action: red confirm button labelled "Delete"
    pub fn danger(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            variant: ConfirmVariant::Danger,
            confirm_text: "Delete".to_string(),
            ..Self::new(title, message)
        }
    }

    pub fn confirm_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = text.into();
        self
    }

    pub fn cancel_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_text = text.into();
        self
    }
}

struct PendingConfirm {
    id: u64,
    options: ConfirmOptions,
    reply: oneshot::Sender<bool>,
}

/// Yes/no gate with a FIFO of pending questions.
///
/// Only the head of the queue is shown. Each receiver returned by
/// [`ConfirmEngine::request`] gets exactly one answer; dropping the engine
/// cancels the outstanding ones (callers read that as "no").
#[derive(Default)]
pub struct ConfirmEngine {
    queue: VecDeque<PendingConfirm>,
    next_id: u64,
}

impl ConfirmEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, options: ConfirmOptions) -> oneshot::Receiver<bool> {
        let (reply, answer) = oneshot::channel();
        if !self.queue.is_empty() {
            log::debug!(
                "Confirmation '{}' queued behind {} pending",
                options.title,
                self.queue.len()
            );
        }
        self.next_id += 1;
        self.queue.push_back(PendingConfirm {
            id: self.next_id,
            options,
            reply,
        });
        answer
    }

    /// Question currently on screen
    pub fn current(&self) -> Option<&ConfirmOptions> {
        self.queue.front().map(|p| &p.options)
    }

    /// Id of the question on screen; answers must carry it
    pub fn current_id(&self) -> Option<u64> {
        self.queue.front().map(|p| p.id)
    }

    pub fn is_showing(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Answer question `id` and advance to the next one.
    ///
    /// A no-op returning `false` unless `id` is the question on screen, so a
    /// repeated answer (double click, button plus Escape) never reaches the
    /// next queued question.
    pub fn resolve(&mut self, id: u64, accepted: bool) -> bool {
        if self.current_id() != Some(id) {
            log::debug!("Ignoring answer for confirmation #{}", id);
            return false;
        }
        match self.queue.pop_front() {
            Some(pending) => {
                // receiver may be gone if the caller stopped waiting
                let _ = pending.reply.send(accepted);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn confirm_resolves_true_and_returns_to_idle() {
        let mut engine = ConfirmEngine::new();
        let answer = engine.request(ConfirmOptions::new("X", "Y"));
        assert!(engine.is_showing());
        assert_eq!(engine.current().map(|o| o.title.as_str()), Some("X"));
        assert_eq!(engine.current().map(|o| o.message.as_str()), Some("Y"));

        let id = engine.current_id().unwrap();
        assert!(engine.resolve(id, true));
        assert_eq!(block_on(answer), Ok(true));
        assert!(!engine.is_showing());
    }

    #[test]
    fn cancel_resolves_false() {
        let mut engine = ConfirmEngine::new();
        let answer = engine.request(ConfirmOptions::new("X", "Y"));
        let id = engine.current_id().unwrap();
        assert!(engine.resolve(id, false));
        assert_eq!(block_on(answer), Ok(false));
        assert!(!engine.is_showing());
        assert!(!engine.resolve(id, false));
    }

    #[test]
    fn concurrent_requests_are_queued_not_orphaned() {
        let mut engine = ConfirmEngine::new();
        let first = engine.request(ConfirmOptions::danger("Delete admin", "a@x.io"));
        let second = engine.request(ConfirmOptions::new("Leave page", "Unsaved changes"));
        assert_eq!(engine.pending(), 2);
        assert_eq!(engine.current().map(|o| o.title.as_str()), Some("Delete admin"));

        engine.resolve(engine.current_id().unwrap(), false);
        assert_eq!(engine.current().map(|o| o.title.as_str()), Some("Leave page"));
        engine.resolve(engine.current_id().unwrap(), true);

        assert_eq!(block_on(first), Ok(false));
        assert_eq!(block_on(second), Ok(true));
        assert!(!engine.is_showing());
    }

    #[test]
    fn repeated_answer_does_not_reach_next_question() {
        let mut engine = ConfirmEngine::new();
        let first = engine.request(ConfirmOptions::danger("Delete buyer", "Anna"));
        let second = engine.request(ConfirmOptions::danger("Delete buyer", "Boris"));
        let shown = engine.current_id().unwrap();

        assert!(engine.resolve(shown, true));
        // second click on the same dialog
        assert!(!engine.resolve(shown, true));

        assert_eq!(engine.current().map(|o| o.message.as_str()), Some("Boris"));
        assert_eq!(block_on(first), Ok(true));

        let next = engine.current_id().unwrap();
        assert_ne!(next, shown);
        assert!(engine.resolve(next, false));
        assert_eq!(block_on(second), Ok(false));
    }

    #[test]
    fn dropping_engine_cancels_waiters() {
        let mut engine = ConfirmEngine::new();
        let answer = engine.request(ConfirmOptions::default());
        drop(engine);
        assert!(block_on(answer).is_err());
    }

    #[test]
    fn danger_defaults() {
        let options = ConfirmOptions::danger("Delete", "Gone for good").cancel_text("Keep");
        assert_eq!(options.variant, ConfirmVariant::Danger);
        assert_eq!(options.confirm_text, "Delete");
        assert_eq!(options.cancel_text, "Keep");
    }
}
