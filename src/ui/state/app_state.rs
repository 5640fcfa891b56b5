use std::time::Duration;

use dioxus::prelude::*;

use crate::domain::entities::workspace::Workspace;
use crate::domain::view::ViewQuery;

pub const FEEDBACK_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

/// Toast shown after a remote operation. `seq` identifies the notification
/// so an older timer never clears a newer message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
    pub seq: u64,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            message: message.into(),
            seq: 0,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Error,
            message: message.into(),
            seq: 0,
        }
    }
}

pub fn next_seq(current: &Option<Feedback>) -> u64 {
    current.as_ref().map_or(1, |feedback| feedback.seq + 1)
}

pub fn is_current(current: &Option<Feedback>, seq: u64) -> bool {
    current.as_ref().is_some_and(|feedback| feedback.seq == seq)
}

/// Signals backing the dashboard. All fields are `Copy` handles, so the
/// bundle itself can be captured by every event handler.
#[derive(Clone, Copy, PartialEq)]
pub struct DashboardState {
    pub workspace: Signal<Workspace>,
    pub query: Signal<ViewQuery>,
    pub loading: Signal<bool>,
    pub feedback: Signal<Option<Feedback>>,
    pub status_menu_open: Signal<bool>,
}

impl DashboardState {
    pub fn new(page_size: usize) -> Self {
        Self {
            workspace: use_signal(Workspace::default),
            query: use_signal(move || ViewQuery::with_page_size(page_size)),
            loading: use_signal(|| true),
            feedback: use_signal(|| None::<Feedback>),
            status_menu_open: use_signal(|| false),
        }
    }

    pub fn notify(&self, feedback: Feedback) {
        let mut signal = self.feedback;
        let seq = next_seq(&signal.peek());
        signal.set(Some(Feedback { seq, ..feedback }));
        spawn(async move {
            tokio::time::sleep(FEEDBACK_TIMEOUT).await;
            if is_current(&signal.peek(), seq) {
                signal.set(None);
            }
        });
    }

    pub fn dismiss(&self) {
        let mut signal = self.feedback;
        signal.set(None);
    }

    /// Back to a freshly signed-in state: no rows, no edit, default filters.
    pub fn reset(&self, page_size: usize) {
        let DashboardState {
            mut workspace,
            mut query,
            mut loading,
            mut feedback,
            mut status_menu_open,
        } = *self;
        workspace.write().clear();
        query.set(ViewQuery::with_page_size(page_size));
        loading.set(false);
        feedback.set(None);
        status_menu_open.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_advances_from_current_feedback() {
        assert_eq!(next_seq(&None), 1);
        let current = Some(Feedback {
            seq: 4,
            ..Feedback::success("Status atualizado com sucesso!")
        });
        assert_eq!(next_seq(&current), 5);
    }

    #[test]
    fn only_the_matching_notification_is_current() {
        let current = Some(Feedback {
            seq: 2,
            ..Feedback::error("Erro ao atualizar status")
        });

        assert!(is_current(&current, 2));
        assert!(!is_current(&current, 1));
        assert!(!is_current(&None, 2));
    }
}
