//! The session facade: a navigator tied to a progress store under a session
//! key, hydrated on start and persisted after every mutation.

use tracing::warn;

use crate::flow::{FlowDocument, ResponseValue};
use crate::navigator::{CompletionSummary, Navigator, Signal, TransitionToken};
use crate::store::ProgressStore;

/// A running flow session with durable progress.
///
/// Every mutating operation writes the full navigator state to the store
/// before returning. Store failures on the save path are logged and
/// swallowed; persistence must never break the respondent-visible flow.
pub struct FlowSession<S: ProgressStore> {
    navigator: Navigator,
    store: S,
    session_key: String,
}

impl<S: ProgressStore> FlowSession<S> {
    /// Starts a session, resuming from stored progress when a snapshot
    /// exists and still fits the document.
    ///
    /// Never fails: an unreadable snapshot and one pointing outside the
    /// document both fall back to a fresh start.
    pub fn start(document: FlowDocument, mut store: S, session_key: impl Into<String>) -> Self {
        let session_key = session_key.into();
        let mut navigator = Navigator::new(document);
        match store.load(&session_key) {
            Ok(Some(state)) => {
                if let Err(error) = navigator.restore(state) {
                    warn!(
                        session_key = %session_key,
                        %error,
                        "stored progress no longer fits the document; starting fresh"
                    );
                    // The unusable snapshot would outrank every save of the
                    // fresh run under the monotonic-step rule; drop it.
                    if let Err(error) = store.clear(&session_key) {
                        warn!(
                            session_key = %session_key,
                            %error,
                            "could not clear stored progress"
                        );
                    }
                }
            }
            Ok(None) => {}
            Err(error) => {
                warn!(
                    session_key = %session_key,
                    %error,
                    "could not load stored progress; starting fresh"
                );
            }
        }
        Self {
            navigator,
            store,
            session_key,
        }
    }

    /// Read access to the underlying navigator.
    ///
    /// Mutations go through the session so every change is persisted; there
    /// is deliberately no `&mut Navigator` accessor.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn session_key(&self) -> &str {
        &self.session_key
    }

    /// See [`Navigator::signal`].
    pub fn signal(&self) -> Signal {
        self.navigator.signal()
    }

    /// See [`Navigator::is_complete`].
    pub fn is_complete(&self) -> bool {
        self.navigator.is_complete()
    }

    /// See [`Navigator::transition_token`].
    pub fn transition_token(&self) -> TransitionToken {
        self.navigator.transition_token()
    }

    /// See [`Navigator::summary`].
    pub fn summary(&self) -> CompletionSummary {
        self.navigator.summary()
    }

    /// Advances and persists the new position when one exists.
    pub fn advance(&mut self, outgoing_edge_id: Option<&str>, item_id: Option<&str>) -> bool {
        let moved = self.navigator.advance(outgoing_edge_id, item_id);
        if moved {
            self.persist();
        }
        moved
    }

    /// Token-guarded counterpart of [`FlowSession::advance`].
    pub fn advance_with_token(
        &mut self,
        token: TransitionToken,
        outgoing_edge_id: Option<&str>,
        item_id: Option<&str>,
    ) -> bool {
        let moved = self
            .navigator
            .advance_with_token(token, outgoing_edge_id, item_id);
        if moved {
            self.persist();
        }
        moved
    }

    /// Records an answer and persists.
    pub fn add_response(
        &mut self,
        block_id: &str,
        value: ResponseValue,
        variable_id: Option<&str>,
    ) {
        self.navigator.add_response(block_id, value, variable_id);
        self.persist();
    }

    /// Processes a `Set variable` block and persists.
    pub fn apply_set_variable(&mut self) -> bool {
        let moved = self.navigator.apply_set_variable();
        self.persist();
        moved
    }

    /// Returns the session to the start of the flow and drops the stored
    /// snapshot.
    pub fn reset(&mut self) {
        self.navigator.reset();
        if let Err(error) = self.store.clear(&self.session_key) {
            warn!(
                session_key = %self.session_key,
                %error,
                "could not clear stored progress"
            );
        }
    }

    fn persist(&mut self) {
        if let Err(error) = self.store.save(&self.session_key, self.navigator.state()) {
            warn!(
                session_key = %self.session_key,
                %error,
                "could not persist progress"
            );
        }
    }
}
