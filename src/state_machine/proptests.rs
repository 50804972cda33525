//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::*;
use super::transition::*;
use super::*;
use crate::agent_api::{AgentInfo, Discovery, Reply, SessionIdentity};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn identity() -> SessionIdentity {
    SessionIdentity::new("u-1", "User")
}

fn connected_state() -> AppState {
    let mut state = AppState::new(identity());
    state.pending = None;
    state.connection = Connection::Connected {
        agent_id: "a1".to_string(),
        agent_name: "Aria".to_string(),
    };
    state.transcript.push(Utterance::connected_to("Aria"));
    state
}

/// Input events that edit the compose buffer
#[derive(Debug, Clone)]
enum Edit {
    Text(String),
    Space,
    Backspace,
}

impl Edit {
    fn event(&self) -> Event {
        match self {
            Edit::Text(text) => Event::Text(text.clone()),
            Edit::Space => Event::Space,
            Edit::Backspace => Event::Backspace,
        }
    }

    /// Reference model of the buffer
    fn apply(&self, buffer: &mut String) {
        match self {
            Edit::Text(text) => buffer.push_str(text),
            Edit::Space => buffer.push(' '),
            Edit::Backspace => {
                buffer.pop();
            }
        }
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_agent() -> impl Strategy<Value = AgentInfo> {
    ("[a-z0-9]{1,8}", "[A-Z][a-z]{1,8}").prop_map(|(id, name)| AgentInfo::new(id, name, "active"))
}

fn arb_candidates() -> impl Strategy<Value = Vec<AgentInfo>> {
    proptest::collection::vec(arb_agent(), 2..6)
}

fn arb_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        "[a-zA-Z0-9éß日]{1,3}".prop_map(Edit::Text),
        Just(Edit::Space),
        Just(Edit::Backspace),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::MoveUp),
        Just(Event::MoveDown),
        Just(Event::Submit),
        Just(Event::Backspace),
        Just(Event::Space),
        "[a-z]{1,3}".prop_map(Event::Text),
        arb_agent().prop_map(|agent| Event::AgentsDiscovered {
            discovery: Discovery::Single(agent)
        }),
        arb_candidates().prop_map(|agents| Event::AgentsDiscovered {
            discovery: Discovery::Multiple(agents)
        }),
        "[a-z ]{1,20}".prop_map(|message| Event::DiscoveryFailed { message }),
        "[a-z ]{1,20}".prop_map(|text| Event::ReplyReceived {
            reply: Reply {
                text,
                ..Reply::default()
            }
        }),
        "[a-z ]{1,20}".prop_map(|message| Event::SendFailed { message }),
    ]
}

// ============================================================================
// State Validity Checkers
// ============================================================================

fn is_valid_state(state: &AppState) -> bool {
    match &state.connection {
        Connection::Selecting { candidates, cursor } => {
            !candidates.is_empty() && *cursor < candidates.len() && !state.is_pending()
        }
        Connection::Discovering => matches!(state.pending, Some(Pending::Discovery)),
        Connection::Connected { .. } => !matches!(state.pending, Some(Pending::Discovery)),
        Connection::Failed { .. } => !state.is_pending(),
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Invariant 1: Valid state after any sequence of events
    #[test]
    fn prop_transitions_preserve_validity(events in proptest::collection::vec(arb_event(), 0..30)) {
        let mut state = AppState::new(identity());

        for event in events {
            if let Ok(result) = transition(&state, event) {
                state = result.new_state;
                prop_assert!(is_valid_state(&state), "Invalid state: {:?}", state);
            }
        }
    }

    // Invariant 2: Transcript never shrinks and existing entries never change
    #[test]
    fn prop_transcript_is_append_only(events in proptest::collection::vec(arb_event(), 0..30)) {
        let mut state = AppState::new(identity());

        for event in events {
            if let Ok(result) = transition(&state, event) {
                let before = state.transcript.entries();
                let after = result.new_state.transcript.entries();
                prop_assert!(after.len() >= before.len());
                prop_assert_eq!(&after[..before.len()], before);
                state = result.new_state;
            }
        }
    }

    // Invariant 3: Only one network operation outstanding at a time
    #[test]
    fn prop_single_outstanding_operation(events in proptest::collection::vec(arb_event(), 0..30)) {
        let mut state = AppState::new(identity());

        for event in events {
            if let Ok(result) = transition(&state, event) {
                if result.effect.as_ref().is_some_and(Effect::is_async) {
                    prop_assert!(!state.is_pending(), "Scheduled work while pending: {:?}", state);
                    prop_assert!(result.new_state.is_pending());
                }
                state = result.new_state;
            }
        }
    }

    // Invariant 4: Compose buffer follows append / pop semantics
    #[test]
    fn prop_compose_buffer_matches_model(edits in proptest::collection::vec(arb_edit(), 0..40)) {
        let mut state = connected_state();
        let mut expected = String::new();

        for edit in edits {
            let result = transition(&state, edit.event());
            prop_assert!(result.is_ok(), "Edit rejected: {:?}", result);
            state = result.unwrap().new_state;
            edit.apply(&mut expected);
        }

        prop_assert_eq!(state.compose, expected);
    }

    // Invariant 5: Submit and edits are ignored while a send is pending
    #[test]
    fn prop_pending_rejects_input(text in "[a-z]{1,10}", edit in arb_edit()) {
        let mut state = connected_state();
        state.compose = text;
        let state = transition(&state, Event::Submit).unwrap().new_state;

        prop_assert_eq!(transition(&state, Event::Submit).unwrap_err(), TransitionError::Busy);
        prop_assert_eq!(transition(&state, edit.event()).unwrap_err(), TransitionError::Busy);
    }

    // Invariant 6: Cursor stays in bounds under any navigation
    #[test]
    fn prop_cursor_clamped(
        candidates in arb_candidates(),
        moves in proptest::collection::vec(any::<bool>(), 0..20)
    ) {
        let len = candidates.len();
        let mut state = AppState::new(identity());
        state = transition(&state, Event::AgentsDiscovered {
            discovery: Discovery::Multiple(candidates),
        }).unwrap().new_state;
        let mut expected = 0usize;

        for up in moves {
            let event = if up { Event::MoveUp } else { Event::MoveDown };
            state = transition(&state, event).unwrap().new_state;
            expected = if up { expected.saturating_sub(1) } else { (expected + 1).min(len - 1) };
        }

        let Connection::Selecting { cursor, .. } = state.connection else {
            panic!("left selection");
        };
        prop_assert_eq!(cursor, expected);
    }

    // Invariant 7: Quit is accepted from any reachable state
    #[test]
    fn prop_quit_always_accepted(events in proptest::collection::vec(arb_event(), 0..20)) {
        let mut state = AppState::new(identity());
        for event in events {
            if let Ok(result) = transition(&state, event) {
                state = result.new_state;
            }
        }

        let result = transition(&state, Event::Quit);
        prop_assert!(result.is_ok());
        prop_assert_eq!(result.unwrap().effect, Some(Effect::Quit));
    }
}
