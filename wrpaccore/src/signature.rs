//! Permission signatures
//!
//! A signature is the canonical key under which permission records are
//! stored.  The textual forms are
//!
//! - `Namespace:action` for actions on entities without workflows,
//! - `Namespace(workflow:state):action` for actions on entities whose
//!   workflow is at the given state,
//! - `Namespace(workflow:state):action(target)` for transitions.
//!
//! These must be reproduced exactly as externally administered rule
//! tables are keyed by them.

use crate::workflow::State;

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Signature {
    Action {
        namespace: String,
        action: String,
    },
    State {
        namespace: String,
        workflow: String,
        state: State,
        action: String,
    },
    Transition {
        namespace: String,
        workflow: String,
        state: State,
        action: String,
        target: State,
    },
}

mod impls;
