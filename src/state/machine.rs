//! Registration state machine.
//!
//! ```text
//! ┌──────────────┐  NICK or USER  ┌──────────────┐  the other one  ┌────────────┐
//! │ Unregistered ├───────────────►│ Registering  ├────────────────►│ Registered │
//! └──────────────┘                └──────────────┘                 └────────────┘
//!        │                               │                               │
//!        └───────────── QUIT / error / hangup ───────────────────────────┴──► Closed
//! ```
//!
//! Registration needs both halves of the handshake in either order. The
//! half that arrives second completes it, and [`Transition::Completed`] is
//! returned exactly once per connection.

/// One half of the registration handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    Nick,
    User,
}

/// Where a connection is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Registration {
    #[default]
    Unregistered,
    /// One half seen, waiting for the other.
    Registering(Half),
    Registered,
    Closed,
}

/// Outcome of feeding a handshake half to [`Registration::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Recorded; the other half is still missing.
    Pending,
    /// This half finished the handshake. Finalize registration now.
    Completed,
    /// Already seen, already registered, or closed. Nothing to do.
    Unchanged,
}

impl Registration {
    /// Record that `half` was received.
    pub fn advance(&mut self, half: Half) -> Transition {
        match *self {
            Registration::Unregistered => {
                *self = Registration::Registering(half);
                Transition::Pending
            }
            Registration::Registering(seen) if seen == half => Transition::Unchanged,
            Registration::Registering(_) => {
                *self = Registration::Registered;
                Transition::Completed
            }
            Registration::Registered | Registration::Closed => Transition::Unchanged,
        }
    }

    /// Whether any part of the handshake has been received.
    pub fn has_started(&self) -> bool {
        !matches!(self, Registration::Unregistered)
    }

    #[inline]
    pub fn is_registered(&self) -> bool {
        matches!(self, Registration::Registered)
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        matches!(self, Registration::Closed)
    }

    /// Move to `Closed`. Returns `false` if already closed.
    pub fn close(&mut self) -> bool {
        !std::mem::replace(self, Registration::Closed).is_closed()
    }
}
