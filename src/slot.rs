//! Caller visible error message slot

use std::sync::{Arc, Mutex, MutexGuard};
use log::{debug, trace};

#[derive(Debug, Default)]
struct SlotState
{   message: Option<String>
  , latest_ticket: u64
}

/// Ticket handed to one call; writes from stale tickets are dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Shared `apiError` slot. Set on terminal failure, cleared on
/// success. Cloning shares the same slot.
#[derive(Debug, Clone, Default)]
pub struct ErrorSlot
{   inner: Arc<Mutex<SlotState>>
}

impl ErrorSlot
{   pub fn new() -> Self
    {   ErrorSlot::default()
    }

    fn state(&self) -> MutexGuard<'_, SlotState>
    {   self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Start a new call, superseding every earlier ticket
    pub fn begin(&self) -> Ticket
    {   let mut state = self.state();
        state.latest_ticket += 1;
        trace!("Issued slot ticket {}", state.latest_ticket);
        Ticket(state.latest_ticket)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool
    {   self.state().latest_ticket == ticket.0
    }

    /// Record a message for `ticket`. Returns false if superseded.
    pub fn set(&self, ticket: Ticket, message: impl Into<String>)
      -> bool
    {   let mut state = self.state();
        if state.latest_ticket != ticket.0
        {   debug!("Dropping error from superseded call {}", ticket.0);
            return false;
        }
        state.message = Some(message.into());
        true
    }

    /// Clear the message for `ticket`. Returns false if superseded.
    pub fn clear(&self, ticket: Ticket) -> bool
    {   let mut state = self.state();
        if state.latest_ticket != ticket.0
        {   return false;
        }
        state.message = None;
        true
    }

    /// Overwrite the message outside of any call
    pub fn replace(&self, message: Option<String>)
    {   self.state().message = message;
    }

    pub fn get(&self) -> Option<String>
    {   self.state().message.clone()
    }
}
