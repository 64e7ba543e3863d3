//=========================================================================
// Event Collector
//=========================================================================
//
// Consumer side of the input queue.
//
// Architecture:
//   Receiver<PlatformEvent> → collect() → pending batches → dispatch()
//
// `collect()` runs once per frame and never blocks. `dispatch()` runs
// once per tick; the first tick of a frame receives the batches, later
// ticks of the same frame receive none, so pressed/released edges are
// reported exactly once.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::{InputEvent, StateTracker};

//=== TickControl =========================================================

/// Whether the producer side is still alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    input_batches: Vec<Vec<InputEvent>>,
}

impl EventCollector {
    /// Bounds the work of one frame when a producer floods the queue.
    const MAX_EVENTS_PER_FRAME: usize = 256;

    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            input_batches: Vec::with_capacity(4),
        }
    }

    /// Drains pending platform events into the batch list.
    pub(crate) fn collect(&mut self) -> TickControl {
        let mut drained = 0;

        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    drained += 1;
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!(target: "platform::input", "Event queue backlog: drained {} events this frame", drained);
        }
        TickControl::Continue
    }

    /// Hands the collected batches to the tracker and clears them.
    pub(crate) fn dispatch(&mut self, input: &mut StateTracker) {
        trace!(target: "platform::input", "Dispatching {} input batches", self.input_batches.len());
        input.dispatch(&self.input_batches);
        self.input_batches.clear();
    }

    #[cfg(test)]
    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.input_batches
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Inputs { discrete, continuous } => {
                if !discrete.is_empty() {
                    self.input_batches.push(discrete);
                }
                if !continuous.is_empty() {
                    self.input_batches.push(continuous);
                }
                TickControl::Continue
            }
            PlatformEvent::CloseRequested => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
