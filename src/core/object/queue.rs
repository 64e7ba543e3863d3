//=========================================================================
// Object Queue
//=========================================================================
//
// Deferred object load/unload requests. Logic never loads or unloads
// objects mid-tick; it queues a request that the scene applies during
// post-processing.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::ObjectId;

//=== ObjectRequest =======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectRequest {
    Load(ObjectId),
    Unload(ObjectId),
}

//=== ObjectQueue =========================================================

/// FIFO of pending object requests. Consecutive duplicates collapse.
#[derive(Debug, Default)]
pub struct ObjectQueue {
    pending: Vec<ObjectRequest>,
}

impl ObjectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, request: ObjectRequest) {
        if self.pending.last() != Some(&request) {
            self.pending.push(request);
        }
    }

    /// Takes all pending requests in submission order.
    pub fn drain(&mut self) -> Vec<ObjectRequest> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
