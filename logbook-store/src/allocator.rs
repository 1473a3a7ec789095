use logbook_shared::RecordId;

/// Per-table id sequence. Starts at 1 and only ever moves forward, so an
/// id is never handed out twice even after its record is deleted.
#[derive(Debug)]
pub struct IdAllocator {
    next: RecordId,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn allocate(&mut self) -> RecordId {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
