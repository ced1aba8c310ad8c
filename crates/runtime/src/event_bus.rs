use crate::frame::Frame;

/// An event stamped with the frame it was emitted in.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<E> {
    pub frame_index: u64,
    pub payload: E,
}

/// Ordered, single-consumer event log.
///
/// Producers push during a frame; the host drains once per frame and
/// reacts (surfacing alerts, refreshing UI). Emission order is preserved.
#[derive(Debug)]
pub struct EventBus<E> {
    frame_index: u64,
    events: Vec<Event<E>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            frame_index: 0,
            events: Vec::new(),
        }
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps subsequent events with `frame`.
    pub fn begin_frame(&mut self, frame: Frame) {
        self.frame_index = frame.index;
    }

    pub fn emit(&mut self, payload: E) {
        self.events.push(Event {
            frame_index: self.frame_index,
            payload,
        });
    }

    pub fn events(&self) -> &[Event<E>] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Event<E>> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use crate::frame::Frame;

    #[test]
    fn stamps_events_with_current_frame() {
        let mut bus = EventBus::new();
        bus.emit("before");
        bus.begin_frame(Frame::new(2, 0.1));
        bus.emit("after");
        let frames: Vec<_> = bus.events().iter().map(|e| e.frame_index).collect();
        assert_eq!(frames, vec![0, 2]);
    }

    #[test]
    fn drain_clears_and_preserves_order() {
        let mut bus = EventBus::new();
        bus.emit(1);
        bus.emit(2);
        let drained: Vec<_> = bus.drain().into_iter().map(|e| e.payload).collect();
        assert_eq!(drained, vec![1, 2]);
        assert!(bus.is_empty());
    }
}
