//! Drag gesture input
//!
//! The gesture layer pushes events into a [`GestureQueue`]; the simulation
//! drains it at the start of each tick. A gesture never runs in the middle of
//! a tick, it only changes state the next tick observes.

use glam::Vec2;

use crate::sim::push::PushState;

/// Drag gesture events, in playfield coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragGesture {
    Began { x: f32, y: f32 },
    Moved { x: f32, y: f32 },
    Ended { x: f32, y: f32 },
}

impl DragGesture {
    pub fn point(&self) -> Vec2 {
        match *self {
            DragGesture::Began { x, y } | DragGesture::Moved { x, y } | DragGesture::Ended { x, y } => {
                Vec2::new(x, y)
            }
        }
    }

    /// Apply this gesture to the push state
    pub fn apply(&self, push: &mut PushState) {
        match self {
            DragGesture::Began { .. } => push.begin(self.point()),
            DragGesture::Moved { .. } => push.move_to(self.point()),
            DragGesture::Ended { .. } => {
                push.move_to(self.point());
                push.end();
            }
        }
    }
}

/// Pending gesture events
#[derive(Debug, Default)]
pub struct GestureQueue {
    events: Vec<DragGesture>,
}

impl GestureQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: DragGesture) {
        self.events.push(event);
    }

    /// Drain all pending events, oldest first
    pub fn drain(&mut self) -> Vec<DragGesture> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_sequence_drives_push() {
        let mut push = PushState::default();

        DragGesture::Began { x: 10.0, y: 20.0 }.apply(&mut push);
        assert!(push.active);
        assert_eq!(push.drag_point, Vec2::new(10.0, 20.0));

        DragGesture::Moved { x: 30.0, y: 40.0 }.apply(&mut push);
        assert!(push.active);
        assert_eq!(push.drag_point, Vec2::new(30.0, 40.0));

        DragGesture::Ended { x: 35.0, y: 45.0 }.apply(&mut push);
        assert!(!push.active);
        assert_eq!(push.drag_point, Vec2::new(35.0, 45.0));
    }

    #[test]
    fn test_move_without_begin_stays_inactive() {
        let mut push = PushState::default();
        DragGesture::Moved { x: 1.0, y: 2.0 }.apply(&mut push);
        assert!(!push.active);
    }

    #[test]
    fn test_queue_drain() {
        let mut q = GestureQueue::new();
        q.push(DragGesture::Began { x: 0.0, y: 0.0 });
        q.push(DragGesture::Ended { x: 1.0, y: 1.0 });
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], DragGesture::Began { .. }));
        assert!(q.drain().is_empty());
    }
}
