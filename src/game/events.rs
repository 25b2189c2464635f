use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use super::state::GameState;

/// Notification emitted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    StateChanged(GameState),
    FoodEaten,
}

/// Fan-out of engine events to any number of subscribers.
///
/// Each subscriber gets its own unbounded channel, so sending never blocks the tick and
/// every subscriber sees events in emission order. Dropped receivers are pruned on send.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<UnboundedSender<GameEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> UnboundedReceiver<GameEvent> {
        let (tx, rx) = unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_arrive_in_order() {
        let mut bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.emit(GameEvent::StateChanged(GameState::Started));
        bus.emit(GameEvent::FoodEaten);

        assert_eq!(
            rx.try_recv().unwrap(),
            GameEvent::StateChanged(GameState::Started)
        );
        assert_eq!(rx.try_recv().unwrap(), GameEvent::FoodEaten);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_every_subscriber_gets_a_copy() {
        let mut bus = EventBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.emit(GameEvent::FoodEaten);

        assert_eq!(first.try_recv().unwrap(), GameEvent::FoodEaten);
        assert_eq!(second.try_recv().unwrap(), GameEvent::FoodEaten);
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let mut bus = EventBus::new();
        let rx = bus.subscribe();
        let _kept = bus.subscribe();
        drop(rx);

        bus.emit(GameEvent::FoodEaten);
        assert_eq!(bus.subscriber_count(), 1);
    }
}
