use std::time::Duration;

use wrap_snake::game::{
    Coordinate, Direction, FrameQueue, Game, GameConfig, GameEvent, GameState,
};

fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Deliver frames the way a host does until one of them processes a tick
fn run_until_tick(game: &mut Game<FrameQueue>, now: &mut Duration) -> bool {
    for _ in 0..10 {
        if game.scheduler_mut().take_due().is_none() {
            return false;
        }
        *now += Duration::from_millis(16);
        if game.on_frame(*now).unwrap().is_some() {
            return true;
        }
    }
    false
}

#[test]
fn test_round_on_300_by_300_map() {
    let config = GameConfig::new(300, 300).with_seed(2024);
    let mut game = Game::new(&config, FrameQueue::new()).unwrap();
    let mut rx = game.subscribe();

    game.start().unwrap();
    assert_eq!(
        game.segments(),
        &[Coordinate::new(4, 5), Coordinate::new(5, 5)]
    );
    assert_eq!(
        drain(&mut rx),
        vec![GameEvent::StateChanged(GameState::Started)]
    );

    let mut now = Duration::ZERO;
    for step in 0..30 {
        let before = game.segments().to_vec();
        let direction = if step % 10 < 5 {
            Direction::Left
        } else {
            Direction::Up
        };
        game.change_direction(direction);

        assert!(run_until_tick(&mut game, &mut now), "tick {step} never ran");
        let events = drain(&mut rx);

        let expected_head = before[0].stepped(game.direction(), 10, 10);
        assert_eq!(game.segments()[0], expected_head);
        assert_eq!(&game.segments()[1..before.len()], &before[..before.len() - 1]);

        if events.contains(&GameEvent::FoodEaten) {
            assert_eq!(game.segments().len(), before.len() + 1);
            assert_eq!(game.segments().last(), before.last());
        } else {
            assert_eq!(game.segments().len(), before.len());
        }

        if game.state() == GameState::Stopped {
            assert!(events.contains(&GameEvent::StateChanged(GameState::Stopped)));
            assert!(!game.scheduler().is_pending());
            return;
        }

        let food = game.food().unwrap();
        assert!(!game.segments().contains(&food));
        assert!(game.segments().iter().all(|c| (0..10).contains(&c.x) && (0..10).contains(&c.y)));
    }
}

#[test]
fn test_stop_twice_emits_once_and_cancels_frame() {
    let mut game = Game::new(&GameConfig::new(300, 300), FrameQueue::new()).unwrap();
    let mut rx = game.subscribe();

    game.start().unwrap();
    assert!(game.scheduler().is_pending());

    game.stop();
    game.stop();

    assert!(game.scheduler_mut().take_due().is_none());
    assert_eq!(
        drain(&mut rx),
        vec![
            GameEvent::StateChanged(GameState::Started),
            GameEvent::StateChanged(GameState::Stopped)
        ]
    );
}

#[test]
fn test_same_seed_same_food() {
    let config = GameConfig::new(600, 450).with_seed(99);

    let mut first = Game::new(&config, FrameQueue::new()).unwrap();
    let mut second = Game::new(&config, FrameQueue::new()).unwrap();
    first.start().unwrap();
    second.start().unwrap();

    assert_eq!(first.food(), second.food());
    assert_eq!(first.geometry().max_x, 20);
    assert_eq!(first.geometry().max_y, 15);
}
