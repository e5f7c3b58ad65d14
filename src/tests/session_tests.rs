#[cfg(test)]
mod tests {
    use crate::components::{GameEvent, InputState};
    use crate::config::GameConfig;
    use crate::session::Game;

    fn quiet_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_new_session_is_inert() {
        quiet_logger();
        let game = Game::new(GameConfig::default()).unwrap();

        assert_eq!(game.score(), 0);
        assert!(!game.has_lost());
        assert_eq!(game.board_dimensions(), (10, 20));
        assert!(game.next_kind().is_none());
        assert!(game.falling_cells().is_empty());
        assert_eq!(game.grid_cells().len(), 200);
        assert!(game.grid_cells().iter().all(|(_, blocking, _)| !blocking));
    }

    #[test]
    fn test_invalid_config_is_rejected_at_construction() {
        let config = GameConfig {
            board_width: 0,
            ..GameConfig::default()
        };
        assert!(Game::new(config).is_err());

        // A board too short for the vertical bar is caught up front too
        let config = GameConfig {
            board_height: 3,
            ..GameConfig::default()
        };
        assert!(Game::new(config).is_err());
    }

    #[test]
    fn test_update_before_first_spawn_is_harmless() {
        let mut game = Game::new(GameConfig::default()).unwrap();

        game.update(5.0);

        assert_eq!(game.score(), 0);
        assert!(game.falling_cells().is_empty());
    }

    #[test]
    fn test_spawn_next_goes_live() {
        let mut game = Game::with_seed(GameConfig::default(), 7).unwrap();

        game.spawn_next();

        // Every catalog shape occupies four cells
        assert_eq!(game.falling_cells().len(), 4);
        assert!(game.next_kind().is_some());
        assert!((game.fall_speed() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_locking_emits_events() {
        let mut game = Game::with_seed(GameConfig::default(), 7).unwrap();
        game.spawn_next();

        for _ in 0..25 {
            game.update(1.0);
        }

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::PieceLocked));

        // Events are fire-and-forget: a second drain is empty
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_seeded_sessions_replay_identically() {
        let script = |game: &mut Game| {
            game.spawn_next();
            game.set_input(InputState {
                right: true,
                soft_drop: true,
                ..InputState::default()
            });
            for _ in 0..120 {
                game.update(0.21);
            }
        };

        let mut a = Game::with_seed(GameConfig::default(), 99).unwrap();
        let mut b = Game::with_seed(GameConfig::default(), 99).unwrap();
        script(&mut a);
        script(&mut b);

        assert_eq!(a.score(), b.score());
        assert_eq!(a.next_kind(), b.next_kind());
        assert_eq!(a.grid_cells(), b.grid_cells());
        assert_eq!(a.falling_cells(), b.falling_cells());
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = Game::with_seed(GameConfig::default(), 1).unwrap();
        let b = Game::with_seed(GameConfig::default(), 1).unwrap();

        a.spawn_next();
        for _ in 0..10 {
            a.update(1.0);
        }

        // Driving one board leaves the other untouched
        assert!(!a.falling_cells().is_empty());
        assert!(b.falling_cells().is_empty());
        assert_eq!(b.score(), 0);
    }

    #[test]
    fn test_reset_starts_over_with_same_config() {
        let config = GameConfig {
            board_width: 12,
            board_height: 24,
            ..GameConfig::default()
        };
        let mut game = Game::with_seed(config, 3).unwrap();

        game.spawn_next();
        for _ in 0..30 {
            game.update(1.0);
        }
        assert!(game.grid_cells().iter().any(|(_, blocking, _)| *blocking));

        game.reset();

        assert_eq!(game.score(), 0);
        assert!(!game.has_lost());
        assert!(game.falling_cells().is_empty());
        assert!(game.grid_cells().iter().all(|(_, blocking, _)| !blocking));
        assert_eq!(game.board_dimensions(), (12, 24));

        // A reset session plays again
        game.spawn_next();
        assert_eq!(game.falling_cells().len(), 4);
    }

    #[test]
    fn test_tick_advances_the_simulation() {
        let mut game = Game::new(GameConfig::default()).unwrap();
        game.spawn_next();

        let before = game.falling_cells();
        std::thread::sleep(std::time::Duration::from_millis(5));

        // The self-clocked path fires the immediate first gravity step
        game.tick();
        assert_ne!(game.falling_cells(), before);
    }
}
