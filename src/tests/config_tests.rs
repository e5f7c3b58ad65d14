#[cfg(test)]
mod tests {
    use crate::config::{ConfigError, GameConfig, loader};

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_board_dimensions_rejected() {
        let config = GameConfig {
            board_width: 0,
            ..GameConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroBoardDimension { .. })
        ));
    }

    #[test]
    fn test_non_positive_speed_rejected() {
        let config = GameConfig {
            base_fall_speed: 0.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveValue { .. })
        ));

        let config = GameConfig {
            horizontal_speed: -3.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveValue { .. })
        ));
    }

    #[test]
    fn test_non_finite_value_rejected() {
        let config = GameConfig {
            turbo_multiplier: f32::NAN,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_piece_must_fit_the_board() {
        // The vertical bar is four cells tall
        let config = GameConfig {
            board_height: 3,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PieceDoesNotFit { .. })
        ));

        // The T is three cells wide
        let config = GameConfig {
            board_width: 2,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PieceDoesNotFit { .. })
        ));
    }

    #[test]
    fn test_error_messages_name_the_problem() {
        let err = GameConfig {
            board_width: 0,
            ..GameConfig::default()
        }
        .validate()
        .unwrap_err();
        assert!(err.to_string().contains("board dimensions"));

        let err = GameConfig {
            base_fall_speed: -1.0,
            ..GameConfig::default()
        }
        .validate()
        .unwrap_err();
        assert!(err.to_string().contains("base_fall_speed"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = GameConfig {
            board_width: 12,
            board_height: 24,
            points_per_row: 500,
            ..GameConfig::default()
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: GameConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: GameConfig = toml::from_str("board_width = 14\n").unwrap();

        assert_eq!(parsed.board_width, 14);
        assert_eq!(parsed.board_height, GameConfig::default().board_height);
        assert_eq!(parsed.points_per_row, GameConfig::default().points_per_row);
    }

    #[test]
    fn test_loader_file_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blockfall.toml");

        // The env override is process-global, so every loader assertion
        // lives in this one test
        unsafe {
            std::env::set_var("BLOCKFALL_CONFIG", &path);
        }

        // First load writes the default file
        let config = loader::load_config_from_file().unwrap();
        assert_eq!(config, GameConfig::default());
        assert!(path.exists());

        // Saved edits are picked up on the next load
        let custom = GameConfig {
            board_width: 12,
            board_height: 24,
            ..GameConfig::default()
        };
        loader::save_config_to_file(&custom).unwrap();
        let reloaded = loader::load_config_from_file().unwrap();
        assert_eq!(reloaded, custom);

        // A file describing an unplayable board is rejected at load time
        std::fs::write(&path, "board_width = 0\n").unwrap();
        assert!(loader::load_config_from_file().is_err());

        unsafe {
            std::env::remove_var("BLOCKFALL_CONFIG");
        }
    }
}
