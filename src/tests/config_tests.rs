#[cfg(test)]
mod tests {
    use crate::config::{Config, load_config_from_file, save_config_to_file};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.show_next_piece);
        assert!(config.show_controls);
        assert_eq!(config.render_tick_ms, 33);
        assert_eq!(config.game_tick_ms, 16);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config {
            show_next_piece: false,
            show_controls: true,
            render_tick_ms: 16,
            game_tick_ms: 8,
        };

        let toml_string = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_string).unwrap();

        assert!(!parsed.show_next_piece);
        assert!(parsed.show_controls);
        assert_eq!(parsed.render_tick_ms, 16);
        assert_eq!(parsed.game_tick_ms, 8);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("show_next_piece = false\n").unwrap();
        assert!(!parsed.show_next_piece);
        assert!(parsed.show_controls);
        assert_eq!(parsed.render_tick_ms, 33);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        // Point the loader at the temp file for the duration of this test
        unsafe {
            std::env::set_var("GRIDFALL_CONFIG", &path);
        }

        let config = Config {
            show_next_piece: true,
            show_controls: false,
            render_tick_ms: 50,
            game_tick_ms: 25,
        };
        save_config_to_file(&config).unwrap();

        let loaded = load_config_from_file().unwrap();
        assert!(loaded.show_next_piece);
        assert!(!loaded.show_controls);
        assert_eq!(loaded.render_tick_ms, 50);
        assert_eq!(loaded.game_tick_ms, 25);

        unsafe {
            std::env::remove_var("GRIDFALL_CONFIG");
        }
    }
}
