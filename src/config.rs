// Configuration module for reading Game.toml
// This module provides OOP-style configuration management for the game engine and AI tiers

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::types::Difficulty;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub board: BoardConfig,
    pub rules: RulesConfig,
    pub search: SearchConfig,
    pub heuristics: HeuristicsConfig,
    pub debug: DebugConfig,
}

/// Board dimensions and procedural generation parameters
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BoardConfig {
    pub size: u32,
    pub num_snakes: usize,
    pub num_ladders: usize,
}

/// Turn and token economy constants
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RulesConfig {
    pub min_players: usize,
    pub reward_token_gain: u32,
    pub opponent_token_gain: u32,
}

/// Minimax depth per tier and leaf evaluation weights
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SearchConfig {
    pub easy_depth: u8,
    pub medium_depth: u8,
    pub hard_depth: u8,
    pub expert_depth: u8,
    pub position_weight: f64,
    pub token_weight: f64,
    pub distance_weight: f64,
    pub win_score: f64,
}

impl SearchConfig {
    /// Plies searched for a given AI tier
    pub fn depth_for(&self, difficulty: Difficulty) -> u8 {
        match difficulty {
            Difficulty::Easy => self.easy_depth,
            Difficulty::Medium => self.medium_depth,
            Difficulty::Hard => self.hard_depth,
            Difficulty::Expert => self.expert_depth,
        }
    }
}

/// Thresholds used by the non-search reward and token decisions
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct HeuristicsConfig {
    // Reward choice
    pub bonus_roll_distance: u32,
    pub low_token_threshold: u32,
    pub snake_lookahead: u32,
    pub snake_danger_count: usize,
    pub snake_danger_tokens: u32,

    // Snake neutralization
    pub token_surplus: u32,
    pub long_snake_length: u32,
    pub medium_snake_length: u32,
    pub endgame_distance: u32,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Game.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Game.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Game.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Game.toml
    pub fn default_hardcoded() -> Self {
        Config {
            board: BoardConfig {
                size: 100,
                num_snakes: 6,
                num_ladders: 6,
            },
            rules: RulesConfig {
                min_players: 2,
                reward_token_gain: 2,
                opponent_token_gain: 1,
            },
            search: SearchConfig {
                easy_depth: 1,
                medium_depth: 2,
                hard_depth: 3,
                expert_depth: 4,
                position_weight: 100.0,
                token_weight: 5.0,
                distance_weight: 2.0,
                win_score: 1000.0,
            },
            heuristics: HeuristicsConfig {
                bonus_roll_distance: 12, // two average rolls
                low_token_threshold: 1,
                snake_lookahead: 12,
                snake_danger_count: 2,
                snake_danger_tokens: 3,
                token_surplus: 2,
                long_snake_length: 25,
                medium_snake_length: 15,
                endgame_distance: 15,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "snakes_ladders_trace.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!(
                "Warning: Could not load Game.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_hardcoded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_per_tier() {
        let config = Config::default_hardcoded();
        assert_eq!(config.search.depth_for(Difficulty::Easy), 1);
        assert_eq!(config.search.depth_for(Difficulty::Medium), 2);
        assert_eq!(config.search.depth_for(Difficulty::Hard), 3);
        assert_eq!(config.search.depth_for(Difficulty::Expert), 4);
    }

    #[test]
    fn test_game_toml_can_be_parsed() {
        // This test ensures Game.toml is valid and can be parsed
        let result = Config::from_file("Game.toml");
        assert!(
            result.is_ok(),
            "Failed to parse Game.toml: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_all_config_values_match_hardcoded_defaults() {
        let file_config = Config::from_file("Game.toml").expect("Game.toml should be parseable");
        let hardcoded_config = Config::default_hardcoded();

        assert_eq!(file_config.board, hardcoded_config.board);
        assert_eq!(file_config.rules, hardcoded_config.rules);
        assert_eq!(file_config.search, hardcoded_config.search);
        assert_eq!(file_config.heuristics, hardcoded_config.heuristics);
        assert_eq!(file_config.debug, hardcoded_config.debug);
    }

    #[test]
    fn test_load_or_default_works() {
        let config = Config::load_or_default();
        assert_eq!(config.board.size, 100);
        assert_eq!(config.rules.reward_token_gain, 2);
    }

    #[test]
    fn test_missing_file_returns_error() {
        let result = Config::from_file("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_toml_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[board]\nsize = 100\n");
        assert!(result.is_err());
    }
}
