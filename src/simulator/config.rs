//! Simulation configuration.

use crate::search::{AgentKind, PlannerConfig};
use crate::world::Grid;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Reasons a configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must hold at least two cells with sides of at most 1024, got {cols}x{rows}")]
    InvalidGrid { cols: i16, rows: i16 },
    #[error("number of games must be positive")]
    NoGames,
    #[error("at least one agent must be selected")]
    NoAgents,
    #[error("{0}")]
    UnknownAgent(String),
    #[error("could not read config file: {0}")]
    Io(#[from] io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for a batch of headless games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Agents to evaluate; each plays `games` games.
    pub agents: Vec<AgentKind>,

    pub cols: i16,
    pub rows: i16,

    /// Games per agent
    pub games: u32,

    /// Random seed for reproducibility (None = random). Game `i` uses `seed + i`.
    pub seed: Option<u64>,

    /// Hard cap on moves per game
    pub max_steps_per_game: u64,

    /// Moves allowed between two meals before the game counts as stalled
    pub max_steps_without_food: u64,

    /// Bounds handed to the BFS and A* planners
    pub planner: PlannerConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per game)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            agents: vec![AgentKind::ForwardCheck],
            cols: 8,
            rows: 8,
            games: 100,
            seed: None,
            max_steps_per_game: 20_000,
            max_steps_without_food: 1_000,
            planner: PlannerConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Every agent on a small board, seeded.
    pub fn compare_all(games: u32, seed: u64) -> Self {
        Self {
            agents: AgentKind::ALL.to_vec(),
            cols: 6,
            rows: 6,
            games,
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// A single agent, a handful of seeded games.
    pub fn quick(agent: AgentKind, seed: u64) -> Self {
        Self {
            agents: vec![agent],
            games: 10,
            seed: Some(seed),
            verbosity: 0,
            ..Default::default()
        }
    }

    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let side = 1..=Grid::MAX_SIDE;
        if !side.contains(&self.cols)
            || !side.contains(&self.rows)
            || (self.cols as i32 * self.rows as i32) < 2
        {
            return Err(ConfigError::InvalidGrid {
                cols: self.cols,
                rows: self.rows,
            });
        }
        if self.games == 0 {
            return Err(ConfigError::NoGames);
        }
        if self.agents.is_empty() {
            return Err(ConfigError::NoAgents);
        }
        Ok(())
    }

    /// Parse a comma-separated agent list; `all` selects every agent.
    pub fn parse_agents(list: &str) -> Result<Vec<AgentKind>, ConfigError> {
        let mut agents = Vec::new();
        for name in list.split(',').filter(|s| !s.trim().is_empty()) {
            if name.trim().eq_ignore_ascii_case("all") {
                agents.extend(AgentKind::ALL);
                continue;
            }
            let kind = name.parse::<AgentKind>().map_err(ConfigError::UnknownAgent)?;
            agents.push(kind);
        }
        agents.dedup();
        if agents.is_empty() {
            return Err(ConfigError::NoAgents);
        }
        Ok(agents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
        assert!(SimConfig::compare_all(5, 1).validate().is_ok());
        assert!(SimConfig::quick(AgentKind::Bfs, 1).validate().is_ok());
    }

    #[test]
    fn test_rejects_degenerate_settings() {
        let config = SimConfig {
            cols: 1,
            rows: 1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGrid { cols: 1, rows: 1 })
        ));

        let config = SimConfig {
            cols: i16::MAX,
            rows: 1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGrid { cols: i16::MAX, rows: 1 })
        ));
        let config = SimConfig {
            rows: Grid::MAX_SIDE + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SimConfig {
            games: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoGames)));

        let config = SimConfig {
            agents: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoAgents)));
    }

    #[test]
    fn test_json_fills_missing_fields() {
        let config =
            SimConfig::from_json_str(r#"{"agents": ["astar", "greedy"], "cols": 5, "seed": 9}"#)
                .unwrap();
        assert_eq!(config.agents, vec![AgentKind::Astar, AgentKind::Greedy]);
        assert_eq!(config.cols, 5);
        assert_eq!(config.rows, 8);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.planner, PlannerConfig::default());
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            SimConfig::from_json_str("{not json"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            SimConfig::from_json_str(r#"{"games": 0}"#),
            Err(ConfigError::NoGames)
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SimConfig::load(Path::new("/nonexistent/snake-sim.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_parse_agents() {
        assert_eq!(
            SimConfig::parse_agents("bfs,astar").unwrap(),
            vec![AgentKind::Bfs, AgentKind::Astar]
        );
        assert_eq!(SimConfig::parse_agents("all").unwrap().len(), 5);
        assert!(matches!(
            SimConfig::parse_agents("bfs,dfs"),
            Err(ConfigError::UnknownAgent(_))
        ));
        assert!(matches!(
            SimConfig::parse_agents(""),
            Err(ConfigError::NoAgents)
        ));
    }
}
