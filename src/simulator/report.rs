//! Simulation report generation.

use super::config::SimConfig;
use crate::search::AgentKind;
use serde::{Deserialize, Serialize};

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameOutcome {
    /// The snake filled the board.
    Won,
    /// The agent had no legal move.
    Trapped,
    /// The agent returned an illegal move.
    Collided,
    /// Too many moves since the last meal.
    Stalled,
    /// Hit the per-game step cap.
    TimedOut,
}

/// Statistics for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub agent: AgentKind,
    pub outcome: GameOutcome,
    pub food_eaten: u32,
    pub final_length: usize,
    pub steps: u64,
    /// Agent-specific counter: planner fallbacks or forward-check stalls.
    pub diagnostics: u64,
}

impl GameStats {
    pub fn new(agent: AgentKind) -> Self {
        Self {
            agent,
            outcome: GameOutcome::TimedOut,
            food_eaten: 0,
            final_length: 1,
            steps: 0,
            diagnostics: 0,
        }
    }
}

/// Aggregated results for one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSummary {
    pub agent: AgentKind,
    pub games: u32,
    pub wins: u32,
    pub trapped: u32,
    pub collided: u32,
    pub stalled: u32,
    pub timed_out: u32,
    pub avg_food: f64,
    pub max_food: u32,
    pub avg_final_length: f64,
    pub avg_steps: f64,
    /// Mean share of the board covered at game end
    pub avg_coverage: f64,
    pub total_diagnostics: u64,
}

impl AgentSummary {
    fn from_games(agent: AgentKind, games: &[&GameStats], area: usize) -> Self {
        let count = games.len().max(1) as f64;
        let by_outcome =
            |outcome: GameOutcome| games.iter().filter(|g| g.outcome == outcome).count() as u32;

        Self {
            agent,
            games: games.len() as u32,
            wins: by_outcome(GameOutcome::Won),
            trapped: by_outcome(GameOutcome::Trapped),
            collided: by_outcome(GameOutcome::Collided),
            stalled: by_outcome(GameOutcome::Stalled),
            timed_out: by_outcome(GameOutcome::TimedOut),
            avg_food: games.iter().map(|g| g.food_eaten as f64).sum::<f64>() / count,
            max_food: games.iter().map(|g| g.food_eaten).max().unwrap_or(0),
            avg_final_length: games.iter().map(|g| g.final_length as f64).sum::<f64>() / count,
            avg_steps: games.iter().map(|g| g.steps as f64).sum::<f64>() / count,
            avg_coverage: games
                .iter()
                .map(|g| g.final_length as f64 / area.max(1) as f64)
                .sum::<f64>()
                / count,
            total_diagnostics: games.iter().map(|g| g.diagnostics).sum(),
        }
    }
}

/// Results of a simulation batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimReport {
    pub cols: i16,
    pub rows: i16,
    pub seed: Option<u64>,
    pub summaries: Vec<AgentSummary>,
    /// Individual games for detailed analysis
    pub games: Vec<GameStats>,
}

impl SimReport {
    pub fn from_games(config: &SimConfig, games: Vec<GameStats>) -> Self {
        let area = config.cols.max(0) as usize * config.rows.max(0) as usize;
        let summaries = config
            .agents
            .iter()
            .map(|&kind| {
                let played: Vec<&GameStats> = games.iter().filter(|g| g.agent == kind).collect();
                AgentSummary::from_games(kind, &played, area)
            })
            .collect();

        Self {
            cols: config.cols,
            rows: config.rows,
            seed: config.seed,
            summaries,
            games,
        }
    }

    pub fn summary(&self, agent: AgentKind) -> Option<&AgentSummary> {
        self.summaries.iter().find(|s| s.agent == agent)
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                  SNAKE AGENT SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        let seed = self
            .seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "random".to_string());
        report.push_str(&format!(
            "Board: {}x{}   Seed: {}\n\n",
            self.cols, self.rows, seed
        ));

        report.push_str("  Agent           Games  Wins  Trapped  Stalled  Avg Food  Max  Coverage\n");
        report.push_str("  ─────────────   ─────  ────  ───────  ───────  ────────  ───  ────────\n");
        for s in &self.summaries {
            report.push_str(&format!(
                "  {:<14}  {:>5}  {:>4}  {:>7}  {:>7}  {:>8.1}  {:>3}  {:>7.1}%\n",
                s.agent.name(),
                s.games,
                s.wins,
                s.trapped,
                s.stalled + s.timed_out,
                s.avg_food,
                s.max_food,
                s.avg_coverage * 100.0
            ));
        }
        report.push('\n');

        for s in &self.summaries {
            if s.collided > 0 {
                report.push_str(&format!(
                    "  ⚠️  {} made {} illegal moves\n",
                    s.agent.name(),
                    s.collided
                ));
            }
            if s.total_diagnostics > 0 {
                let label = match s.agent {
                    AgentKind::ForwardCheck => "forward-check stalls",
                    _ => "random fallbacks",
                };
                report.push_str(&format!(
                    "  {}: {} {}\n",
                    s.agent.name(),
                    s.total_diagnostics,
                    label
                ));
            }
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(agent: AgentKind, outcome: GameOutcome, food: u32) -> GameStats {
        GameStats {
            agent,
            outcome,
            food_eaten: food,
            final_length: food as usize + 1,
            steps: food as u64 * 4,
            diagnostics: 1,
        }
    }

    #[test]
    fn test_report_generation() {
        let config = SimConfig {
            agents: vec![AgentKind::Greedy, AgentKind::ForwardCheck],
            cols: 4,
            rows: 4,
            ..Default::default()
        };
        let games = vec![
            game(AgentKind::Greedy, GameOutcome::Trapped, 5),
            game(AgentKind::Greedy, GameOutcome::Trapped, 7),
            game(AgentKind::ForwardCheck, GameOutcome::Won, 15),
        ];

        let report = SimReport::from_games(&config, games);
        let greedy = report.summary(AgentKind::Greedy).unwrap();
        assert_eq!(greedy.games, 2);
        assert_eq!(greedy.trapped, 2);
        assert!((greedy.avg_food - 6.0).abs() < 1e-9);
        assert_eq!(greedy.max_food, 7);

        let fc = report.summary(AgentKind::ForwardCheck).unwrap();
        assert_eq!(fc.wins, 1);
        assert!((fc.avg_coverage - 1.0).abs() < 1e-9);
        assert!(report.summary(AgentKind::Bfs).is_none());
    }

    #[test]
    fn test_text_and_json_output() {
        let config = SimConfig {
            agents: vec![AgentKind::Astar],
            seed: Some(7),
            ..Default::default()
        };
        let report = SimReport::from_games(&config, vec![game(AgentKind::Astar, GameOutcome::Stalled, 3)]);

        let text = report.to_text();
        assert!(text.contains("astar"));
        assert!(text.contains("Seed: 7"));
        assert!(text.contains("random fallbacks"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["summaries"][0]["agent"], "astar");
        assert_eq!(json["games"][0]["outcome"], "stalled");
    }

    #[test]
    fn test_empty_agent_summary() {
        let config = SimConfig {
            agents: vec![AgentKind::Bfs],
            ..Default::default()
        };
        let report = SimReport::from_games(&config, Vec::new());
        let bfs = report.summary(AgentKind::Bfs).unwrap();
        assert_eq!(bfs.games, 0);
        assert_eq!(bfs.avg_food, 0.0);
    }
}
