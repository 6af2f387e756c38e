//! Simulation report generation.

use std::sync::Arc;

use serde::Serialize;

use super::runner::RunStats;
use crate::levels::Level;

/// Aggregates for one level.
#[derive(Debug, Clone, Serialize)]
pub struct LevelReport {
    pub level_id: String,
    pub name: String,
    pub goal: String,
    pub runs: u32,
    pub wins: u32,
    pub deaths: u32,
    pub timeouts: u32,
    pub win_rate: f64,
    pub avg_score: f64,
    pub best_score: u32,
    pub avg_length: f64,
    pub avg_ticks: f64,
    /// Mean level time of winning runs, in seconds.
    pub avg_clear_time: f64,
}

impl LevelReport {
    fn from_runs(level: &Level, runs: &[&RunStats]) -> Self {
        let n = runs.len().max(1) as f64;
        let wins: Vec<&&RunStats> = runs.iter().filter(|r| r.won).collect();
        let win_count = wins.len() as u32;

        Self {
            level_id: level.id.clone(),
            name: level.name.clone(),
            goal: level.victory_condition.description(),
            runs: runs.len() as u32,
            wins: win_count,
            deaths: runs.iter().filter(|r| r.died).count() as u32,
            timeouts: runs.iter().filter(|r| r.timed_out).count() as u32,
            win_rate: win_count as f64 / n * 100.0,
            avg_score: runs.iter().map(|r| r.score as f64).sum::<f64>() / n,
            best_score: runs.iter().map(|r| r.score).max().unwrap_or(0),
            avg_length: runs.iter().map(|r| r.final_length as f64).sum::<f64>() / n,
            avg_ticks: runs.iter().map(|r| r.ticks as f64).sum::<f64>() / n,
            avg_clear_time: wins.iter().map(|r| r.level_time as f64).sum::<f64>()
                / win_count.max(1) as f64,
        }
    }
}

/// Aggregated results from every simulated session.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub total_wins: u32,
    pub levels: Vec<LevelReport>,

    // Individual run stats for detailed analysis
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats, one section per level.
    pub fn from_runs(levels: &[Arc<Level>], runs: Vec<RunStats>) -> Self {
        let level_reports = levels
            .iter()
            .map(|level| {
                let mine: Vec<&RunStats> = runs.iter().filter(|r| r.level_id == level.id).collect();
                LevelReport::from_runs(level, &mine)
            })
            .collect();

        Self {
            num_runs: runs.len() as u32,
            total_wins: runs.iter().filter(|r| r.won).count() as u32,
            levels: level_reports,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("               (Greedy Autopilot, Real Engine)\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} won\n\n",
            self.num_runs, self.total_wins
        ));

        report.push_str("── PER-LEVEL BREAKDOWN ──────────────────────────────────────────\n");
        report.push_str("  Level                 Win%    Died   Timeout   Score   Ticks\n");
        report.push_str("  ─────                 ────    ────   ───────   ─────   ─────\n");
        for level in &self.levels {
            report.push_str(&format!(
                "  {:<20} {:>5.1}%  {:>5}   {:>7}   {:>5.0}   {:>5.0}\n",
                level.name,
                level.win_rate,
                level.deaths,
                level.timeouts,
                level.avg_score,
                level.avg_ticks
            ));
        }
        report.push('\n');

        report.push_str("── GOALS ────────────────────────────────────────────────────────\n");
        for level in &self.levels {
            let bar: String = "█".repeat((level.win_rate / 5.0) as usize);
            report.push_str(&format!("  {:<20} {}\n", level.name, level.goal));
            report.push_str(&format!(
                "  {:<20} best {}, avg length {:.1}, clear in {:.0}s {}\n",
                "", level.best_score, level.avg_length, level.avg_clear_time, bar
            ));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        for level in &self.levels {
            if level.runs == 0 {
                continue;
            }
            if level.win_rate < 20.0 {
                report.push_str(&format!(
                    "  ⚠️  {} is rarely cleared ({:.1}% wins)\n",
                    level.name, level.win_rate
                ));
            }
            if level.timeouts * 2 > level.runs {
                report.push_str(&format!(
                    "  ⚠️  {} mostly times out - goal unreachable?\n",
                    level.name
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

    fn run(level_id: &str, won: bool, score: u32, level_time: u32) -> RunStats {
        RunStats {
            level_id: level_id.to_string(),
            won,
            died: !won,
            timed_out: false,
            ticks: 100,
            score,
            final_length: 5,
            level_time,
            food_collected: 2,
        }
    }

    #[test]
    fn test_report_generation() {
        let levels = vec![
            Arc::new(Level::new("a", "Alpha", 1)),
            Arc::new(Level::new("b", "Beta", 2)),
        ];
        let runs = vec![
            run("a", true, 120, 30),
            run("a", false, 40, 10),
            run("b", false, 0, 5),
        ];

        let report = SimReport::from_runs(&levels, runs);
        assert_eq!(report.num_runs, 3);
        assert_eq!(report.total_wins, 1);

        let alpha = &report.levels[0];
        assert_eq!(alpha.runs, 2);
        assert!((alpha.win_rate - 50.0).abs() < 0.01);
        assert!((alpha.avg_score - 80.0).abs() < 0.01);
        assert_eq!(alpha.best_score, 120);
        assert!((alpha.avg_clear_time - 30.0).abs() < 0.01);

        assert_eq!(report.levels[1].wins, 0);
        assert!(report.to_text().contains("Beta is rarely cleared"));
    }

    #[test]
    fn test_json_omits_individual_runs() {
        let levels = vec![Arc::new(Level::new("a", "Alpha", 1))];
        let report = SimReport::from_runs(&levels, vec![run("a", true, 10, 1)]);
        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["num_runs"], 1);
        assert!(json.get("run_stats").is_none());
        assert_eq!(json["levels"][0]["level_id"], "a");
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(&[], Vec::new());
        assert_eq!(report.num_runs, 0);
        assert!(report.levels.is_empty());
        assert!(report.to_text().contains("Runs: 0 total"));
    }
}
