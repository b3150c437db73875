//! Plain-text report rendering

use squad_optimizer::{OptimizationReport, PeriodReport, PeriodSelection, SelectedPlayer};
use std::fmt;

/// Price in tenths as currency units with one decimal (55 -> "5.5")
pub fn format_tenths(tenths: i64) -> String {
    let sign = if tenths < 0 { "-" } else { "" };
    let abs = tenths.unsigned_abs();
    format!("{sign}{}.{}", abs / 10, abs % 10)
}

/// Display adapter printing an [`OptimizationReport`] for a terminal
pub struct TextReport<'a> {
    report: &'a OptimizationReport,
}

impl<'a> TextReport<'a> {
    pub fn new(report: &'a OptimizationReport) -> Self {
        Self { report }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, period) in self.report.periods.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write_period(f, period)?;
        }
        if self.report.periods.len() > 1 {
            writeln!(f)?;
            writeln!(f, "Horizon objective: {:.2}", self.report.total_objective())?;
        }
        Ok(())
    }
}

fn write_period(f: &mut fmt::Formatter<'_>, period: &PeriodReport) -> fmt::Result {
    writeln!(f, "=== Gameweek {} ===", period.period)?;
    match &period.selection {
        Some(selection) => write_selection(f, selection)?,
        None => writeln!(f, "No solution found.")?,
    }

    let diagnostics = &period.diagnostics;
    writeln!(f)?;
    writeln!(f, "Statistics")?;
    writeln!(f, "  Backend: {}", diagnostics.backend)?;
    writeln!(f, "  Status: {}", diagnostics.status)?;
    match diagnostics.objective_value {
        Some(value) => writeln!(f, "  Objective: {value:.2}")?,
        None => writeln!(f, "  Objective: n/a")?,
    }
    writeln!(f, "  Conflicts: {}", count_or_na(diagnostics.conflicts))?;
    writeln!(f, "  Branches: {}", count_or_na(diagnostics.branches))?;
    writeln!(f, "  Wall time: {:.3} s", diagnostics.wall_time.as_secs_f64())?;
    writeln!(f, "  Model: {} variables, {} constraints", period.num_variables, period.num_constraints)
}

fn write_selection(f: &mut fmt::Formatter<'_>, selection: &PeriodSelection) -> fmt::Result {
    for group in &selection.groups {
        writeln!(f, "{}", group.position.plural())?;
        for player in &group.players {
            writeln!(f, "  {}", player_line(player))?;
        }
    }
    writeln!(f)?;
    writeln!(f, "Total Cost: {}", format_tenths(i64::from(selection.total_spend)))?;
    writeln!(f, "Bank: {}", format_tenths(selection.bank))?;
    writeln!(f, "Projected Points: {:.2}", selection.projected_points)
}

/// `(ARS) David Raya (1) (cost: 5.5) vs AVL - PLAYING`
pub fn player_line(player: &SelectedPlayer) -> String {
    let mut line = format!(
        "({}) {} ({}) (cost: {})",
        player.club_name,
        player.name,
        player.player_id,
        format_tenths(i64::from(player.price))
    );
    if let Some(opponent) = &player.opponent_club {
        line.push_str(&format!(" vs {opponent}"));
    }
    if player.starting {
        line.push_str(" - PLAYING");
    }
    line
}

fn count_or_na(count: Option<u64>) -> String {
    count.map_or_else(|| "n/a".to_string(), |c| c.to_string())
}
