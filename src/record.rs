use serde::{Deserialize, Serialize};

use crate::COLUMNS;

/// Column names as they appear in both output files, in output order.
pub const FIELD_NAMES: [&str; COLUMNS] = [
    "Team Name",
    "Year",
    "Wins",
    "Losses",
    "OT Losses",
    "Win %",
    "Goals For (GF)",
    "Goals Against (GA)",
    "+ / -",
];

/// One team-year row of the statistics table.
/// Values are kept exactly as the cell text was scraped, no numeric coercion.
///
/// Field order is the output column order, serde serializes in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Team Name")]
    pub team_name: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Wins")]
    pub wins: String,
    #[serde(rename = "Losses")]
    pub losses: String,
    #[serde(rename = "OT Losses")]
    pub ot_losses: String,
    #[serde(rename = "Win %")]
    pub win_pct: String,
    #[serde(rename = "Goals For (GF)")]
    pub goals_for: String,
    #[serde(rename = "Goals Against (GA)")]
    pub goals_against: String,
    #[serde(rename = "+ / -")]
    pub goal_differential: String,
}

impl Record {
    /// Builds a record out of the cell texts of one row.
    /// Returns `None` unless there are exactly `COLUMNS` cells.
    pub fn from_cells(cells: Vec<String>) -> Option<Self> {
        let [
            team_name,
            year,
            wins,
            losses,
            ot_losses,
            win_pct,
            goals_for,
            goals_against,
            goal_differential,
        ]: [String; COLUMNS] = cells.try_into().ok()?;

        Some(Record {
            team_name,
            year,
            wins,
            losses,
            ot_losses,
            win_pct,
            goals_for,
            goals_against,
            goal_differential,
        })
    }
}
