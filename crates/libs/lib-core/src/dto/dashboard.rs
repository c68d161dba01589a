//! # Dashboard Datasets
//!
//! Example data shown by the display-only widgets. None of it is derived from
//! the chain; the policy table is labelled as an example in the UI.

use serde::Serialize;

/// One point on the hourly wind-cycle chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindSample {
    /// Offset into the hourly payout cycle, in minutes
    pub minute: u32,
    pub speed_kmh: f64,
}

impl WindSample {
    /// Axis label, `"0"` for the first sample and `"N min"` after it.
    pub fn label(&self) -> String {
        if self.minute == 0 {
            "0".to_string()
        } else {
            format!("{} min", self.minute)
        }
    }
}

/// Current hourly wind cycle, sampled every five minutes.
pub fn wind_cycle() -> Vec<WindSample> {
    const SPEEDS: [f64; 12] = [9.0, 14.0, 11.0, 14.0, 16.0, 18.0, 18.0, 16.0, 18.0, 15.0, 15.0, 17.0];
    SPEEDS
        .iter()
        .enumerate()
        .map(|(i, &speed_kmh)| WindSample { minute: i as u32 * 5, speed_kmh })
        .collect()
}

/// Contents of the "Latest Wind Speed" card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestWindSpeed {
    pub speed_kmh: f64,
    pub refresh_note: &'static str,
}

impl LatestWindSpeed {
    /// Oracle readings come back in tenths of km/h.
    pub fn from_oracle_reading(tenths_kmh: u64) -> Self {
        Self {
            speed_kmh: tenths_kmh as f64 / 10.0,
            refresh_note: "Read from policy contract",
        }
    }
}

impl Default for LatestWindSpeed {
    fn default() -> Self {
        Self {
            speed_kmh: 17.0,
            refresh_note: "Updated every 5 min",
        }
    }
}

/// One row of the example policy table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyRow {
    pub turbine_id: &'static str,
    pub policy_amount_eth: f64,
    pub daily_premium_eth: f64,
    pub latitude: &'static str,
    pub longitude: &'static str,
}

pub fn example_policies() -> Vec<PolicyRow> {
    vec![
        PolicyRow {
            turbine_id: "31337",
            policy_amount_eth: 2.9,
            daily_premium_eth: 0.02211,
            latitude: "49.703168",
            longitude: "-125.630035",
        },
        PolicyRow {
            turbine_id: "42069",
            policy_amount_eth: 2.7,
            daily_premium_eth: 0.01971,
            latitude: "49.698892",
            longitude: "-125.615876",
        },
        PolicyRow {
            turbine_id: "90210",
            policy_amount_eth: 3.5,
            daily_premium_eth: 0.02555,
            latitude: "49.723435",
            longitude: "-125.599923",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wind_cycle_spans_one_hour() {
        let cycle = wind_cycle();
        assert_eq!(cycle.len(), 12);
        assert_eq!(cycle[0].label(), "0");
        assert_eq!(cycle[11].label(), "55 min");
        assert_eq!(cycle[11].speed_kmh, 17.0);
    }

    #[test]
    fn test_oracle_reading_is_tenths() {
        let latest = LatestWindSpeed::from_oracle_reading(173);
        assert!((latest.speed_kmh - 17.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_example_policies_have_unique_turbines() {
        let rows = example_policies();
        assert_eq!(rows.len(), 3);
        assert_ne!(rows[0].turbine_id, rows[1].turbine_id);
        assert_ne!(rows[1].turbine_id, rows[2].turbine_id);
    }
}
