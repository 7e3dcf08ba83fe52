//! Reward ladder evaluation.

use serde::{Deserialize, Serialize};

/// An unlockable reward. Rewards are static configuration, never persisted
/// by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Weekly points needed to unlock.
    pub min_points: u32,
}

/// A reward together with how close the current week is to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardStatus {
    pub reward: Reward,
    pub unlocked: bool,
    pub points_remaining: u32,
}

impl RewardStatus {
    /// Fraction of the threshold reached, capped at 1.0.
    pub fn progress(&self) -> f64 {
        let min = self.reward.min_points;
        if min == 0 {
            return 1.0;
        }
        let have = min.saturating_sub(self.points_remaining);
        f64::from(have) / f64::from(min)
    }
}

/// Evaluate every reward in `catalog` against this week's points.
///
/// Output order follows the catalog.
pub fn evaluate(current_week_points: u32, catalog: &[Reward]) -> Vec<RewardStatus> {
    catalog
        .iter()
        .map(|reward| RewardStatus {
            reward: reward.clone(),
            unlocked: current_week_points >= reward.min_points,
            points_remaining: reward.min_points.saturating_sub(current_week_points),
        })
        .collect()
}

/// The stock reward ladder: 20, 30 and 40 points.
pub fn default_catalog() -> Vec<Reward> {
    vec![
        Reward {
            id: "book".into(),
            name: "Programming Book".into(),
            description: "A comprehensive guide to programming concepts and best practices"
                .into(),
            min_points: 20,
        },
        Reward {
            id: "pen".into(),
            name: "Premium Pen Set".into(),
            description: "High-quality pens perfect for notes and annotations".into(),
            min_points: 30,
        },
        Reward {
            id: "bag".into(),
            name: "Developer's Backpack".into(),
            description: "Durable and stylish backpack for students and developers".into(),
            min_points: 40,
        },
    ]
}
