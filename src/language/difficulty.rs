use serde::{Deserialize, Serialize};

/// Difficulty bucket of a dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tier {
    Easy,
    Medium,
    Hard,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Easy, Tier::Medium, Tier::Hard];

    pub fn weight(self) -> f64 {
        match self {
            Tier::Easy => 0.6,
            Tier::Medium => 0.3,
            Tier::Hard => 0.1,
        }
    }

    /// Cumulative-weight sampling against a single uniform draw in `[0, 1)`.
    pub fn from_draw(draw: f64) -> Tier {
        let mut cumulative = 0.0;
        for tier in Self::ALL {
            cumulative += tier.weight();
            if draw < cumulative {
                return tier;
            }
        }
        // float drift at the top of the range
        Tier::Easy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let total: f64 = Tier::ALL.iter().map(|t| t.weight()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn draw_boundaries() {
        assert_eq!(Tier::from_draw(0.0), Tier::Easy);
        assert_eq!(Tier::from_draw(0.59), Tier::Easy);
        assert_eq!(Tier::from_draw(0.6), Tier::Medium);
        assert_eq!(Tier::from_draw(0.89), Tier::Medium);
        assert_eq!(Tier::from_draw(0.95), Tier::Hard);
    }
}
