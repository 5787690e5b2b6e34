//! Prediction outcome

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Next-day rain label produced by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RainPrediction {
    NoRain,
    Rain,
}

impl RainPrediction {
    /// Numeric label as the model emits it (0 = no rain, 1 = rain)
    pub fn label(&self) -> u8 {
        match self {
            RainPrediction::NoRain => 0,
            RainPrediction::Rain => 1,
        }
    }

    pub fn is_rain(&self) -> bool {
        matches!(self, RainPrediction::Rain)
    }

    /// Text of the result card
    pub fn message(&self) -> &'static str {
        match self {
            RainPrediction::Rain => "It will RAIN Tomorrow!",
            RainPrediction::NoRain => "No Rain Tomorrow!",
        }
    }
}

impl TryFrom<i64> for RainPrediction {
    type Error = PipelineError;

    fn try_from(label: i64) -> Result<Self, Self::Error> {
        match label {
            0 => Ok(RainPrediction::NoRain),
            1 => Ok(RainPrediction::Rain),
            other => Err(PipelineError::UnsupportedLabel(other)),
        }
    }
}

impl std::fmt::Display for RainPrediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        assert_eq!(RainPrediction::try_from(0).unwrap(), RainPrediction::NoRain);
        assert_eq!(RainPrediction::try_from(1).unwrap().label(), 1);
        assert_eq!(
            RainPrediction::try_from(3),
            Err(PipelineError::UnsupportedLabel(3))
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(RainPrediction::Rain.to_string(), "It will RAIN Tomorrow!");
        assert_eq!(RainPrediction::NoRain.message(), "No Rain Tomorrow!");
    }
}
