// ABOUTME: Water logging dialogue - a single step collecting milliliters drunk
// ABOUTME: The engine applies the ledger delta and reports the remaining amount
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Water Logging Dialogue

use crate::constants::limits;
use crate::dialogue::{parse_positive_number, Prompt};

/// Water logging progress (a single step)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaterState {
    /// Waiting for the amount drunk
    AwaitAmount,
}

/// Result of feeding one message into the water dialogue
#[derive(Debug, Clone, PartialEq)]
pub enum WaterAdvance {
    /// Input rejected; re-prompt with an explanation
    Invalid {
        /// Validation message for the user
        message: String,
    },
    /// Amount accepted
    Logged {
        /// Milliliters drunk
        amount_ml: f64,
    },
}

impl WaterState {
    /// Initial state plus the question
    #[must_use]
    pub fn start() -> (Self, Prompt) {
        (Self::AwaitAmount, Self::AwaitAmount.prompt())
    }

    /// The question for this step
    #[must_use]
    pub fn prompt(&self) -> Prompt {
        Prompt::text("How much water did you drink, in milliliters?")
    }

    /// Feed one message into the dialogue
    #[must_use]
    pub fn advance(self, input: &str) -> WaterAdvance {
        match parse_positive_number(input, "Amount", limits::MAX_WATER_INTAKE_ML, "milliliters") {
            Ok(amount_ml) => WaterAdvance::Logged { amount_ml },
            Err(err) => WaterAdvance::Invalid {
                message: err.user_message(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_amount_logged() {
        let (state, _) = WaterState::start();
        assert_eq!(
            state.advance("350"),
            WaterAdvance::Logged { amount_ml: 350.0 }
        );
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        assert!(matches!(
            WaterState::AwaitAmount.advance("0"),
            WaterAdvance::Invalid { .. }
        ));
        assert!(matches!(
            WaterState::AwaitAmount.advance("-200"),
            WaterAdvance::Invalid { .. }
        ));
        assert!(matches!(
            WaterState::AwaitAmount.advance("a glass"),
            WaterAdvance::Invalid { .. }
        ));
    }
}
