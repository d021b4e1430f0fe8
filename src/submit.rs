use crate::error::ValidationErrors;
use crate::form::{validate, SwapFormState, ValidatedSwap};
use std::time::Duration;
use tracing::info;

pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct SwapReceipt {
    pub swap: ValidatedSwap,
    pub message: String,
}

/// Mock swap submission: validates, waits, and reports success.
/// Nothing is sent anywhere.
#[derive(Debug, Clone)]
pub struct Submitter {
    delay: Duration,
}

impl Submitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn submit(&self, state: &SwapFormState) -> Result<SwapReceipt, ValidationErrors> {
        let swap = validate(state)?;

        tokio::time::sleep(self.delay).await;

        info!(
            "swap submitted: {} {} -> {} {}",
            swap.form.from_amount, swap.from_currency, swap.form.to_amount, swap.to_currency
        );
        let message = format!(
            "Successfully swapped {} {} to {} {}!",
            state.from_amount, state.from_currency, state.to_amount, state.to_currency
        );
        Ok(SwapReceipt { swap, message })
    }
}

impl Default for Submitter {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}
