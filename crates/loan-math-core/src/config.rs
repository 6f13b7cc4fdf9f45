use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Percent, Years};
use crate::{LoanMathError, LoanMathResult};

#[cfg(feature = "loan")]
use crate::loan::amortization::AmortizationMethod;

/// Years shown in the amortization chart.
pub const DEFAULT_AMORTIZATION_HORIZON_YEARS: Years = 5;

/// Annual home-price appreciation assumed by the ROI calculator.
pub const DEFAULT_APPRECIATION_RATE_PCT: Percent = dec!(3);

/// Holding period assumed by the ROI calculator.
pub const DEFAULT_ROI_HORIZON_YEARS: Years = 5;

/// Longest amortization or ROI horizon accepted.
pub const MAX_HORIZON_YEARS: Years = 100;

/// Reject horizons beyond [`MAX_HORIZON_YEARS`].
pub(crate) fn check_horizon_cap(field: &str, horizon_years: Years) -> LoanMathResult<()> {
    if horizon_years > MAX_HORIZON_YEARS {
        return Err(LoanMathError::invalid(
            field,
            format!("Horizon cannot exceed {MAX_HORIZON_YEARS} years."),
        ));
    }
    Ok(())
}

/// Tunable assumptions shared by the calculators.
///
/// Every field has a default, so a partial document only overrides what it
/// names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineDefaults {
    pub amortization_horizon_years: Years,
    #[cfg(feature = "loan")]
    pub amortization_method: AmortizationMethod,
    pub appreciation_rate_pct: Percent,
    pub roi_horizon_years: Years,
}

impl Default for EngineDefaults {
    fn default() -> Self {
        EngineDefaults {
            amortization_horizon_years: DEFAULT_AMORTIZATION_HORIZON_YEARS,
            #[cfg(feature = "loan")]
            amortization_method: AmortizationMethod::default(),
            appreciation_rate_pct: DEFAULT_APPRECIATION_RATE_PCT,
            roi_horizon_years: DEFAULT_ROI_HORIZON_YEARS,
        }
    }
}

impl EngineDefaults {
    pub fn from_json(s: &str) -> LoanMathResult<Self> {
        let defaults: EngineDefaults = serde_json::from_str(s)?;
        defaults.validate()?;
        Ok(defaults)
    }

    pub fn validate(&self) -> LoanMathResult<()> {
        if self.amortization_horizon_years == 0 {
            return Err(LoanMathError::invalid(
                "amortization_horizon_years",
                "Horizon must be at least 1 year.",
            ));
        }
        check_horizon_cap("amortization_horizon_years", self.amortization_horizon_years)?;
        check_horizon_cap("roi_horizon_years", self.roi_horizon_years)?;
        if self.appreciation_rate_pct <= dec!(-100) {
            return Err(LoanMathError::invalid(
                "appreciation_rate_pct",
                "Appreciation must be greater than -100%.",
            ));
        }
        if self.appreciation_rate_pct > Decimal::ONE_HUNDRED {
            return Err(LoanMathError::invalid(
                "appreciation_rate_pct",
                "Appreciation above 100% a year is not a plausible default.",
            ));
        }
        Ok(())
    }
}
