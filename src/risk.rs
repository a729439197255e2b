//! Relapse-risk model
//!
//! Baseline relapse risk as a bounded exponential decay over consecutive
//! sober days. Downstream diagnostic tooling recomputes this from the stored
//! `days_sober` field and compares against the emitted
//! `relapse_risk_score`, so the formula and constants here are a contract:
//! do not change them without versioning the dataset method tag.

/// Lower clamp for any emitted risk score
pub const RISK_FLOOR: f64 = 0.05;
/// Upper clamp for any emitted risk score
pub const RISK_CEILING: f64 = 0.9;

/// Bounded exponential-decay risk curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskCurve {
    /// Exponential decay rate per sober day
    pub decay_rate: f64,
    /// Long-term steady-state risk the curve decays toward
    pub steady_state_risk: f64,
    /// Risk at day zero of sobriety
    pub initial_risk: f64,
}

impl RiskCurve {
    /// Curve used by the autocorrelated generator; diagnostic scripts
    /// recompute against these constants.
    pub const REALISTIC: RiskCurve = RiskCurve {
        decay_rate: 0.008,
        steady_state_risk: 0.08,
        initial_risk: 0.75,
    };

    /// Curve used by the earlier noise-based generator variant, kept so
    /// datasets produced by it can still be verified.
    pub const LEGACY: RiskCurve = RiskCurve {
        decay_rate: 0.008,
        steady_state_risk: 0.1,
        initial_risk: 0.8,
    };

    /// Baseline relapse risk for a given consecutive-sober-day count.
    ///
    /// Returns 0.9 for counts <= 0; otherwise a strictly decreasing
    /// exponential approaching `steady_state_risk`, clamped to
    /// [[`RISK_FLOOR`], [`RISK_CEILING`]].
    pub fn baseline_relapse_risk(&self, days_sober: i64) -> f64 {
        if days_sober <= 0 {
            return RISK_CEILING;
        }
        let risk = self.steady_state_risk
            + (self.initial_risk - self.steady_state_risk)
                * (-self.decay_rate * days_sober as f64).exp();
        risk.clamp(RISK_FLOOR, RISK_CEILING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_or_negative_days_pin_to_ceiling() {
        for days in [-10, -1, 0] {
            assert_eq!(RiskCurve::REALISTIC.baseline_relapse_risk(days), 0.9);
            assert_eq!(RiskCurve::LEGACY.baseline_relapse_risk(days), 0.9);
        }
    }

    #[test]
    fn test_strictly_decreasing_over_positive_days() {
        let curve = RiskCurve::REALISTIC;
        let mut prev = curve.baseline_relapse_risk(1);
        for days in 2..=1000 {
            let risk = curve.baseline_relapse_risk(days);
            assert!(risk < prev, "risk must strictly decrease at day {days}");
            prev = risk;
        }
    }

    #[test]
    fn test_approaches_steady_state() {
        let curve = RiskCurve::REALISTIC;
        let far_out = curve.baseline_relapse_risk(5000);
        assert!((far_out - curve.steady_state_risk).abs() < 1e-6);
        assert!(far_out >= RISK_FLOOR);
    }

    #[test]
    fn test_known_values_match_contract_formula() {
        // Independent recomputation of the documented formula
        let curve = RiskCurve::REALISTIC;
        for days in [1, 45, 90, 180, 365] {
            let expected = 0.08 + (0.75 - 0.08) * (-0.008 * days as f64).exp();
            let expected = expected.clamp(0.05, 0.9);
            assert!((curve.baseline_relapse_risk(days) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_legacy_curve_starts_higher() {
        assert!(
            RiskCurve::LEGACY.baseline_relapse_risk(1) > RiskCurve::REALISTIC.baseline_relapse_risk(1)
        );
    }
}
