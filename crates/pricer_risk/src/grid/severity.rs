//! Discrete P&L severity bands for heat-map cells.

use std::fmt;

/// Lower bounds (inclusive) of the non-trivial bands, in percent.
pub const SEVERITY_THRESHOLDS: [f64; 4] = [100.0, 50.0, 25.0, 10.0];

/// Severity of a percent P&L, mirrored for gains and losses.
///
/// | Band | Gain | Loss |
/// |------|------|------|
/// | ≥ 100 % | `ExtremeGain` | `ExtremeLoss` |
/// | ≥ 50 % | `LargeGain` | `LargeLoss` |
/// | ≥ 25 % | `ModerateGain` | `ModerateLoss` |
/// | ≥ 10 % | `SmallGain` | `SmallLoss` |
/// | > 0 % | `SlightGain` | `SlightLoss` |
/// | 0 | `Flat` | `Flat` |
///
/// Variants are ordered from worst loss to best gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PnLSeverity {
    /// Loss of 100 % or more.
    ExtremeLoss,
    /// Loss of 50 % to 100 %.
    LargeLoss,
    /// Loss of 25 % to 50 %.
    ModerateLoss,
    /// Loss of 10 % to 25 %.
    SmallLoss,
    /// Loss under 10 %.
    SlightLoss,
    /// No change.
    Flat,
    /// Gain under 10 %.
    SlightGain,
    /// Gain of 10 % to 25 %.
    SmallGain,
    /// Gain of 25 % to 50 %.
    ModerateGain,
    /// Gain of 50 % to 100 %.
    LargeGain,
    /// Gain of 100 % or more.
    ExtremeGain,
}

impl PnLSeverity {
    /// All bands from worst to best.
    pub const ALL: [PnLSeverity; 11] = [
        PnLSeverity::ExtremeLoss,
        PnLSeverity::LargeLoss,
        PnLSeverity::ModerateLoss,
        PnLSeverity::SmallLoss,
        PnLSeverity::SlightLoss,
        PnLSeverity::Flat,
        PnLSeverity::SlightGain,
        PnLSeverity::SmallGain,
        PnLSeverity::ModerateGain,
        PnLSeverity::LargeGain,
        PnLSeverity::ExtremeGain,
    ];

    /// Classifies a percent P&L. NaN is treated as flat.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_risk::grid::PnLSeverity;
    ///
    /// assert_eq!(PnLSeverity::classify(50.0), PnLSeverity::LargeGain);
    /// assert_eq!(PnLSeverity::classify(-9.99), PnLSeverity::SlightLoss);
    /// assert_eq!(PnLSeverity::classify(0.0), PnLSeverity::Flat);
    /// ```
    pub fn classify(percent_pnl: f64) -> Self {
        if percent_pnl.is_nan() || percent_pnl == 0.0 {
            return PnLSeverity::Flat;
        }

        let magnitude = percent_pnl.abs();
        let tier = SEVERITY_THRESHOLDS
            .iter()
            .position(|&threshold| magnitude >= threshold)
            .unwrap_or(SEVERITY_THRESHOLDS.len());

        // tier 0 is the most extreme band, 4 the slightest
        let offset = SEVERITY_THRESHOLDS.len() - tier + 1;
        let flat = PnLSeverity::Flat as usize;
        if percent_pnl > 0.0 {
            Self::ALL[flat + offset]
        } else {
            Self::ALL[flat - offset]
        }
    }

    /// Whether the band is a gain.
    #[inline]
    pub fn is_gain(self) -> bool {
        self > PnLSeverity::Flat
    }

    /// Whether the band is a loss.
    #[inline]
    pub fn is_loss(self) -> bool {
        self < PnLSeverity::Flat
    }

    /// Short label for legends.
    pub fn label(self) -> &'static str {
        match self {
            PnLSeverity::ExtremeLoss => "<= -100%",
            PnLSeverity::LargeLoss => "-50% to -100%",
            PnLSeverity::ModerateLoss => "-25% to -50%",
            PnLSeverity::SmallLoss => "-10% to -25%",
            PnLSeverity::SlightLoss => "0% to -10%",
            PnLSeverity::Flat => "0%",
            PnLSeverity::SlightGain => "0% to +10%",
            PnLSeverity::SmallGain => "+10% to +25%",
            PnLSeverity::ModerateGain => "+25% to +50%",
            PnLSeverity::LargeGain => "+50% to +100%",
            PnLSeverity::ExtremeGain => ">= +100%",
        }
    }
}

impl fmt::Display for PnLSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries_gain() {
        assert_eq!(PnLSeverity::classify(100.0), PnLSeverity::ExtremeGain);
        assert_eq!(PnLSeverity::classify(99.99), PnLSeverity::LargeGain);
        assert_eq!(PnLSeverity::classify(50.0), PnLSeverity::LargeGain);
        assert_eq!(PnLSeverity::classify(25.0), PnLSeverity::ModerateGain);
        assert_eq!(PnLSeverity::classify(10.0), PnLSeverity::SmallGain);
        assert_eq!(PnLSeverity::classify(9.999), PnLSeverity::SlightGain);
        assert_eq!(PnLSeverity::classify(1e-9), PnLSeverity::SlightGain);
    }

    #[test]
    fn test_band_boundaries_loss() {
        assert_eq!(PnLSeverity::classify(-100.0), PnLSeverity::ExtremeLoss);
        assert_eq!(PnLSeverity::classify(-50.0), PnLSeverity::LargeLoss);
        assert_eq!(PnLSeverity::classify(-49.0), PnLSeverity::ModerateLoss);
        assert_eq!(PnLSeverity::classify(-10.0), PnLSeverity::SmallLoss);
        assert_eq!(PnLSeverity::classify(-0.5), PnLSeverity::SlightLoss);
    }

    #[test]
    fn test_flat_and_non_finite() {
        assert_eq!(PnLSeverity::classify(0.0), PnLSeverity::Flat);
        assert_eq!(PnLSeverity::classify(-0.0), PnLSeverity::Flat);
        assert_eq!(PnLSeverity::classify(f64::NAN), PnLSeverity::Flat);
        assert_eq!(PnLSeverity::classify(f64::INFINITY), PnLSeverity::ExtremeGain);
    }

    #[test]
    fn test_mirrored_bands() {
        for p in [0.1, 5.0, 12.0, 30.0, 75.0, 250.0] {
            let gain = PnLSeverity::classify(p) as usize;
            let loss = PnLSeverity::classify(-p) as usize;
            assert_eq!(gain + loss, 2 * PnLSeverity::Flat as usize);
        }
    }

    #[test]
    fn test_ordering_and_sign() {
        assert!(PnLSeverity::ExtremeLoss < PnLSeverity::SlightLoss);
        assert!(PnLSeverity::SlightGain.is_gain());
        assert!(PnLSeverity::SmallLoss.is_loss());
        assert!(!PnLSeverity::Flat.is_gain() && !PnLSeverity::Flat.is_loss());
        assert_eq!(PnLSeverity::ALL.len(), 11);
        assert_eq!(PnLSeverity::Flat.to_string(), "0%");
    }
}
