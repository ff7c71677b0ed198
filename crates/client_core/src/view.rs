use shared::protocol::PredictionResult;

pub const YIELD_UNIT: &str = "kg/ha";

/// Two decimals with exact ties rounded away from zero; `-0.0` prints as `0.00`.
pub fn format_yield(value: f64) -> String {
    let shown = if value == 0.0 {
        0.0
    } else if is_hundredths_tie(value) {
        (value * 100.0).round() / 100.0
    } else {
        value
    };
    format!("{shown:.2} {YIELD_UNIT}")
}

/// `{:.2}` breaks exact ties toward even. An f64 sits exactly halfway between two
/// hundredths only when it is an odd multiple of 1/8.
fn is_hundredths_tie(value: f64) -> bool {
    let eighths = value.abs() * 8.0;
    eighths.is_finite() && eighths.fract() == 0.0 && eighths % 2.0 == 1.0
}

/// What the result area shows. Derived purely from the current result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultView {
    pub yield_text: Option<String>,
    pub recommendations: Option<Vec<String>>,
}

impl ResultView {
    pub fn from_result(result: Option<&PredictionResult>) -> Self {
        let Some(result) = result else {
            return Self::default();
        };

        Self {
            yield_text: result.predicted_yield.map(format_yield),
            recommendations: (!result.recommendations.is_empty())
                .then(|| result.recommendations.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.yield_text.is_none() && self.recommendations.is_none()
    }

    pub fn panel_count(&self) -> usize {
        usize::from(self.yield_text.is_some()) + usize::from(self.recommendations.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(predicted_yield: Option<f64>, recommendations: &[&str]) -> PredictionResult {
        PredictionResult {
            predicted_yield,
            recommendations: recommendations.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn formats_yield_with_two_decimals_and_unit() {
        assert_eq!(format_yield(4523.7), "4523.70 kg/ha");
        assert_eq!(format_yield(0.0), "0.00 kg/ha");
        assert_eq!(format_yield(2999.999), "3000.00 kg/ha");
    }

    #[test]
    fn yield_ties_round_away_from_zero() {
        assert_eq!(format_yield(4523.125), "4523.13 kg/ha");
        assert_eq!(format_yield(0.125), "0.13 kg/ha");
        assert_eq!(format_yield(0.375), "0.38 kg/ha");
        assert_eq!(format_yield(-0.125), "-0.13 kg/ha");
        // 1.005 is stored just below the tie.
        assert_eq!(format_yield(1.005), "1.00 kg/ha");
        assert_eq!(format_yield(2.5), "2.50 kg/ha");
        assert_eq!(format_yield(-0.0), "0.00 kg/ha");
    }

    #[test]
    fn empty_result_renders_no_panels() {
        let view = ResultView::from_result(Some(&result(None, &[])));
        assert!(view.is_empty());
        assert_eq!(view.panel_count(), 0);
        assert!(ResultView::from_result(None).is_empty());
    }

    #[test]
    fn panels_are_independent() {
        let only_yield = ResultView::from_result(Some(&result(Some(12.0), &[])));
        assert_eq!(only_yield.panel_count(), 1);
        assert_eq!(only_yield.yield_text.as_deref(), Some("12.00 kg/ha"));
        assert_eq!(only_yield.recommendations, None);

        let only_recs = ResultView::from_result(Some(&result(None, &["Mulch", "Weed"])));
        assert_eq!(only_recs.panel_count(), 1);
        assert_eq!(only_recs.yield_text, None);
        assert_eq!(
            only_recs.recommendations,
            Some(vec!["Mulch".to_string(), "Weed".to_string()])
        );

        let both = ResultView::from_result(Some(&result(Some(1.5), &["Mulch"])));
        assert_eq!(both.panel_count(), 2);
    }
}
