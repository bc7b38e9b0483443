//! Moment report printed after the analysis.

use crate::stats::Moments;

pub struct Reporter;

impl Reporter {
    pub fn skew_interpretation(skewness: f64) -> &'static str {
        if skewness > 0.0 {
            "right-skewed"
        } else if skewness < 0.0 {
            "left-skewed"
        } else {
            "symmetric"
        }
    }

    pub fn kurtosis_interpretation(excess_kurtosis: f64) -> &'static str {
        if excess_kurtosis > 0.0 {
            "leptokurtic (peaked)"
        } else if excess_kurtosis < 0.0 {
            "platykurtic (flat)"
        } else {
            "mesokurtic (normal)"
        }
    }

    /// Render the moments of `column` with a two-decimal layout.
    pub fn format(moments: &Moments, column: &str) -> String {
        format!(
            "\nFor the attribute \"{column}\":\n  \
             Mean = {:.2}\n  \
             Standard Deviation = {:.2}\n  \
             Skewness = {:.2}\n  \
             Excess Kurtosis = {:.2}\n  \
             The data is {} and {}.\n",
            moments.mean,
            moments.std_dev,
            moments.skewness,
            moments.excess_kurtosis,
            Self::skew_interpretation(moments.skewness),
            Self::kurtosis_interpretation(moments.excess_kurtosis),
        )
    }

    pub fn print(moments: &Moments, column: &str) {
        println!("{}", Self::format(moments, column));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_layout() {
        let moments = Moments {
            mean: 3.0,
            std_dev: 1.58113,
            skewness: 0.0,
            excess_kurtosis: -1.3,
        };
        let text = Reporter::format(&moments, "A");
        assert_eq!(
            text,
            "\nFor the attribute \"A\":\n  Mean = 3.00\n  Standard Deviation = 1.58\n  \
             Skewness = 0.00\n  Excess Kurtosis = -1.30\n  \
             The data is symmetric and platykurtic (flat).\n"
        );
    }

    #[test]
    fn constant_column_report() {
        let moments = Moments {
            mean: 2.0,
            std_dev: 0.0,
            skewness: f64::NAN,
            excess_kurtosis: f64::NAN,
        };
        let text = Reporter::format(&moments, "Cylinders");
        assert!(text.starts_with("\nFor the attribute \"Cylinders\":\n  Mean = 2.00\n"));
        assert!(text.contains("  Skewness = NaN\n  Excess Kurtosis = NaN\n"));
        assert!(text.ends_with("The data is symmetric and mesokurtic (normal).\n"));
    }

    #[test]
    fn interpretations() {
        assert_eq!(Reporter::skew_interpretation(0.4), "right-skewed");
        assert_eq!(Reporter::skew_interpretation(-0.4), "left-skewed");
        assert_eq!(Reporter::kurtosis_interpretation(1.0), "leptokurtic (peaked)");
        assert_eq!(Reporter::kurtosis_interpretation(0.0), "mesokurtic (normal)");
        // NaN compares false both ways
        assert_eq!(Reporter::skew_interpretation(f64::NAN), "symmetric");
    }
}
