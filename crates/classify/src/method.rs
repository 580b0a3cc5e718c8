use serde::{Deserialize, Serialize};

use crate::ckmeans;
use crate::error::ClassificationError;
use crate::sample::AttributeSample;
use crate::scale::{ClassValue, ClassedScale, LinearScale, Scale};

/// Classification scheme selected at layer-setup time. Names mirror the
/// configuration document strings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "quantile")]
    Quantile,
    #[serde(rename = "equal interval", alias = "equal-interval")]
    EqualInterval,
    #[serde(rename = "natural breaks", alias = "natural-breaks")]
    NaturalBreaks,
    #[serde(rename = "unclassed")]
    Unclassed,
    #[serde(rename = "user defined", alias = "user-defined")]
    UserDefined,
}

impl Classification {
    pub fn name(&self) -> &'static str {
        match self {
            Classification::Quantile => "quantile",
            Classification::EqualInterval => "equal interval",
            Classification::NaturalBreaks => "natural breaks",
            Classification::Unclassed => "unclassed",
            Classification::UserDefined => "user defined",
        }
    }

    /// Builds the value-to-output scale for this scheme. `classes` is the
    /// ordered output list: one entry per class, or exactly two range
    /// endpoints for the unclassed scheme. The user-defined scheme carries
    /// its own breakpoints and goes through `user_defined_scale`.
    pub fn build_scale(
        &self,
        sample: &AttributeSample,
        classes: &[ClassValue],
    ) -> Result<Scale, ClassificationError> {
        let (min, max) = domain_of(self.name(), sample, classes)?;

        match self {
            Classification::Quantile => {
                if min == max {
                    return Ok(constant_scale(classes, (min, max)));
                }
                let n = classes.len();
                let values = sample.values();
                let breaks = (1..n)
                    .map(|k| quantile_break(values, k, n))
                    .collect();
                Ok(Scale::Classed(ClassedScale::new(
                    breaks,
                    classes.to_vec(),
                    (min, max),
                )))
            }
            Classification::EqualInterval => {
                if min == max {
                    return Ok(constant_scale(classes, (min, max)));
                }
                let n = classes.len();
                let width = (max - min) / n as f64;
                let breaks = (1..n).map(|k| min + k as f64 * width).collect();
                Ok(Scale::Classed(ClassedScale::new(
                    breaks,
                    classes.to_vec(),
                    (min, max),
                )))
            }
            Classification::NaturalBreaks => {
                if min == max {
                    return Ok(constant_scale(classes, (min, max)));
                }
                let values = sample.values();
                let starts = ckmeans::cluster_starts(values, classes.len());
                // Breaks are the cluster minimums with the first (global
                // minimum) dropped. Tiny samples yield fewer clusters than
                // classes; trailing breaks repeat the maximum to keep the
                // partition total.
                let mut breaks: Vec<f64> =
                    starts.iter().skip(1).map(|&i| values[i]).collect();
                breaks.resize(classes.len() - 1, max);
                Ok(Scale::Classed(ClassedScale::new(
                    breaks,
                    classes.to_vec(),
                    (min, max),
                )))
            }
            Classification::Unclassed => {
                if classes.len() != 2 {
                    return Err(ClassificationError::ClassArity {
                        classification: self.name(),
                        expected: 2,
                        got: classes.len(),
                    });
                }
                let scale = LinearScale::new((min, max), &classes[0], &classes[1])?;
                Ok(Scale::Linear(scale))
            }
            Classification::UserDefined => Err(ClassificationError::BreaksRequired),
        }
    }
}

/// Classed scale from researcher-supplied breakpoints. Breaks are sorted
/// ascending; one more class than breaks is required.
pub fn user_defined_scale(
    sample: &AttributeSample,
    breaks: &[f64],
    classes: &[ClassValue],
) -> Result<Scale, ClassificationError> {
    let (min, max) = domain_of("user defined", sample, classes)?;
    if breaks.is_empty() {
        return Err(ClassificationError::BreaksRequired);
    }
    if classes.len() != breaks.len() + 1 {
        return Err(ClassificationError::ClassArity {
            classification: "user defined",
            expected: breaks.len() + 1,
            got: classes.len(),
        });
    }
    let mut breaks = breaks.to_vec();
    breaks.retain(|b| b.is_finite());
    if breaks.len() + 1 != classes.len() {
        return Err(ClassificationError::BreaksRequired);
    }
    breaks.sort_by(f64::total_cmp);
    Ok(Scale::Classed(ClassedScale::new(
        breaks,
        classes.to_vec(),
        (min, max),
    )))
}

fn domain_of(
    classification: &'static str,
    sample: &AttributeSample,
    classes: &[ClassValue],
) -> Result<(f64, f64), ClassificationError> {
    let (Some(min), Some(max)) = (sample.min(), sample.max()) else {
        return Err(ClassificationError::EmptySample);
    };
    if classes.is_empty() {
        return Err(ClassificationError::ClassArity {
            classification,
            expected: 1,
            got: 0,
        });
    }
    Ok((min, max))
}

/// Degenerate-domain fallback: every value lands in a single bucket holding
/// the first output.
fn constant_scale(classes: &[ClassValue], domain: (f64, f64)) -> Scale {
    Scale::Classed(ClassedScale::new(
        Vec::new(),
        vec![classes[0].clone()],
        domain,
    ))
}

/// Boundary `k` of `n` quantile classes over an ascending-sorted sample:
/// the sample value at quantile `k/n`. A run of tied values never splits
/// across the boundary; ties stay in the lower class, so the boundary
/// advances past the run.
fn quantile_break(sorted: &[f64], k: usize, n: usize) -> f64 {
    let len = sorted.len();
    let mut idx = (k * len) / n;
    while idx > 0 && idx < len && sorted[idx] == sorted[idx - 1] {
        idx += 1;
    }
    sorted[idx.min(len - 1)]
}
