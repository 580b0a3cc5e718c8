#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    /// No feature carried a numeric value for the expressed attribute.
    EmptySample,
    /// The class list does not match the classification's required arity.
    ClassArity {
        classification: &'static str,
        expected: usize,
        got: usize,
    },
    /// A class value could not be coerced to a number where one is required.
    NonNumericClass(String),
    /// Unclassed range endpoints must both be numbers or both be colors.
    MixedClassKinds,
    /// A color class value could not be parsed as a hex color.
    InvalidColor(String),
    /// The user-defined classification was selected without breakpoints.
    BreaksRequired,
}

impl std::fmt::Display for ClassificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassificationError::EmptySample => {
                write!(f, "no numeric data for the expressed attribute")
            }
            ClassificationError::ClassArity {
                classification,
                expected,
                got,
            } => write!(
                f,
                "{classification} classification expects {expected} class values, got {got}"
            ),
            ClassificationError::NonNumericClass(v) => {
                write!(f, "class value {v:?} is not numeric")
            }
            ClassificationError::MixedClassKinds => {
                write!(f, "unclassed range mixes numeric and color endpoints")
            }
            ClassificationError::InvalidColor(v) => {
                write!(f, "class value {v:?} is not a hex color")
            }
            ClassificationError::BreaksRequired => {
                write!(f, "user-defined classification requires explicit breaks")
            }
        }
    }
}

impl std::error::Error for ClassificationError {}
