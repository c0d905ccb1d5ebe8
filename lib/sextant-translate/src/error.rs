use sextant_wire::ValueType;
use snafu::Snafu;

/// Translation errors.
///
/// All errors are local to the metric being translated: the caller decides whether to skip the metric, log, or abort
/// the export cycle.
#[derive(Debug, Snafu)]
#[snafu(context(suffix(false)), visibility(pub(crate)))]
pub enum TranslateError {
    /// The resolved value type cannot be encoded.
    ///
    /// Raised for descriptor types with no backend value type, such as summaries.
    #[snafu(display("unsupported value type '{}'", value_type))]
    UnsupportedValueType {
        /// The resolved value type.
        value_type: ValueType,
    },

    /// A point value does not match the value type resolved from its descriptor.
    #[snafu(display("expected {} point value, got {} value instead", expected, actual))]
    MismatchedValue {
        /// The resolved value type.
        expected: ValueType,

        /// The kind of value the point actually holds.
        actual: &'static str,
    },

    /// A time series does not carry exactly one label value per descriptor label key.
    #[snafu(display(
        "time series has {} label value(s) but descriptor declares {} label key(s)",
        actual,
        expected
    ))]
    LabelArityMismatch {
        /// Number of label keys declared by the descriptor.
        expected: usize,

        /// Number of label values carried by the time series.
        actual: usize,
    },

    /// A distribution does not carry exactly one more bucket than it has explicit bounds.
    #[snafu(display(
        "distribution has {} bucket(s) but {} explicit bound(s), expected one more bucket than bounds",
        buckets,
        bounds
    ))]
    InvalidBucketLayout {
        /// Number of explicit bucket bounds.
        bounds: usize,

        /// Number of buckets.
        buckets: usize,
    },

    /// A descriptor declares a label key reserved for the process identity label.
    #[snafu(display("label key '{}' is reserved for the process identity label", key))]
    IdentityLabelCollision {
        /// The reserved key.
        key: String,
    },

    /// A timestamp is outside of the range the backend accepts.
    #[snafu(display("invalid timestamp: seconds={} nanos={}", seconds, nanos))]
    InvalidTimestamp {
        /// Whole seconds since the Unix epoch.
        seconds: i64,

        /// Nanoseconds.
        nanos: i64,
    },
}
