use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sextant_identity::ProcessIdentity;
use sextant_model::{LabelKey, LabelValue};
use sextant_wire::LabelDescriptor;
use tracing::debug;

use crate::error::{IdentityLabelCollision, LabelArityMismatch, TranslateError};

/// Key of the label identifying the process that produced a time series.
pub const OPENCENSUS_TASK: &str = "opencensus_task";

/// Description of the process identity label.
pub const OPENCENSUS_TASK_DESCRIPTION: &str = "Opencensus task identifier";

/// What to do when a descriptor declares a label under the process identity label key.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelCollisionPolicy {
    /// The identity label replaces the descriptor's label.
    #[default]
    Overwrite,

    /// The descriptor is rejected with [`TranslateError::IdentityLabelCollision`].
    Reject,
}

/// Converts positional label values into a label map keyed by label key.
///
/// `values[i]` is stored under `keys[i]`; absent values are left out of the map. When a key is declared more than once,
/// the last present value is kept. The process identity label is always set last, under [`OPENCENSUS_TASK`].
///
/// # Errors
///
/// If the number of values differs from the number of keys, [`TranslateError::LabelArityMismatch`] is returned. If a
/// key collides with the identity label key and `policy` is [`LabelCollisionPolicy::Reject`],
/// [`TranslateError::IdentityLabelCollision`] is returned.
pub fn translate_labels(
    keys: &[LabelKey], values: &[LabelValue], identity: &ProcessIdentity, policy: LabelCollisionPolicy,
) -> Result<BTreeMap<String, String>, TranslateError> {
    if keys.len() != values.len() {
        return LabelArityMismatch {
            expected: keys.len(),
            actual: values.len(),
        }
        .fail();
    }

    check_identity_collision(keys, policy)?;

    let mut labels = BTreeMap::new();
    for (key, value) in keys.iter().zip(values) {
        let Some(value) = value.value() else {
            continue;
        };

        if labels.insert(key.key().to_string(), value.to_string()).is_some() {
            debug!(
                key = key.key(),
                "Descriptor declares the same label key more than once. Last value takes precedence."
            );
        }
    }
    labels.insert(OPENCENSUS_TASK.to_string(), identity.as_str().to_string());

    Ok(labels)
}

/// Checks the given label keys against the identity label key.
pub(crate) fn check_identity_collision(keys: &[LabelKey], policy: LabelCollisionPolicy) -> Result<(), TranslateError> {
    if !keys.iter().any(|key| key.key() == OPENCENSUS_TASK) {
        return Ok(());
    }

    match policy {
        LabelCollisionPolicy::Overwrite => {
            debug!(
                key = OPENCENSUS_TASK,
                "Descriptor declares the identity label key. Identity label takes precedence."
            );
            Ok(())
        }
        LabelCollisionPolicy::Reject => IdentityLabelCollision { key: OPENCENSUS_TASK }.fail(),
    }
}

/// Returns the descriptor for the process identity label.
pub(crate) fn identity_label_descriptor() -> LabelDescriptor {
    LabelDescriptor::string(OPENCENSUS_TASK, OPENCENSUS_TASK_DESCRIPTION)
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    fn identity() -> ProcessIdentity {
        ProcessIdentity::fixed("rust-1@test-host")
    }

    fn keys(names: &[&str]) -> Vec<LabelKey> {
        names.iter().map(|name| LabelKey::new(*name, "")).collect()
    }

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn positional_mapping() {
        let labels = translate_labels(
            &keys(&["method", "status"]),
            &[LabelValue::new("GET"), LabelValue::new("200")],
            &identity(),
            LabelCollisionPolicy::Overwrite,
        )
        .unwrap();

        assert_eq!(
            labels,
            map(&[
                ("method", "GET"),
                ("status", "200"),
                (OPENCENSUS_TASK, "rust-1@test-host")
            ])
        );
    }

    #[test]
    fn absent_values_skipped() {
        let labels = translate_labels(
            &keys(&["method", "status"]),
            &[LabelValue::absent(), LabelValue::new("")],
            &identity(),
            LabelCollisionPolicy::Overwrite,
        )
        .unwrap();

        assert_eq!(labels, map(&[("status", ""), (OPENCENSUS_TASK, "rust-1@test-host")]));
    }

    #[test]
    fn duplicate_keys_keep_last_value() {
        let labels = translate_labels(
            &keys(&["method", "status", "method"]),
            &[LabelValue::new("GET"), LabelValue::new("200"), LabelValue::new("POST")],
            &identity(),
            LabelCollisionPolicy::Overwrite,
        )
        .unwrap();

        assert_eq!(
            labels,
            map(&[
                ("method", "POST"),
                ("status", "200"),
                (OPENCENSUS_TASK, "rust-1@test-host")
            ])
        );

        let labels = translate_labels(
            &keys(&["method", "method"]),
            &[LabelValue::new("GET"), LabelValue::absent()],
            &identity(),
            LabelCollisionPolicy::Overwrite,
        )
        .unwrap();

        assert_eq!(labels, map(&[("method", "GET"), (OPENCENSUS_TASK, "rust-1@test-host")]));
    }

    #[test]
    fn identity_label_always_present() {
        let labels = translate_labels(&[], &[], &identity(), LabelCollisionPolicy::Overwrite).unwrap();
        assert_eq!(labels, map(&[(OPENCENSUS_TASK, "rust-1@test-host")]));
    }

    #[test]
    fn arity_mismatch() {
        let too_few = translate_labels(
            &keys(&["a", "b"]),
            &[LabelValue::new("1")],
            &identity(),
            LabelCollisionPolicy::Overwrite,
        );
        assert!(matches!(
            too_few,
            Err(TranslateError::LabelArityMismatch { expected: 2, actual: 1 })
        ));

        let too_many = translate_labels(
            &keys(&["a"]),
            &[LabelValue::new("1"), LabelValue::new("2")],
            &identity(),
            LabelCollisionPolicy::Overwrite,
        );
        assert!(matches!(
            too_many,
            Err(TranslateError::LabelArityMismatch { expected: 1, actual: 2 })
        ));
    }

    #[test]
    fn collision_overwrite() {
        let labels = translate_labels(
            &keys(&[OPENCENSUS_TASK, "a"]),
            &[LabelValue::new("caller-supplied"), LabelValue::new("1")],
            &identity(),
            LabelCollisionPolicy::Overwrite,
        )
        .unwrap();

        assert_eq!(labels, map(&[("a", "1"), (OPENCENSUS_TASK, "rust-1@test-host")]));
    }

    #[test]
    fn collision_reject() {
        let result = translate_labels(
            &keys(&[OPENCENSUS_TASK]),
            &[LabelValue::new("caller-supplied")],
            &identity(),
            LabelCollisionPolicy::Reject,
        );

        match result {
            Err(TranslateError::IdentityLabelCollision { key }) => assert_eq!(key.as_str(), OPENCENSUS_TASK),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn reject_without_collision() {
        let labels = translate_labels(
            &keys(&["a"]),
            &[LabelValue::new("1")],
            &identity(),
            LabelCollisionPolicy::Reject,
        )
        .unwrap();

        assert_eq!(labels.len(), 2);
    }
}
