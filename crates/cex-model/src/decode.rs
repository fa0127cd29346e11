//! Descriptor decoding: label set -> typed processor and artifact configuration.
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    ArtifactDescriptor, LABEL_MESSAGE, LABEL_PROCESSOR, Labels, ModelError, ModelResult,
    ProcessorSpec,
};

/// Typed configuration carried by a task's labels.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDescriptor {
    pub processor: ProcessorSpec,
    pub message: ArtifactDescriptor,
}

/// Decode both embedded documents from a label set.
///
/// The `processor` label is checked before `message`, so a task missing both
/// reports `MissingField("processor")`. Repeated keys resolve to the first
/// occurrence.
pub fn decode_descriptor(labels: &Labels) -> ModelResult<TaskDescriptor> {
    let processor = decode_processor(labels)?;
    let message = decode_message(labels)?;
    Ok(TaskDescriptor { processor, message })
}

/// Decode and validate the `processor` label.
pub fn decode_processor(labels: &Labels) -> ModelResult<ProcessorSpec> {
    let spec: ProcessorSpec = decode_label(labels, LABEL_PROCESSOR)?;
    spec.validate().map_err(|e| match e {
        ModelError::Invalid(reason) => ModelError::MalformedDescriptor {
            field: LABEL_PROCESSOR,
            reason,
        },
        other => other,
    })?;
    Ok(spec)
}

/// Decode the `message` label.
pub fn decode_message(labels: &Labels) -> ModelResult<ArtifactDescriptor> {
    decode_label(labels, LABEL_MESSAGE)
}

fn decode_label<T: DeserializeOwned>(labels: &Labels, key: &'static str) -> ModelResult<T> {
    let raw = labels
        .first(key)
        .filter(|v| !v.is_empty())
        .ok_or(ModelError::MissingField(key))?;

    let malformed = |reason: String| ModelError::MalformedDescriptor { field: key, reason };

    // Derived struct decoders also accept positional arrays.
    let value: Value = serde_json::from_str(raw).map_err(|e| malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(malformed("expected a JSON object".into()));
    }
    serde_json::from_value(value).map_err(|e| malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FailureReason;

    const PROCESSOR: &str = r#"{"docker":"alpine","mem":128,"volumes":[],"env":[]}"#;
    const MESSAGE: &str = r#"{"locations":[{"url":"file:///tmp/in.txt","type":"ingest"}]}"#;

    fn labels(pairs: &[(&str, &str)]) -> Labels {
        pairs.iter().copied().collect()
    }

    #[test]
    fn decodes_both_documents() {
        let d = decode_descriptor(&labels(&[("processor", PROCESSOR), ("message", MESSAGE)]))
            .unwrap();
        assert_eq!(d.processor.image, "alpine");
        assert_eq!(d.processor.memory_mb, 128);
        assert_eq!(d.message.locations.len(), 1);
    }

    #[test]
    fn processor_is_checked_first() {
        let err = decode_descriptor(&Labels::new()).unwrap_err();
        assert!(matches!(err, ModelError::MissingField("processor")), "{err:?}");
    }

    #[test]
    fn empty_message_is_missing() {
        let err = decode_descriptor(&labels(&[("processor", PROCESSOR), ("message", "")]))
            .unwrap_err();
        assert!(matches!(err, ModelError::MissingField("message")), "{err:?}");
        assert_eq!(err.reason(), FailureReason::MissingField);
    }

    #[test]
    fn first_occurrence_wins() {
        let d = decode_descriptor(&labels(&[
            ("processor", PROCESSOR),
            ("processor", r#"{"docker":"busybox","mem":1}"#),
            ("message", MESSAGE),
        ]))
        .unwrap();
        assert_eq!(d.processor.image, "alpine");
    }

    #[test]
    fn malformed_json_carries_diagnostic() {
        let err = decode_descriptor(&labels(&[("processor", "{not json"), ("message", MESSAGE)]))
            .unwrap_err();
        match err {
            ModelError::MalformedDescriptor { field, reason } => {
                assert_eq!(field, "processor");
                assert!(!reason.is_empty());
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn mistyped_field_is_malformed() {
        let err = decode_descriptor(&labels(&[
            ("processor", r#"{"docker":"alpine","mem":"lots"}"#),
            ("message", MESSAGE),
        ]))
        .unwrap_err();
        assert_eq!(err.reason(), FailureReason::MalformedDescriptor);
    }

    #[test]
    fn validation_failure_is_malformed_processor() {
        let err = decode_descriptor(&labels(&[
            ("processor", r#"{"docker":"","mem":1}"#),
            ("message", MESSAGE),
        ]))
        .unwrap_err();
        assert!(
            matches!(err, ModelError::MalformedDescriptor { field: "processor", .. }),
            "{err:?}"
        );
    }

    #[test]
    fn malformed_message_names_the_field() {
        let err = decode_descriptor(&labels(&[("processor", PROCESSOR), ("message", "[]")]))
            .unwrap_err();
        assert!(
            matches!(err, ModelError::MalformedDescriptor { field: "message", .. }),
            "{err:?}"
        );

        let err = decode_descriptor(&labels(&[
            ("processor", PROCESSOR),
            ("message", "[{}, []]"),
        ]))
        .unwrap_err();
        assert_eq!(err.reason(), FailureReason::MalformedDescriptor);
    }

    #[test]
    fn positional_processor_array_is_malformed() {
        let err = decode_descriptor(&labels(&[
            ("processor", r#"["n","alpine",0.5,128]"#),
            ("message", MESSAGE),
        ]))
        .unwrap_err();
        match err {
            ModelError::MalformedDescriptor { field, reason } => {
                assert_eq!(field, "processor");
                assert_eq!(reason, "expected a JSON object");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn scalar_message_is_malformed() {
        let err = decode_message(&labels(&[("message", "42")])).unwrap_err();
        assert!(
            matches!(err, ModelError::MalformedDescriptor { field: "message", .. }),
            "{err:?}"
        );
    }
}
