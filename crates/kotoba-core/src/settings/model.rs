//! Generation settings domain model.

use serde::{Deserialize, Serialize};

/// User-adjustable settings governing AI text generation.
///
/// A flat value object with no identity: loading and resetting replace the
/// whole record. Every field is bounded; see the `*_in_range` helpers for
/// the exact ranges.
///
/// Serialized as camelCase JSON (`maxOutputTokens`, `topP`, `topK`) to match
/// the persisted record shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    /// Sampling temperature, in `[0, 2]`.
    pub temperature: f64,
    /// Maximum tokens generated per response, in `(0, 8192]`.
    pub max_output_tokens: u32,
    /// Nucleus sampling probability mass, in `[0, 1]`.
    pub top_p: f64,
    /// Top-k sampling cutoff, in `[1, 100]`.
    pub top_k: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.6,
            max_output_tokens: 2000,
            top_p: 0.8,
            top_k: 40,
        }
    }
}

impl GenerationSettings {
    /// Returns true if `value` is a valid temperature.
    pub fn temperature_in_range(value: f64) -> bool {
        (0.0..=2.0).contains(&value)
    }

    /// Returns true if `value` is a valid output token limit.
    pub fn max_output_tokens_in_range(value: u32) -> bool {
        value > 0 && value <= 8192
    }

    /// Returns true if `value` is a valid top-p.
    pub fn top_p_in_range(value: f64) -> bool {
        (0.0..=1.0).contains(&value)
    }

    /// Returns true if `value` is a valid top-k.
    pub fn top_k_in_range(value: u32) -> bool {
        (1..=100).contains(&value)
    }

    /// Returns true if every field is within its documented range.
    ///
    /// Validation is all-or-nothing: a record with a single out-of-range
    /// field is invalid as a whole.
    pub fn is_valid(&self) -> bool {
        Self::temperature_in_range(self.temperature)
            && Self::max_output_tokens_in_range(self.max_output_tokens)
            && Self::top_p_in_range(self.top_p)
            && Self::top_k_in_range(self.top_k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GenerationSettings::default().is_valid());
    }

    #[test]
    fn test_single_out_of_range_field_invalidates_record() {
        let settings = GenerationSettings {
            temperature: 3.0,
            ..Default::default()
        };
        assert!(!settings.is_valid());
    }

    #[test]
    fn test_range_boundaries() {
        assert!(GenerationSettings::temperature_in_range(0.0));
        assert!(GenerationSettings::temperature_in_range(2.0));
        assert!(!GenerationSettings::temperature_in_range(2.1));
        assert!(!GenerationSettings::max_output_tokens_in_range(0));
        assert!(GenerationSettings::max_output_tokens_in_range(8192));
        assert!(!GenerationSettings::max_output_tokens_in_range(8193));
        assert!(GenerationSettings::top_p_in_range(1.0));
        assert!(!GenerationSettings::top_p_in_range(1.01));
        assert!(!GenerationSettings::top_k_in_range(0));
        assert!(GenerationSettings::top_k_in_range(100));
        assert!(!GenerationSettings::top_k_in_range(101));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&GenerationSettings::default()).unwrap();
        assert!(json.contains("\"maxOutputTokens\":2000"));
        assert!(json.contains("\"topP\":0.8"));
        assert!(json.contains("\"topK\":40"));
    }

    #[test]
    fn test_deserialization_requires_all_fields() {
        let partial = r#"{"temperature":0.5,"topP":0.8,"topK":40}"#;
        assert!(serde_json::from_str::<GenerationSettings>(partial).is_err());
    }
}
