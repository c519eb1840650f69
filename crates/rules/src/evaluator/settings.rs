//! Evaluator settings: mandatory signal fields and accepted value kinds.

use tripwire_core::{EngineConfig, TripwireError};

use crate::schema::{ValueKind, SIGNAL_FIELD, VALUE_FIELD, VALUE_TYPE_FIELD};

/// Externally configured checks applied to every signal.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatorSettings {
    /// Fields a record must carry. Always includes `signal`, `value_type`, `value`.
    pub mandatory_fields: Vec<String>,
    /// Kinds a signal may declare; others are ignored without a report.
    pub allowed_kinds: Vec<ValueKind>,
}

impl Default for EvaluatorSettings {
    fn default() -> Self {
        Self {
            mandatory_fields: vec![
                SIGNAL_FIELD.to_string(),
                VALUE_TYPE_FIELD.to_string(),
                VALUE_FIELD.to_string(),
            ],
            allowed_kinds: ValueKind::ALL.to_vec(),
        }
    }
}

impl EvaluatorSettings {
    /// Build settings from the engine config.
    ///
    /// Core fields are added if the config leaves them out. An unknown value
    /// type label is a configuration error.
    pub fn from_config(config: &EngineConfig) -> tripwire_core::Result<Self> {
        let mut mandatory_fields = Self::default().mandatory_fields;
        for field in &config.mandatory_signal_fields {
            if !mandatory_fields.contains(field) {
                mandatory_fields.push(field.clone());
            }
        }

        let allowed_kinds = config
            .allowed_value_types
            .iter()
            .map(|label| {
                label.parse::<ValueKind>().map_err(|e| {
                    TripwireError::Config(format!("ALLOWED_SIGNAL_VALUE_TYPES: {}", e))
                })
            })
            .collect::<tripwire_core::Result<Vec<_>>>()?;

        Ok(Self {
            mandatory_fields,
            allowed_kinds,
        })
    }

    pub fn allows(&self, kind: ValueKind) -> bool {
        self.allowed_kinds.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_core_fields_and_all_kinds() {
        let settings = EvaluatorSettings::default();
        assert_eq!(settings.mandatory_fields, vec!["signal", "value_type", "value"]);
        assert!(ValueKind::ALL.iter().all(|k| settings.allows(*k)));
    }

    #[test]
    fn from_config_merges_extra_fields() {
        let config = EngineConfig {
            mandatory_signal_fields: vec!["value".into(), "source".into()],
            allowed_value_types: vec!["Integer".into()],
            ..EngineConfig::default()
        };
        let settings = EvaluatorSettings::from_config(&config).unwrap();
        assert_eq!(
            settings.mandatory_fields,
            vec!["signal", "value_type", "value", "source"]
        );
        assert_eq!(settings.allowed_kinds, vec![ValueKind::Numeric]);
        assert!(!settings.allows(ValueKind::String));
    }

    #[test]
    fn from_config_rejects_unknown_kind_label() {
        let config = EngineConfig {
            allowed_value_types: vec!["Integer".into(), "Float".into()],
            ..EngineConfig::default()
        };
        let err = EvaluatorSettings::from_config(&config).unwrap_err();
        assert!(matches!(err, TripwireError::Config(ref m) if m.contains("Float")));
    }
}
