use crate::error::ExtractError;
use jsonschema::JSONSchema;
use serde_json::Value;
use std::path::Path;

pub const BUILTIN_POLICY_SCHEMA: &str = include_str!("../../assets/policy_rules.schema.json");

/// Compiled policy-rules schema, loaded once at startup and shared by the
/// strict stage and the post-repair validation.
pub struct SchemaStore {
    compiled: JSONSchema,
}

impl SchemaStore {
    pub fn from_value(schema: &Value) -> Result<Self, ExtractError> {
        let compiled =
            JSONSchema::compile(schema).map_err(|e| ExtractError::SchemaLoad(e.to_string()))?;
        Ok(Self { compiled })
    }

    pub fn builtin() -> Result<Self, ExtractError> {
        let schema: Value = serde_json::from_str(BUILTIN_POLICY_SCHEMA)
            .map_err(|e| ExtractError::SchemaLoad(format!("built-in schema: {e}")))?;
        Self::from_value(&schema)
    }

    pub fn load(path: &Path) -> Result<Self, ExtractError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ExtractError::SchemaLoad(format!("{}: {e}", path.display())))?;
        let schema: Value = serde_json::from_str(&raw)
            .map_err(|e| ExtractError::SchemaLoad(format!("{}: {e}", path.display())))?;
        Self::from_value(&schema)
    }

    pub fn validate(&self, instance: &Value) -> Result<(), ExtractError> {
        let msgs: Vec<String> = match self.compiled.validate(instance) {
            Ok(()) => return Ok(()),
            Err(errors) => errors
                .map(|e| {
                    let at = e.instance_path.to_string();
                    if at.is_empty() {
                        e.to_string()
                    } else {
                        format!("{at}: {e}")
                    }
                })
                .collect(),
        };
        Err(ExtractError::Schema {
            detail: msgs.join(" | "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::SchemaStore;
    use crate::error::ExtractError;
    use serde_json::json;

    #[test]
    fn builtin_schema_accepts_a_well_formed_policy() {
        let store = SchemaStore::builtin().expect("compile built-in schema");
        let policy = json!({
            "policy_name": "Acceptable Use Policy",
            "controls": [
                {"id": "C1", "text": "no sharing"},
                {"id": "C2", "text": "MFA for remote access", "severity": "high", "applies_to": ["all staff"]}
            ]
        });
        assert!(store.validate(&policy).is_ok());
    }

    #[test]
    fn missing_policy_name_is_reported() {
        let store = SchemaStore::builtin().expect("compile built-in schema");
        let policy = json!({
            "Acceptable Use Policy": "desc",
            "controls": [{"id": "C1", "text": "no sharing"}]
        });
        match store.validate(&policy) {
            Err(ExtractError::Schema { detail }) => assert!(detail.contains("policy_name")),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn nested_violations_name_the_instance_path() {
        let store = SchemaStore::builtin().expect("compile built-in schema");
        let policy = json!({
            "policy_name": "P",
            "controls": [{"id": "C1", "text": "ok", "severity": "critical"}]
        });
        match store.validate(&policy) {
            Err(ExtractError::Schema { detail }) => {
                assert!(detail.contains("/controls/0/severity"), "{detail}")
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn empty_controls_are_rejected() {
        let store = SchemaStore::builtin().expect("compile built-in schema");
        let policy = json!({"policy_name": "P", "controls": []});
        assert!(store.validate(&policy).is_err());
    }

    #[test]
    fn uncompilable_schema_is_a_load_error() {
        let res = SchemaStore::from_value(&json!({"type": 12}));
        assert!(matches!(res, Err(ExtractError::SchemaLoad(_))));
    }

    #[test]
    fn missing_schema_file_is_a_load_error() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let res = SchemaStore::load(&tmp.path().join("absent.json"));
        assert!(matches!(res, Err(ExtractError::SchemaLoad(_))));
    }
}
