//! Sample-based type inference.

use json_typegen_shared::{Options, OutputMode, codegen};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::TypegenError;

/// Derives a type definition from one JSON sample.
pub trait TypeInferrer {
    /// File extension for the generated source, without the dot.
    fn extension(&self) -> &'static str;

    /// Infer a definition named `name` and return its source lines.
    fn infer(&self, name: &str, sample: &Value) -> Result<Vec<String>, TypegenError>;
}

/// TypeScript output through `json_typegen_shared`.
#[derive(Debug, Clone, Copy)]
pub struct TypeScriptInferrer {
    /// Emit object properties in alphabetical order.
    pub alphabetize: bool,
}

impl Default for TypeScriptInferrer {
    fn default() -> Self {
        Self { alphabetize: true }
    }
}

impl TypeInferrer for TypeScriptInferrer {
    fn extension(&self) -> &'static str {
        "ts"
    }

    fn infer(&self, name: &str, sample: &Value) -> Result<Vec<String>, TypegenError> {
        match sample {
            Value::Object(_) | Value::Array(_) => {}
            Value::Null => return Ok(Vec::new()),
            Value::Bool(_) => return Err(TypegenError::UnsupportedSample("boolean")),
            Value::Number(_) => return Err(TypegenError::UnsupportedSample("number")),
            Value::String(_) => return Err(TypegenError::UnsupportedSample("string")),
        }

        let sample = if self.alphabetize {
            alphabetize(sample.clone())
        } else {
            sample.clone()
        };
        let input =
            serde_json::to_string(&sample).map_err(|e| TypegenError::Inference(e.to_string()))?;

        let mut options = Options::default();
        options.output_mode = OutputMode::Typescript;

        let source = codegen(name, &input, options)
            .map_err(|e| TypegenError::Inference(e.to_string()))?;
        debug!("Inferred {} bytes of TypeScript for {}", source.len(), name);

        Ok(source.lines().map(String::from).collect())
    }
}

/// Rebuild every object in `value` with its keys in sorted order.
pub fn alphabetize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(k, v)| (k, alphabetize(v)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(alphabetize).collect()),
        other => other,
    }
}
