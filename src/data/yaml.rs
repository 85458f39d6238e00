//! YAML emission with literal-block multiline strings.
//!
//! `serde_yaml` quote-escapes multiline strings; commit messages read much
//! better as literal blocks, so values are re-emitted through the
//! yaml-rust emitter with multiline strings enabled.

use anyhow::{Context, Result};
use serde::Serialize;
use yaml_rust_davvid::{Yaml, YamlEmitter};

/// Serializes a value to YAML, rendering multiline strings as literal
/// blocks.
pub fn to_yaml<T: Serialize>(data: &T) -> Result<String> {
    let value = serde_yaml::to_value(data).context("Failed to serialize to YAML value")?;
    let yaml = convert(&value);

    let mut output = String::new();
    let mut emitter = YamlEmitter::new(&mut output);
    emitter.multiline_strings(true);
    emitter.dump(&yaml).context("Failed to emit YAML")?;

    Ok(output)
}

fn convert(value: &serde_yaml::Value) -> Yaml {
    match value {
        serde_yaml::Value::Null => Yaml::Null,
        serde_yaml::Value::Bool(b) => Yaml::Boolean(*b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Yaml::Integer(i)
            } else {
                Yaml::Real(n.to_string())
            }
        }
        serde_yaml::Value::String(s) => Yaml::String(s.clone()),
        serde_yaml::Value::Sequence(seq) => Yaml::Array(seq.iter().map(convert).collect()),
        serde_yaml::Value::Mapping(map) => {
            let mut hash = yaml_rust_davvid::yaml::Hash::new();
            for (key, val) in map {
                hash.insert(convert(key), convert(val));
            }
            Yaml::Hash(hash)
        }
        serde_yaml::Value::Tagged(tagged) => convert(&tagged.value),
    }
}
