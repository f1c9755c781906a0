//! Layering of YAML configuration files.
//!
//! - Mappings are merged recursively
//! - Sequences and scalars in the overlay replace the base value
//! - A `null` in the overlay removes the key from the base

use serde_yaml::Value;

/// Merge `overlay` on top of `base`.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    let (Value::Mapping(base_map), Value::Mapping(overlay_map)) = (base, overlay) else {
        return overlay.clone();
    };

    let mut merged = base_map.clone();
    for (key, value) in overlay_map {
        if value.is_null() {
            merged.remove(key);
            continue;
        }
        let next = match base_map.get(key) {
            Some(existing) => deep_merge(existing, value),
            None => value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    Value::Mapping(merged)
}

/// Merge config layers in order; later layers win.
///
/// An empty file parses to `null` and leaves the result unchanged.
pub fn merge_configs(layers: &[Value]) -> Value {
    layers
        .iter()
        .filter(|layer| !layer.is_null())
        .fold(Value::Mapping(Default::default()), |acc, layer| {
            deep_merge(&acc, layer)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn interpreters_merge_per_extension() {
        let user = yaml("interpreters:\n  py: [python3.11]\n  rb: [ruby]\n");
        let project = yaml("interpreters:\n  py: [uv, run, python]\n");

        let merged = deep_merge(&user, &project);

        assert_eq!(merged["interpreters"]["py"][0], "uv");
        assert_eq!(merged["interpreters"]["rb"][0], "ruby");
    }

    #[test]
    fn package_paths_are_replaced() {
        let user = yaml("package_paths: [/opt/a, /opt/b]\n");
        let project = yaml("package_paths: [envs]\n");

        let merged = deep_merge(&user, &project);
        let paths = merged["package_paths"].as_sequence().unwrap();

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0], "envs");
    }

    #[test]
    fn null_removes_inherited_interpreter() {
        let user = yaml("interpreters:\n  rb: [ruby]\n  js: [node]\n");
        let local = yaml("interpreters:\n  rb: null\n");

        let merged = deep_merge(&user, &local);

        assert!(merged["interpreters"].get("rb").is_none());
        assert_eq!(merged["interpreters"]["js"][0], "node");
    }

    #[test]
    fn scalar_overlay_replaces_mapping() {
        let merged = deep_merge(&yaml("a: {b: 1}"), &yaml("a: 2"));
        assert_eq!(merged["a"], 2);
    }

    #[test]
    fn merge_configs_applies_layers_in_order() {
        let layers = vec![
            yaml("run_executables: true\npackage_paths: [a]"),
            Value::Null,
            yaml("run_executables: false"),
        ];

        let merged = merge_configs(&layers);

        assert_eq!(merged["run_executables"], false);
        assert_eq!(merged["package_paths"][0], "a");
    }

    #[test]
    fn merge_configs_of_nothing_is_empty_mapping() {
        assert_eq!(merge_configs(&[]), Value::Mapping(Default::default()));
    }
}
