//! YAML merge operations
//!
//! This module provides the value-level merge strategies used when several
//! bundles contribute fragments of the same config file.
//!
//! ## Strategies
//!
//! - [`merge_replace_strings`]: fragment accumulation for theme descriptors
//!   and auxiliary config files. Flat documents concatenate, nested mappings
//!   recurse, every other value of the later fragment wins.
//! - [`merge_recursive_distinct`]: datagrid extraction. Mappings recurse,
//!   sequences append, scalars are replaced.
//! - [`overlay_top_level`]: a hand-authored override document replacing
//!   whole top-level keys.
//!
//! ## Flat documents
//!
//! A document is flat when every entry either holds a scalar value or sits
//! at a positional (integer) key. Two flat documents are concatenated the
//! way positional arrays are: string keys overwrite in place, positional
//! entries are appended and renumbered.

use log::{debug, warn};
use serde_yaml::{Mapping, Value as YamlValue};

/// Whether a value is a YAML scalar (string, number or boolean)
fn is_scalar(value: &YamlValue) -> bool {
    matches!(
        value,
        YamlValue::Bool(_) | YamlValue::Number(_) | YamlValue::String(_)
    )
}

/// Whether a mapping key is positional
fn is_positional_key(key: &YamlValue) -> bool {
    match key {
        YamlValue::Number(n) => n.is_u64() || n.is_i64(),
        _ => false,
    }
}

/// Whether `value` is a flat collection.
///
/// Sequences are always flat. A mapping is flat when each entry holds a
/// scalar or has a positional key. Anything that is not a collection is not
/// flat.
pub fn is_flat(value: &YamlValue) -> bool {
    match value {
        YamlValue::Sequence(_) => true,
        YamlValue::Mapping(map) => map
            .iter()
            .all(|(key, value)| is_scalar(value) || is_positional_key(key)),
        _ => false,
    }
}

/// Entries of a collection as `(key, value)` pairs, `None` for positional
/// entries.
fn entries(value: &YamlValue) -> Vec<(Option<YamlValue>, YamlValue)> {
    match value {
        YamlValue::Sequence(seq) => seq.iter().map(|v| (None, v.clone())).collect(),
        YamlValue::Mapping(map) => map
            .iter()
            .map(|(k, v)| {
                if is_positional_key(k) {
                    (None, v.clone())
                } else {
                    (Some(k.clone()), v.clone())
                }
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Concatenate two flat collections.
///
/// String keys of `source` overwrite the same key of `target` in place,
/// positional entries are appended. The result is a sequence when every
/// entry is positional, otherwise a mapping whose positional entries are
/// renumbered from zero.
pub fn concat_flat(target: &YamlValue, source: &YamlValue) -> YamlValue {
    let mut merged = entries(target);
    for (key, value) in entries(source) {
        match key {
            Some(key) => {
                if let Some(slot) = merged
                    .iter_mut()
                    .find(|(existing, _)| existing.as_ref() == Some(&key))
                {
                    slot.1 = value;
                } else {
                    merged.push((Some(key), value));
                }
            }
            None => merged.push((None, value)),
        }
    }

    if merged.iter().all(|(key, _)| key.is_none()) {
        return YamlValue::Sequence(merged.into_iter().map(|(_, v)| v).collect());
    }

    let mut map = Mapping::new();
    let mut position: u64 = 0;
    for (key, value) in merged {
        let key = key.unwrap_or_else(|| {
            let key = YamlValue::Number(position.into());
            position += 1;
            key
        });
        map.insert(key, value);
    }
    YamlValue::Mapping(map)
}

/// View any collection as a mapping, sequences keyed by position
fn as_mapping(value: &YamlValue) -> Mapping {
    match value {
        YamlValue::Mapping(map) => map.clone(),
        YamlValue::Sequence(seq) => seq
            .iter()
            .enumerate()
            .map(|(i, v)| (YamlValue::Number((i as u64).into()), v.clone()))
            .collect(),
        _ => Mapping::new(),
    }
}

/// Merge a config fragment into the accumulated document.
///
/// Both flat: [`concat_flat`]. Otherwise key by key: two mappings under the
/// same key merge recursively, any other value of `source` replaces the
/// one in `target`. Sequences under a key are replaced, not concatenated.
pub fn merge_replace_strings(target: &YamlValue, source: &YamlValue) -> YamlValue {
    if is_flat(target) && is_flat(source) {
        return concat_flat(target, source);
    }
    let YamlValue::Mapping(source_map) = source else {
        if !matches!(source, YamlValue::Sequence(_)) {
            return source.clone();
        }
        return concat_flat(target, source);
    };
    if !matches!(target, YamlValue::Mapping(_) | YamlValue::Sequence(_)) {
        return source.clone();
    }

    let mut merged = as_mapping(target);
    for (key, value) in source_map {
        let replacement = match merged.get(key) {
            Some(existing @ YamlValue::Mapping(_)) if value.is_mapping() => {
                merge_replace_strings(existing, value)
            }
            Some(existing) => {
                if existing != value {
                    debug!(
                        "Replacing {} at key {:?} with {}",
                        get_yaml_type_name(existing),
                        key,
                        get_yaml_type_name(value)
                    );
                }
                value.clone()
            }
            None => value.clone(),
        };
        merged.insert(key.clone(), replacement);
    }
    YamlValue::Mapping(merged)
}

/// Recursively merge `source` into `target`: mappings recurse, sequences
/// append, anything else is replaced.
///
/// `path` is the dotted location used in log messages.
pub fn merge_recursive_distinct(target: &mut YamlValue, source: &YamlValue, path: &str) {
    match (target, source) {
        (YamlValue::Mapping(target_map), YamlValue::Mapping(source_map)) => {
            for (key, value) in source_map {
                let key_str = match key {
                    YamlValue::String(s) => s.clone(),
                    _ => format!("{:?}", key),
                };
                let new_path = if path.is_empty() {
                    key_str
                } else {
                    format!("{}.{}", path, key_str)
                };

                if is_positional_key(key) {
                    let next = target_map.len() as u64;
                    target_map.insert(YamlValue::Number(next.into()), value.clone());
                } else if let Some(existing) = target_map.get_mut(key) {
                    merge_recursive_distinct(existing, value, &new_path);
                } else {
                    target_map.insert(key.clone(), value.clone());
                }
            }
        }
        (YamlValue::Sequence(target_seq), YamlValue::Sequence(source_seq)) => {
            target_seq.extend(source_seq.iter().cloned());
        }
        (target, source) => {
            if target.is_mapping() || target.is_sequence() || source.is_mapping() || source.is_sequence() {
                warn!(
                    "Type mismatch at path '{}': replacing {} with {}",
                    path,
                    get_yaml_type_name(target),
                    get_yaml_type_name(source)
                );
            }
            *target = source.clone();
        }
    }
}

/// Replace the top-level keys of `target` with those of `overlay`.
///
/// A non-mapping overlay is ignored with a warning.
pub fn overlay_top_level(target: &mut YamlValue, overlay: &YamlValue) {
    let YamlValue::Mapping(overlay_map) = overlay else {
        if !overlay.is_null() {
            warn!(
                "Ignoring override document: expected Mapping, found {}",
                get_yaml_type_name(overlay)
            );
        }
        return;
    };
    if !target.is_mapping() {
        *target = YamlValue::Mapping(Mapping::new());
    }
    if let YamlValue::Mapping(target_map) = target {
        for (key, value) in overlay_map {
            target_map.insert(key.clone(), value.clone());
        }
    }
}

/// Get a human-readable type name for a YAML value
pub fn get_yaml_type_name(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "Null",
        YamlValue::Bool(_) => "Bool",
        YamlValue::Number(_) => "Number",
        YamlValue::String(_) => "String",
        YamlValue::Sequence(_) => "Sequence",
        YamlValue::Mapping(_) => "Mapping",
        YamlValue::Tagged(_) => "Tagged",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> YamlValue {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_is_flat() {
        assert!(is_flat(&yaml("[1, 2, {a: 1}]")));
        assert!(is_flat(&yaml("{a: 1, b: text, c: true}")));
        assert!(!is_flat(&yaml("{a: {x: 1}}")));
        assert!(!is_flat(&yaml("{a: [1]}")));
        assert!(!is_flat(&yaml("{a: null}")));
        assert!(is_flat(&yaml("{0: {x: 1}, 1: [2]}")));
        assert!(!is_flat(&yaml("text")));
    }

    #[test]
    fn test_concat_flat_sequences() {
        assert_eq!(concat_flat(&yaml("[1, 2]"), &yaml("[3]")), yaml("[1, 2, 3]"));
    }

    #[test]
    fn test_concat_flat_string_keys_overwrite_in_place() {
        let merged = concat_flat(&yaml("{a: 1, b: 2}"), &yaml("{c: 3, a: 4}"));
        let keys: Vec<&str> = merged
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap())
            .collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(merged["a"], yaml("4"));
    }

    #[test]
    fn test_concat_flat_mixed_renumbers_positions() {
        let merged = concat_flat(&yaml("{5: x, a: 1}"), &yaml("[y]"));
        let map = merged.as_mapping().unwrap();
        assert_eq!(map.get(&yaml("0")), Some(&yaml("x")));
        assert_eq!(map.get(&yaml("1")), Some(&yaml("y")));
        assert_eq!(map.get(&yaml("a")), Some(&yaml("1")));
    }

    #[test]
    fn test_merge_replace_strings_nested() {
        let first = merge_replace_strings(&YamlValue::Mapping(Mapping::new()), &yaml("{a: {x: 1}, b: [1, 2]}"));
        let merged = merge_replace_strings(&first, &yaml("{a: {y: 2}, b: [3]}"));
        assert_eq!(merged, yaml("{a: {x: 1, y: 2}, b: [3]}"));
    }

    #[test]
    fn test_merge_replace_strings_scalar_replaces_mapping() {
        let merged = merge_replace_strings(&yaml("{a: {x: 1}, b: 1}"), &yaml("{a: text, c: {z: 1}}"));
        assert_eq!(merged, yaml("{a: text, b: 1, c: {z: 1}}"));
    }

    #[test]
    fn test_merge_recursive_distinct() {
        let mut target = yaml("{columns: {id: {label: ID}}, options: {toolbar: [a]}, source: {type: orm}}");
        merge_recursive_distinct(
            &mut target,
            &yaml("{columns: {name: {label: Name}}, options: {toolbar: [b]}, source: {type: search}}"),
            "",
        );
        assert_eq!(
            target,
            yaml("{columns: {id: {label: ID}, name: {label: Name}}, options: {toolbar: [a, b]}, source: {type: search}}")
        );
    }

    #[test]
    fn test_overlay_top_level_replaces_whole_keys() {
        let mut target = yaml("{label: Default, config: {a: 1, b: 2}}");
        overlay_top_level(&mut target, &yaml("{config: {c: 3}, icon: x.ico}"));
        assert_eq!(target, yaml("{label: Default, config: {c: 3}, icon: x.ico}"));
    }

    #[test]
    fn test_get_yaml_type_name() {
        assert_eq!(get_yaml_type_name(&yaml("~")), "Null");
        assert_eq!(get_yaml_type_name(&yaml("[1]")), "Sequence");
        assert_eq!(get_yaml_type_name(&yaml("{a: 1}")), "Mapping");
    }
}
