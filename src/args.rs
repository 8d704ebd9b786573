//! Argument lists for each verb, without the connection flags.

use std::{ffi::OsString, path::Path};

use serde_json::Value;

use crate::model::Selector;

const OUTPUT_JSON: &str = "--output=json";
const UPDATE_PERIOD: &str = "--update-period=0s";

fn strs<const N: usize>(parts: [&str; N]) -> Vec<OsString> {
    Vec::from(parts.map(OsString::from))
}

pub fn list(kind: &str, selector: Option<&Selector>) -> Vec<OsString> {
    // without a selector the slot still carries an output flag
    let selector = selector.map_or_else(|| OUTPUT_JSON.to_string(), Selector::to_arg);
    vec!["get".into(), kind.into(), selector.into(), OUTPUT_JSON.into()]
}

pub fn get(kind: &str, name: &str) -> Vec<OsString> {
    strs(["get", kind, name, OUTPUT_JSON])
}

pub fn describe(kind: &str, name: &str) -> Vec<OsString> {
    strs(["describe", kind, name])
}

pub fn create(filepath: &Path) -> Vec<OsString> {
    vec!["create".into(), "-f".into(), filepath.into()]
}

pub fn delete(kind: &str, id: &str) -> Vec<OsString> {
    strs(["delete", kind, id])
}

pub fn update(filepath: &Path) -> Vec<OsString> {
    vec!["update".into(), "-f".into(), filepath.into()]
}

pub fn apply(kind: &str, name: &str, patch: &Value) -> Vec<OsString> {
    vec![
        "update".into(),
        kind.into(),
        name.into(),
        format!("--patch={patch}").into(),
    ]
}

pub fn rolling_update_by_file(name: &str, filepath: &Path) -> Vec<OsString> {
    vec![
        "rolling-update".into(),
        name.into(),
        "-f".into(),
        filepath.into(),
        UPDATE_PERIOD.into(),
    ]
}

pub fn rolling_update(name: &str, image: &str) -> Vec<OsString> {
    vec![
        "rolling-update".into(),
        name.into(),
        format!("--image={image}").into(),
        UPDATE_PERIOD.into(),
    ]
}

pub fn scale(name: &str, replicas: u32) -> Vec<OsString> {
    vec![
        "scale".into(),
        format!("--replicas={replicas}").into(),
        "replicationcontrollers".into(),
        name.into(),
    ]
}

/// `name` may be `"<pod> <container>"`.
pub fn logs(name: &str) -> Vec<OsString> {
    let mut args = vec![OsString::from("logs")];
    if name.contains(' ') {
        args.extend(name.split(' ').take(2).map(OsString::from));
    } else {
        args.push(name.into());
    }
    args
}

pub fn port_forward(name: &str, port_spec: &str) -> Vec<OsString> {
    strs(["port-forward", name, port_spec])
}

pub fn use_context(context: &str) -> Vec<OsString> {
    strs(["config", "use-context", context])
}

pub fn view_context() -> Vec<OsString> {
    strs(["config", OUTPUT_JSON, "view"])
}
