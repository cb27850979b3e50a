//! End-to-end expand and flatten of a container service resource.

use plugin_helper::expand::{self, Elements};
use plugin_helper::flatten::{self, flatten_func, flatten_list_func};
use plugin_helper::{hash_value, Data, DataMut, Error, MapData, ResourceData, Value};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Api {
    #[serde(rename = "ID")]
    id: String,
    spec: Option<Spec>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Spec {
    name: String,
    task_template: Option<TaskTemplate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TaskTemplate {
    container_spec: Option<ContainerSpec>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ContainerSpec {
    mounts: Option<Vec<Mount>>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Mount {
    target: String,
    source: String,
    #[serde(rename = "Type")]
    kind: String,
    volume_options: Option<VolumeOptions>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct VolumeOptions {
    no_copy: bool,
}

const API_RAW: &str = r#"
{
    "ID": "ozfsuj7dblzwjo8zoguosr1l5",
    "Spec": {
        "Name": "tftest-service-basic",
        "TaskTemplate": {
            "ContainerSpec": {
                "Mounts": [{
                    "Type": "volume",
                    "Source": "tftest-volume",
                    "Target": "/mount/test",
                    "VolumeOptions": {"NoCopy": true}
                }]
            }
        }
    }
}
"#;

const MOUNTS: &str = "task_spec.0.container_spec.0.mounts";

fn api() -> Api {
    serde_json::from_str(API_RAW).unwrap()
}

fn flatten_mount(m: &Mount, d: &mut MapData) {
    d.insert("target", m.target.as_str());
    d.insert("source", m.source.as_str());
    d.insert("type", m.kind.as_str());
    if let Some(opts) = &m.volume_options {
        d.insert("volume_options", flatten_func(|d| d.insert("no_copy", opts.no_copy)));
    }
}

fn flatten_api(api: &Api, d: &mut ResourceData) -> plugin_helper::Result<()> {
    let Some(spec) = &api.spec else {
        return Ok(());
    };
    d.set("name", Value::from(spec.name.as_str()))?;
    let containers = spec
        .task_template
        .as_ref()
        .and_then(|t| t.container_spec.as_ref());
    let mut task_spec = None;
    if let Some(container) = containers {
        let mounts = match &container.mounts {
            Some(mounts) => Some(flatten::into_set(
                flatten_list_func(mounts, flatten_mount),
                hash_value,
            )?),
            None => None,
        };
        task_spec = Some(flatten_func(|d| {
            d.insert(
                "container_spec",
                flatten_func(|d| {
                    if let Some(mounts) = mounts {
                        d.insert("mounts", mounts);
                    }
                }),
            );
        }));
    }
    d.set("task_spec", Value::from(task_spec))
}

fn expand_mounts<D: Data + ?Sized>(d: &D) -> plugin_helper::Result<Vec<Mount>> {
    let mut mounts = Vec::new();
    expand::list(d, "task_spec")?.elem(|d| {
        expand::list(d, "container_spec")?.elem(|d| {
            expand::set(d, "mounts")?.elem(|d| {
                let mut volume_options = None;
                expand::list(d, "volume_options")?.elem(|d| {
                    volume_options = Some(VolumeOptions {
                        no_copy: expand::bool(d, "no_copy")?,
                    });
                    Ok(())
                })?;
                mounts.push(Mount {
                    target: expand::string(d, "target")?,
                    source: expand::string(d, "source")?,
                    kind: expand::string(d, "type")?,
                    volume_options,
                });
                Ok(())
            })
        })
    })?;
    Ok(mounts)
}

#[test]
fn flatten_writes_hash_addressed_mounts() {
    let api = api();
    assert_eq!(api.id, "ozfsuj7dblzwjo8zoguosr1l5");

    let mut d = ResourceData::new(Value::Null);
    flatten_api(&api, &mut d).unwrap();

    let mounts = d.get(MOUNTS);
    let set = mounts.as_set().unwrap();
    assert_eq!(set.len(), 1);
    let code = set.hash_key(&set.list()[0]);

    assert_eq!(d.get(&format!("{MOUNTS}.{code}.target")), Value::from("/mount/test"));
    assert_eq!(d.get(&format!("{MOUNTS}.{code}.source")), Value::from("tftest-volume"));
    assert_eq!(d.get(&format!("{MOUNTS}.{code}.type")), Value::from("volume"));
    assert_eq!(
        d.get(&format!("{MOUNTS}.{code}.volume_options.0.no_copy")),
        Value::from(true)
    );
    assert_eq!(d.get("name"), Value::from("tftest-service-basic"));
}

#[test]
fn expand_reads_nested_mounts() {
    let mut d = ResourceData::new(Value::from(json!({
        "task_spec": [{
            "container_spec": [{
                "mounts": [{
                    "target": "/mount/test",
                    "source": "tftest-volume",
                    "type": "volume",
                }],
            }],
        }],
    })));
    let mounts = flatten::into_set(d.get(MOUNTS), hash_value).unwrap();
    d.set(MOUNTS, mounts).unwrap();

    let mounts = expand_mounts(&d).unwrap();
    assert_eq!(
        mounts,
        vec![Mount {
            target: "/mount/test".into(),
            source: "tftest-volume".into(),
            kind: "volume".into(),
            volume_options: None,
        }]
    );
}

#[test]
fn flatten_then_expand_round_trips() {
    let api = api();
    let mut d = ResourceData::new(Value::Null);
    flatten_api(&api, &mut d).unwrap();

    let expanded = expand_mounts(&d).unwrap();
    let decoded = api
        .spec
        .and_then(|s| s.task_template)
        .and_then(|t| t.container_spec)
        .and_then(|c| c.mounts)
        .unwrap();
    assert_eq!(expanded, decoded);
}

#[test]
fn single_record_round_trip() {
    let mount = Mount {
        target: "/mount/test".into(),
        source: "tftest-volume".into(),
        kind: "volume".into(),
        volume_options: None,
    };
    let flat = flatten_func(|d| flatten_mount(&mount, d));
    assert_eq!(
        flat,
        Value::from(json!([{"target": "/mount/test", "source": "tftest-volume", "type": "volume"}]))
    );

    let mut d = ResourceData::new(Value::from(json!({})));
    d.set("mount", flat).unwrap();

    let mut seen = Vec::new();
    expand::list(&d, "mount")
        .unwrap()
        .elem(|d| {
            seen.push(expand::string(d, "target")?);
            seen.push(expand::string(d, "source")?);
            seen.push(expand::string(d, "type")?);
            Ok(())
        })
        .unwrap();
    assert_eq!(seen, ["/mount/test", "tftest-volume", "volume"]);
}

#[test]
fn unchanged_mounts_are_skipped_on_update() {
    let api = api();
    let mut prior = ResourceData::new(Value::Null);
    flatten_api(&api, &mut prior).unwrap();
    let state = prior.into_current();

    let mut current = state.clone();
    plugin_helper::path::set(&mut current, &["name"], Value::from("renamed")).unwrap();
    let d = ResourceData::existing(state, current);

    assert_eq!(expand::string(&d, "name").unwrap(), "renamed");
    assert!(expand_mounts(&d).unwrap().is_empty());
    assert!(expand::diff(&d, MOUNTS).unwrap().is_empty());
}

#[test]
fn changed_mounts_diff() {
    let api = api();
    let mut prior = ResourceData::new(Value::Null);
    flatten_api(&api, &mut prior).unwrap();
    let state = prior.into_current();

    let extra = Mount {
        target: "/other".into(),
        source: "other-volume".into(),
        kind: "bind".into(),
        volume_options: None,
    };
    let mut current = ResourceData::new(state.clone());
    let mounts = flatten::into_set(
        flatten_list_func(std::slice::from_ref(&extra), flatten_mount),
        hash_value,
    )
    .unwrap();
    current.set(MOUNTS, mounts).unwrap();

    let d = ResourceData::existing(state, current.into_current());
    let diff = expand::diff(&d, MOUNTS).unwrap();
    assert_eq!(diff.added.len(), 1);
    assert_eq!(diff.removed.len(), 1);
    assert_eq!(
        diff.added[0].as_map().unwrap()["target"],
        Value::from("/other")
    );
    assert_eq!(
        diff.removed[0].as_map().unwrap()["target"],
        Value::from("/mount/test")
    );
}

#[test]
fn type_mismatch_aborts_traversal_with_full_path() {
    let d = ResourceData::new(Value::from(json!({
        "task_spec": [{"container_spec": [{"mounts": "oops"}]}],
    })));
    let err = expand_mounts(&d).unwrap_err();
    assert!(matches!(
        err,
        Error::TypeMismatch { ref path, expected: "set", found: "string" }
            if path == "task_spec.0.container_spec.0.mounts"
    ));
}

#[test]
fn json_extraction() {
    let mut d = MapData::new();
    d.insert("json", r#"{"foo": 123}"#);
    d.insert("bad", "not json");
    assert_eq!(expand::json(&d, "json").unwrap()["foo"], json!(123));
    assert!(matches!(expand::json(&d, "bad"), Err(Error::Json(_))));
}
