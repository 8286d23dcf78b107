//! Reading instances and writing result files.

use std::fs;
use std::path::Path;

use anyhow::Context;
use protoframe_types::FrameInstance;
use serde::Serialize;

/// Read a JSON array of frame instances.
pub fn read_instances(path: &Path) -> anyhow::Result<Vec<FrameInstance>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read instances from {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse instances in {}", path.display()))
}

/// Write `value` as pretty JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

/// Write one line per item.
pub fn write_lines<I, S>(path: &Path, lines: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    fs::write(path, out).with_context(|| format!("failed to write {}", path.display()))
}
