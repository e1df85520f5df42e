use crate::config::Defaults;
use crate::models::{DiskSpace, Item, Items, QualityProfile, Schema};
use anyhow::Result;
use serde_json::Value;

/// Writes command results to stdout, as readable text or raw JSON.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    json: bool,
}

impl Printer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn value(&self, title: &str, value: &Value) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(value)?);
        } else {
            println!("{}:\n{}", title, serde_json::to_string_pretty(value)?);
        }
        Ok(())
    }

    pub fn list(&self, title: &str, values: Vec<Value>) -> Result<()> {
        self.value(title, &Value::Array(values))
    }

    pub fn items<S: Schema>(&self, title: &str, items: &Items<S>) -> Result<()> {
        self.value(title, &items.to_value())
    }

    /// Lookup results, one line per candidate in plain mode.
    pub fn candidates<S: Schema>(&self, items: &Items<S>) -> Result<()> {
        if self.json {
            return self.value("Results", &items.to_value());
        }
        let lines: Vec<String> = match items {
            Items::One(item) => vec![summary(item)],
            Items::Many(list) => list.iter().map(summary).collect(),
        };
        for (index, line) in lines.iter().enumerate() {
            println!("[{}] {}", index + 1, line);
        }
        Ok(())
    }

    pub fn profiles(&self, profiles: &[QualityProfile]) -> Result<()> {
        if self.json {
            return self.value("Quality profiles", &serde_json::to_value(profiles)?);
        }
        println!("Available quality profiles:");
        for profile in profiles {
            println!("{}", profile_line(profile));
        }
        Ok(())
    }

    pub fn disk_space(&self, disks: &[DiskSpace]) -> Result<()> {
        if self.json {
            return self.value("Disk space", &serde_json::to_value(disks)?);
        }
        for disk in disks {
            println!("{}", disk_line(disk));
        }
        Ok(())
    }

    pub fn root_folders(&self, folders: Vec<Value>) -> Result<()> {
        if self.json {
            return self.list("Root folders", folders);
        }
        println!("Root folders:");
        for folder in &folders {
            println!("{}", root_folder_line(folder));
        }
        Ok(())
    }

    pub fn defaults(&self, defaults: &Defaults) -> Result<()> {
        if self.json {
            return self.value("Defaults", &serde_json::to_value(defaults)?);
        }
        if defaults.is_empty() {
            println!("No defaults set");
        }
        for (key, value) in defaults.iter() {
            println!("{} = {}", key, Defaults::arg_value(value));
        }
        Ok(())
    }

    pub fn message(&self, text: &str) {
        if self.json {
            println!("{}", serde_json::json!({ "message": text }));
        } else {
            println!("{}", text);
        }
    }
}

/// `Title (year)`, without the year when the server does not know it.
pub fn summary<S: Schema>(item: &Item<S>) -> String {
    match item.i64_field("year") {
        0 => item.str_field("title").to_string(),
        year => format!("{} ({})", item.str_field("title"), year),
    }
}

pub fn profile_line(profile: &QualityProfile) -> String {
    format!(
        "[{}] {}: {}",
        profile.id,
        profile.name,
        profile.allowed_qualities().join(", ")
    )
}

fn disk_line(disk: &DiskSpace) -> String {
    let name = match disk.label.as_deref() {
        Some(label) if !label.is_empty() => format!("{} ({})", disk.path, label),
        _ => disk.path.clone(),
    };
    format!(
        "{}: {} free of {}",
        name,
        format_size(disk.free_space),
        format_size(disk.total_space)
    )
}

fn root_folder_line(folder: &Value) -> String {
    let id = folder.get("id").and_then(Value::as_u64).unwrap_or(0);
    let path = folder.get("path").and_then(Value::as_str).unwrap_or_default();
    match folder.get("freeSpace").and_then(Value::as_u64) {
        Some(free) => format!("[{}] {} ({} free)", id, path, format_size(free)),
        None => format!("[{}] {}", id, path),
    }
}

/// Human readable size in binary units, e.g. `1.5 GB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
