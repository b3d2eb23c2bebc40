use iris_core::plugin_system::PluginInfo;
use iris_core::viewer::Layer;
use serde::Serialize;

/// What `iris open` reports for each added layer
#[derive(Debug, Serialize)]
pub struct LayerSummary<'a> {
    pub name: &'a str,
    pub kind: String,
    pub shape: &'a [usize],
    pub plugin: Option<&'a str>,
}

impl<'a> From<&'a Layer> for LayerSummary<'a> {
    fn from(layer: &'a Layer) -> Self {
        Self {
            name: &layer.name,
            kind: layer.kind.to_string(),
            shape: layer.data.shape(),
            plugin: layer.source.reader_plugin.as_deref(),
        }
    }
}

fn shape_string(shape: &[usize]) -> String {
    let dims: Vec<String> = shape.iter().map(usize::to_string).collect();
    format!("({})", dims.join(", "))
}

pub fn print_layers(layers: &[LayerSummary<'_>], json: bool) -> serde_json::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(layers)?);
        return Ok(());
    }
    for layer in layers {
        println!(
            "{}\t{}\t{}\t{}",
            layer.name,
            layer.kind,
            shape_string(layer.shape),
            layer.plugin.unwrap_or("-")
        );
    }
    Ok(())
}

pub fn print_plugins(plugins: &[PluginInfo], json: bool) -> serde_json::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(plugins)?);
        return Ok(());
    }
    if plugins.is_empty() {
        println!("No reader plugins registered.");
        return Ok(());
    }
    for info in plugins {
        let status = if info.enabled { "enabled" } else { "disabled" };
        println!(
            "{} {} [{}] {} ({})",
            info.name,
            info.version,
            info.priority,
            status,
            info.extensions.join(", ")
        );
    }
    Ok(())
}
