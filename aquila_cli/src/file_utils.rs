use std::{fs, path::Path};

use aquila_optimizer::{json::instance::InstanceFile, problem::graph::RouteGraph};

pub fn read_instance(path: &Path) -> anyhow::Result<RouteGraph> {
    let content = fs::read_to_string(path)?;
    let instance = InstanceFile::from_json(&content)?;
    Ok(instance.build_graph()?)
}

pub fn write_output(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)?;
        }
        None => println!("{content}"),
    }

    Ok(())
}
