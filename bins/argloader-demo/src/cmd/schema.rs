use argloader::ArgLoader;
use serde_json::json;

use crate::error::DemoError;
use crate::hello;

pub fn run(loader: &ArgLoader) -> Result<(), DemoError> {
    let mut out = serde_json::Map::new();
    for field in hello::fields(loader) {
        tracing::debug!(field = field.name, args = field.args.len(), "describing field");
        out.insert(
            field.name.to_string(),
            json!({
                "type": field.wire_type,
                "description": field.description,
                "args": field.args,
            }),
        );
    }
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
