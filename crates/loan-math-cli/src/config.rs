use std::fs;
use std::path::Path;

use loan_math_core::config::EngineDefaults;

/// Load calculator defaults, or the built-in ones when no file is given.
///
/// `.json` files are parsed as JSON; anything else as YAML.
pub fn load_defaults(path: Option<&str>) -> Result<EngineDefaults, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(EngineDefaults::default());
    };

    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config '{}': {}", path, e))?;
    let defaults = parse_defaults(&contents, is_json(path))
        .map_err(|e| format!("Failed to parse config '{}': {}", path, e))?;

    tracing::debug!(path, ?defaults, "loaded calculator defaults");
    Ok(defaults)
}

fn is_json(path: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn parse_defaults(
    contents: &str,
    json: bool,
) -> Result<EngineDefaults, Box<dyn std::error::Error>> {
    let defaults = if json {
        EngineDefaults::from_json(contents)?
    } else {
        let d: EngineDefaults = serde_yaml::from_str(contents)?;
        d.validate()?;
        d
    };
    Ok(defaults)
}
