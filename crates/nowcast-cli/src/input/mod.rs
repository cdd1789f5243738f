pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Deserialize from `--input <file>` when given, otherwise from piped stdin.
pub fn read_input<T: DeserializeOwned>(path: Option<&str>) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_json(path);
    }
    match stdin::read_stdin()? {
        Some(data) => Ok(serde_json::from_value(data)?),
        None => Err("--input <file.json> or stdin required".into()),
    }
}
