use std::path::Path;

use crate::config::ResolvedConfig;

pub fn config_output(config_path: &Path, config: &ResolvedConfig) -> serde_json::Value {
    serde_json::json!({
        "config_file": config_path.display().to_string(),
        "data_directory": config.data_dir.display().to_string(),
        "source": config.source,
        "base_url": config.base_url,
        "display": config.display,
        "portfolio": config.portfolio,
        "calendar": config.calendar,
        "stock": config.stock,
    })
}
