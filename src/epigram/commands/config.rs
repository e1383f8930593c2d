use crate::commands::{CmdMessage, CmdResult, EpigramPaths};
use crate::config::EpigramConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Read or update `config.json` in the data directory. Bad keys and bad
/// values come back as error messages rather than failures, so the caller
/// can show them next to the current settings.
pub fn run(paths: &EpigramPaths, action: ConfigAction) -> Result<CmdResult> {
    let mut config = EpigramConfig::load(&paths.data)?;
    let result = match action {
        ConfigAction::ShowAll => CmdResult::default().with_config(config),
        ConfigAction::ShowKey(key) => match config.get(&key) {
            Some(value) => single(CmdMessage::info(value)),
            None => single(CmdMessage::error(format!("Unknown config key: {}", key))),
        },
        ConfigAction::Set(key, value) => {
            if let Err(e) = config.set(&key, &value) {
                return Ok(single(CmdMessage::error(e.to_string())));
            }
            config.save(&paths.data)?;
            // Report the normalised value, e.g. a base_url without its trailing slash
            let stored = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, stored)));
            result
        }
    };
    Ok(result)
}

fn single(message: CmdMessage) -> CmdResult {
    let mut result = CmdResult::default();
    result.add_message(message);
    result
}
