//! List command - show discovered tests without running them

use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;

/// Arguments for the list command
pub struct ListArgs {
    pub pattern: Option<String>,
    pub scope: Option<String>,
    pub dir: PathBuf,
    pub json: bool,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            pattern: None,
            scope: None,
            dir: PathBuf::from("."),
            json: false,
        }
    }
}

/// Run the list command
pub fn run(args: ListArgs) -> Result<()> {
    let settings = super::load_settings(&args.dir)?;
    let pattern = args.pattern.or(settings.filter);
    let scope = args.scope.or(settings.scope);

    let names = super::select(scope.as_deref(), pattern.as_deref())?.names();

    if args.json {
        println!("{}", json!({ "tests": names }));
    } else {
        for name in &names {
            println!("{}", name);
        }
    }
    Ok(())
}
