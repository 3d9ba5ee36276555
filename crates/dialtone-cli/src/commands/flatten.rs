use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use anyhow::{Context as _, Result};
use clap::Args;
use dialtone_core::flat_iter;
use serde_json::Value;
use std::io::{self, Read};

#[derive(Debug, Args)]
pub struct FlattenArgs {
    /// JSON array of arrays; read from stdin when omitted or `-`
    pub input: Option<String>,
}

pub fn flatten(ctx: &Context<'_>, args: FlattenArgs) -> Result<()> {
    let raw = match args.input.as_deref() {
        Some(text) if text != "-" => text.to_string(),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .with_context(|| "read stdin")?;
            buf
        }
    };

    let nested: Vec<Vec<Value>> = serde_json::from_str(&raw)
        .map_err(|err| invalid_input(format!("expected a JSON array of arrays: {err}")))?;
    let items: Vec<Value> = flat_iter(nested).collect();

    if ctx.json {
        return print_json(&items);
    }

    for item in items {
        match item {
            Value::String(text) => println!("{text}"),
            other => println!("{other}"),
        }
    }
    Ok(())
}
