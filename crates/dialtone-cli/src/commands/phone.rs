use crate::commands::{print_json, Context};
use anyhow::{Context as _, Result};
use clap::Args;
use dialtone_core::{parse_phone, CallLog, PhoneParts};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Args)]
pub struct PhoneArgs {
    #[arg(required = true)]
    pub inputs: Vec<String>,
    /// Record every normalization in the call log
    #[arg(long)]
    pub log: bool,
}

#[derive(Debug, Serialize)]
struct PhoneReport {
    input: String,
    output: String,
    matched: bool,
    parts: Option<PhoneParts>,
}

/// Canonical output together with the groups it was built from.
#[derive(Debug)]
struct Normalized {
    output: String,
    parts: Option<PhoneParts>,
}

impl fmt::Display for Normalized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.output)
    }
}

fn normalize_one(raw: &str) -> Normalized {
    let parsed = parse_phone(raw);
    let parts = parsed.parts().cloned();
    Normalized {
        output: parsed.into_canonical(),
        parts,
    }
}

pub fn normalize(ctx: &Context<'_>, args: PhoneArgs) -> Result<()> {
    let log = CallLog::new(&ctx.config.call_log.path);
    let logged = args
        .log
        .then(|| log.wrap("normalize_phone", |(raw,): (String,)| normalize_one(&raw)));

    let mut reports = Vec::with_capacity(args.inputs.len());
    for input in args.inputs {
        let normalized = match &logged {
            Some(logged) => logged
                .try_call((input.clone(),))
                .with_context(|| format!("log normalization of {input:?}"))?,
            None => normalize_one(&input),
        };
        reports.push(PhoneReport {
            input,
            output: normalized.output,
            matched: normalized.parts.is_some(),
            parts: normalized.parts,
        });
    }

    if ctx.json {
        return print_json(&reports);
    }

    for report in reports {
        println!("{}", report.output);
    }
    Ok(())
}
