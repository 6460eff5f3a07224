// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tourflow CLI entrypoint.
//!
//! Opens an editor from an init record, optionally replays a scripted event file against it,
//! and prints a JSON report (layout, edges, integrity issues, save payload) to stdout.

use std::error::Error;
use std::io::IsTerminal;
use std::path::Path;
use std::time::Instant;

use tourflow::config::EditorConfig;
use tourflow::editor::{Editor, EditorInit};
use tourflow::store::{
    self, EditorInitRecord, JsonFileHost, ReportRecord, TimedEventRecord, WriteDurability,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const TRACING_TARGET: &str = "tourflow::cli";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <init.json> [--events <events.json>] [--config <config.json>] [--save <out.json>] [--durable-writes] [--check]\n  {program} --schema\n\n--events replays scripted input (pointer, key, authoring, zoom) before the report is printed.\n--save writes the save payload to <out.json> through the editor's save path.\n--check exits with status 1 when the final graph has dangling or duplicate references.\n--schema prints the JSON Schema of the save payload and exits.\n\nLog output goes to stderr; set RUST_LOG (default `info`) to adjust it."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    init_path: Option<String>,
    events_path: Option<String>,
    config_path: Option<String>,
    save_path: Option<String>,
    durable_writes: bool,
    check: bool,
    schema: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--events" => {
                if options.events_path.is_some() {
                    return Err(());
                }
                options.events_path = Some(args.next().ok_or(())?);
            }
            "--config" => {
                if options.config_path.is_some() {
                    return Err(());
                }
                options.config_path = Some(args.next().ok_or(())?);
            }
            "--save" => {
                if options.save_path.is_some() {
                    return Err(());
                }
                options.save_path = Some(args.next().ok_or(())?);
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            "--check" => {
                if options.check {
                    return Err(());
                }
                options.check = true;
            }
            "--schema" => {
                if options.schema {
                    return Err(());
                }
                options.schema = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.init_path.is_some() {
                    return Err(());
                }
                options.init_path = Some(arg);
            }
        }
    }

    if options.schema {
        let standalone = options == CliOptions { schema: true, ..CliOptions::default() };
        return if standalone { Ok(options) } else { Err(()) };
    }
    if options.init_path.is_none() {
        return Err(());
    }
    if options.durable_writes && options.save_path.is_none() {
        return Err(());
    }

    Ok(options)
}

fn init_tracing() -> Result<(), Box<dyn Error>> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal());

    tracing_subscriber::registry().with(fmt_layer).with(env_filter).try_init()?;
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "tourflow".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if options.schema {
            println!("{}", serde_json::to_string_pretty(&store::payload_schema())?);
            return Ok(());
        }

        init_tracing()?;

        let config = match options.config_path.as_deref() {
            Some(path) => EditorConfig::load(Path::new(path))?,
            None => EditorConfig::default(),
        };
        let init_path = options.init_path.as_deref().unwrap_or_default();
        let record: EditorInitRecord = store::read_json(Path::new(init_path))?;
        let mut editor = Editor::new(EditorInit::try_from(record)?, config)?;

        let mut notices = Vec::new();
        if let Some(path) = options.events_path.as_deref() {
            let events: Vec<TimedEventRecord> = store::read_json(Path::new(path))?;
            tracing::info!(target: TRACING_TARGET, path, events = events.len(), "replaying events");
            notices = store::replay(&mut editor, events, Instant::now())?;
        }
        editor.flush_pending_checkpoint();

        let mut host = options.save_path.as_deref().map(|path| {
            let durability =
                if options.durable_writes { WriteDurability::Durable } else { WriteDurability::BestEffort };
            JsonFileHost::new(path).with_durability(durability)
        });
        if let Some(host) = host.as_mut() {
            let saved = editor.save(host);
            notices.extend(editor.take_notice());
            saved?;
        }

        let report = ReportRecord::from_editor(&editor, &notices);
        println!("{}", serde_json::to_string_pretty(&report)?);

        if let Some(host) = host.as_mut() {
            editor.close(host);
        }

        if options.check && !report.issues.is_empty() {
            for issue in &report.issues {
                tracing::warn!(target: TRACING_TARGET, %issue, "integrity issue");
            }
            std::process::exit(1);
        }
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("tourflow: {err}");
        std::process::exit(1);
    }
}
