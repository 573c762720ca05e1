// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halimede-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halimede and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Halimede demo entrypoint.
//!
//! Rehydrates a flat assigned-value list against the built-in demo catalog,
//! walks the picker once, and prints the resulting grouped selection plus the
//! submission field.

use std::error::Error;

use halimede::model::{AttributeId, ValueId};
use halimede::screen::PickerScreen;
use halimede::source::InMemorySource;
use halimede::submission;

const DEFAULT_FLAT: &str = "10,20,31";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--flat <ids>] [--fail <attribute-ids>] [--json]\n\n--flat takes the comma-joined assigned value IDs to rehydrate (default {DEFAULT_FLAT}).\n--fail makes value fetches for the given attribute IDs fail, to demo fetch warnings.\n--json prints the grouped selection as JSON instead of text."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    flat: Option<String>,
    fail: Option<String>,
    json: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--flat" => {
                if options.flat.is_some() {
                    return Err(());
                }
                let ids = args.next().ok_or(())?;
                options.flat = Some(ids);
            }
            "--fail" => {
                if options.fail.is_some() {
                    return Err(());
                }
                let ids = args.next().ok_or(())?;
                options.fail = Some(ids);
            }
            "--json" => {
                if options.json {
                    return Err(());
                }
                options.json = true;
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn parse_attribute_ids(raw: &str) -> Result<Vec<AttributeId>, Box<dyn Error>> {
    let mut ids = Vec::new();
    for segment in raw.split(',') {
        let trimmed = segment.trim();
        if trimmed.is_empty() {
            continue;
        }
        ids.push(trimmed.parse()?);
    }
    Ok(ids)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "halimede".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let flat = options.flat.as_deref().unwrap_or(DEFAULT_FLAT);
        let assigned = submission::parse_ids(flat)?;

        let mut source = InMemorySource::demo();
        if let Some(raw) = options.fail.as_deref() {
            for attribute_id in parse_attribute_ids(raw)? {
                source = source.fail_values_for(attribute_id);
            }
        }

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(run(source, &assigned, options.json))?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("halimede: {err}");
        std::process::exit(1);
    }
}

async fn run(
    source: InMemorySource,
    assigned: &[ValueId],
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let mut screen = PickerScreen::new(std::sync::Arc::new(source));

    screen.open_record(assigned).await?;
    for warning in screen.take_warnings() {
        eprintln!("halimede: warning: {warning}");
    }

    // One picker round trip: open the first attribute and confirm every value
    // it offers.
    if let Some(first) = screen.reconciler().attributes().first().map(|a| a.id()) {
        screen.select_attribute(Some(first)).await?;
        let picks: Vec<ValueId> = screen.active_values().iter().map(|value| value.id()).collect();
        screen.update_pending(picks)?;
        screen.commit()?;
    }

    if json {
        print_json(&screen);
    } else {
        print_text(&screen);
    }

    println!("attributeValueIds={}", screen.submission_field());
    Ok(())
}

fn print_text(screen: &PickerScreen<InMemorySource>) {
    let reconciler = screen.reconciler();
    for (attribute_id, group) in screen.selection().groups() {
        let labels: Vec<String> = group
            .iter()
            .map(|value_id| match reconciler.value_label(*attribute_id, *value_id) {
                Some(label) => label.to_string(),
                None => format!("#{value_id}"),
            })
            .collect();
        println!(
            "{}: {}",
            reconciler.attribute_name(*attribute_id),
            labels.join(", ")
        );
    }
}

fn print_json(screen: &PickerScreen<InMemorySource>) {
    let reconciler = screen.reconciler();
    let groups: Vec<serde_json::Value> = screen
        .selection()
        .groups()
        .iter()
        .map(|(attribute_id, group)| {
            let values: Vec<serde_json::Value> = group
                .iter()
                .map(|value_id| {
                    let label = reconciler
                        .value_label(*attribute_id, *value_id)
                        .map(|label| label.to_string())
                        .unwrap_or_else(|| format!("#{value_id}"));
                    serde_json::json!({
                        "id": value_id.value(),
                        "label": label,
                    })
                })
                .collect();
            serde_json::json!({
                "attributeId": attribute_id.value(),
                "attributeName": reconciler.attribute_name(*attribute_id),
                "values": values,
            })
        })
        .collect();
    println!("{}", serde_json::json!({ "selection": groups }));
}

#[cfg(test)]
mod tests {
    use super::{parse_attribute_ids, parse_options, CliOptions};

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_flat_ids() {
        let options = parse_options(["--flat".to_owned(), "10,20".to_owned()].into_iter())
            .expect("parse options");
        assert_eq!(options.flat.as_deref(), Some("10,20"));
        assert!(options.fail.is_none());
        assert!(!options.json);
    }

    #[test]
    fn parses_fail_and_json() {
        let options = parse_options(
            ["--fail".to_owned(), "1".to_owned(), "--json".to_owned()].into_iter(),
        )
        .expect("parse options");
        assert_eq!(options.fail.as_deref(), Some("1"));
        assert!(options.json);
    }

    #[test]
    fn rejects_unknown_args() {
        parse_options(["--nope".to_owned()].into_iter()).unwrap_err();
        parse_options(["positional".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse_options(["--json".to_owned(), "--json".to_owned()].into_iter()).unwrap_err();

        parse_options(
            ["--flat".to_owned(), "1".to_owned(), "--flat".to_owned(), "2".to_owned()].into_iter(),
        )
        .unwrap_err();
    }

    #[test]
    fn rejects_missing_flag_values() {
        parse_options(["--flat".to_owned()].into_iter()).unwrap_err();
        parse_options(["--fail".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn parses_attribute_id_lists() {
        let ids = parse_attribute_ids("1, 3,").expect("parse attribute ids");
        let values: Vec<u64> = ids.iter().map(|id| id.value()).collect();
        assert_eq!(values, vec![1, 3]);

        parse_attribute_ids("1,x").unwrap_err();
    }
}
