// Dweve ICMX - Intercompany Message Extraction
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Inspect command - report message boundaries without extracting rows.

use super::{column_config, read_file};
use colored::Colorize;
use icmx_core::{message_stats, Scanner};
use icmx_csv::column_from_csv_with_config;
use serde_json::json;

/// Run the boundary pass only and report every message (order number,
/// line-item count) and every skipped region found in the column.
pub fn inspect(file: &str, column: usize, delimiter: char, json: bool) -> Result<(), String> {
    let content = read_file(file)?;
    let read_config = column_config(column, delimiter)?;
    let rows = column_from_csv_with_config(&content, &read_config)
        .map_err(|e| format!("Failed to read column {} from '{}': {}", column, file, e))?;

    let scan = Scanner::new().messages(&rows);

    if json {
        print_json(&scan)
    } else {
        print_human(file, &scan);
        Ok(())
    }
}

fn print_human(file: &str, scan: &icmx_core::MessageScan) {
    println!(
        "{}: {} message(s), {} skipped region(s)",
        file.bold(),
        scan.messages.len(),
        scan.skips.len()
    );

    for (idx, message) in scan.messages.iter().enumerate() {
        let label = format!("#{}", idx + 1);
        match message_stats(&message.text) {
            Ok(stats) => {
                let order = if stats.order_number.is_empty() {
                    "<no order number>".to_string()
                } else {
                    stats.order_number
                };
                println!(
                    "  {} row {}: order {} ({} line item(s))",
                    label.cyan(),
                    message.source_row,
                    order,
                    stats.line_items
                );
            }
            Err(err) => {
                println!(
                    "  {} row {}: {}",
                    label.cyan(),
                    message.source_row,
                    format!("unusable: {}", err).red()
                );
            }
        }
    }

    for skip in &scan.skips {
        println!(
            "  {} row {}: {}",
            format!("[{}]", skip.kind).yellow(),
            skip.row,
            skip.detail
        );
    }
}

fn print_json(scan: &icmx_core::MessageScan) -> Result<(), String> {
    let messages: Vec<serde_json::Value> = scan
        .messages
        .iter()
        .map(|message| match message_stats(&message.text) {
            Ok(stats) => json!({
                "source_row": message.source_row,
                "order_number": stats.order_number,
                "pusb": stats.pusb,
                "line_items": stats.line_items,
            }),
            Err(err) => json!({
                "source_row": message.source_row,
                "error": err.to_string(),
            }),
        })
        .collect();

    let skips: Vec<serde_json::Value> = scan
        .skips
        .iter()
        .map(|skip| {
            json!({
                "kind": skip.kind.to_string(),
                "row": skip.row,
                "detail": skip.detail,
            })
        })
        .collect();

    let report = json!({ "messages": messages, "skips": skips });
    let rendered = serde_json::to_string_pretty(&report)
        .map_err(|e| format!("Failed to render JSON: {}", e))?;
    println!("{}", rendered);
    Ok(())
}
