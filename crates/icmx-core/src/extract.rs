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

//! Field extraction: one message in, one flattened row per line item out.
//!
//! Every field query supplies its own default: a missing element or
//! attribute yields `""` (or a field-specific literal), never an error. The
//! single hard failure is message text from which no XML tree can be
//! recovered at all.

use crate::dom::{self, Element};
use crate::error::Result;
use crate::sink::RowSink;
use chrono::NaiveDate;

/// The fixed output columns, in order.
pub const COLUMNS: [&str; 20] = [
    "PUSB",
    "PO_NUMBER",
    "SOS",
    "CUSTPROFCODE",
    "ITRANSPROUTECODE",
    "POCREATEDATE",
    "POLINESEQNR",
    "MMMPRODID",
    "ORDERQTY",
    "SELLINGUNIT",
    "SUPPLY CHAIN UNIT",
    "PRODUCT DESCRIPTION",
    "SPECIAL HANDLING",
    "LINE INSTRUCTION",
    "ADDRESS",
    "EXPORT MARKS",
    "ORDER INSTRUCTION",
    "EXPC SHIP TYPE CODE",
    "EXPC SHIP DATE",
    "SAP PO NUMBER",
];

/// A column value for one message: constant across the message's rows, or
/// aligned by position with the line-item sequence.
enum ColumnValue {
    Scalar(String),
    PerLine(Vec<String>),
}

/// Summary of one message without row output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageStats {
    /// The order's `orderNumber` attribute, `""` when absent.
    pub order_number: String,
    /// The order's `PUSB` attribute, `""` when absent.
    pub pusb: String,
    /// Number of line items (= number of rows extraction would write).
    pub line_items: usize,
}

/// Parse one message and report its identity and line-item count.
pub fn message_stats(message: &str) -> Result<MessageStats> {
    let root = dom::parse_lenient(message)?;
    let orders = root.find_path(&["purchaseOrder"]);
    Ok(MessageStats {
        order_number: first_attr(&orders, "orderNumber"),
        pusb: first_attr(&orders, "PUSB"),
        line_items: root.find_path(&["purchaseOrder", "lineItems", "lineItem"]).len(),
    })
}

/// Flatten one message into `sink`, one row per line item, starting at the
/// 1-indexed `start_row`. Returns the next free row index; a message with no
/// line items writes nothing and leaves the cursor unchanged.
pub fn extract_message(message: &str, sink: &mut dyn RowSink, start_row: usize) -> Result<usize> {
    let root = dom::parse_lenient(message)?;

    let orders = root.find_path(&["purchaseOrder"]);

    let pusb = first_attr(&orders, "PUSB");
    let po_number = first_attr(&orders, "orderNumber");
    let sos = first_text(&root.find_path(&["purchaseOrder", "header", "SoS"]));

    let mut custprofcode =
        first_text(&root.find_path(&["purchaseOrder", "header", "customerProfileCode"]));
    if !custprofcode.is_empty() {
        custprofcode = format!("STC {custprofcode}");
    }

    let itransproutecode = first_text(&root.find_path(&[
        "purchaseOrder",
        "header",
        "internationalTransportationRouteCode",
    ]));

    let pocreatedate = reformat_date(&first_text(&root.find_path(&[
        "purchaseOrder",
        "header",
        "purchaseOrderCreationDate",
    ])));

    // Ship-to address lines are joined in reverse document order. That is
    // the downstream system's expected ordering, odd as it reads.
    let mut address_lines: Vec<&str> = root
        .find_path(&["purchaseOrder", "header", "purchaseOrderDetails", "purchaseOrderDetail"])
        .into_iter()
        .filter(|el| el.attr("type") == Some("shiptoaddress"))
        .flat_map(|el| el.texts())
        .collect();
    address_lines.reverse();
    let address = address_lines.join("; ");

    let instruction: String = root
        .find_path(&["purchaseOrder", "header", "specialInstructions", "specialInstruction"])
        .into_iter()
        .filter(|el| el.attr("type") == Some("AH"))
        .flat_map(|el| el.texts())
        .collect();
    let order_instruction = if instruction.is_empty() {
        "null".to_string()
    } else {
        format!("C{instruction}")
    };

    let line_items = root.find_path(&["purchaseOrder", "lineItems", "lineItem"]);
    let count = line_items.len();

    let polineseqnr: Vec<String> = line_items
        .iter()
        .map(|li| normalize_sequence_number(li.attr("sequenceNumber").unwrap_or("")))
        .collect();

    let mmmprodid = child_texts(&line_items, "productIdentifier");
    let orderqty = child_texts(&line_items, "orderQuantity");
    let sellingunit = child_texts(&line_items, "sellingUnit");
    let supply_chain_unit = sellingunit.clone();
    let product_description = detail_texts(&line_items, "purchaseritemdescription");
    let special_handling = detail_texts(&line_items, "specialhandlingcode");

    let expc_ship_type_code: Vec<String> = line_items
        .iter()
        .map(|li| {
            li.children_named("requestedShipmentDate")
                .filter_map(|el| el.attr("type"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    let expc_ship_date: Vec<String> = child_texts(&line_items, "requestedShipmentDate")
        .into_iter()
        .map(|date| reformat_date(&date))
        .collect();

    let sap_po_number: Vec<String> = child_texts(&line_items, "purchasingCompanyReferenceNumber")
        .into_iter()
        .map(|value| if value.is_empty() { "null".to_string() } else { value })
        .collect();

    let data: [ColumnValue; 20] = [
        ColumnValue::Scalar(pusb),
        ColumnValue::Scalar(po_number),
        ColumnValue::Scalar(sos),
        ColumnValue::Scalar(custprofcode),
        ColumnValue::Scalar(itransproutecode),
        ColumnValue::Scalar(pocreatedate),
        ColumnValue::PerLine(polineseqnr),
        ColumnValue::PerLine(mmmprodid),
        ColumnValue::PerLine(orderqty),
        ColumnValue::PerLine(sellingunit),
        ColumnValue::PerLine(supply_chain_unit),
        ColumnValue::PerLine(product_description),
        ColumnValue::PerLine(special_handling),
        ColumnValue::PerLine(vec![String::new(); count]),
        ColumnValue::Scalar(address),
        ColumnValue::PerLine(vec![String::new(); count]),
        ColumnValue::Scalar(order_instruction),
        ColumnValue::PerLine(expc_ship_type_code),
        ColumnValue::PerLine(expc_ship_date),
        ColumnValue::PerLine(sap_po_number),
    ];

    for item in 0..count {
        for (col, value) in data.iter().enumerate() {
            let cell = match value {
                ColumnValue::Scalar(scalar) => scalar.as_str(),
                ColumnValue::PerLine(values) => {
                    values.get(item).map(String::as_str).unwrap_or("")
                }
            };
            sink.write_cell(start_row + item, col + 1, cell);
        }
    }

    Ok(start_row + count)
}

/// First value of the named attribute across `elements`, in document order.
fn first_attr(elements: &[&Element], name: &str) -> String {
    elements
        .iter()
        .find_map(|el| el.attr(name))
        .unwrap_or("")
        .to_string()
}

/// First direct text node across `elements`, in document order.
fn first_text(elements: &[&Element]) -> String {
    elements
        .iter()
        .find_map(|el| el.texts().next())
        .unwrap_or("")
        .to_string()
}

/// Per line item: text of all direct children with the given name,
/// space-joined when a line item carries several matches.
fn child_texts(line_items: &[&Element], name: &str) -> Vec<String> {
    line_items
        .iter()
        .map(|li| {
            li.children_named(name)
                .flat_map(|el| el.texts())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Per line item: text of `lineItemDetails/lineItemDetail` children carrying
/// the given `type` attribute, space-joined.
fn detail_texts(line_items: &[&Element], detail_type: &str) -> Vec<String> {
    line_items
        .iter()
        .map(|li| {
            li.children_named("lineItemDetails")
                .flat_map(|details| details.children_named("lineItemDetail"))
                .filter(|detail| detail.attr("type") == Some(detail_type))
                .flat_map(|detail| detail.texts())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Reformat `YYYY-MM-DD` to `DD.MM.YYYY`. Empty and unparsable input both
/// yield `""`; the parse is strict, so surrounding whitespace or trailing
/// garbage does not pass.
fn reformat_date(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%d.%m.%Y").to_string(),
        Err(_) => String::new(),
    }
}

/// Normalize a line sequence number: trimmed all-digit values lose their
/// leading zeros, anything else is kept (trimmed) as-is.
fn normalize_sequence_number(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let stripped = trimmed.trim_start_matches('0');
        if stripped.is_empty() {
            "0".to_string()
        } else {
            stripped.to_string()
        }
    } else {
        trimmed.to_string()
    }
}
