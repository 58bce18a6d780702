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

//! Field-extraction tests: per-field defaulting, normalization rules, and
//! tolerance of malformed message structure.

use icmx_core::{extract_message, message_stats, Grid, IcmxErrorKind, COLUMNS};
use icmx_test::fixtures;

// =============================================================================
// Field mapping and defaults
// =============================================================================

#[test]
fn missing_optional_fields_default_per_column() {
    let mut grid = Grid::new();
    let next = extract_message(&fixtures::minimal_message(), &mut grid, 1).unwrap();
    assert_eq!(next, 2);

    assert_eq!(grid.cell(1, 1), ""); // PUSB attribute absent
    assert_eq!(grid.cell(1, 2), "4500654321");
    assert_eq!(grid.cell(1, 3), "9001");
    assert_eq!(grid.cell(1, 4), ""); // no customerProfileCode, no STC prefix
    assert_eq!(grid.cell(1, 5), "");
    assert_eq!(grid.cell(1, 6), ""); // no creation date
    assert_eq!(grid.cell(1, 7), "A1"); // non-numeric sequence kept as-is
    assert_eq!(grid.cell(1, 8), "7600555444");
    assert_eq!(grid.cell(1, 9), "1");
    assert_eq!(grid.cell(1, 10), ""); // no sellingUnit
    assert_eq!(grid.cell(1, 11), ""); // duplicated column mirrors it
    assert_eq!(grid.cell(1, 12), "");
    assert_eq!(grid.cell(1, 13), "");
    assert_eq!(grid.cell(1, 15), ""); // no ship-to details
    assert_eq!(grid.cell(1, 17), "null"); // no AH instructions
    assert_eq!(grid.cell(1, 18), "");
    assert_eq!(grid.cell(1, 19), "");
    assert_eq!(grid.cell(1, 20), "null"); // empty reference becomes literal null
}

#[test]
fn customer_profile_code_gets_stc_prefix_only_when_present() {
    let mut grid = Grid::new();
    extract_message(&fixtures::order_message(), &mut grid, 1).unwrap();
    assert_eq!(grid.cell(1, 4), "STC 123");

    let mut grid = Grid::new();
    extract_message(&fixtures::minimal_message(), &mut grid, 1).unwrap();
    assert_eq!(grid.cell(1, 4), "");
}

#[test]
fn address_lines_join_in_reverse_document_order() {
    let mut grid = Grid::new();
    extract_message(&fixtures::order_message(), &mut grid, 1).unwrap();
    assert_eq!(
        grid.cell(1, 15),
        "St. Paul MN 55144; 3M Center Building 224"
    );
}

#[test]
fn order_instruction_concatenates_ah_entries_with_c_prefix() {
    let message = r#"<intercompanyMessage>
      <purchaseOrder orderNumber="1">
        <header>
          <specialInstructions>
            <specialInstruction type="AH">DO NOT STACK</specialInstruction>
            <specialInstruction type="AH"> KEEP DRY</specialInstruction>
          </specialInstructions>
        </header>
        <lineItems><lineItem sequenceNumber="1"/></lineItems>
      </purchaseOrder>
    </intercompanyMessage>"#;

    let mut grid = Grid::new();
    extract_message(message, &mut grid, 1).unwrap();
    assert_eq!(grid.cell(1, 17), "CDO NOT STACK KEEP DRY");
}

#[test]
fn sequence_numbers_normalize_leading_zeros() {
    let message = r#"<intercompanyMessage>
      <purchaseOrder orderNumber="1">
        <lineItems>
          <lineItem sequenceNumber="007"/>
          <lineItem sequenceNumber="A1"/>
          <lineItem sequenceNumber="000"/>
        </lineItems>
      </purchaseOrder>
    </intercompanyMessage>"#;

    let mut grid = Grid::new();
    let next = extract_message(message, &mut grid, 1).unwrap();
    assert_eq!(next, 4);
    assert_eq!(grid.cell(1, 7), "7");
    assert_eq!(grid.cell(2, 7), "A1");
    assert_eq!(grid.cell(3, 7), "0");
}

#[test]
fn unparsable_ship_date_yields_empty_string() {
    let message = r#"<intercompanyMessage>
      <purchaseOrder orderNumber="1">
        <lineItems>
          <lineItem sequenceNumber="1">
            <requestedShipmentDate type="EXW">TBD</requestedShipmentDate>
          </lineItem>
        </lineItems>
      </purchaseOrder>
    </intercompanyMessage>"#;

    let mut grid = Grid::new();
    extract_message(message, &mut grid, 1).unwrap();
    assert_eq!(grid.cell(1, 18), "EXW");
    assert_eq!(grid.cell(1, 19), "");
}

// =============================================================================
// Cursor behavior
// =============================================================================

#[test]
fn zero_line_items_write_nothing_and_keep_cursor() {
    let mut grid = Grid::new();
    let next = extract_message(&fixtures::no_line_items_message(), &mut grid, 5).unwrap();
    assert_eq!(next, 5);
    assert_eq!(grid.row_count(), 0);
}

#[test]
fn consecutive_extractions_thread_the_cursor() {
    let mut grid = Grid::new();
    let next = extract_message(&fixtures::order_message(), &mut grid, 1).unwrap();
    let next = extract_message(&fixtures::minimal_message(), &mut grid, next).unwrap();
    assert_eq!(next, 4);
    assert_eq!(grid.cell(1, 2), "4500123456");
    assert_eq!(grid.cell(2, 2), "4500123456");
    assert_eq!(grid.cell(3, 2), "4500654321");
}

// =============================================================================
// Tolerance of malformed structure
// =============================================================================

#[test]
fn unclosed_header_still_yields_all_fields() {
    // The header element is never closed, which folds lineItems underneath
    // it in the recovered tree. Descendant-chain queries find them anyway.
    let message = r#"<intercompanyMessage>
      <purchaseOrder PUSB="US01" orderNumber="42">
        <header>
          <SoS>4021</SoS>
        <lineItems>
          <lineItem sequenceNumber="001">
            <productIdentifier>7000137654</productIdentifier>
          </lineItem>
        </lineItems>
      </purchaseOrder>
    </intercompanyMessage>"#;

    let mut grid = Grid::new();
    let next = extract_message(message, &mut grid, 1).unwrap();
    assert_eq!(next, 2);
    assert_eq!(grid.cell(1, 1), "US01");
    assert_eq!(grid.cell(1, 3), "4021");
    assert_eq!(grid.cell(1, 7), "1");
    assert_eq!(grid.cell(1, 8), "7000137654");
}

#[test]
fn text_without_any_element_is_a_parse_error() {
    let mut grid = Grid::new();
    let err = extract_message("not xml at all", &mut grid, 1).unwrap_err();
    assert_eq!(err.kind, IcmxErrorKind::Parse);
    assert_eq!(grid.row_count(), 0);
}

#[test]
fn namespaced_elements_extract_via_local_names() {
    let mut grid = Grid::new();
    extract_message(&fixtures::namespaced_message(), &mut grid, 1).unwrap();
    assert_eq!(grid.cell(1, 1), "DE02");
    assert_eq!(grid.cell(1, 2), "4500777777");
    assert_eq!(grid.cell(1, 7), "10");
    assert_eq!(grid.cell(1, 10), "BX");
}

// =============================================================================
// Stats
// =============================================================================

#[test]
fn message_stats_reports_identity_and_count() {
    let stats = message_stats(&fixtures::order_message()).unwrap();
    assert_eq!(stats.order_number, "4500123456");
    assert_eq!(stats.pusb, "US01");
    assert_eq!(stats.line_items, 2);

    let stats = message_stats(&fixtures::no_line_items_message()).unwrap();
    assert_eq!(stats.line_items, 0);
}

#[test]
fn column_names_match_the_output_contract() {
    assert_eq!(
        COLUMNS,
        [
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
        ]
    );
}
