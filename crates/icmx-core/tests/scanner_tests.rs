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

//! Scanner tests: boundary detection, chunk reassembly, caps, and the
//! skip-and-continue failure policy.

use icmx_core::{write_header, Grid, Limits, ScanSkipKind, Scanner};
use icmx_test::fixtures;

fn scan_into_grid(rows: &[String]) -> (Grid, icmx_core::ScanReport) {
    let mut grid = Grid::new();
    write_header(&mut grid);
    let report = Scanner::new().scan(rows, &mut grid, 2);
    (grid, report)
}

// =============================================================================
// Detection and single-cell chunks
// =============================================================================

#[test]
fn single_cell_message_produces_one_row_per_line_item() {
    let rows = vec![fixtures::order_message()];
    let (grid, report) = scan_into_grid(&rows);

    assert_eq!(report.messages_extracted, 1);
    assert_eq!(report.rows_written, 2);
    assert_eq!(report.next_row, 4);
    assert!(report.skips.is_empty());

    // Scalar columns repeat across both line-item rows.
    for row in [2, 3] {
        assert_eq!(grid.cell(row, 1), "US01");
        assert_eq!(grid.cell(row, 2), "4500123456");
        assert_eq!(grid.cell(row, 3), "4021");
        assert_eq!(grid.cell(row, 4), "STC 123");
        assert_eq!(grid.cell(row, 5), "SEA-US-EU");
        assert_eq!(grid.cell(row, 6), "07.03.2024");
        assert_eq!(
            grid.cell(row, 15),
            "St. Paul MN 55144; 3M Center Building 224"
        );
        assert_eq!(grid.cell(row, 17), "CHANDLE WITH CARE");
    }

    // Per-line columns follow document order.
    assert_eq!(grid.cell(2, 7), "1");
    assert_eq!(grid.cell(2, 8), "7000137654");
    assert_eq!(grid.cell(2, 9), "24");
    assert_eq!(grid.cell(2, 10), "CS");
    assert_eq!(grid.cell(2, 11), "CS");
    assert_eq!(grid.cell(2, 12), "SCOTCH TAPE 19MM X 33M");
    assert_eq!(grid.cell(2, 13), "FRAGILE");
    assert_eq!(grid.cell(2, 14), "");
    assert_eq!(grid.cell(2, 16), "");
    assert_eq!(grid.cell(2, 18), "EXW");
    assert_eq!(grid.cell(2, 19), "01.04.2024");
    assert_eq!(grid.cell(2, 20), "4700112233");

    assert_eq!(grid.cell(3, 7), "2");
    assert_eq!(grid.cell(3, 8), "7100998877");
    assert_eq!(grid.cell(3, 9), "6");
    assert_eq!(grid.cell(3, 10), "EA");
    assert_eq!(grid.cell(3, 11), "EA");
    assert_eq!(grid.cell(3, 12), "RESPIRATOR 8210 N95");
    assert_eq!(grid.cell(3, 13), "");
    assert_eq!(grid.cell(3, 18), "CIF");
    assert_eq!(grid.cell(3, 19), "15.04.2024");
    assert_eq!(grid.cell(3, 20), "null");
}

#[test]
fn rows_without_opening_indicator_never_trigger() {
    let rows = vec![
        "plain shipment notes".to_string(),
        "</intercompanyMessage>".to_string(), // closing tag alone is not a trigger
        "more notes".to_string(),
    ];
    let (grid, report) = scan_into_grid(&rows);

    assert_eq!(report.messages_extracted, 0);
    assert_eq!(report.rows_written, 0);
    assert_eq!(report.next_row, 2);
    assert!(report.skips.is_empty());
    assert_eq!(grid.row_count(), 1); // header only
}

#[test]
fn detection_is_case_insensitive() {
    let rows = vec![fixtures::order_message().replace("intercompanyMessage", "INTERCOMPANYMESSAGE")];
    let (_, report) = scan_into_grid(&rows);
    assert_eq!(report.messages_extracted, 1);
    assert_eq!(report.rows_written, 2);
}

#[test]
fn detection_tolerates_namespace_prefix() {
    let rows = vec![fixtures::namespaced_message()];
    let (grid, report) = scan_into_grid(&rows);

    assert_eq!(report.messages_extracted, 1);
    assert_eq!(report.rows_written, 1);
    assert_eq!(grid.cell(2, 1), "DE02");
    assert_eq!(grid.cell(2, 2), "4500777777");
    assert_eq!(grid.cell(2, 7), "10");
    assert_eq!(grid.cell(2, 10), "BX");
}

#[test]
fn xml_declaration_is_stripped_from_extracted_message() {
    let rows = vec![fixtures::with_declaration(&fixtures::order_message())];
    let scan = Scanner::new().messages(&rows);

    assert_eq!(scan.messages.len(), 1);
    let text = &scan.messages[0].text;
    assert!(text.starts_with("<intercompanyMessage"));
    assert!(text.ends_with("</intercompanyMessage>"));
    assert!(!text.contains("<?xml"));
}

// =============================================================================
// Multi-row reassembly
// =============================================================================

#[test]
fn fragmented_message_reassembles_to_identical_output() {
    let message = fixtures::order_message();

    let single = vec![message.clone()];
    let fragmented = fixtures::split_lines(&message);
    assert!(fragmented.len() > 10);

    let single_scan = Scanner::new().messages(&single);
    let fragmented_scan = Scanner::new().messages(&fragmented);
    assert_eq!(single_scan.messages.len(), 1);
    assert_eq!(fragmented_scan.messages.len(), 1);
    // Reassembly is byte-exact.
    assert_eq!(single_scan.messages[0].text, fragmented_scan.messages[0].text);

    let (grid_single, _) = scan_into_grid(&single);
    let (grid_fragmented, report) = scan_into_grid(&fragmented);
    assert_eq!(report.rows_written, 2);
    assert_eq!(grid_single, grid_fragmented);
}

#[test]
fn five_part_split_matches_single_cell() {
    let message = fixtures::order_message();
    let close = message
        .rfind("</intercompanyMessage")
        .expect("fixture has closing tag");
    // Split points inside the body, clear of both boundary tags.
    let points = [40, 180, 500, close - 10];
    let fragmented = fixtures::split_at(&message, &points);
    assert_eq!(fragmented.len(), 5);

    let (grid_single, _) = scan_into_grid(&[message.clone()]);
    let (grid_fragmented, _) = scan_into_grid(&fragmented);
    assert_eq!(grid_single, grid_fragmented);
}

#[test]
fn scan_continues_after_message_chunk() {
    // A message chunk followed by unrelated rows and a second message.
    let mut rows = fixtures::split_lines(&fixtures::order_message());
    rows.push("unrelated trailing cell".to_string());
    rows.push(fixtures::minimal_message());

    let (grid, report) = scan_into_grid(&rows);
    assert_eq!(report.messages_extracted, 2);
    assert_eq!(report.rows_written, 3);
    assert_eq!(grid.cell(4, 2), "4500654321");
}

// =============================================================================
// Sibling messages in one chunk
// =============================================================================

#[test]
fn sibling_messages_in_one_cell_both_extract() {
    let rows = vec![fixtures::sibling_messages_chunk()];
    let (grid, report) = scan_into_grid(&rows);

    assert_eq!(report.messages_extracted, 2);
    assert_eq!(report.rows_written, 3);
    assert_eq!(report.next_row, 5);

    // First message's rows come first, in document order.
    assert_eq!(grid.cell(2, 2), "4500123456");
    assert_eq!(grid.cell(3, 2), "4500123456");
    assert_eq!(grid.cell(4, 2), "4500654321");
}

#[test]
fn sibling_messages_fragmented_across_rows_form_two_chunks() {
    let rows = fixtures::split_lines(&fixtures::sibling_messages_chunk());
    let (grid, report) = scan_into_grid(&rows);

    assert_eq!(report.messages_extracted, 2);
    assert_eq!(report.rows_written, 3);
    assert_eq!(grid.cell(4, 2), "4500654321");
}

// =============================================================================
// Limits and failure policy
// =============================================================================

#[test]
fn oversized_single_cell_chunk_is_skipped_and_scan_continues() {
    let scanner = Scanner::with_limits(Limits {
        max_chunk_bytes: 1024,
        ..Limits::default()
    });
    let rows = vec![fixtures::order_message(), fixtures::minimal_message()];

    let mut grid = Grid::new();
    write_header(&mut grid);
    let report = scanner.scan(&rows, &mut grid, 2);

    assert_eq!(report.skips.len(), 1);
    assert_eq!(report.skips[0].kind, ScanSkipKind::SizeExceeded);
    assert_eq!(report.skips[0].row, 1);
    // The well-formed message right after the oversized chunk still extracts.
    assert_eq!(report.messages_extracted, 1);
    assert_eq!(report.rows_written, 1);
    assert_eq!(grid.cell(2, 2), "4500654321");
}

#[test]
fn oversized_multi_row_chunk_is_skipped_past_its_closing_row() {
    let scanner = Scanner::with_limits(Limits {
        max_chunk_bytes: 1024,
        ..Limits::default()
    });
    let mut rows = fixtures::split_lines(&fixtures::order_message());
    rows.push(fixtures::minimal_message());

    let mut grid = Grid::new();
    let report = scanner.scan(&rows, &mut grid, 1);

    assert_eq!(report.skips.len(), 1);
    assert_eq!(report.skips[0].kind, ScanSkipKind::SizeExceeded);
    assert_eq!(report.messages_extracted, 1);
    assert_eq!(grid.cell(1, 2), "4500654321");
}

#[test]
fn part_count_cap_abandons_chunk_without_extraction() {
    let scanner = Scanner::with_limits(Limits {
        max_chunk_parts: 3,
        ..Limits::default()
    });
    let rows = vec![
        "<intercompanyMessage>".to_string(),
        "a".to_string(),
        "b".to_string(),
        "c".to_string(),
        "d".to_string(),
        "</intercompanyMessage>".to_string(),
        fixtures::order_message(),
    ];

    let mut grid = Grid::new();
    let report = scanner.scan(&rows, &mut grid, 1);

    assert_eq!(report.skips.len(), 1);
    assert_eq!(report.skips[0].kind, ScanSkipKind::PartCountExceeded);
    assert_eq!(report.skips[0].row, 1);
    // Scanning resumed and picked up the complete message further down.
    assert_eq!(report.messages_extracted, 1);
    assert_eq!(report.rows_written, 2);
}

#[test]
fn incomplete_chunk_at_end_of_input_is_abandoned() {
    let rows = vec![
        "<intercompanyMessage>".to_string(),
        "<purchaseOrder orderNumber=\"X\">".to_string(),
        "never closed".to_string(),
    ];
    let (grid, report) = scan_into_grid(&rows);

    assert_eq!(report.skips.len(), 1);
    assert_eq!(report.skips[0].kind, ScanSkipKind::IncompleteChunk);
    assert_eq!(report.messages_extracted, 0);
    assert_eq!(report.rows_written, 0);
    assert_eq!(grid.row_count(), 1);
}

#[test]
fn chunk_without_message_span_reports_no_messages_found() {
    // Triggered by the declaration, bounded by a stray closing tag, but no
    // opening tag anywhere: nothing to extract.
    let rows = vec![
        "<?xml version=\"1.0\"?> export artifact".to_string(),
        "noise".to_string(),
        "</intercompanyMessage>".to_string(),
    ];
    let (_, report) = scan_into_grid(&rows);

    assert_eq!(report.skips.len(), 1);
    assert_eq!(report.skips[0].kind, ScanSkipKind::NoMessagesFound);
    assert_eq!(report.messages_extracted, 0);
}

#[test]
fn empty_input_scans_to_empty_report() {
    let (grid, report) = scan_into_grid(&[]);
    assert_eq!(report.messages_extracted, 0);
    assert_eq!(report.next_row, 2);
    assert!(report.skips.is_empty());
    assert_eq!(grid.row_count(), 1);
}

#[test]
fn bom_is_removed_before_span_matching() {
    let rows = vec![format!("\u{feff}{}", fixtures::order_message())];
    let scan = Scanner::new().messages(&rows);
    assert_eq!(scan.messages.len(), 1);
    assert!(scan.messages[0].text.starts_with("<intercompanyMessage"));
}
