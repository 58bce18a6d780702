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

//! Shared test fixtures for the ICMX crates.
//!
//! Canonical intercompany message documents plus helpers for fragmenting
//! them across simulated spreadsheet rows, used by the scanner, extraction,
//! adapter, and CLI test suites.
//!
//! ```rust
//! use icmx_test::fixtures;
//!
//! let message = fixtures::order_message();      // 2 line items, all fields
//! let rows = fixtures::split_lines(&message);   // one spreadsheet row per line
//! assert_eq!(rows.concat(), message);
//! ```

pub mod fixtures;
