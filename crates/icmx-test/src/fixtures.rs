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

//! Canonical intercompany message documents and row-splitting helpers.

/// A fully populated purchase order with two line items.
///
/// Line 1 carries every per-line field; line 2 omits the special-handling
/// detail and has an empty purchasing-company reference (which flattens to
/// the literal `"null"`).
pub fn order_message() -> String {
    r#"<intercompanyMessage>
  <purchaseOrder PUSB="US01" orderNumber="4500123456">
    <header>
      <SoS>4021</SoS>
      <customerProfileCode>123</customerProfileCode>
      <internationalTransportationRouteCode>SEA-US-EU</internationalTransportationRouteCode>
      <purchaseOrderCreationDate>2024-03-07</purchaseOrderCreationDate>
      <purchaseOrderDetails>
        <purchaseOrderDetail type="shiptoaddress">3M Center Building 224</purchaseOrderDetail>
        <purchaseOrderDetail type="shiptoaddress">St. Paul MN 55144</purchaseOrderDetail>
        <purchaseOrderDetail type="billtoaddress">PO Box 33428</purchaseOrderDetail>
      </purchaseOrderDetails>
      <specialInstructions>
        <specialInstruction type="AH">HANDLE WITH CARE</specialInstruction>
        <specialInstruction type="XX">NOT AN AH INSTRUCTION</specialInstruction>
      </specialInstructions>
    </header>
    <lineItems>
      <lineItem sequenceNumber="001">
        <productIdentifier>7000137654</productIdentifier>
        <orderQuantity>24</orderQuantity>
        <sellingUnit>CS</sellingUnit>
        <lineItemDetails>
          <lineItemDetail type="purchaseritemdescription">SCOTCH TAPE 19MM X 33M</lineItemDetail>
          <lineItemDetail type="specialhandlingcode">FRAGILE</lineItemDetail>
        </lineItemDetails>
        <requestedShipmentDate type="EXW">2024-04-01</requestedShipmentDate>
        <purchasingCompanyReferenceNumber>4700112233</purchasingCompanyReferenceNumber>
      </lineItem>
      <lineItem sequenceNumber="002">
        <productIdentifier>7100998877</productIdentifier>
        <orderQuantity>6</orderQuantity>
        <sellingUnit>EA</sellingUnit>
        <lineItemDetails>
          <lineItemDetail type="purchaseritemdescription">RESPIRATOR 8210 N95</lineItemDetail>
        </lineItemDetails>
        <requestedShipmentDate type="CIF">2024-04-15</requestedShipmentDate>
        <purchasingCompanyReferenceNumber></purchasingCompanyReferenceNumber>
      </lineItem>
    </lineItems>
  </purchaseOrder>
</intercompanyMessage>"#
        .to_string()
}

/// A sparse purchase order with one line item and most optional fields
/// absent, for exercising per-field defaults.
pub fn minimal_message() -> String {
    r#"<intercompanyMessage>
  <purchaseOrder orderNumber="4500654321">
    <header>
      <SoS>9001</SoS>
    </header>
    <lineItems>
      <lineItem sequenceNumber="A1">
        <productIdentifier>7600555444</productIdentifier>
        <orderQuantity>1</orderQuantity>
        <purchasingCompanyReferenceNumber></purchasingCompanyReferenceNumber>
      </lineItem>
    </lineItems>
  </purchaseOrder>
</intercompanyMessage>"#
        .to_string()
}

/// A purchase order whose line-items collection is empty; extraction writes
/// zero rows for it.
pub fn no_line_items_message() -> String {
    r#"<intercompanyMessage>
  <purchaseOrder PUSB="GB03" orderNumber="4500000001">
    <header>
      <SoS>1100</SoS>
    </header>
    <lineItems>
    </lineItems>
  </purchaseOrder>
</intercompanyMessage>"#
        .to_string()
}

/// The same purchase-order structure with every element namespace-prefixed.
pub fn namespaced_message() -> String {
    r#"<po:intercompanyMessage xmlns:po="urn:example:intercompany">
  <po:purchaseOrder PUSB="DE02" orderNumber="4500777777">
    <po:header>
      <po:SoS>7777</po:SoS>
    </po:header>
    <po:lineItems>
      <po:lineItem sequenceNumber="010">
        <po:productIdentifier>7300222111</po:productIdentifier>
        <po:orderQuantity>12</po:orderQuantity>
        <po:sellingUnit>BX</po:sellingUnit>
      </po:lineItem>
    </po:lineItems>
  </po:purchaseOrder>
</po:intercompanyMessage>"#
        .to_string()
}

/// Prepend an XML declaration prologue to a message.
pub fn with_declaration(message: &str) -> String {
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{message}")
}

/// Two complete messages concatenated the way export jobs sometimes dump
/// them into a single chunk, declarations and all.
pub fn sibling_messages_chunk() -> String {
    format!(
        "{}\n{}",
        with_declaration(&order_message()),
        with_declaration(&minimal_message())
    )
}

/// Split a document into one simulated spreadsheet row per line, keeping
/// line terminators so the rows concatenate back to the exact input.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

/// Split a document at explicit byte offsets (sorted, in range, on char
/// boundaries). The fragments concatenate back to the exact input.
pub fn split_at(text: &str, points: &[usize]) -> Vec<String> {
    let mut rows = Vec::with_capacity(points.len() + 1);
    let mut start = 0usize;
    for &point in points {
        rows.push(text[start..point].to_string());
        start = point;
    }
    rows.push(text[start..].to_string());
    rows
}
