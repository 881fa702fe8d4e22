//! Stream catalog
//!
//! Every stream the tap can extract, declared as plain data: endpoint,
//! keys, record path, pagination scheme and field table.

mod fields;

use crate::error::{Error, Result};
use crate::pagination::{PaginationKind, StreamContext, DEFAULT_PAGE_SIZE};
use crate::schema::{schema_from_fields, FieldTable, JsonSchema};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Static description of one stream
#[derive(Debug, Clone, Copy)]
pub struct StreamDefinition {
    /// Stream name, as used in state and on the command line
    pub name: &'static str,
    /// Endpoint path relative to the API root
    pub path: &'static str,
    /// Primary key fields
    pub primary_keys: &'static [&'static str],
    /// Field used for bookmarks, if the stream is incremental
    pub replication_key: Option<&'static str>,
    /// JSONPath of the records in a response
    pub records_path: &'static str,
    /// How pages are walked
    pub pagination: PaginationKind,
    /// Records per page
    pub page_size: u32,
    /// Parameters sent with every request
    pub extra_params: &'static [(&'static str, &'static str)],
    /// Record fields
    pub fields: FieldTable,
}

impl StreamDefinition {
    /// Record schema for SCHEMA messages
    pub fn schema(&self) -> JsonSchema {
        schema_from_fields(self.fields)
    }

    /// Whether the stream keeps a bookmark
    pub fn is_incremental(&self) -> bool {
        self.replication_key.is_some()
    }

    /// Whether pages arrive in ascending replication-key order.
    ///
    /// Cursor requests of incremental streams ask for `sort=asc`; time
    /// windows come back in whatever order the API keeps them.
    pub fn is_sorted(&self) -> bool {
        self.is_incremental() && self.pagination == PaginationKind::Cursor
    }

    /// Request context for one run starting at `start`
    pub fn context(&self, start: Option<DateTime<Utc>>) -> StreamContext {
        let mut context = StreamContext::new(self.name).page_size(self.page_size);
        if let Some(key) = self.replication_key {
            context = context.replication_key(key);
        }
        for (key, value) in self.extra_params {
            context = context.extra_param(*key, *value);
        }
        context.starting_timestamp = start;
        context
    }
}

const CURSOR_STREAM: StreamDefinition = StreamDefinition {
    name: "",
    path: "",
    primary_keys: &[],
    replication_key: None,
    records_path: "$.data[*]",
    pagination: PaginationKind::Cursor,
    page_size: DEFAULT_PAGE_SIZE,
    extra_params: &[],
    fields: &[],
};

/// All streams, in extraction order
pub static STREAMS: &[StreamDefinition] = &[
    StreamDefinition {
        name: "products",
        path: "/Products/GetProductMaster",
        primary_keys: &["product_id"],
        replication_key: Some("updated_at"),
        extra_params: &[("custom_fields", "1")],
        fields: fields::PRODUCTS,
        ..CURSOR_STREAM
    },
    StreamDefinition {
        name: "product_compositions",
        path: "/Products/getKits",
        primary_keys: &["c_id"],
        fields: fields::PRODUCT_COMPOSITIONS,
        ..CURSOR_STREAM
    },
    StreamDefinition {
        name: "suppliers",
        path: "/wms/V2/getVendors",
        primary_keys: &["vendor_c_id"],
        fields: fields::SUPPLIERS,
        ..CURSOR_STREAM
    },
    StreamDefinition {
        name: "sell_orders",
        path: "/orders/V2/getAllOrders",
        primary_keys: &["order_id"],
        replication_key: Some("last_update_date"),
        records_path: "$.data.orders[*]",
        pagination: PaginationKind::TimeWindow,
        page_size: 50,
        fields: fields::SELL_ORDERS,
        ..CURSOR_STREAM
    },
    StreamDefinition {
        name: "buy_orders",
        path: "/wms/V2/getPurchaseOrderDetails",
        primary_keys: &["po_id"],
        replication_key: Some("po_updated_date"),
        fields: fields::BUY_ORDERS,
        ..CURSOR_STREAM
    },
    StreamDefinition {
        name: "receipts",
        path: "/Grn/V2/getGrnDetails",
        primary_keys: &["grn_id"],
        replication_key: Some("po_created_date"),
        fields: fields::RECEIPTS,
        ..CURSOR_STREAM
    },
    StreamDefinition {
        name: "returns",
        path: "/orders/getAllReturns",
        primary_keys: &["credit_note_id"],
        records_path: "$.data.credit_notes[*]",
        fields: fields::RETURNS,
        ..CURSOR_STREAM
    },
];

static BY_NAME: LazyLock<HashMap<&'static str, &'static StreamDefinition>> =
    LazyLock::new(|| STREAMS.iter().map(|s| (s.name, s)).collect());

/// Look up a stream by name
pub fn get_stream(name: &str) -> Option<&'static StreamDefinition> {
    BY_NAME.get(name).copied()
}

/// Names of all streams, in extraction order
pub fn list_streams() -> Vec<&'static str> {
    STREAMS.iter().map(|s| s.name).collect()
}

/// Resolve a user selection; `None` or an empty list selects every stream
pub fn select_streams(names: Option<&[String]>) -> Result<Vec<&'static StreamDefinition>> {
    match names {
        Some(names) if !names.is_empty() => names
            .iter()
            .map(|name| {
                get_stream(name).ok_or_else(|| Error::StreamNotFound {
                    stream: name.clone(),
                })
            })
            .collect(),
        _ => Ok(STREAMS.iter().collect()),
    }
}
