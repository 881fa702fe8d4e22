//! Record field tables
//!
//! Nested objects carry their own tables; `FREE_FORM` objects are passed
//! through without a property list.

use crate::schema::{FieldTable, FieldType as F, JsonType};

const ARRAY_OR_OBJECT: F = F::AnyOf(&[JsonType::Array, JsonType::Object]);
const ARRAY_OR_STRING: F = F::AnyOf(&[JsonType::Array, JsonType::String]);
const STRING_OR_NUMBER: F = F::AnyOf(&[JsonType::String, JsonType::Number]);
const NUMBER_OR_STRING: F = F::AnyOf(&[JsonType::Number, JsonType::String]);
const STRING_OR_INTEGER: F = F::AnyOf(&[JsonType::String, JsonType::Integer]);
const FREE_FORM: F = F::Object(&[]);

const VARIANT_CUSTOM_FIELDS: FieldTable = &[
    ("cp_id", F::Integer),
    ("field_name", F::String),
    ("value", F::String),
    ("enabled", F::Integer),
];

const VARIANTS: FieldTable = &[
    ("sku", F::String),
    ("parent_cpId", F::Integer),
    ("cpId", F::Integer),
    ("active", F::Integer),
    ("accounting_sku", F::String),
    ("accounting_unit", F::String),
    ("product_id", F::Integer),
    ("product_name", F::String),
    ("created_at", F::DateTime),
    ("inventory", F::Integer),
    ("brand", F::String),
    ("colour", F::String),
    ("category_id", F::Integer),
    ("category_name", F::String),
    ("height", F::Number),
    ("length", F::Number),
    ("width", F::Number),
    ("weight", F::Number),
    ("cost", F::Number),
    ("mrp", F::Number),
    ("size", F::String),
    ("model_no", F::String),
    ("EANUPC", F::String),
    ("hsn_code", F::String),
    ("product shelf life", F::Integer),
    ("product_image_url", F::String),
    ("brand_id", F::Integer),
    ("cp_inventory", F::Integer),
    ("tax_rate", F::Number),
    ("tax_rule_name", F::String),
    ("custom_fields", F::ObjectArray(VARIANT_CUSTOM_FIELDS)),
];

const SUB_PRODUCTS: FieldTable = &[
    ("sku", F::String),
    ("combo_cp_id", F::Integer),
    ("quantity", F::Integer),
    ("cpId", F::Integer),
    ("accounting_sku", F::String),
    ("accounting_unit", F::String),
    ("product_id", F::Integer),
    ("product_name", F::String),
    ("height", F::Number),
    ("length", F::Number),
    ("width", F::Number),
    ("weight", F::Number),
    ("cost", F::Number),
    ("mrp", F::Number),
    ("size", F::String),
    ("model_no", F::String),
    ("EANUPC", F::String),
    ("hsn_code", F::String),
    ("product shelf life", F::Integer),
    ("product_image_url", F::String),
    ("brand_id", F::Integer),
    ("cp_inventory", F::Integer),
    ("tax_rate", F::Number),
    ("tax_rule_name", F::String),
    ("additional_images", F::StringArray),
    ("custom_fields", ARRAY_OR_OBJECT),
];

const VENDOR_ADDRESS: FieldTable = &[("dispatch", ARRAY_OR_OBJECT), ("billing", ARRAY_OR_OBJECT)];

const SHIPPING_HISTORY: FieldTable = &[
    ("qc_pass_datetime", F::DateTime),
    ("confirm_datetime", F::DateTime),
    ("print_datetime", F::DateTime),
    ("manifest_datetime", F::DateTime),
];

const ORDER_DOCUMENTS: FieldTable = &[
    ("originalLabelUrl", F::String),
    ("easyecom_invoice", F::String),
    ("label", F::String),
    ("intaxform", F::String),
    ("outtaxform", F::String),
    ("marketplaceinvoice", F::String),
    ("marketplace_tax_invoice", F::String),
];

pub const PRODUCTS: FieldTable = &[
    ("cp_id", F::Integer),
    ("product_id", F::Integer),
    ("sku", F::String),
    ("product_name", F::String),
    ("description", F::String),
    ("active", F::Boolean),
    ("created_at", F::DateTime),
    ("updated_at", F::DateTime),
    ("inventory", F::Integer),
    ("product_type", F::String),
    ("brand", F::String),
    ("colour", F::String),
    ("category_id", F::Integer),
    ("brand_id", F::Integer),
    ("accounting_sku", F::String),
    ("accounting_unit", F::String),
    ("category_name", F::String),
    ("expiry_type", F::Integer),
    ("company_name", F::String),
    ("c_id", F::Integer),
    ("height", F::Number),
    ("length", F::Number),
    ("width", F::Number),
    ("weight", F::Number),
    ("cost", F::Number),
    ("mrp", F::Number),
    ("size", F::String),
    ("cp_sub_products_count", F::Integer),
    ("model_no", F::String),
    ("hsn_code", F::String),
    ("tax_rate", F::Number),
    ("product shelf life", F::Integer),
    ("product_image_url", F::String),
    ("vendor_code", F::StringArray),
    ("cp_inventory", F::Integer),
    ("custom_fields", ARRAY_OR_OBJECT),
    ("variants", F::ObjectArray(VARIANTS)),
    ("sub_products", F::ObjectArray(SUB_PRODUCTS)),
];

pub const PRODUCT_COMPOSITIONS: FieldTable = &[
    ("product_id", F::Integer),
    ("sku", F::String),
    ("accounting_sku", F::String),
    ("accounting_unit", F::String),
    ("mrp", F::Number),
    ("add_date", F::DateTime),
    ("lastUpdateDate", F::DateTime),
    ("cost", F::Number),
    ("HSNCode", F::String),
    ("colour", F::String),
    ("weight", F::Number),
    ("height", F::Number),
    ("length", F::Number),
    ("width", F::Number),
    ("size", F::String),
    ("material_type", F::Integer),
    ("modelNumber", F::String),
    ("modelName", F::String),
    ("category", F::String),
    ("brand", F::String),
    ("c_id", F::Integer),
    ("subProducts", ARRAY_OR_OBJECT),
];

pub const SUPPLIERS: FieldTable = &[
    ("vendor_name", F::String),
    ("vendor_c_id", F::Integer),
    ("vendor_code", F::String),
    ("firstname ", F::String),
    ("lastname", F::String),
    ("email", F::String),
    ("address", F::Object(VENDOR_ADDRESS)),
];

pub const SELL_ORDERS: FieldTable = &[
    ("suborders", ARRAY_OR_STRING),
    ("invoice_id", F::Integer),
    ("order_id", F::Integer),
    ("queue_message", F::String),
    ("queue_status", F::Integer),
    ("order_priority", F::Integer),
    ("blockSplit", F::Integer),
    ("reference_code", F::String),
    ("company_name", F::String),
    ("location_key", F::String),
    ("warehouseId", F::Integer),
    ("seller_gst", F::String),
    ("import_warehouse_id", F::Integer),
    ("import_warehouse_name", F::String),
    ("pickup_address", F::String),
    ("pickup_city", F::String),
    ("pickup_state", F::String),
    ("pickup_state_code", F::String),
    ("pickup_pin_code", F::String),
    ("pickup_country", F::String),
    ("invoice_currency_code", F::String),
    ("order_type", F::String),
    ("order_type_key", F::String),
    ("replacement_order", F::Integer),
    ("marketplace", F::String),
    ("marketplace_id", F::Integer),
    ("qcPassed", F::Integer),
    ("salesmanUserId", F::Integer),
    ("order_date", F::DateTime),
    ("tat", F::DateTime),
    ("available_after", F::DateTime),
    ("invoice_date", F::DateTime),
    ("import_date", F::DateTime),
    ("last_update_date", F::DateTime),
    ("manifest_date", F::DateTime),
    ("manifest_no", F::String),
    ("invoice_number", F::String),
    ("marketplace_invoice_num", F::String),
    ("shipping_last_update_date", F::DateTime),
    ("batch_id", STRING_OR_NUMBER),
    ("batch_created_at", F::DateTime),
    ("message", F::String),
    ("courier_aggregator_name", F::String),
    ("courier", F::String),
    ("carrier_id", F::Integer),
    ("awb_number", F::String),
    ("Package Weight", F::Number),
    ("Package Height", F::Number),
    ("Package Length", F::Number),
    ("Package Width", F::Number),
    ("order_status", F::String),
    ("order_status_id", F::Integer),
    ("suborder_count", STRING_OR_INTEGER),
    ("shipping_status", F::String),
    ("shipping_status_id", F::Integer),
    ("shipping_history", F::ObjectArray(SHIPPING_HISTORY)),
    ("delivery_date", F::DateTime),
    ("payment_mode", F::String),
    ("payment_mode_id", F::Integer),
    ("payment_gateway_transaction_number", F::String),
    ("payment_gateway_name", F::String),
    ("buyer_gst", F::String),
    ("customer_name", F::String),
    ("contact_num", F::String),
    ("address_line_1", F::String),
    ("address_line_2", F::String),
    ("city", F::String),
    ("pin_code", F::String),
    ("state", F::String),
    ("state_code", F::String),
    ("country", F::String),
    ("email", F::String),
    ("latitude", F::String),
    ("longitude", F::String),
    ("billing_name", F::String),
    ("billing_address_1", F::String),
    ("billing_address_2", F::String),
    ("billing_city", F::String),
    ("billing_state", F::String),
    ("billing_state_code", F::String),
    ("billing_pin_code", F::String),
    ("billing_country", F::String),
    ("billing_mobile", F::String),
    ("order_quantity", F::Integer),
    ("meta", FREE_FORM),
    ("documents", F::Object(ORDER_DOCUMENTS)),
    ("total_amount", F::Number),
    ("total_tax", F::Number),
    ("total_shipping_charge", F::Number),
    ("total_discount", F::Number),
    ("collectable_amount", F::Number),
    ("tcs_rate", NUMBER_OR_STRING),
    ("tcs_amount", F::Number),
    ("customer_code", NUMBER_OR_STRING),
    ("fulfillable_status", F::Integer),
];

pub const BUY_ORDERS: FieldTable = &[
    ("po_items", ARRAY_OR_STRING),
    ("po_id", F::Integer),
    ("total_po_value", F::String),
    ("po_number", F::Integer),
    ("po_ref_num", F::String),
    ("po_status_id", F::Integer),
    ("po_created_date", F::DateTime),
    ("po_updated_date", F::DateTime),
    ("po_created_warehouse", F::String),
    ("po_created_warehouse_c_id", F::Integer),
    ("vendor_name", F::String),
    ("vendor_c_id", F::Integer),
    ("vendor_code", F::String),
];

pub const RECEIPTS: FieldTable = &[
    ("grn_id", F::Integer),
    ("grn_invoice_number", F::String),
    ("total_grn_value", F::Number),
    ("grn_status_id", F::Integer),
    ("grn_status", F::String),
    ("grn_created_at", F::DateTime),
    ("grn_invoice_date", F::Date),
    ("po_id", F::Integer),
    ("po_number", F::Integer),
    ("po_ref_num", F::String),
    ("po_status_id", F::Integer),
    ("po_created_date", F::DateTime),
    ("po_updated_date", F::DateTime),
    ("inwarded_warehouse", F::String),
    ("inwarded_warehouse_c_id", F::Integer),
    ("vendor_name", F::String),
    ("vendor_c_id", F::Integer),
    ("grn_items", ARRAY_OR_STRING),
];

pub const RETURNS: FieldTable = &[
    ("credit_note_id", F::Integer),
    ("invoice_id", F::Integer),
    ("order_id", F::Integer),
    ("reference_code", F::String),
    ("company_name", F::String),
    ("warehouseId", F::Integer),
    ("seller_gst", F::String),
    ("forward_shipment_pickup_address", F::String),
    ("forward_shipment_pickup_city", F::String),
    ("forward_shipment_pickup_state", F::String),
    ("forward_shipment_pickup_pin_code", F::String),
    ("forward_shipment_pickup_country", F::String),
    ("order_type", F::String),
    ("order_type_key", F::String),
    ("replacement_order", F::Integer),
    ("marketplace", F::String),
    ("marketplace_id", F::Integer),
    ("salesmanUserId", F::Integer),
    ("order_date", F::DateTime),
    ("invoice_date", F::DateTime),
    ("import_date", F::DateTime),
    ("last_update_date", F::DateTime),
    ("manifest_date", F::DateTime),
    ("credit_note_date", F::DateTime),
    ("return_date", F::DateTime),
    ("manifest_no", F::String),
    ("invoice_number", F::String),
    ("credit_note_number", F::String),
    ("marketplace_credit_note_num", F::String),
    ("marketplace_invoice_num", F::String),
    ("batch_id", F::Number),
    ("batch_created_at", F::DateTime),
    ("payment_mode", F::String),
    ("payment_mode_id", F::Integer),
    ("buyer_gst", F::String),
    ("forward_shipment_customer_name", F::String),
    ("forward_shipment_customer_contact_num", F::String),
    ("forward_shipment_customer_address_line_1", F::String),
    ("forward_shipment_customer_address_line_2", F::String),
    ("forward_shipment_customer_city", F::String),
    ("forward_shipment_customer_pin_code", F::String),
    ("forward_shipment_customer_state", F::String),
    ("forward_shipment_customer_country", F::String),
    ("forward_shipment_customer_email", F::String),
    ("forward_shipment_billing_name", F::String),
    ("forward_shipment_billing_address_1", F::String),
    ("forward_shipment_billing_address_2", F::String),
    ("forward_shipment_billing_city", F::String),
    ("forward_shipment_billing_state", F::String),
    ("forward_shipment_billing_pin_code", F::String),
    ("forward_shipment_billing_country", F::String),
    ("forward_shipment_billing_mobile", F::String),
    ("order_quantity", F::Integer),
    ("total_invoice_amount", F::Number),
    ("total_invoice_tax", F::Number),
    ("invoice_collectable_amount", F::Integer),
    ("items", ARRAY_OR_STRING),
];
