//! Default values for optional inputs
//!
//! Every optional input falls back to the value listed here.

/// `create_stub`
pub const CREATE_STUB: bool = false;

/// `allow_private_public_transfer`
pub const ALLOW_PRIVATE_PUBLIC_TRANSFER: bool = false;

/// `create_labels_if_missing`
pub const CREATE_LABELS_IF_MISSING: bool = false;

/// `enable_custom_label_routing`
pub const ENABLE_CUSTOM_LABEL_ROUTING: bool = false;

/// `debug`
pub const DEBUG: bool = false;

/// Color for labels created without an explicit one (GitHub's grey)
pub const LABEL_COLOR: &str = "ededed";
