//! Payload-conversion registry for downstream viewers.
//!
//! Completed items carry opaque bytes plus a type tag; how those bytes are
//! presented is a consumer concern. This module keeps that concern behind an
//! explicit registry: a closed set of conversion kinds, a mapping from type
//! tag to plugin metadata, and a dispatch that turns a completed item into a
//! [`RenderedPayload`]. The registry is a plain value owned by whoever
//! constructs it; there is no process-wide plugin state and registering a new
//! interpretation never involves reflection.
//!
//! Conversion is presentation only. The reconstructed `raw_bytes` of a
//! completed item stay lossless regardless of what a converter does.

pub mod convert;

use std::collections::HashMap;

use crate::reassembler::CompletedItem;

pub use convert::RenderedPayload;

/// The closed set of payload conversion strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// JSON configuration documents.
    Config,
    /// Image containers, rendered as a base64 data URI.
    Image,
    /// Command transcripts, rendered as text plus split lines.
    Command,
    /// Anything else: plain text decode.
    Generic,
}

/// Metadata describing how one registered type tag is handled.
#[derive(Debug, Clone)]
pub struct PluginInfo {
    /// Display name of the handler.
    pub name: String,
    /// Short human-readable description.
    pub description: String,
    /// File extension used when landing an item of this type on disk.
    pub extension: String,
    /// Conversion strategy for this type.
    pub kind: PayloadKind,
}

impl PluginInfo {
    /// Build a `PluginInfo` from its fields.
    pub fn new(name: &str, description: &str, extension: &str, kind: PayloadKind) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            extension: extension.to_string(),
            kind,
        }
    }
}

/// Registry mapping payload type tags to their handlers.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: HashMap<String, PluginInfo>,
}

impl PluginRegistry {
    /// Create an empty registry. The caller decides what to register.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in handlers registered:
    /// `config`, `image` and `command`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(
            "config",
            PluginInfo::new(
                "Configuration",
                "Structured JSON configuration payloads",
                "json",
                PayloadKind::Config,
            ),
        );
        registry.register(
            "image",
            PluginInfo::new(
                "Image",
                "Binary image containers",
                "jpg",
                PayloadKind::Image,
            ),
        );
        registry.register(
            "command",
            PluginInfo::new(
                "Command transcript",
                "Captured command output",
                "txt",
                PayloadKind::Command,
            ),
        );
        registry
    }

    /// Register a handler for `type_tag`, replacing any existing entry.
    pub fn register(&mut self, type_tag: &str, info: PluginInfo) {
        if self.plugins.contains_key(type_tag) {
            log::warn!("Plugin type \"{}\" already registered, replacing it", type_tag);
        }
        self.plugins.insert(type_tag.to_string(), info);
    }

    /// Whether a handler is registered for `type_tag`.
    pub fn is_type_known(&self, type_tag: &str) -> bool {
        self.plugins.contains_key(type_tag)
    }

    /// Handler metadata for `type_tag`, if registered.
    pub fn plugin_info(&self, type_tag: &str) -> Option<&PluginInfo> {
        self.plugins.get(type_tag)
    }

    /// All registered type tags.
    pub fn registered_types(&self) -> Vec<&str> {
        self.plugins.keys().map(String::as_str).collect()
    }

    /// Convert a completed item through its registered handler.
    ///
    /// Returns `None` when the item's type has no registered handler.
    pub fn convert(&self, item: &CompletedItem) -> Option<RenderedPayload> {
        let info = self.plugin_info(&item.type_tag)?;
        Some(match info.kind {
            PayloadKind::Config => convert::config_payload(&item.raw_bytes),
            PayloadKind::Image => convert::image_payload(&item.raw_bytes),
            PayloadKind::Command => convert::command_payload(&item.raw_bytes),
            PayloadKind::Generic => convert::text_payload(&item.raw_bytes),
        })
    }

    /// File extension for landing `item` on disk.
    ///
    /// Image extensions are refined by container sniffing; other kinds use
    /// the registered extension. Unknown types return `None`.
    pub fn extension_for(&self, item: &CompletedItem) -> Option<String> {
        let info = self.plugin_info(&item.type_tag)?;
        let extension = match info.kind {
            PayloadKind::Image => {
                convert::image_extension(convert::sniff_image_mime(&item.raw_bytes)).to_string()
            }
            _ => info.extension.clone(),
        };
        Some(extension)
    }
}
