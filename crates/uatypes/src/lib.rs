// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # uatypes - descriptor-driven OPC UA value types
//!
//! Uniform lifecycle operations (allocate, initialize, deep-copy, release)
//! over the OPC UA builtin and protocol types, plus [`Variant`], the
//! polymorphic container that moves typed values through a protocol stack.
//!
//! ## Quick Start
//!
//! ```rust
//! use uatypes::{ns0::ids, DataType, NodeId, QualifiedName, Result, Variant};
//!
//! fn main() -> Result<()> {
//!     // Value of a variable node
//!     let mut value = Variant::new();
//!     value.set_value(Box::new(42i32));
//!
//!     // Its browse name and parent
//!     let name = QualifiedName::copy_cstring("the answer")?;
//!     let parent = NodeId::numeric(0, ids::OBJECTS_FOLDER);
//!
//!     // Independent deep copies
//!     let stored = value.try_copy()?;
//!     assert_eq!(stored.value::<i32>(), Some(&42));
//!     assert_eq!(name.try_copy()?, name);
//!     assert!(!parent.is_null());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                  Variant & DataSource (variant)                      |
//! |   Data (owned) | Borrowed (shared, never freed) | DataSource (live)  |
//! +---------------------------------------------------------------------+
//! |  Generic lifecycle (generic) | Array engine (array)                  |
//! +---------------------------------------------------------------------+
//! |  Type registry (registry): one TypeHandler per type index            |
//! +---------------------------------------------------------------------+
//! |  Builtins (builtin, composite) | Protocol structures (generated)     |
//! +---------------------------------------------------------------------+
//! |  Descriptor table (descriptor, ns0)                                  |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TypeDescriptor`] | Layout metadata of one type |
//! | [`DataType`] | Typed lifecycle (`init`, `try_copy`, `delete_members`, `delete`) |
//! | [`Value`] / [`ArrayValue`] | Type-erased instances and arrays |
//! | [`TypeRegistry`] | Handlers for every type of a descriptor table |
//! | [`Variant`] | Scalar, array or live value of any type |
//! | [`DataSource`] | Provider of live values |
//!
//! ## Ownership
//!
//! Releases never fail. `delete` consumes its instance, so a double release
//! cannot be written. Allocations sized by the caller are fallible and
//! surface [`Error::OutOfMemory`] instead of aborting.

// Clippy: No blanket suppressions. Fix issues properly or use inline #[allow] with justification.

mod alloc;

/// Bounded homogeneous arrays.
pub mod array;
/// Builtin leaf types, NodeId and the small structured builtins.
pub mod builtin;
/// DataValue, DiagnosticInfo, ExtensionObject.
pub mod composite;
/// Static limits and runtime configuration.
pub mod config;
/// Type and member descriptors, descriptor tables.
pub mod descriptor;
/// Error type.
pub mod error;
/// Generated protocol structures.
pub mod generated;
/// Descriptor-parameterized lifecycle.
pub mod generic;
/// Namespace-zero catalogue.
pub mod ns0;
/// Type registry.
pub mod registry;
/// Status codes.
pub mod status;
/// Structured type declaration macro.
pub mod structure;
/// Lifecycle traits.
pub mod value;
/// Variant and data sources.
pub mod variant;

pub use alloc::{try_box, try_copy_bytes, try_vec};
pub use array::{array_copy, array_delete, array_new, UaArray};
pub use builtin::{
    ByteString, DateTime, DateTimeStruct, ExpandedNodeId, Guid, Identifier, IdentifierType,
    LocalizedText, NodeId, QualifiedName, UaString, XmlElement,
};
pub use composite::{DataValue, DiagnosticInfo, ExtensionObject, ExtensionObjectEncoding};
pub use config::TypesConfig;
pub use descriptor::{DescriptorTable, MemberDescriptor, TypeDescriptor, TypeIndex};
pub use error::{Error, Result};
pub use generated::{Argument, ReadValueId};
pub use registry::{registry, TypeHandler, TypeRegistry};
pub use status::StatusCode;
pub use value::{ArrayValue, DataType, Member, Value};
pub use variant::{DataSource, SharedDataSource, SourceRead, Variant, VariantData};
