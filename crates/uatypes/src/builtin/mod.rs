// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Builtin leaf types and the small structured builtins built on them.
//!
//! Leaves (scalars, string-likes, [`Guid`], [`DateTime`], [`NodeId`]) carry
//! hand-written lifecycle code. [`ExpandedNodeId`], [`QualifiedName`] and
//! [`LocalizedText`] are declared through
//! [`ua_structure!`](crate::ua_structure).

mod datetime;
mod guid;
mod names;
mod node_id;
mod scalar;
mod string;

pub use datetime::{DateTime, DateTimeStruct};
pub use guid::Guid;
pub use names::{ExpandedNodeId, LocalizedText, QualifiedName};
pub use node_id::{Identifier, IdentifierType, NodeId};
pub use string::{ByteString, UaString, XmlElement};
