//! Reader for the BP parallel-array container format.
//!
//! A BP file is a footer-indexed container written by one or more
//! cooperating processes: payload bytes followed by a process-group
//! index, a variable index, and an attribute index, closed off by a
//! fixed-size minifooter. This crate parses that index, plans hyperslab
//! reads against it, and executes them with transparent endianness and
//! array-order correction.
//!
//! Entry point: [`open`] (or [`open_memory`] for an in-memory image),
//! then [`open_group`] to reach a [`Group`], then [`Group::inquire`] and
//! [`Group::read`].

mod attr;
mod buffer;
mod catalog;
pub mod codec;
mod comm;
pub mod dims;
pub mod error;
mod footer;
mod io;
pub mod plan;
mod reader;

pub use attr::ResolvedValue;
pub use catalog::DimensionTriple;
pub use codec::DataType;
pub use comm::{Communicator, SingleProcess};
pub use dims::ArrayOrder;
pub use error::{last_error, BpError, ErrorKind, Result};
pub use io::{FileHandle, MemoryHandle, PositionedReader};
pub use plan::Hyperslab;
pub use reader::{open, open_group, open_memory, BpFile, FileSummary, Group, GroupSummary, VarDescriptor};
