//! In-memory index built from the footer's three catalog sections:
//! process groups, variables, and attributes. Populated once at `open()`
//! and held for the lifetime of the `BpFile`.

use crate::codec::DataType;

/// One dimension of a variable's shape at a given block, in (local, global,
/// local-offset-within-global) form. For a local (non-global) array,
/// `global` and `offset` are both zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionTriple {
    pub local: u64,
    pub global: u64,
    pub offset: u64,
}

impl DimensionTriple {
    pub fn scalar() -> Self {
        Self {
            local: 1,
            global: 0,
            offset: 0,
        }
    }

    pub fn is_global(&self) -> bool {
        self.global > 0
    }
}

/// One written block of a variable: where its bytes live, its shape at
/// write time, and (for scalars and numeric arrays) the inline value or
/// block-local min/max the writer recorded.
#[derive(Debug, Clone)]
pub struct Characteristic {
    /// Absolute offset of this characteristic's header within the file.
    pub offset: u64,
    /// Absolute offset of the raw payload bytes. Zero means "derive it
    /// from the variable's header length prefix" (see
    /// `reader::resolve_payload_offset`), the legacy compatibility case.
    pub payload_offset: u64,
    pub dims: Vec<DimensionTriple>,
    pub value: Option<Vec<u8>>,
    pub min: Option<Vec<u8>>,
    pub max: Option<Vec<u8>>,
}

impl Characteristic {
    pub fn element_count(&self) -> u64 {
        if self.dims.is_empty() {
            1
        } else {
            self.dims.iter().map(|d| d.local.max(1)).product()
        }
    }
}

#[derive(Debug, Clone)]
pub struct VariableRecord {
    pub group_name: String,
    pub var_path: String,
    pub var_name: String,
    pub id: u32,
    pub type_tag: DataType,
    /// `true` when the declared shape has at least one global dimension.
    pub is_global: bool,
    /// Index into `dims` of the time axis, if this variable has one.
    pub time_dim: Option<usize>,
    pub characteristics: Vec<Characteristic>,
}

impl VariableRecord {
    pub fn full_path(&self) -> String {
        if self.var_path.is_empty() || self.var_path == "/" {
            format!("/{}", self.var_name)
        } else {
            format!("{}/{}", self.var_path.trim_end_matches('/'), self.var_name)
        }
    }

    pub fn is_scalar(&self) -> bool {
        self.characteristics
            .first()
            .map(|c| c.dims.is_empty())
            .unwrap_or(true)
    }
}

/// An attribute's payload: either bytes stored inline, or a reference to
/// another variable's current value (resolved at read time).
#[derive(Debug, Clone)]
pub enum AttributeValue {
    Inline(Vec<u8>),
    VarRef { var_id: u32 },
}

#[derive(Debug, Clone)]
pub struct AttributeRecord {
    pub group_name: String,
    pub attr_path: String,
    pub attr_name: String,
    pub id: u32,
    pub type_tag: DataType,
    pub value: AttributeValue,
}

impl AttributeRecord {
    pub fn full_path(&self) -> String {
        if self.attr_path.is_empty() || self.attr_path == "/" {
            format!("/{}", self.attr_name)
        } else {
            format!("{}/{}", self.attr_path.trim_end_matches('/'), self.attr_name)
        }
    }
}

/// One process group record: one writer rank's contribution at one
/// timestep.
#[derive(Debug, Clone)]
pub struct ProcessGroup {
    pub group_name: String,
    /// `true` when the writer serialized its arrays in column-major
    /// (Fortran) order.
    pub host_column_major: bool,
    pub time_index_name: String,
    pub time_step: u32,
    /// Absolute offset of this PG's header within the file.
    pub offset: u64,
}

/// Per-group window into the flat variable/attribute/PG lists held by
/// `BpFile`, plus the per-timestep PG range used by scalar time-series
/// reads.
#[derive(Debug, Clone, Default)]
pub struct GroupCatalog {
    pub group_name: String,
    pub var_offset: usize,
    pub var_count: usize,
    pub attr_offset: usize,
    pub attr_count: usize,
    /// `(first_pg_index, count)` for each timestep, indexed by
    /// `time_step - tidx_start`. `None` marks a timestep this group never
    /// wrote a process group for.
    pub timestep_pgs: Vec<Option<(u32, u32)>>,
}
