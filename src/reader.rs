//! Ties the footer/catalog/plan modules together into the public
//! open/inquire/read/get_attribute surface.

use std::sync::Arc;

use crate::attr::{self, Resolution, ResolvedValue};
use crate::buffer::Buffer;
use crate::catalog::{AttributeRecord, DimensionTriple, GroupCatalog, ProcessGroup, VariableRecord};
use crate::codec::{self, DataType, Endian};
use crate::comm::Communicator;
pub use crate::dims::ArrayOrder;
use crate::dims::{self};
use crate::error::{clear_last_error, BpError, ErrorKind, Result};
use crate::footer::{self, MiniFooter};
use crate::io::{FileHandle, MemoryHandle, PositionedReader};
use crate::plan::{self, Hyperslab, ReadPlan};

/// An open BP file: the parsed catalog plus the handles needed to keep
/// reading from it. Shared via `Arc` so `Group`/`VarDescriptor` handles
/// can outlive any one borrow of the file that produced them.
pub struct BpFile {
    reader: Box<dyn PositionedReader>,
    #[allow(dead_code)]
    comm: Box<dyn Communicator>,
    minifooter: MiniFooter,
    #[allow(dead_code)]
    process_groups: Vec<ProcessGroup>,
    /// Each process group's own byte offset, plus a trailing sentinel (the
    /// start of the variable index) marking the end of the last one's
    /// range. Used to decide which characteristics belong to a given
    /// `(group, timestep)`: a characteristic contributes if its own offset
    /// falls strictly inside `[pg_offsets[k], pg_offsets[k+1])`.
    pg_offsets: Vec<u64>,
    groups: Vec<GroupCatalog>,
    variables: Vec<VariableRecord>,
    attributes: Vec<AttributeRecord>,
    tidx_start: u32,
    tidx_stop: u32,
    /// Writer's on-disk array order, taken from the first process group
    /// (mixed-order files are not produced by any known writer).
    file_column_major: bool,
    order: ArrayOrder,
}

impl BpFile {
    pub fn tidx_start(&self) -> u32 {
        self.tidx_start
    }

    pub fn tidx_stop(&self) -> u32 {
        self.tidx_stop
    }

    pub fn list_groups(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.group_name.as_str()).collect()
    }

    pub fn describe(&self) -> FileSummary {
        FileSummary {
            group_count: self.groups.len(),
            variable_count: self.variables.len(),
            attribute_count: self.attributes.len(),
            tidx_start: self.tidx_start,
            tidx_stop: self.tidx_stop,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FileSummary {
    pub group_count: usize,
    pub variable_count: usize,
    pub attribute_count: usize,
    pub tidx_start: u32,
    pub tidx_stop: u32,
}

impl std::fmt::Display for FileSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} group(s), {} variable(s), {} attribute(s), timesteps [{}, {}]",
            self.group_count, self.variable_count, self.attribute_count, self.tidx_start, self.tidx_stop
        )
    }
}

/// A handle into one group of an open file.
pub struct Group {
    file: Arc<BpFile>,
    index: usize,
}

impl Group {
    fn catalog(&self) -> &GroupCatalog {
        &self.file.groups[self.index]
    }

    pub fn name(&self) -> &str {
        &self.catalog().group_name
    }

    pub fn describe(&self) -> GroupSummary {
        let cat = self.catalog();
        GroupSummary {
            name: cat.group_name.clone(),
            variable_count: cat.var_count,
            attribute_count: cat.attr_count,
            timestep_count: cat.timestep_pgs.len(),
        }
    }

    fn variables(&self) -> &[VariableRecord] {
        let cat = self.catalog();
        &self.file.variables[cat.var_offset..cat.var_offset + cat.var_count]
    }

    fn attributes(&self) -> &[AttributeRecord] {
        let cat = self.catalog();
        &self.file.attributes[cat.attr_offset..cat.attr_offset + cat.attr_count]
    }

    fn find_variable(&self, name: &str) -> Result<&VariableRecord> {
        let normalized = normalize_name(name);
        self.variables()
            .iter()
            .find(|v| normalize_name(&v.full_path()) == normalized || v.var_name == normalized)
            .ok_or_else(|| {
                BpError::new(ErrorKind::InvalidVarname, format!("no such variable '{name}'"))
            })
    }

    fn find_variable_by_id(&self, id: u32) -> Result<&VariableRecord> {
        self.variables()
            .iter()
            .find(|v| v.id == id)
            .ok_or_else(|| BpError::new(ErrorKind::InvalidVarid, format!("no such variable id {id}")))
    }

    fn find_attribute(&self, name: &str) -> Result<&AttributeRecord> {
        let normalized = normalize_name(name);
        self.attributes()
            .iter()
            .find(|a| normalize_name(&a.full_path()) == normalized || a.attr_name == normalized)
            .ok_or_else(|| {
                BpError::new(ErrorKind::InvalidAttrname, format!("no such attribute '{name}'"))
            })
    }

    pub fn inquire(&self, name: &str) -> Result<VarDescriptor> {
        clear_last_error();
        self.describe_var(self.find_variable(name)?)
    }

    pub fn inquire_by_id(&self, id: u32) -> Result<VarDescriptor> {
        clear_last_error();
        self.describe_var(self.find_variable_by_id(id)?)
    }

    fn describe_var(&self, var: &VariableRecord) -> Result<VarDescriptor> {
        let first = var.characteristics.first().ok_or_else(|| {
            BpError::new(
                ErrorKind::CorruptedVariable,
                format!("variable '{}' has no characteristics", var.full_path()),
            )
        })?;
        dims::check_time_axis_placement(
            &var.full_path(),
            first.dims.len(),
            var.time_dim,
            self.file.file_column_major,
        );
        let nsteps = self.file.tidx_stop - self.file.tidx_start + 1;
        let materialized = dims::materialize_time_axis(first.dims.clone(), var.time_dim, nsteps);
        let (presented, time_dim) = dims::present_dims(
            materialized,
            var.time_dim,
            self.file.file_column_major,
            self.file.order,
        );

        let min_max_blocks = var
            .characteristics
            .iter()
            .filter_map(|c| match (&c.min, &c.max) {
                (Some(mn), Some(mx)) => Some((mn.as_slice(), mx.as_slice())),
                _ => None,
            });
        let (gmin, gmax) = match codec::fold_min_max(var.type_tag, min_max_blocks) {
            Some((mn, mx)) => (Some(mn), Some(mx)),
            None => (None, None),
        };
        // Scalars carry their own value; arrays have none, so the
        // representative value reported back is their reduced minimum.
        let value = if first.dims.is_empty() { first.value.clone() } else { gmin.clone() };

        Ok(VarDescriptor {
            id: var.id,
            name: var.full_path(),
            type_tag: var.type_tag,
            dims: presented,
            time_dim,
            nsteps,
            value,
            gmin,
            gmax,
        })
    }

    /// Reads `selection` from `name`. When the variable has a time axis,
    /// `selection`'s `start`/`count` at that axis name the timestep range
    /// to visit, folded in with the spatial axes rather than passed as a
    /// side channel.
    pub fn read(&self, name: &str, selection: Hyperslab) -> Result<Vec<u8>> {
        clear_last_error();
        let var = self.find_variable(name)?;
        read_variable(&self.file, self.catalog(), var, selection)
    }

    pub fn read_by_id(&self, id: u32, selection: Hyperslab) -> Result<Vec<u8>> {
        clear_last_error();
        let var = self.find_variable_by_id(id)?;
        read_variable(&self.file, self.catalog(), var, selection)
    }

    pub fn get_attribute(&self, name: &str) -> Result<ResolvedValue> {
        clear_last_error();
        let attr = self.find_attribute(name)?;
        resolve_attribute(&self.file, attr, self.variables())
    }

    pub fn get_attribute_by_id(&self, id: u32) -> Result<ResolvedValue> {
        clear_last_error();
        let attr = self
            .attributes()
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| BpError::new(ErrorKind::InvalidAttrid, format!("no such attribute id {id}")))?;
        resolve_attribute(&self.file, attr, self.variables())
    }
}

#[derive(Debug, Clone)]
pub struct GroupSummary {
    pub name: String,
    pub variable_count: usize,
    pub attribute_count: usize,
    pub timestep_count: usize,
}

#[derive(Debug, Clone)]
pub struct VarDescriptor {
    pub id: u32,
    pub name: String,
    pub type_tag: DataType,
    /// Dims in the order the caller asked for at `open()`.
    pub dims: Vec<DimensionTriple>,
    pub time_dim: Option<usize>,
    pub nsteps: u32,
    /// Scalar's own value, or (for arrays) the reduced minimum as a stand-in,
    /// matching the source convention of reporting `gmin` where a single
    /// representative value is expected.
    pub value: Option<Vec<u8>>,
    /// Global minimum/maximum reduced across every block's characteristic,
    /// using the type's natural ordering. `None` when no block recorded one.
    pub gmin: Option<Vec<u8>>,
    pub gmax: Option<Vec<u8>>,
}

fn normalize_name(name: &str) -> String {
    name.trim_start_matches('/').to_string()
}

/// Strips any `payload_offset == 0` sentinel by deriving the real offset
/// from the per-block header: a `u64` byte count of the header itself,
/// immediately followed by the payload, the legacy layout older writers
/// used.
fn resolve_payload_offset(reader: &dyn PositionedReader, header_offset: u64, data_endian: Endian) -> Result<u64> {
    const HEADER_LEN_FIELD_BYTES: u64 = 8;
    let prefix = reader.read_at(header_offset, HEADER_LEN_FIELD_BYTES as usize)?;
    let header_len = codec::read_u64(&prefix, data_endian);
    Ok(header_offset + HEADER_LEN_FIELD_BYTES + header_len)
}

fn remove_index(values: &[u64], idx: usize) -> Vec<u64> {
    values
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != idx)
        .map(|(_, &v)| v)
        .collect()
}

/// Drops the time axis entry (if any) from a per-block dims vector, giving
/// the spatial-only shape the hyperslab planner operates on. A no-op when
/// the variable has no time axis.
fn strip_time(dims: &[DimensionTriple], time_dim: Option<usize>) -> Vec<DimensionTriple> {
    match time_dim {
        Some(idx) => dims.iter().enumerate().filter(|&(i, _)| i != idx).map(|(_, &d)| d).collect(),
        None => dims.to_vec(),
    }
}

/// Peels the time axis off `selection` (step A of the read planner): for a
/// time-varying variable, returns the absolute `[start, start+count)`
/// timestep range named by the selection's time axis and the remaining
/// spatial-only hyperslab; for one with no time axis, a single implicit
/// timestep and the selection unchanged.
fn read_variable(
    file: &Arc<BpFile>,
    group_cat: &GroupCatalog,
    var: &VariableRecord,
    selection: Hyperslab,
) -> Result<Vec<u8>> {
    let element_size = var.type_tag.fixed_size().ok_or_else(|| {
        BpError::new(
            ErrorKind::CorruptedVariable,
            format!("variable '{}' has no fixed element size", var.full_path()),
        )
    })?;
    let first = var.characteristics.first().ok_or_else(|| {
        BpError::new(
            ErrorKind::CorruptedVariable,
            format!("variable '{}' has no characteristics", var.full_path()),
        )
    })?;
    if selection.ndims() != first.dims.len() {
        return Err(BpError::new(
            ErrorKind::CorruptedVariable,
            format!(
                "variable '{}' selection has {} axes but the variable has {}",
                var.full_path(),
                selection.ndims(),
                first.dims.len()
            ),
        ));
    }

    let (_, presented_time_dim) =
        dims::present_dims(first.dims.clone(), var.time_dim, file.file_column_major, file.order);
    let ntimesteps = (file.tidx_stop - file.tidx_start + 1) as u64;

    let (time_start, time_count, spatial_selection) = match presented_time_dim {
        Some(td) => {
            let start = selection.start[td];
            let count = selection.count[td].max(1);
            if start + count > ntimesteps {
                return Err(BpError::new(
                    ErrorKind::OutOfBound,
                    format!(
                        "variable '{}' requests timesteps {start}..{} but only {ntimesteps} exist",
                        var.full_path(),
                        start + count
                    ),
                ));
            }
            let spatial = Hyperslab {
                start: remove_index(&selection.start, td),
                count: remove_index(&selection.count, td),
            };
            (start, count, spatial)
        }
        None => (0, 1, selection.clone()),
    };

    let permutation = if dims::needs_reversal(file.file_column_major, file.order) {
        reversed_permutation(spatial_selection.ndims())
    } else {
        (0..spatial_selection.ndims()).collect::<Vec<_>>()
    };
    let raw_spatial_selection = permute_hyperslab(&spatial_selection, &permutation);

    let raw_gdims: Vec<u64> = strip_time(&first.dims, var.time_dim)
        .iter()
        .map(|d| if var.is_global { d.global.max(d.local) } else { d.local })
        .collect();
    if let Some(raw_axis) = plan::check_in_bounds(&raw_spatial_selection, &raw_gdims) {
        let presented_axis = permutation.iter().position(|&r| r == raw_axis).unwrap_or(raw_axis);
        return Err(BpError::new(
            ErrorKind::OutOfBound,
            format!(
                "variable '{}' axis {} exceeds bound {}",
                var.full_path(),
                presented_axis + 1,
                raw_gdims[raw_axis].saturating_sub(1)
            ),
        ));
    }

    let full_shape: Vec<DimensionTriple> = selection
        .count
        .iter()
        .map(|&c| DimensionTriple { local: c, global: 0, offset: 0 })
        .collect();
    let full_dest_strides = plan::local_strides(&full_shape);
    let time_stride = presented_time_dim.map(|td| full_dest_strides[td]).unwrap_or(0);
    let spatial_presented_axes: Vec<usize> =
        (0..selection.ndims()).filter(|&i| Some(i) != presented_time_dim).collect();

    let out_elems: u64 = selection.count.iter().product::<u64>().max(1);
    let mut out = vec![0u8; (out_elems * element_size as u64) as usize];

    for rel_t in 0..time_count {
        let t_abs = file.tidx_start + (time_start + rel_t) as u32;
        let time_bias = rel_t * time_stride;

        let blocks: Vec<&crate::catalog::Characteristic> = if presented_time_dim.is_some() {
            select_timestep_blocks(file, group_cat, var, t_abs)?
        } else {
            var.characteristics.iter().collect()
        };

        for block in blocks {
            let spatial_dims = strip_time(&block.dims, var.time_dim);
            let Some(read_plan) = plan::select_block(&spatial_dims, &raw_spatial_selection) else {
                continue;
            };
            copy_block(
                file.reader.as_ref(),
                block,
                &spatial_dims,
                &read_plan,
                &permutation,
                &spatial_presented_axes,
                &selection.start,
                &full_dest_strides,
                time_bias,
                var.type_tag,
                file.minifooter.data_endian(),
                &mut out,
            )?;
        }
    }
    Ok(out)
}

/// Step B of the read planner: finds the contiguous run of a variable's
/// characteristics written by the process groups of absolute timestep
/// `t_abs`, using the PG byte-range invariant — a characteristic belongs to
/// a `(group, timestep)` iff its own offset falls strictly inside that
/// timestep's `[pg_offsets[first], pg_offsets[first + count])`.
fn select_timestep_blocks<'v>(
    file: &BpFile,
    group_cat: &GroupCatalog,
    var: &'v VariableRecord,
    t_abs: u32,
) -> Result<Vec<&'v crate::catalog::Characteristic>> {
    let no_data = || {
        BpError::new(
            ErrorKind::NoDataAtTimestep,
            format!("variable '{}' has no data at timestep {t_abs}", var.full_path()),
        )
    };
    let slot = (t_abs - file.tidx_start) as usize;
    let (pg_first, pg_count) = group_cat.timestep_pgs.get(slot).copied().flatten().ok_or_else(no_data)?;
    let lower = file.pg_offsets[pg_first as usize];
    let upper = file.pg_offsets[(pg_first as usize + pg_count as usize).min(file.pg_offsets.len() - 1)];

    let start_idx = var
        .characteristics
        .iter()
        .position(|c| c.offset > lower && c.offset < upper)
        .ok_or_else(no_data)?;
    let end_idx = (start_idx + pg_count as usize).min(var.characteristics.len());
    Ok(var.characteristics[start_idx..end_idx].iter().collect())
}

/// Raw-axis-to-presented-axis permutation for a purely spatial (time
/// already peeled off) shape: full reversal, since `dims::reverse_order`
/// with no time axis to keep in place is exactly that.
fn reversed_permutation(ndims: usize) -> Vec<usize> {
    (0..ndims).rev().collect()
}

fn permute_hyperslab(selection: &Hyperslab, permutation: &[usize]) -> Hyperslab {
    Hyperslab {
        start: permutation.iter().map(|&raw| selection.start[raw]).collect(),
        count: permutation.iter().map(|&raw| selection.count[raw]).collect(),
    }
}

/// Copies one block's contribution to `out`, whose shape is `full`
/// presented dims (including the time axis, at whatever stride
/// `time_bias` already accounts for). `permutation`/`spatial_presented_axes`
/// map a raw spatial axis to its position among the full presented axes,
/// skipping the time slot.
#[allow(clippy::too_many_arguments)]
fn copy_block(
    reader: &dyn PositionedReader,
    block: &crate::catalog::Characteristic,
    spatial_dims: &[DimensionTriple],
    read_plan: &ReadPlan,
    permutation: &[usize],
    spatial_presented_axes: &[usize],
    full_start: &[u64],
    full_dest_strides: &[u64],
    time_bias: u64,
    type_tag: DataType,
    data_endian: Endian,
    out: &mut [u8],
) -> Result<()> {
    let element_size = type_tag.fixed_size().unwrap_or(1);

    // A scalar's value is carried inline in its characteristic (already
    // converted to host order when the footer was parsed); there is no
    // separate payload to seek to, and no further swap needed.
    let (raw_bytes, already_host_order) = if spatial_dims.is_empty() {
        let value = block.value.clone().ok_or_else(|| {
            BpError::new(ErrorKind::CorruptedVariable, "scalar block has no inline value")
        })?;
        (value, true)
    } else {
        let payload_offset = if block.payload_offset == 0 {
            resolve_payload_offset(reader, block.offset, data_endian)?
        } else {
            block.payload_offset
        };
        let element_count: u64 = spatial_dims.iter().map(|d| d.local.max(1)).product();
        let bytes = reader.read_at(payload_offset, (element_count * element_size as u64) as usize)?;
        (bytes, false)
    };

    let src_strides = plan::local_strides(spatial_dims);

    let contiguous_from = read_plan.case.contiguous_from();
    let run_len: u64 = read_plan.axes[contiguous_from..]
        .iter()
        .map(|a| a.count.max(1))
        .product();

    let mut indices = vec![0u64; contiguous_from];
    loop {
        let mut src_elem = 0u64;
        let mut dest_elem = time_bias;
        for (raw_axis, axis) in read_plan.axes.iter().enumerate() {
            let local_idx = if raw_axis < contiguous_from { indices[raw_axis] } else { 0 };
            src_elem += (axis.skip + local_idx) * src_strides[raw_axis];
            let presented_axis = permutation
                .iter()
                .position(|&r| r == raw_axis)
                .expect("permutation is a bijection");
            let full_axis = spatial_presented_axes[presented_axis];
            let global_idx = spatial_dims[raw_axis].offset + axis.skip + local_idx;
            let dest_idx = global_idx - full_start[full_axis];
            dest_elem += dest_idx * full_dest_strides[full_axis];
        }
        let src_start = (src_elem * element_size as u64) as usize;
        let dest_start = (dest_elem * element_size as u64) as usize;
        let run_bytes = (run_len * element_size as u64) as usize;
        let mut run = raw_bytes[src_start..src_start + run_bytes].to_vec();
        if !already_host_order && data_endian != Endian::host() {
            codec::swap_endianness(&mut run, type_tag);
        }
        out[dest_start..dest_start + run_bytes].copy_from_slice(&run);

        if contiguous_from == 0 {
            break;
        }
        let mut carry = contiguous_from - 1;
        loop {
            indices[carry] += 1;
            if indices[carry] < read_plan.axes[carry].count {
                break;
            }
            indices[carry] = 0;
            if carry == 0 {
                return Ok(());
            }
            carry -= 1;
        }
    }
    Ok(())
}

fn resolve_attribute(
    file: &Arc<BpFile>,
    attr: &AttributeRecord,
    group_vars: &[VariableRecord],
) -> Result<ResolvedValue> {
    match attr::plan(attr, group_vars)? {
        Resolution::Inline(value) => Ok(value),
        Resolution::FromVariable { var_id, convert_to_text } => {
            let var = group_vars
                .iter()
                .find(|v| v.id == var_id)
                .expect("plan() already validated this variable exists");
            let first = var.characteristics.first().ok_or_else(|| {
                BpError::new(
                    ErrorKind::InvalidAttributeReference,
                    format!("variable '{}' has no data to resolve an attribute from", var.full_path()),
                )
            })?;
            let bytes = if let Some(inline) = &first.value {
                inline.clone()
            } else {
                let element_size = var.type_tag.fixed_size().unwrap_or(1);
                let count = first.element_count();
                let payload_offset = if first.payload_offset == 0 {
                    resolve_payload_offset(file.reader.as_ref(), first.offset, file.minifooter.data_endian())?
                } else {
                    first.payload_offset
                };
                file.reader
                    .read_at(payload_offset, (count * element_size as u64) as usize)?
            };
            if convert_to_text {
                Ok(ResolvedValue::Text(attr::bytes_to_text(&bytes, file.file_column_major)))
            } else {
                Ok(ResolvedValue::Bytes(bytes))
            }
        }
    }
}

fn open_with(
    reader: Box<dyn PositionedReader>,
    comm: Box<dyn Communicator>,
    order: ArrayOrder,
) -> Result<Arc<BpFile>> {
    clear_last_error();
    let file_size = reader.len()?;
    if file_size < footer::MINIFOOTER_BYTES {
        return Err(BpError::new(ErrorKind::CorruptedFooter, "file shorter than the minifooter"));
    }
    let mut footer_bytes = reader.read_at(file_size - footer::MINIFOOTER_BYTES, footer::MINIFOOTER_BYTES as usize)?;
    comm.broadcast_bytes(&mut footer_bytes, 0);
    let minifooter = MiniFooter::read(&footer_bytes, file_size)?;

    let (index_start, index_end) = minifooter.index_region();
    let index_len = (index_end - index_start) as usize;
    let mut index_bytes = reader.read_at(index_start, index_len)?;
    comm.broadcast_bytes(&mut index_bytes, 0);

    let order_endian = minifooter.data_endian();
    let mut buf = Buffer::new(index_bytes);
    let (process_groups, mut pg_offsets) = footer::parse_process_groups(&mut buf, order_endian)?;
    let variables = footer::parse_variables(&mut buf, order_endian)?;
    let attributes = footer::parse_attributes(&mut buf, order_endian)?;

    pg_offsets.push(minifooter.vars_index_offset);
    let (groups, tidx_start, tidx_stop) = footer::build_group_catalogs(&process_groups, &variables, &attributes);
    let file_column_major = process_groups.first().map(|pg| pg.host_column_major).unwrap_or(false);

    comm.barrier();

    Ok(Arc::new(BpFile {
        reader,
        comm,
        minifooter,
        process_groups,
        pg_offsets,
        groups,
        variables,
        attributes,
        tidx_start,
        tidx_stop,
        file_column_major,
        order,
    }))
}

pub fn open(path: &str, comm: Box<dyn Communicator>, order: ArrayOrder) -> Result<Arc<BpFile>> {
    open_with(Box::new(FileHandle::open(path)?), comm, order)
}

/// Opens an in-memory BP image, used by tests to exercise the reader
/// without touching the filesystem.
pub fn open_memory(data: Vec<u8>, comm: Box<dyn Communicator>, order: ArrayOrder) -> Result<Arc<BpFile>> {
    open_with(Box::new(MemoryHandle::new(data)), comm, order)
}

pub fn open_group(file: &Arc<BpFile>, name: &str) -> Result<Group> {
    clear_last_error();
    let normalized = normalize_name(name);
    let index = file
        .groups
        .iter()
        .position(|g| normalize_name(&g.group_name) == normalized)
        .ok_or_else(|| BpError::new(ErrorKind::InvalidGroup, format!("no such group '{name}'")))?;
    Ok(Group {
        file: Arc::clone(file),
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_permutation_reverses_full_extent() {
        assert_eq!(reversed_permutation(3), vec![2, 1, 0]);
    }
}
