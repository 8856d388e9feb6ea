//! Parses the three index sections (process groups, variables,
//! attributes) and the fixed-size minifooter that anchors them.
//!
//! File layout:
//! `[payload][pg index][var index][attr index][minifooter]`, with the
//! minifooter always the last `MINIFOOTER_BYTES` bytes of the file.
//!
//! The minifooter's own `version` word is always little-endian on disk —
//! otherwise there would be no way to learn the data section's byte order
//! before having decoded anything at all.

use std::collections::HashMap;

use crate::buffer::Buffer;
use crate::catalog::{
    AttributeRecord, AttributeValue, Characteristic, DimensionTriple, GroupCatalog, ProcessGroup,
    VariableRecord,
};
use crate::codec::{DataType, Endian};
use crate::error::{BpError, ErrorKind, Result};

pub const MINIFOOTER_BYTES: u64 = 28;

const TAG_VALUE: u8 = 1;
const TAG_MIN: u8 = 2;
const TAG_MAX: u8 = 3;

const BIG_ENDIAN_FLAG: u32 = 0x8000_0000;

#[derive(Debug, Clone, Copy)]
pub struct MiniFooter {
    pub pgs_index_offset: u64,
    pub vars_index_offset: u64,
    pub attrs_index_offset: u64,
    pub version: u32,
    pub file_big_endian: bool,
    pub file_size: u64,
}

impl MiniFooter {
    pub fn read(tail: &[u8], file_size: u64) -> Result<Self> {
        if tail.len() as u64 != MINIFOOTER_BYTES {
            return Err(BpError::new(
                ErrorKind::CorruptedFooter,
                format!("minifooter must be {MINIFOOTER_BYTES} bytes, got {}", tail.len()),
            ));
        }
        let mut buf = Buffer::new(tail.to_vec());
        let pgs_index_offset = buf.read_u64(Endian::Little)?;
        let vars_index_offset = buf.read_u64(Endian::Little)?;
        let attrs_index_offset = buf.read_u64(Endian::Little)?;
        let raw_version = buf.read_u32(Endian::Little)?;
        let file_big_endian = raw_version & BIG_ENDIAN_FLAG != 0;
        let version = raw_version & !BIG_ENDIAN_FLAG;
        Ok(Self {
            pgs_index_offset,
            vars_index_offset,
            attrs_index_offset,
            version,
            file_big_endian,
            file_size,
        })
    }

    pub fn to_bytes(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MINIFOOTER_BYTES as usize);
        out.extend_from_slice(&self.pgs_index_offset.to_le_bytes());
        out.extend_from_slice(&self.vars_index_offset.to_le_bytes());
        out.extend_from_slice(&self.attrs_index_offset.to_le_bytes());
        let mut raw_version = self.version;
        if self.file_big_endian {
            raw_version |= BIG_ENDIAN_FLAG;
        }
        out.extend_from_slice(&raw_version.to_le_bytes());
        out
    }

    pub fn data_endian(&self) -> Endian {
        if self.file_big_endian {
            Endian::Big
        } else {
            Endian::Little
        }
    }

    /// Byte range of the combined index region (pg + var + attr sections),
    /// i.e. everything between the payload and the minifooter.
    pub fn index_region(&self) -> (u64, u64) {
        (self.pgs_index_offset, self.file_size - MINIFOOTER_BYTES)
    }
}

pub fn parse_process_groups(
    buf: &mut Buffer,
    order: Endian,
) -> Result<(Vec<ProcessGroup>, Vec<u64>)> {
    let count = buf.read_u64(order)?;
    let mut pgs = Vec::with_capacity(count as usize);
    let mut offsets = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let record_len = buf.read_u32(order)? as usize;
        let record_start = buf.position();
        let group_name = buf.read_string(order)?;
        let flags = buf.read_u8()?;
        let time_step = buf.read_u32(order)?;
        let time_index_name = buf.read_string(order)?;
        let offset = buf.read_u64(order)?;
        buf.seek(record_start + record_len)?;
        offsets.push(offset);
        pgs.push(ProcessGroup {
            group_name,
            host_column_major: flags & 0x1 != 0,
            time_index_name,
            time_step,
            offset,
        });
    }
    Ok((pgs, offsets))
}

fn read_dims(buf: &mut Buffer, order: Endian) -> Result<Vec<DimensionTriple>> {
    let ndims = buf.read_u8()? as usize;
    let mut dims = Vec::with_capacity(ndims);
    for _ in 0..ndims {
        let local = buf.read_u64(order)?;
        let global = buf.read_u64(order)?;
        let offset = buf.read_u64(order)?;
        dims.push(DimensionTriple { local, global, offset });
    }
    Ok(dims)
}

fn read_characteristic(buf: &mut Buffer, order: Endian, type_tag: DataType) -> Result<Characteristic> {
    let offset = buf.read_u64(order)?;
    let payload_offset = buf.read_u64(order)?;
    let dims = read_dims(buf, order)?;
    let tag_count = buf.read_u8()?;
    let mut value = None;
    let mut min = None;
    let mut max = None;
    for _ in 0..tag_count {
        let tag = buf.read_u8()?;
        let len = buf.read_u32(order)? as usize;
        let mut payload = buf.read_bytes(len)?;
        if order != Endian::host() {
            crate::codec::swap_endianness(&mut payload, type_tag);
        }
        match tag {
            TAG_VALUE => value = Some(payload),
            TAG_MIN => min = Some(payload),
            TAG_MAX => max = Some(payload),
            // Unknown tags are skipped by length, not treated as corruption,
            // so newer writers can add characteristic kinds this reader
            // doesn't know about yet.
            _ => {}
        }
    }
    Ok(Characteristic {
        offset,
        payload_offset,
        dims,
        value,
        min,
        max,
    })
}

pub fn parse_variables(buf: &mut Buffer, order: Endian) -> Result<Vec<VariableRecord>> {
    let count = buf.read_u64(order)?;
    let mut vars = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let record_len = buf.read_u32(order)? as usize;
        let record_start = buf.position();
        let id = buf.read_u32(order)?;
        let group_name = buf.read_string(order)?;
        let var_path = buf.read_string(order)?;
        let var_name = buf.read_string(order)?;
        let type_tag = DataType::try_from(buf.read_u8()?).map_err(|e| {
            BpError::new(
                ErrorKind::CorruptedVariable,
                format!("variable '{var_name}' has unrecognized type tag: {e}"),
            )
        })?;
        let flags = buf.read_u8()?;
        let is_global = flags & 0x1 != 0;
        let declared_ndims = buf.read_u8()?;
        let time_dim_raw = buf.read_u8()?;
        let time_dim = if time_dim_raw == 0xFF {
            None
        } else {
            Some(time_dim_raw as usize)
        };
        let characteristic_count = buf.read_u16(order)?;
        let mut characteristics = Vec::with_capacity(characteristic_count as usize);
        for _ in 0..characteristic_count {
            characteristics.push(read_characteristic(buf, order, type_tag)?);
        }
        if let Some(first) = characteristics.first() {
            if !first.dims.is_empty() && first.dims.len() != declared_ndims as usize {
                return Err(BpError::new(
                    ErrorKind::CorruptedVariable,
                    format!(
                        "variable '{var_name}' declares {declared_ndims} dims but block has {}",
                        first.dims.len()
                    ),
                ));
            }
        }
        buf.seek(record_start + record_len)?;
        vars.push(VariableRecord {
            group_name,
            var_path,
            var_name,
            id,
            type_tag,
            is_global,
            time_dim,
            characteristics,
        });
    }
    Ok(vars)
}

pub fn parse_attributes(buf: &mut Buffer, order: Endian) -> Result<Vec<AttributeRecord>> {
    let count = buf.read_u64(order)?;
    let mut attrs = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let record_len = buf.read_u32(order)? as usize;
        let record_start = buf.position();
        let id = buf.read_u32(order)?;
        let group_name = buf.read_string(order)?;
        let attr_path = buf.read_string(order)?;
        let attr_name = buf.read_string(order)?;
        let type_tag = DataType::try_from(buf.read_u8()?).map_err(|e| {
            BpError::new(
                ErrorKind::CorruptedAttribute,
                format!("attribute '{attr_name}' has unrecognized type tag: {e}"),
            )
        })?;
        let kind = buf.read_u8()?;
        let value = match kind {
            0 => {
                let len = buf.read_u32(order)? as usize;
                let mut bytes = buf.read_bytes(len)?;
                if order != Endian::host() {
                    crate::codec::swap_endianness(&mut bytes, type_tag);
                }
                AttributeValue::Inline(bytes)
            }
            1 => AttributeValue::VarRef {
                var_id: buf.read_u32(order)?,
            },
            other => {
                return Err(BpError::new(
                    ErrorKind::CorruptedAttribute,
                    format!("attribute '{attr_name}' has unknown kind tag {other}"),
                ));
            }
        };
        buf.seek(record_start + record_len)?;
        attrs.push(AttributeRecord {
            group_name,
            attr_path,
            attr_name,
            id,
            type_tag,
            value,
        });
    }
    Ok(attrs)
}

/// Groups the flat PG/variable/attribute lists by `group_name`, and for
/// each group builds the `timestep -> (first_pg_index, count)` table used
/// by scalar and global-array timestep lookups.
pub fn build_group_catalogs(
    pgs: &[ProcessGroup],
    vars: &[VariableRecord],
    attrs: &[AttributeRecord],
) -> (Vec<GroupCatalog>, u32, u32) {
    let tidx_start = pgs.iter().map(|p| p.time_step).min().unwrap_or(0);
    let tidx_stop = pgs.iter().map(|p| p.time_step).max().unwrap_or(0);
    let span = (tidx_stop - tidx_start + 1) as usize;

    fn fresh_catalog(name: &str, span: usize) -> GroupCatalog {
        GroupCatalog {
            group_name: name.to_string(),
            timestep_pgs: vec![None; span],
            ..Default::default()
        }
    }

    let mut order: Vec<String> = Vec::new();
    let mut by_name: HashMap<String, GroupCatalog> = HashMap::new();

    for (idx, pg) in pgs.iter().enumerate() {
        let cat = by_name.entry(pg.group_name.clone()).or_insert_with(|| {
            order.push(pg.group_name.clone());
            fresh_catalog(&pg.group_name, span)
        });
        let slot = (pg.time_step - tidx_start) as usize;
        match &mut cat.timestep_pgs[slot] {
            Some((_, count)) => *count += 1,
            empty @ None => *empty = Some((idx as u32, 1)),
        }
    }

    for (idx, var) in vars.iter().enumerate() {
        let cat = by_name.entry(var.group_name.clone()).or_insert_with(|| {
            order.push(var.group_name.clone());
            fresh_catalog(&var.group_name, span)
        });
        if cat.var_count == 0 {
            cat.var_offset = idx;
        }
        cat.var_count += 1;
    }

    for (idx, attr) in attrs.iter().enumerate() {
        let cat = by_name.entry(attr.group_name.clone()).or_insert_with(|| {
            order.push(attr.group_name.clone());
            fresh_catalog(&attr.group_name, span)
        });
        if cat.attr_count == 0 {
            cat.attr_offset = idx;
        }
        cat.attr_count += 1;
    }

    let catalogs = order
        .into_iter()
        .map(|name| by_name.remove(&name).expect("group inserted above"))
        .collect();
    (catalogs, tidx_start, tidx_stop)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minifooter_roundtrips_endian_flag() {
        let footer = MiniFooter {
            pgs_index_offset: 100,
            vars_index_offset: 200,
            attrs_index_offset: 300,
            version: 3,
            file_big_endian: true,
            file_size: 328,
        };
        let bytes = footer.to_bytes();
        let parsed = MiniFooter::read(&bytes, 328).unwrap();
        assert_eq!(parsed.version, 3);
        assert!(parsed.file_big_endian);
        assert_eq!(parsed.pgs_index_offset, 100);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = MiniFooter::read(&[0u8; 10], 10).unwrap_err();
        assert_eq!(err.kind, ErrorKind::CorruptedFooter);
    }
}
