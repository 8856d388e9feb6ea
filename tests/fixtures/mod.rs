//! Builds BP byte images in-process, mirroring the TLV layout
//! `src/footer.rs` parses. There is no writer in this crate (or in the
//! corpus this was grounded on), so tests construct fixtures at the byte
//! level instead of reading them from disk.

#![allow(dead_code)]

use bp_read::codec::Endian;

pub const TAG_VALUE: u8 = 1;
pub const TAG_MIN: u8 = 2;
pub const TAG_MAX: u8 = 3;

pub struct DimSpec {
    pub local: u64,
    pub global: u64,
    pub offset: u64,
}

pub fn dim(local: u64, global: u64, offset: u64) -> DimSpec {
    DimSpec { local, global, offset }
}

fn put_u16(out: &mut Vec<u8>, v: u16, order: Endian) {
    out.extend_from_slice(&match order {
        Endian::Little => v.to_le_bytes(),
        Endian::Big => v.to_be_bytes(),
    });
}

fn put_u32(out: &mut Vec<u8>, v: u32, order: Endian) {
    out.extend_from_slice(&match order {
        Endian::Little => v.to_le_bytes(),
        Endian::Big => v.to_be_bytes(),
    });
}

fn put_u64(out: &mut Vec<u8>, v: u64, order: Endian) {
    out.extend_from_slice(&match order {
        Endian::Little => v.to_le_bytes(),
        Endian::Big => v.to_be_bytes(),
    });
}

fn write_string(out: &mut Vec<u8>, s: &str, order: Endian) {
    put_u16(out, s.len() as u16, order);
    out.extend_from_slice(s.as_bytes());
}

/// Wraps `body` with a `u32` length prefix, the record-length framing
/// every PG/variable/attribute record uses.
fn framed(body: Vec<u8>, order: Endian) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len() + 4);
    put_u32(&mut out, body.len() as u32, order);
    out.extend_from_slice(&body);
    out
}

pub struct PgSpec {
    pub group_name: String,
    pub column_major: bool,
    pub time_index_name: String,
    pub time_step: u32,
    pub offset: u64,
}

pub fn encode_pg(pg: &PgSpec, order: Endian) -> Vec<u8> {
    let mut body = Vec::new();
    write_string(&mut body, &pg.group_name, order);
    body.push(if pg.column_major { 1 } else { 0 });
    put_u32(&mut body, pg.time_step, order);
    write_string(&mut body, &pg.time_index_name, order);
    put_u64(&mut body, pg.offset, order);
    framed(body, order)
}

pub struct BlockSpec {
    pub offset: u64,
    pub payload_offset: u64,
    pub dims: Vec<DimSpec>,
    pub value: Option<Vec<u8>>,
    pub min: Option<Vec<u8>>,
    pub max: Option<Vec<u8>>,
}

fn encode_block(block: &BlockSpec, order: Endian) -> Vec<u8> {
    let mut out = Vec::new();
    put_u64(&mut out, block.offset, order);
    put_u64(&mut out, block.payload_offset, order);
    out.push(block.dims.len() as u8);
    for d in &block.dims {
        put_u64(&mut out, d.local, order);
        put_u64(&mut out, d.global, order);
        put_u64(&mut out, d.offset, order);
    }
    let mut tags = Vec::new();
    if let Some(v) = &block.value {
        tags.push((TAG_VALUE, v.clone()));
    }
    if let Some(v) = &block.min {
        tags.push((TAG_MIN, v.clone()));
    }
    if let Some(v) = &block.max {
        tags.push((TAG_MAX, v.clone()));
    }
    out.push(tags.len() as u8);
    for (tag, payload) in tags {
        out.push(tag);
        put_u32(&mut out, payload.len() as u32, order);
        out.extend_from_slice(&payload);
    }
    out
}

pub struct VarSpec {
    pub id: u32,
    pub group_name: String,
    pub var_path: String,
    pub var_name: String,
    pub type_tag: u8,
    pub is_global: bool,
    pub ndims: u8,
    pub time_dim: Option<u8>,
    pub blocks: Vec<BlockSpec>,
}

pub fn encode_var(var: &VarSpec, order: Endian) -> Vec<u8> {
    let mut body = Vec::new();
    put_u32(&mut body, var.id, order);
    write_string(&mut body, &var.group_name, order);
    write_string(&mut body, &var.var_path, order);
    write_string(&mut body, &var.var_name, order);
    body.push(var.type_tag);
    body.push(if var.is_global { 1 } else { 0 });
    body.push(var.ndims);
    body.push(var.time_dim.unwrap_or(0xFF));
    put_u16(&mut body, var.blocks.len() as u16, order);
    for block in &var.blocks {
        body.extend_from_slice(&encode_block(block, order));
    }
    framed(body, order)
}

pub enum AttrValueSpec {
    Inline(Vec<u8>),
    VarRef(u32),
}

pub struct AttrSpec {
    pub id: u32,
    pub group_name: String,
    pub attr_path: String,
    pub attr_name: String,
    pub type_tag: u8,
    pub value: AttrValueSpec,
}

pub fn encode_attr(attr: &AttrSpec, order: Endian) -> Vec<u8> {
    let mut body = Vec::new();
    put_u32(&mut body, attr.id, order);
    write_string(&mut body, &attr.group_name, order);
    write_string(&mut body, &attr.attr_path, order);
    write_string(&mut body, &attr.attr_name, order);
    body.push(attr.type_tag);
    match &attr.value {
        AttrValueSpec::Inline(bytes) => {
            body.push(0);
            put_u32(&mut body, bytes.len() as u32, order);
            body.extend_from_slice(bytes);
        }
        AttrValueSpec::VarRef(var_id) => {
            body.push(1);
            put_u32(&mut body, *var_id, order);
        }
    }
    framed(body, order)
}

/// Assembles `payload` plus the three index sections and a trailing
/// minifooter into one complete BP image. Every multi-byte field in the
/// index sections (not just the minifooter's version word) follows
/// `big_endian`, matching how `footer::open_with` derives one endianness
/// for the whole index region from the minifooter flag.
pub fn build_image(
    payload: Vec<u8>,
    pgs: &[PgSpec],
    vars: &[VarSpec],
    attrs: &[AttrSpec],
    big_endian: bool,
) -> Vec<u8> {
    let order = if big_endian { Endian::Big } else { Endian::Little };
    let mut out = payload;
    let pgs_index_offset = out.len() as u64;

    put_u64(&mut out, pgs.len() as u64, order);
    for pg in pgs {
        out.extend_from_slice(&encode_pg(pg, order));
    }

    let vars_index_offset = out.len() as u64;
    put_u64(&mut out, vars.len() as u64, order);
    for var in vars {
        out.extend_from_slice(&encode_var(var, order));
    }

    let attrs_index_offset = out.len() as u64;
    put_u64(&mut out, attrs.len() as u64, order);
    for attr in attrs {
        out.extend_from_slice(&encode_attr(attr, order));
    }

    let mut raw_version = 1u32;
    if big_endian {
        raw_version |= 0x8000_0000;
    }
    // The minifooter's three index offsets and version word are always
    // little-endian on disk; only the version word's top bit flags the
    // data section's endianness.
    out.extend_from_slice(&pgs_index_offset.to_le_bytes());
    out.extend_from_slice(&vars_index_offset.to_le_bytes());
    out.extend_from_slice(&attrs_index_offset.to_le_bytes());
    out.extend_from_slice(&raw_version.to_le_bytes());
    out
}
