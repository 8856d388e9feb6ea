//! Attribute value resolution: inline payloads are returned as-is;
//! variable-referencing attributes are resolved against the variable
//! catalog, with the byte-array-to-string conversion BP readers apply
//! when a 1-D byte array is attached to a string (or untyped) attribute.

use crate::catalog::{AttributeRecord, AttributeValue, VariableRecord};
use crate::codec::DataType;
use crate::error::{BpError, ErrorKind, Result};

/// A fully resolved attribute value, ready to hand back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedValue {
    Bytes(Vec<u8>),
    Text(String),
}

/// What `get_attribute` still needs to do after consulting the catalog.
/// Variable-referenced values require an actual payload read, which is
/// `reader`'s job; this module only decides *what* to fetch and *how* to
/// interpret the bytes once fetched.
pub enum Resolution {
    Inline(ResolvedValue),
    FromVariable { var_id: u32, convert_to_text: bool },
}

fn is_byte_type(ty: DataType) -> bool {
    matches!(ty, DataType::Byte | DataType::UnsignedByte)
}

fn find_variable(var_id: u32, vars: &[VariableRecord]) -> Option<&VariableRecord> {
    vars.iter().find(|v| v.id == var_id)
}

/// Decides how to resolve `attr`, looking up the referenced variable (if
/// any) in `vars` by id only — the wider id+path match lives in
/// `reader::resolve_attribute`, which has the full group context this
/// module deliberately does not need.
pub fn plan(attr: &AttributeRecord, vars: &[VariableRecord]) -> Result<Resolution> {
    match &attr.value {
        AttributeValue::Inline(bytes) => {
            if attr.type_tag == DataType::String {
                let text = String::from_utf8(bytes.clone()).map_err(|e| {
                    BpError::new(
                        ErrorKind::CorruptedAttribute,
                        format!("attribute '{}' is not valid utf-8: {e}", attr.full_path()),
                    )
                })?;
                Ok(Resolution::Inline(ResolvedValue::Text(text)))
            } else {
                Ok(Resolution::Inline(ResolvedValue::Bytes(bytes.clone())))
            }
        }
        AttributeValue::VarRef { var_id } => {
            let var = find_variable(*var_id, vars).ok_or_else(|| {
                BpError::new(
                    ErrorKind::InvalidAttributeReference,
                    format!(
                        "attribute '{}' references unknown variable id {var_id}",
                        attr.full_path()
                    ),
                )
            })?;
            let ndims = var.characteristics.first().map(|c| c.dims.len()).unwrap_or(0);
            let convert_to_text = is_byte_type(var.type_tag)
                && ndims == 1
                && matches!(attr.type_tag, DataType::String | DataType::Unknown);

            if ndims > 0 && !convert_to_text {
                return Err(BpError::new(
                    ErrorKind::InvalidAttributeReference,
                    format!(
                        "attribute '{}' references variable '{}', which has no scalar value",
                        attr.full_path(),
                        var.full_path()
                    ),
                ));
            }
            Ok(Resolution::FromVariable {
                var_id: *var_id,
                convert_to_text,
            })
        }
    }
}

/// Converts a byte array's raw payload to text, applying the padding
/// convention of the array's writer order: column-major (Fortran) writers
/// space-pad fixed-width character arrays, so trailing spaces are trimmed.
/// Row-major (C) writers hand back the whole buffer as-is — any embedded
/// NUL is just a character in the array, not a terminator, since the
/// buffer already carries its own length.
pub fn bytes_to_text(bytes: &[u8], column_major: bool) -> String {
    let slice = if column_major {
        let trimmed_len = bytes
            .iter()
            .rposition(|&b| b != b' ')
            .map(|pos| pos + 1)
            .unwrap_or(0);
        &bytes[..trimmed_len]
    } else {
        bytes
    };
    String::from_utf8_lossy(slice).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_spaces_for_column_major() {
        assert_eq!(bytes_to_text(b"hello   ", true), "hello");
    }

    #[test]
    fn embedded_nul_is_not_a_terminator_for_row_major() {
        assert_eq!(bytes_to_text(b"hello\0world", false), "hello\0world");
    }

    #[test]
    fn uses_whole_buffer_when_no_terminator() {
        assert_eq!(bytes_to_text(b"hello", false), "hello");
    }
}
