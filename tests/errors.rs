mod fixtures;

use bp_read::{open_memory, ArrayOrder, DataType, ErrorKind, Hyperslab, SingleProcess};
use fixtures::{dim, BlockSpec, PgSpec, VarSpec};

fn single_array_image() -> Vec<u8> {
    let values: Vec<i32> = (0..16).collect();
    let mut payload = vec![0u8; 8];
    payload.extend(values.iter().flat_map(|v| v.to_le_bytes()));
    let pgs = vec![PgSpec {
        group_name: "main".into(),
        column_major: false,
        time_index_name: String::new(),
        time_step: 0,
        offset: 0,
    }];
    let vars = vec![VarSpec {
        id: 1,
        group_name: "main".into(),
        var_path: "/".into(),
        var_name: "grid".into(),
        type_tag: DataType::Integer as u8,
        is_global: true,
        ndims: 2,
        time_dim: None,
        blocks: vec![BlockSpec {
            offset: 0,
            payload_offset: 8,
            dims: vec![dim(4, 4, 0), dim(4, 4, 0)],
            value: None,
            min: None,
            max: None,
        }],
    }];
    fixtures::build_image(payload, &pgs, &vars, &[], false)
}

#[test]
fn unknown_variable_name_is_invalid_varname() {
    let file = open_memory(single_array_image(), Box::new(SingleProcess), ArrayOrder::RowMajor).unwrap();
    let group = bp_read::open_group(&file, "main").unwrap();
    let err = group.inquire("does_not_exist").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidVarname);
}

#[test]
fn leading_slash_is_tolerated() {
    let file = open_memory(single_array_image(), Box::new(SingleProcess), ArrayOrder::RowMajor).unwrap();
    let group = bp_read::open_group(&file, "/main").unwrap();
    assert!(group.inquire("/grid").is_ok());
}

#[test]
fn unknown_group_is_invalid_group() {
    let file = open_memory(single_array_image(), Box::new(SingleProcess), ArrayOrder::RowMajor).unwrap();
    let err = bp_read::open_group(&file, "nope").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidGroup);
}

#[test]
fn selection_past_the_end_is_out_of_bound() {
    let file = open_memory(single_array_image(), Box::new(SingleProcess), ArrayOrder::RowMajor).unwrap();
    let group = bp_read::open_group(&file, "main").unwrap();
    let err = group
        .read("grid", Hyperslab { start: vec![10, 10], count: vec![2, 2] })
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::OutOfBound);
}

#[test]
fn missing_pg_for_requested_timestep_is_no_data() {
    let pgs = vec![
        PgSpec {
            group_name: "main".into(),
            column_major: false,
            time_index_name: "time".into(),
            time_step: 0,
            offset: 0,
        },
        PgSpec {
            group_name: "main".into(),
            column_major: false,
            time_index_name: "time".into(),
            time_step: 2,
            offset: 1000,
        },
    ];
    let blocks = vec![
        BlockSpec {
            offset: 1,
            payload_offset: 8,
            dims: vec![dim(1, 0, 0)],
            value: Some(0i32.to_le_bytes().to_vec()),
            min: None,
            max: None,
        },
        BlockSpec {
            offset: 1001,
            payload_offset: 8,
            dims: vec![dim(1, 0, 0)],
            value: Some(2i32.to_le_bytes().to_vec()),
            min: None,
            max: None,
        },
    ];
    let vars = vec![VarSpec {
        id: 1,
        group_name: "main".into(),
        var_path: "/".into(),
        var_name: "marker".into(),
        type_tag: DataType::Integer as u8,
        is_global: false,
        ndims: 1,
        time_dim: Some(0),
        blocks,
    }];
    let image = fixtures::build_image(Vec::new(), &pgs, &vars, &[], false);
    let file = open_memory(image, Box::new(SingleProcess), ArrayOrder::RowMajor).unwrap();
    let group = bp_read::open_group(&file, "main").unwrap();
    // timestep 1 falls between two written process groups (0 and 2); no
    // block was ever written for it.
    let err = group.read("marker", Hyperslab { start: vec![1], count: vec![1] }).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NoDataAtTimestep);
}

#[test]
fn truncated_file_is_corrupted_footer() {
    let err = open_memory(vec![1, 2, 3], Box::new(SingleProcess), ArrayOrder::RowMajor).unwrap_err();
    assert_eq!(err.kind, ErrorKind::CorruptedFooter);
}

#[test]
fn last_error_mirrors_the_returned_error() {
    let file = open_memory(single_array_image(), Box::new(SingleProcess), ArrayOrder::RowMajor).unwrap();
    let group = bp_read::open_group(&file, "main").unwrap();
    assert!(group.inquire("missing").is_err());
    let last = bp_read::last_error().expect("an error should have been recorded");
    assert_eq!(last.kind, ErrorKind::InvalidVarname);
}
