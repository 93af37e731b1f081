use epi_core::EpiError;
use epi_engine::serde_io::{load_report, report_from_json, report_to_json, save_report};
use epi_engine::{
    compute, compute_coordinates, compute_epistasis, ComputeOpts, CsvSink, EpistasisReport,
    ResultBlock, TextSink, UncertaintyMode,
};

fn landscape(species: usize) -> Vec<f64> {
    (0..1usize << species).map(|i| ((i * 7) % 11) as f64).collect()
}

#[test]
fn five_species_counts_by_stage() {
    let w = landscape(5);
    let report = compute_epistasis(&w, &[0.5; 32], 5, false).unwrap();
    // 640 circuits, then 4 x 40, 11 x 10 and 26 x 1 coordinates.
    assert_eq!(report.len(), 640 + 160 + 110 + 26);
    assert_eq!(report.results.len(), report.len());
    assert_eq!(report.errors.len(), report.len());
    assert!(report.tags[..640].iter().all(|t| t.as_bytes()[0] != b'u'));
    assert!(report.tags[640..].iter().all(|t| t.starts_with("u_")));
    assert_eq!(report.tags.last().map(String::as_str), Some("u_ABCDE"));
}

#[test]
fn coordinates_are_mask_major() {
    let w = landscape(4);
    let block = compute_coordinates(&w, &[0.0; 16], 4, 3, &ComputeOpts::default()).unwrap();
    assert_eq!(block.len(), 32);
    assert_eq!(block.tags[0], "u_0aBC");
    assert_eq!(block.tags[1], "u_1aBC");
    assert_eq!(block.tags[8], "u_0AbC");
    assert_eq!(block.tags[31], "u_ABC1");

    let full = compute_coordinates(&w, &[0.0; 16], 4, 4, &ComputeOpts::default()).unwrap();
    assert_eq!(full.len(), 11);
    assert_eq!(full.tags[0], "u_abCD");
    assert_eq!(full.tags[10], "u_ABCD");
}

#[test]
fn parallel_and_sequential_agree() {
    let w = landscape(6);
    let err: Vec<f64> = (0..64).map(|i| 0.1 + i as f64 / 100.0).collect();
    for mode in [UncertaintyMode::StandardError, UncertaintyMode::Interval] {
        let sequential = ComputeOpts {
            mode,
            ..ComputeOpts::default()
        };
        let parallel = ComputeOpts {
            parallel: true,
            ..sequential
        };
        let a = compute(&w, &err, 6, &sequential).unwrap();
        let b = compute(&w, &err, 6, &parallel).unwrap();
        assert_eq!(a.digest().unwrap(), b.digest().unwrap());
        assert_eq!(a, b);
    }
}

#[test]
fn mismatched_lengths_are_shape_errors() {
    let err = compute_epistasis(&landscape(4), &[0.0; 8], 4, false).unwrap_err();
    assert!(matches!(err, EpiError::Shape(_)));
    assert_eq!(err.info().code, "fitness-error-length");

    let err = compute_epistasis(&landscape(4), &[0.0; 16], 5, false).unwrap_err();
    assert_eq!(err.info().code, "fitness-length");
}

#[test]
fn too_few_species_is_a_domain_error() {
    let err = compute_epistasis(&landscape(2), &[0.0; 4], 2, false).unwrap_err();
    assert!(matches!(err, EpiError::Domain(_)));
}

#[test]
fn species_above_cap_is_rejected_before_any_matrix() {
    let species = epi_core::MAX_SPECIES + 1;
    let w = vec![0.0; 1 << species];
    let err = compute_epistasis(&w, &w, species, false).unwrap_err();
    assert!(matches!(err, EpiError::Domain(_)));
    assert_eq!(err.info().code, "species-range");
}

#[test]
fn coordinate_order_above_species_is_rejected() {
    let err = compute_coordinates(&landscape(3), &[0.0; 8], 3, 4, &ComputeOpts::default());
    assert!(matches!(err, Err(EpiError::Domain(_))));
}

#[test]
fn json_roundtrip_preserves_report() {
    let report = compute_epistasis(&landscape(4), &[0.0; 16], 4, false).unwrap();
    let json = report_to_json(&report).unwrap();
    assert!(json.contains("\"standard_error\""));
    let back = report_from_json(&json).unwrap();
    assert_eq!(back, report);
    assert_eq!(back.digest().unwrap(), report.digest().unwrap());
}

#[test]
fn saved_report_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    let report = compute_epistasis(&landscape(3), &[0.0; 8], 3, true).unwrap();
    save_report(&path, &report).unwrap();
    assert_eq!(load_report(&path).unwrap(), report);

    let missing = load_report(&dir.path().join("absent.json")).unwrap_err();
    assert_eq!(missing.info().code, "report-read");
}

#[test]
fn ragged_json_is_rejected() {
    let json = r#"{"species":3,"mode":"interval","results":[1.0],"errors":[],"tags":["a_ABC"]}"#;
    assert!(matches!(report_from_json(json), Err(EpiError::Shape(_))));
    assert!(matches!(report_from_json("{"), Err(EpiError::Serde(_))));
}

#[test]
fn append_rejects_ragged_blocks() {
    let mut report = EpistasisReport::new(3, UncertaintyMode::StandardError);
    let block = ResultBlock {
        results: vec![1.0, 2.0],
        errors: vec![0.0],
        tags: vec!["a_ABC".into(), "b_ABC".into()],
    };
    assert!(matches!(report.append(block), Err(EpiError::Shape(_))));
    assert!(report.is_empty());
}

#[test]
fn text_sink_writes_one_line_per_record() {
    let w: Vec<f64> = (0..8).map(|i| (i * i) as f64).collect();
    let report = compute_epistasis(&w, &[1.0; 8], 3, false).unwrap();
    let mut sink = TextSink::new(Vec::new(), 3);
    report.emit(&mut sink).unwrap();
    let text = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 24);
    assert_eq!(lines[0], "a_ABC 16.000 2.000");
}

#[test]
fn csv_sink_headers_follow_mode() {
    let w: Vec<f64> = (0..8).map(f64::from).collect();
    let report = compute(&w, &w, 3, &ComputeOpts::interval()).unwrap();
    let mut sink = CsvSink::new(Vec::new(), report.mode).unwrap();
    report.emit(&mut sink).unwrap();
    let bytes = sink.finish().unwrap();
    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["tag", "low", "high"]);
    assert_eq!(reader.records().count(), 24);
}

#[test]
fn vec_sink_collects_records() {
    let report = compute_epistasis(&landscape(3), &[0.0; 8], 3, false).unwrap();
    let mut sink: Vec<(String, f64, f64)> = Vec::new();
    report.emit(&mut sink).unwrap();
    assert_eq!(sink.len(), report.len());
    assert_eq!(sink[0].0, "a_ABC");
}
