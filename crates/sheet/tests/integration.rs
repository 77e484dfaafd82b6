use tilia_sheet::{
    rows_to_csv_string, CellValue, CsvOptions, CsvSink, GridLayout, GridReconstructor, RowSink,
    SparseCell, SparseColumn, SparseSheet,
};

fn dense_sheet(values: &[&[&str]]) -> SparseSheet {
    values
        .iter()
        .enumerate()
        .map(|(c, row)| {
            let cells = row
                .iter()
                .enumerate()
                .map(|(r, v)| SparseCell::text(r as u32 + 1, *v))
                .collect();
            SparseColumn::with_cells(c as u32 + 1, cells)
        })
        .collect()
}

// ===== Dense transcription =====

#[test]
fn test_gapless_sheet_is_transcribed() {
    let input: &[&[&str]] = &[&["a", "b", "c"], &["d", "e", "f"], &["g", "h", "i"]];
    let sheet = dense_sheet(input);
    let layout = GridLayout::passthrough();

    let rows = GridReconstructor::new(&layout).rows(&sheet).unwrap();

    let expected: Vec<Vec<CellValue>> = input
        .iter()
        .map(|row| row.iter().map(|v| CellValue::from(*v)).collect())
        .collect();
    assert_eq!(rows, expected);
}

// ===== Fill regions =====

#[test]
fn test_fill_values_follow_data_origin() {
    let layout = GridLayout::passthrough().with_data_origin(3, 4);
    let reconstructor = GridReconstructor::new(&layout);

    // Only the last row position is present, everything before it is a gap.
    let sheet: SparseSheet = (1..=5)
        .map(|c| SparseColumn::with_cells(c, vec![SparseCell::text(6, "x")]))
        .collect();

    let rows = reconstructor.rows(&sheet).unwrap();
    for (c, row) in rows.iter().enumerate() {
        let column = c as u32 + 1;
        for (r, value) in row.iter().take(5).enumerate() {
            let position = r as u32 + 1;
            if column >= 3 && position >= 4 {
                assert_eq!(value, &CellValue::Int(0), "column {column}, row {position}");
            } else {
                assert_eq!(value, &CellValue::blank(), "column {column}, row {position}");
            }
        }
        assert_eq!(row[5], CellValue::from("x"));
    }
}

// ===== Skip sets =====

#[test]
fn test_default_layout_skips_tilia_rows_and_columns() {
    let layout = GridLayout::default();
    let reconstructor = GridReconstructor::new(&layout);

    let sheet: SparseSheet = (1..=9)
        .map(|c| {
            SparseColumn::with_cells(
                c,
                (1..=4)
                    .map(|r| SparseCell::text(r, format!("{c}:{r}")))
                    .collect(),
            )
        })
        .collect();

    let rows = reconstructor.rows(&sheet).unwrap();
    let first_cells: Vec<String> = rows.iter().map(|row| row[0].as_str()).collect();
    assert_eq!(first_cells, vec!["2:1", "7:1", "8:1", "9:1"]);

    for row in &rows {
        assert_eq!(row.len(), 3);
        assert!(row.iter().all(|v| !v.as_str().ends_with(":2")));
    }
}

#[test]
fn test_skipped_column_is_not_a_gap() {
    let layout = GridLayout::passthrough().with_skip_columns([2]);
    let reconstructor = GridReconstructor::new(&layout);

    let sheet: SparseSheet = vec![
        SparseColumn::with_cells(1, vec![SparseCell::text(1, "a")]),
        SparseColumn::with_cells(2, vec![SparseCell::text(1, "b")]),
        SparseColumn::with_cells(3, vec![SparseCell::text(1, "c")]),
    ]
    .into_iter()
    .collect();

    let rows = reconstructor.rows(&sheet).unwrap();
    assert_eq!(
        rows,
        vec![vec![CellValue::from("a")], vec![CellValue::from("c")]]
    );
}

#[test]
fn test_skipping_rows_keeps_positions_of_later_cells() {
    let layout = GridLayout::passthrough()
        .with_skip_rows([2])
        .with_data_origin(1, 1);
    let reconstructor = GridReconstructor::new(&layout);

    let column = SparseColumn::with_cells(
        1,
        vec![SparseCell::number(1, "1"), SparseCell::number(4, "4")],
    );
    let row = reconstructor.dense_row(&column, 5);
    assert_eq!(
        row,
        vec![
            CellValue::Int(1),
            CellValue::Int(0),
            CellValue::Int(4),
            CellValue::Int(0),
        ]
    );
}

// ===== Canonical width =====

#[test]
fn test_every_row_has_canonical_width() {
    let layout = GridLayout::default();
    let reconstructor = GridReconstructor::new(&layout);

    let sheet: SparseSheet = vec![
        SparseColumn::with_cells(1, vec![SparseCell::text(10, "width")]),
        SparseColumn::with_cells(2, vec![SparseCell::text(1, "short")]),
        SparseColumn::with_cells(8, vec![SparseCell::number(25, "3")]),
        SparseColumn::with_cells(9, Vec::new()),
    ]
    .into_iter()
    .collect();

    let rows = reconstructor.rows(&sheet).unwrap();
    assert_eq!(rows.len(), 3);
    for row in &rows {
        assert_eq!(row.len(), layout.kept_width(10));
    }
    assert_eq!(rows[2][8], CellValue::Int(0));
}

// ===== CSV output =====

#[test]
fn test_stream_into_csv() {
    let layout = GridLayout::passthrough().with_data_origin(2, 2);
    let reconstructor = GridReconstructor::new(&layout);

    let sheet: SparseSheet = vec![
        SparseColumn::with_cells(
            1,
            vec![SparseCell::text(1, "Taxon"), SparseCell::text(3, "Pinus, sp.")],
        ),
        SparseColumn::with_cells(2, vec![SparseCell::number(1, "12.0")]),
        SparseColumn::with_cells(3, vec![SparseCell::number(3, "0.5")]),
    ]
    .into_iter()
    .collect();

    let mut sink = CsvSink::new(Vec::new(), CsvOptions::default());
    let written = reconstructor.reconstruct(&sheet, &mut sink).unwrap();
    assert_eq!(written, 3);

    let csv = String::from_utf8(sink.finish().unwrap()).unwrap();
    assert_eq!(csv, "Taxon,,\"Pinus, sp.\"\r\n12,0,0\r\n,0,0.5\r\n");
}

#[test]
fn test_rows_to_csv_string_matches_sink() {
    let rows = vec![vec![CellValue::Int(1), CellValue::blank()]];
    let mut sink = CsvSink::new(Vec::new(), CsvOptions::default());
    for row in &rows {
        sink.write_row(row).unwrap();
    }
    let streamed = String::from_utf8(sink.finish().unwrap()).unwrap();
    assert_eq!(rows_to_csv_string(&rows).unwrap(), streamed);
}
