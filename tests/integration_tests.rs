use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use chrono::NaiveDate;
use payhawk_prinex::{generate, EtlError, PRINEX_COLUMNS};
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::ZipArchive;

const HEADER: &str = "Expense ID,Document Type,Payment Type,Net Amount (EUR),Total Amount (EUR),Tax Rate %,Tax Amount (EUR),Document Number,Document Date,Account Code,Promoción External ID,File Name 1";

fn payhawk_bundle(csv: &str, documents: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("Payhawk Export.csv", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(csv.as_bytes()).unwrap();
    for (name, content) in documents {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(content).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn accounting_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

fn read_entries(bundle: Vec<u8>) -> HashMap<String, Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(bundle)).unwrap();
    let mut entries = HashMap::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).unwrap();
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        entries.insert(entry.name().to_string(), content);
    }
    entries
}

fn read_sheet(xlsx: Vec<u8>) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(xlsx)).unwrap();
    let range = workbook.worksheet_range("Plantilla Prinex").unwrap();
    range.rows().map(|row| row.to_vec()).collect()
}

fn column(name: &str) -> usize {
    PRINEX_COLUMNS.iter().position(|c| *c == name).unwrap()
}

fn text(value: &str) -> Data {
    Data::String(value.to_string())
}

#[test]
fn test_end_to_end_conversion() {
    let csv = format!(
        "{HEADER}\n\
         E1,Invoice,card,100,121,21,21,D1,2024-03-05,700-00,PRJ-9,E1.pdf\n\
         E2,Receipt,card,50,60.5,21,10.5,T-77,2024-02-29T08:00:00Z,6290,PRJ-9,E2.pdf\n\
         E3,Invoice,mileage,30,30,0,0,,not-a-date,,,\n"
    );
    let receipt_bytes: &[u8] = &[0x25, 0x50, 0x44, 0x46, 0x00, 0xff, 0x10];
    let input = payhawk_bundle(
        &csv,
        &[
            ("docs/E1.pdf", b"%PDF invoice E1".as_slice()),
            ("E2.PDF", receipt_bytes),
        ],
    );

    let output = generate(&input, accounting_date()).unwrap();

    assert_eq!(output.record_count, 3);
    assert_eq!(output.document_count, 2);
    assert_eq!(output.preview.len(), 3);
    assert_eq!(output.bundle_name, "carga_prinex_con_facturas.zip");

    let mut entries = read_entries(output.bundle_bytes);
    let mut names: Vec<&String> = entries.keys().collect();
    names.sort();
    assert_eq!(
        names,
        vec!["facturas/E1.pdf", "facturas/E2.PDF", "plantilla_prinex.xlsx"]
    );
    assert_eq!(entries["facturas/E1.pdf"], b"%PDF invoice E1");
    assert_eq!(entries["facturas/E2.PDF"], receipt_bytes);

    let rows = read_sheet(entries.remove("plantilla_prinex.xlsx").unwrap());
    assert_eq!(rows.len(), 4);

    let header: Vec<Data> = PRINEX_COLUMNS.iter().map(|c| text(c)).collect();
    assert_eq!(rows[0], header);

    let invoice = &rows[1];
    assert_eq!(invoice[column("SOCIEDAD")], Data::Float(666.0));
    assert_eq!(invoice[column("TIPO.FRA")], text("F"));
    assert_eq!(invoice[column("BASE1")], Data::Float(100.0));
    assert_eq!(invoice[column("IVA1")], Data::Float(21.0));
    assert_eq!(invoice[column("CUOTA1")], Data::Float(21.0));
    assert_eq!(invoice[column("IMP.BRUTO")], Data::Float(100.0));
    assert_eq!(invoice[column("TOTAL")], Data::Float(121.0));
    assert_eq!(invoice[column("NUM.FRA")], text("D1"));
    assert_eq!(invoice[column("FECHA.FRA")], text("05/03/2024"));
    assert_eq!(invoice[column("FECHA.CONTABLE")], text("10/03/2024"));
    assert_eq!(invoice[column("CTA_GASTO")], text("700"));
    assert_eq!(invoice[column("SCTA_GASTO")], text("00"));
    assert_eq!(invoice[column("PROYECTO")], text("PRJ-9"));
    assert_eq!(invoice[column("NOMBRE")], text("E1.pdf"));
    assert_eq!(invoice[column("CIF")], Data::Empty);

    let receipt = &rows[2];
    assert_eq!(receipt[column("TIPO.FRA")], text("C"));
    assert_eq!(receipt[column("BASE1")], Data::Float(60.5));
    assert_eq!(receipt[column("IMP.BRUTO")], Data::Float(60.5));
    assert_eq!(receipt[column("IMPORTE_GASTO")], Data::Float(60.5));
    assert_eq!(receipt[column("IVA1")], Data::Float(0.0));
    assert_eq!(receipt[column("CUOTA1")], Data::Float(0.0));
    assert_eq!(receipt[column("FECHA.FRA")], text("29/02/2024"));
    assert_eq!(receipt[column("CTA_GASTO")], text("6290"));
    assert_eq!(receipt[column("SCTA_GASTO")], Data::Empty);

    let mileage = &rows[3];
    assert_eq!(mileage[column("TIPO.FRA")], text("C"));
    assert_eq!(mileage[column("NUM.FRA")], text("KM-E3"));
    assert_eq!(mileage[column("FECHA.FRA")], Data::Empty);
    assert_eq!(mileage[column("FECHA.CONTABLE")], text("10/03/2024"));
    assert_eq!(mileage[column("CTA_GASTO")], Data::Empty);
}

#[test]
fn test_preview_serializes_every_template_column() {
    let csv = format!("{HEADER}\nE1,Invoice,card,100,121,21,21,D1,2024-03-05,700-00,,\n");
    let input = payhawk_bundle(&csv, &[("E1.pdf", b"%PDF".as_slice())]);

    let output = generate(&input, accounting_date()).unwrap();
    let json = serde_json::to_value(&output.preview).unwrap();
    let row = json[0].as_object().unwrap();

    assert_eq!(row.len(), PRINEX_COLUMNS.len());
    assert_eq!(row.len(), 93);
    assert_eq!(row["TIPO.FRA"], "F");
    assert_eq!(row["PROYECTO"], "");
    assert_eq!(row["SOCIEDAD"], 666.0);
}

#[test]
fn test_missing_csv_and_pdf_are_reported_together() {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("readme.txt", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"nothing useful").unwrap();
    let input = zip.finish().unwrap().into_inner();

    match generate(&input, accounting_date()) {
        Err(EtlError::ValidationFailed { problems }) => {
            assert_eq!(problems.len(), 2);
            assert!(problems[0].contains("CSV"));
            assert!(problems[1].contains("PDF"));
        }
        other => panic!("expected validation failure, got {:?}", other.map(|o| o.record_count)),
    }
}

#[test]
fn test_missing_classification_column_is_a_mapping_error() {
    let input = payhawk_bundle(
        "Expense ID,Document Type\nE1,Invoice\n",
        &[("E1.pdf", b"%PDF".as_slice())],
    );

    let error = generate(&input, accounting_date()).unwrap_err();
    assert!(matches!(error, EtlError::MappingError { .. }));
    assert!(error.user_friendly_message().contains("Payment Type"));
}

#[test]
fn test_partial_schema_degrades_to_empty_columns() {
    let input = payhawk_bundle(
        "Document Type,Payment Type\nReceipt,card\nInvoice,card\n",
        &[("a.pdf", b"%PDF".as_slice())],
    );

    let output = generate(&input, accounting_date()).unwrap();
    assert_eq!(output.record_count, 2);

    let receipt = &output.preview[0];
    assert_eq!(receipt.get("TIPO.FRA").unwrap().to_string(), "C");
    assert!(receipt.get("BASE1").unwrap().is_empty());
    assert!(receipt.get("NUM.FRA").unwrap().is_empty());
    assert_eq!(receipt.get("IVA1").unwrap().to_string(), "0");
    assert!(output.preview[1].get("IVA1").unwrap().is_empty());
}
