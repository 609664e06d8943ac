use std::time::Duration;

use label_station::LabelError;
use label_station::labels::{
    GeometrySettings, JsonCatalog, PrintExecutor, PrintJob, assemble,
};
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;

const CATALOG: &str = r#"{
    "items": {
        "WIDGET-A": { "barcodes": ["1001"], "prices": { "Standard Selling": 99 } },
        "WIDGET-B": { "barcodes": ["1002"], "standard_rate": 149.6 }
    }
}"#;

const JOB: &str = r#"{
    "document": "ACC-PINV-2025-00001",
    "label_size": "Shelf 2-up",
    "items": [
        { "item_code": "WIDGET-A", "item_name": "Widget Alpha", "qty": 1 },
        { "item_code": "WIDGET-B", "item_name": "Widget Beta", "print_qty": "2" },
        { "item_code": "WIDGET-C", "item_name": "Not printed", "selected": false }
    ]
}"#;

fn settings_json(port: u16) -> String {
    format!(
        r#"{{
            "default_printer": "Shelf Printer",
            "label_sizes": [
                {{ "name": "Shelf 2-up", "width": 70, "height": 15, "gap": 3, "labels_per_row": 2 }}
            ],
            "printers": {{ "Shelf Printer": "127.0.0.1:{}" }}
        }}"#,
        port
    )
}

#[tokio::test]
async fn test_job_is_printed_to_configured_queue() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        socket.read_to_end(&mut received).await.unwrap();
        received
    });

    let dir = tempfile::tempdir().unwrap();
    let settings_path = dir.path().join("label-settings.json");
    let catalog_path = dir.path().join("item-catalog.json");
    let job_path = dir.path().join("job.json");
    std::fs::write(&settings_path, settings_json(port)).unwrap();
    std::fs::write(&catalog_path, CATALOG).unwrap();
    std::fs::write(&job_path, JOB).unwrap();

    let settings = GeometrySettings::load(&settings_path).unwrap();
    let catalog = JsonCatalog::load(&catalog_path).unwrap();
    let job = PrintJob::load(&job_path).unwrap();

    let preset = settings.resolve_preset(job.label_size.as_deref());
    let lines = job
        .to_lines(&catalog, Some(&settings.default_price_list))
        .unwrap();
    let script = assemble(preset, &lines);
    assert_eq!(script.label_count(), 3);
    assert_eq!(script.row_count(), 2);

    let executor = PrintExecutor::new("utf-8", Duration::from_secs(2));
    executor
        .print_to(settings.printer_for(preset), &script, &settings)
        .await
        .unwrap();

    let received = String::from_utf8(server.await.unwrap()).unwrap();
    assert_eq!(received, script.render());
    assert!(received.contains(r#"TEXT 8,96,"1",0,1,1,"WIDGET-A Rs99""#));
    assert!(received.contains(r#"TEXT 305,96,"1",0,1,1,"WIDGET-B Rs150""#));
    assert!(!received.contains("Not printed"));
}

#[tokio::test]
async fn test_unreachable_printer_reports_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let settings_path = dir.path().join("label-settings.json");
    std::fs::write(&settings_path, settings_json(port)).unwrap();
    let settings = GeometrySettings::load(&settings_path).unwrap();

    let preset = settings.default_preset();
    let job: PrintJob = serde_json::from_str(JOB).unwrap();
    let lines = job.to_lines(&JsonCatalog::empty(), None).unwrap();
    let script = assemble(preset, &lines);

    let executor = PrintExecutor::new("utf-8", Duration::from_secs(2));
    let err = executor
        .print_to(settings.printer_for(preset), &script, &settings)
        .await
        .unwrap_err();
    assert!(matches!(err, LabelError::Print(_)));
}

#[test]
fn test_missing_settings_still_prints_with_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let settings = GeometrySettings::load_or_fallback(dir.path().join("absent.json"));
    let job: PrintJob = serde_json::from_str(JOB).unwrap();

    // the job's label size does not exist in the fallback settings
    let preset = settings.resolve_preset(job.label_size.as_deref());
    assert_eq!(preset, &label_station::labels::LabelGeometry::fallback());

    let lines = job.to_lines(&JsonCatalog::empty(), None).unwrap();
    let script = assemble(preset, &lines);
    assert!(script.render().contains(r#"TEXT 8,96,"1",0,1,1,"WIDGET-A Rs0""#));
    assert!(script.render().contains(r#"BARCODE 305,16,"128",60,0,0,2,4,"WIDGET-B""#));
}

#[test]
fn test_empty_selection_is_rejected() {
    let job: PrintJob = serde_json::from_str(
        r#"{ "items": [{ "item_code": "WIDGET-A", "selected": false }] }"#,
    )
    .unwrap();
    let err = job.to_lines(&JsonCatalog::empty(), None).unwrap_err();
    assert!(matches!(err, LabelError::EmptySelection));
}
