use civicbridge::domain::{StoragePath, WorkOrderId};

#[test]
fn given_work_order_id_when_building_pdf_path_then_lives_under_work_orders() {
    let id: WorkOrderId = "wo_20240101_001".parse().unwrap();
    let path = StoragePath::work_order_pdf(&id);

    assert_eq!(path.as_str(), "work_orders/wo_20240101_001.pdf");
    assert_eq!(path.file_name(), "wo_20240101_001.pdf");
}

#[test]
fn given_traversal_segments_when_checking_safety_then_rejected() {
    assert!(StoragePath::from_raw("work_orders/a.pdf").is_safe());
    assert!(!StoragePath::from_raw("../etc/passwd").is_safe());
    assert!(!StoragePath::from_raw("work_orders//a.pdf").is_safe());
    assert!(!StoragePath::from_raw("work_orders/./a.pdf").is_safe());
    assert!(!StoragePath::from_raw("").is_safe());
}
