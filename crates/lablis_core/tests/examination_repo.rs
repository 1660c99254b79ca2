use chrono::{NaiveDate, NaiveDateTime};
use lablis_core::db::open_db_in_memory;
use lablis_core::{
    ExaminationInput, ExaminationRepository, Priority, RepoError, RequestStatus,
    SqliteExaminationRepository, NO_SPECIMEN_PLACEHOLDER,
};
use rusqlite::{params, Connection};

struct References {
    patient_id: i64,
    doctor_id: i64,
    service_id: i64,
    specimen_id: i64,
}

fn seed_references(conn: &Connection) -> References {
    conn.execute("INSERT INTO pasien (nama_lengkap) VALUES ('Siti Aminah');", [])
        .unwrap();
    let patient_id = conn.last_insert_rowid();
    conn.execute("INSERT INTO dokter (nama_dokter) VALUES ('dr. Rahmat');", [])
        .unwrap();
    let doctor_id = conn.last_insert_rowid();
    conn.execute(
        "INSERT INTO layanan (nama_layanan) VALUES ('Laboratorium Klinik');",
        [],
    )
    .unwrap();
    let service_id = conn.last_insert_rowid();
    conn.execute("INSERT INTO spesimen (jenis_spesimen) VALUES ('Darah');", [])
        .unwrap();
    let specimen_id = conn.last_insert_rowid();

    References {
        patient_id,
        doctor_id,
        service_id,
        specimen_id,
    }
}

fn requested_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 18)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap()
}

fn input_for(refs: &References) -> ExaminationInput {
    ExaminationInput {
        patient_id: refs.patient_id,
        doctor_id: refs.doctor_id,
        service_id: refs.service_id,
        specimen_id: None,
        examination_type: "Hematologi lengkap".to_string(),
        requested_at: requested_at(),
        priority: Priority::Rutin,
        status: RequestStatus::Menunggu,
        doctor_notes: Some("Puasa 8 jam".to_string()),
    }
}

#[test]
fn create_and_get_roundtrip_resolves_joined_names() {
    let conn = open_db_in_memory().unwrap();
    let refs = seed_references(&conn);
    let repo = SqliteExaminationRepository::new(&conn);

    let id = repo.create_examination(&input_for(&refs)).unwrap();
    let loaded = repo.get_examination(id).unwrap().unwrap();

    assert_eq!(loaded.id, id);
    assert_eq!(loaded.patient_name, "Siti Aminah");
    assert_eq!(loaded.patient_id, refs.patient_id);
    assert_eq!(loaded.doctor_name, "dr. Rahmat");
    assert_eq!(loaded.doctor_id, refs.doctor_id);
    assert_eq!(loaded.service_name, "Laboratorium Klinik");
    assert_eq!(loaded.examination_type, "Hematologi lengkap");
    assert_eq!(loaded.requested_at, requested_at());
    assert_eq!(loaded.priority, Priority::Rutin);
    assert_eq!(loaded.status, RequestStatus::Menunggu);
    assert_eq!(loaded.doctor_notes.as_deref(), Some("Puasa 8 jam"));
}

#[test]
fn missing_specimen_reads_as_placeholder() {
    let conn = open_db_in_memory().unwrap();
    let refs = seed_references(&conn);
    let repo = SqliteExaminationRepository::new(&conn);

    let without = repo.create_examination(&input_for(&refs)).unwrap();
    let mut linked_input = input_for(&refs);
    linked_input.specimen_id = Some(refs.specimen_id);
    let linked = repo.create_examination(&linked_input).unwrap();

    let without = repo.get_examination(without).unwrap().unwrap();
    assert_eq!(without.specimen_type, NO_SPECIMEN_PLACEHOLDER);
    assert!(!without.has_specimen());

    let linked = repo.get_examination(linked).unwrap().unwrap();
    assert_eq!(linked.specimen_type, "Darah");
    assert!(linked.has_specimen());
}

#[test]
fn list_returns_every_row_and_empty_table_yields_empty_vec() {
    let conn = open_db_in_memory().unwrap();
    let refs = seed_references(&conn);
    let repo = SqliteExaminationRepository::new(&conn);

    assert!(repo.list_examinations().unwrap().is_empty());

    let first = repo.create_examination(&input_for(&refs)).unwrap();
    let second = repo.create_examination(&input_for(&refs)).unwrap();

    let mut ids: Vec<i64> = repo
        .list_examinations()
        .unwrap()
        .into_iter()
        .map(|record| record.id)
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![first, second]);
}

#[test]
fn get_unknown_id_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExaminationRepository::new(&conn);

    assert!(repo.get_examination(9999).unwrap().is_none());
    assert!(repo.get_examination(-1).unwrap().is_none());
}

#[test]
fn delete_removes_row_and_second_delete_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let refs = seed_references(&conn);
    let repo = SqliteExaminationRepository::new(&conn);

    let id = repo.create_examination(&input_for(&refs)).unwrap();
    repo.delete_examination(id).unwrap();

    assert!(repo.get_examination(id).unwrap().is_none());
    let err = repo.delete_examination(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == id));
}

#[test]
fn create_with_unknown_reference_is_a_db_error() {
    let conn = open_db_in_memory().unwrap();
    let refs = seed_references(&conn);
    let repo = SqliteExaminationRepository::new(&conn);

    let mut input = input_for(&refs);
    input.patient_id = refs.patient_id + 100;

    let err = repo.create_examination(&input).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert!(repo.list_examinations().unwrap().is_empty());
}

#[test]
fn invalid_persisted_date_is_rejected_on_read() {
    let conn = open_db_in_memory().unwrap();
    let refs = seed_references(&conn);
    let repo = SqliteExaminationRepository::new(&conn);

    let id = repo.create_examination(&input_for(&refs)).unwrap();
    conn.execute(
        "UPDATE pemeriksaan SET tanggal_permintaan = 'besok pagi' WHERE id_pemeriksaan = ?1;",
        params![id],
    )
    .unwrap();

    let err = repo.get_examination(id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
    assert!(err.to_string().contains("tanggal_permintaan"));
}

#[test]
fn date_only_rows_written_by_other_clients_read_as_midnight() {
    let conn = open_db_in_memory().unwrap();
    let refs = seed_references(&conn);
    let repo = SqliteExaminationRepository::new(&conn);

    let id = repo.create_examination(&input_for(&refs)).unwrap();
    conn.execute(
        "UPDATE pemeriksaan SET tanggal_permintaan = '2024-03-18' WHERE id_pemeriksaan = ?1;",
        params![id],
    )
    .unwrap();

    let loaded = repo.get_examination(id).unwrap().unwrap();
    assert_eq!(
        loaded.requested_at,
        NaiveDate::from_ymd_opt(2024, 3, 18)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    );
}
