use chrono::NaiveDate;
use roster_core::{BandFilter, GpaBand, Student, StudentField, StudentPatch};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn sample() -> Student {
    Student::new("SV01", "Nguyễn Văn An", date(2003, 9, 5), "CNTT-K15", 3.8)
}

#[test]
fn classify_uses_lower_inclusive_band_edges() {
    let cases = [
        (0.0, GpaBand::BelowAverage),
        (2.49, GpaBand::BelowAverage),
        (2.5, GpaBand::Average),
        (3.19, GpaBand::Average),
        (3.2, GpaBand::Good),
        (3.59, GpaBand::Good),
        (3.6, GpaBand::Excellent),
        (4.0, GpaBand::Excellent),
    ];

    for (gpa, expected) in cases {
        let student = Student::new("id", "name", date(2000, 1, 1), "class", gpa);
        assert_eq!(student.classify(), expected, "gpa {gpa}");
    }
}

#[test]
fn band_labels_and_filter_tokens_line_up() {
    assert_eq!(GpaBand::Excellent.label(), "Excellent");
    assert_eq!(GpaBand::BelowAverage.label(), "Below-average");
    assert_eq!(GpaBand::Good.badge_class(), "gpa-good");

    for band in [
        GpaBand::Excellent,
        GpaBand::Good,
        GpaBand::Average,
        GpaBand::BelowAverage,
    ] {
        let filter: BandFilter = band.slug().parse().unwrap();
        assert!(filter.accepts(band));
        assert!(BandFilter::All.accepts(band));
    }
}

#[test]
fn band_filter_parsing_is_case_insensitive_and_rejects_unknown() {
    assert_eq!(" Excellent ".parse::<BandFilter>(), Ok(BandFilter::Excellent));
    assert_eq!("ALL".parse::<BandFilter>(), Ok(BandFilter::All));

    let err = "top".parse::<BandFilter>().unwrap_err();
    assert!(err.to_string().contains("unknown band filter `top`"));
}

#[test]
fn string_setters_trim_and_ignore_blank_input() {
    let mut student = sample();

    assert!(student.set_name("  Trần Thị Bình  "));
    assert_eq!(student.name(), "Trần Thị Bình");

    assert!(!student.set_name("   "));
    assert!(!student.set_class_label(""));
    assert!(!student.set_id("\t"));
    assert_eq!(student.name(), "Trần Thị Bình");
    assert_eq!(student.class_label(), "CNTT-K15");
    assert_eq!(student.id(), "SV01");
}

#[test]
fn gpa_setters_ignore_out_of_range_and_unparseable_values() {
    let mut student = sample();

    assert!(!student.set_gpa(5.0));
    assert!(!student.set_gpa(-0.5));
    assert!(!student.set_gpa(f64::NAN));
    assert!(!student.set_gpa_text("abc"));
    assert_eq!(student.gpa(), 3.8);

    assert!(student.set_gpa_text(" 3.25 "));
    assert_eq!(student.gpa(), 3.25);
    assert!(student.set_gpa(0.0));
    assert_eq!(student.gpa(), 0.0);
}

#[test]
fn gpa_text_must_be_a_whole_number_literal() {
    let mut student = sample();

    assert!(!student.set_gpa_text("3.5abc"));
    assert!(!student.set_gpa_text("3,5"));
    assert!(!student.set_gpa_text(""));
    assert_eq!(student.gpa(), 3.8);

    assert!(student.set_gpa_text("4"));
    assert_eq!(student.gpa(), 4.0);
}

#[test]
fn update_fields_applies_valid_values_and_reports_rejections() {
    let mut student = sample();

    let rejected = student.update_fields(StudentPatch {
        name: Some("Lê Minh".to_string()),
        birth_date: Some(date(2004, 2, 29)),
        class_label: Some("   ".to_string()),
        gpa: Some(4.5),
    });

    assert_eq!(rejected, vec![StudentField::ClassLabel, StudentField::Gpa]);
    assert_eq!(student.name(), "Lê Minh");
    assert_eq!(student.birth_date(), date(2004, 2, 29));
    assert_eq!(student.class_label(), "CNTT-K15");
    assert_eq!(student.gpa(), 3.8);
}

#[test]
fn update_fields_treats_empty_strings_as_omitted_but_zero_gpa_as_update() {
    let mut student = sample();

    let rejected = student.update_fields(StudentPatch {
        name: Some(String::new()),
        class_label: None,
        gpa: Some(0.0),
        ..StudentPatch::default()
    });

    assert!(rejected.is_empty());
    assert_eq!(student.name(), "Nguyễn Văn An");
    assert_eq!(student.gpa(), 0.0);
}

#[test]
fn construction_accepts_values_as_given() {
    let student = Student::new("", "  padded  ", date(2001, 1, 1), "", 7.5);
    assert_eq!(student.id(), "");
    assert_eq!(student.name(), "  padded  ");
    assert_eq!(student.gpa(), 7.5);
}

#[test]
fn display_helpers_render_day_first_date_and_two_decimal_gpa() {
    let student = sample();
    assert_eq!(student.formatted_birth_date(), "05/09/2003");
    assert_eq!(student.formatted_gpa(), "3.80");
}

#[test]
fn serialization_uses_flat_camel_case_fields() {
    let student = sample();

    let json = serde_json::to_value(&student).unwrap();
    let object = json.as_object().unwrap();
    let mut keys = object.keys().map(String::as_str).collect::<Vec<_>>();
    keys.sort_unstable();
    assert_eq!(keys, ["birthDate", "classLabel", "gpa", "id", "name"]);
    assert_eq!(json["birthDate"], "2003-09-05");
    assert_eq!(json["classLabel"], "CNTT-K15");
    assert_eq!(json["gpa"], 3.8);

    let decoded: Student = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, student);
}

#[test]
fn deserialize_rejects_unknown_and_missing_fields() {
    let extra = serde_json::json!({
        "id": "SV01",
        "name": "An",
        "birthDate": "2003-09-05",
        "classLabel": "K15",
        "gpa": 3.1,
        "email": "an@example.com"
    });
    assert!(serde_json::from_value::<Student>(extra).is_err());

    let missing = serde_json::json!({
        "id": "SV01",
        "name": "An",
        "birthDate": "2003-09-05",
        "gpa": 3.1
    });
    assert!(serde_json::from_value::<Student>(missing).is_err());
}
