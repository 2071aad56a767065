use panelcraft_core::{Dimension, Error, Plate, PlateList, PlateRules};

fn row(dims: &[(f64, f64)]) -> PlateList {
    PlateList::new(
        dims.iter()
            .enumerate()
            .map(|(i, &(w, h))| Plate::new(format!("p{i}"), w, h))
            .collect(),
    )
}

#[test]
fn default_row_is_wide_plate_plus_small_plate() {
    let plates = PlateList::default_row();
    let dims: Vec<_> = plates.iter().map(|p| (p.width_cm, p.height_cm)).collect();
    assert_eq!(dims, vec![(250.0, 128.0), (30.0, 30.0)]);
    assert_ne!(plates.as_slice()[0].id, plates.as_slice()[1].id);
}

#[test]
fn add_default_stops_at_plate_limit() {
    let rules = PlateRules::default();
    let mut plates = row(&[]);
    for _ in 0..rules.max_plates {
        let added = plates.add_default(&rules).expect("below limit");
        assert_eq!((added.width_cm, added.height_cm), (30.0, 30.0));
    }
    let err = plates.add_default(&rules).unwrap_err();
    assert!(matches!(err, Error::PlateLimit { max: 10 }));
    assert_eq!(plates.len(), 10);
}

#[test]
fn last_plate_cannot_be_removed() {
    let mut plates = row(&[(100.0, 60.0), (40.0, 40.0)]);
    let removed = plates.remove("p0").expect("two plates present");
    assert_eq!(removed.id, "p0");
    assert!(matches!(plates.remove("p1"), Err(Error::LastPlate)));
    assert!(matches!(
        plates.remove("missing"),
        Err(Error::UnknownPlate { .. })
    ));
    assert_eq!(plates.len(), 1);
}

#[test]
fn resize_rejects_out_of_bounds_without_mutation() {
    let rules = PlateRules::default();
    let mut plates = row(&[(100.0, 60.0)]);

    let err = plates.resize("p0", 301.0, 60.0, &rules).unwrap_err();
    assert!(matches!(
        err,
        Error::DimensionOutOfRange {
            dimension: Dimension::Width,
            ..
        }
    ));
    let err = plates
        .set_dimension("p0", Dimension::Height, 29.9, &rules)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::DimensionOutOfRange {
            dimension: Dimension::Height,
            ..
        }
    ));
    assert!(
        plates
            .set_dimension("p0", Dimension::Height, f64::NAN, &rules)
            .is_err()
    );
    assert_eq!(plates.get("p0").unwrap().width_cm, 100.0);
    assert_eq!(plates.get("p0").unwrap().height_cm, 60.0);

    plates.resize("p0", 20.0, 128.0, &rules).expect("bounds are inclusive");
    assert_eq!(plates.get("p0").unwrap().size().width, 20.0);
}

#[test]
fn dimension_error_message_names_the_range() {
    let rules = PlateRules::default();
    let mut plates = row(&[(100.0, 60.0)]);
    let err = plates
        .set_dimension("p0", Dimension::Width, 10.0, &rules)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "plate width must be between 20 and 300 cm (got 10)"
    );
}

#[test]
fn move_plate_reorders() {
    let mut plates = row(&[(20.0, 30.0), (40.0, 30.0), (60.0, 30.0)]);
    plates.move_plate(0, 2).unwrap();
    let ids: Vec<_> = plates.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2", "p0"]);
    assert!(matches!(
        plates.move_plate(3, 0),
        Err(Error::IndexOutOfRange { index: 3, len: 3 })
    ));
}

#[test]
fn duplicate_ids_are_rejected() {
    let rules = PlateRules::default();
    let mut plates = row(&[(100.0, 60.0)]);
    let err = plates
        .push(Plate::new("p0", 50.0, 50.0), &rules)
        .unwrap_err();
    assert!(matches!(err, Error::DuplicatePlate { .. }));
}

#[test]
fn plate_list_serializes_as_plain_array() {
    let plates = row(&[(100.0, 60.0)]);
    let json = serde_json::to_value(&plates).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "id": "p0", "width_cm": 100.0, "height_cm": 60.0 }])
    );
}
