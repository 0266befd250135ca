use framekit_core::db::open_db_in_memory;
use framekit_core::validation::{ArgumentProblem, ValidationError};
use framekit_core::{
    Circle, CircleDraft, CircleId, CircleService, FrameDraft, FrameId, FrameService,
    SearchParams, ServiceError,
};
use rusqlite::Connection;
use std::collections::HashSet;
use uuid::Uuid;

struct Fixture {
    conn: Connection,
    left_frame: FrameId,
    right_frame: FrameId,
    center: CircleId,
    on_boundary: CircleId,
    past_boundary: CircleId,
    right_circle: CircleId,
}

fn fixture() -> Fixture {
    let conn = open_db_in_memory().unwrap();
    let frames = FrameService::new(&conn);
    let circles = CircleService::new(&conn);

    let left = frames
        .create_frame(&FrameDraft::new(7000.0, 7000.0, 200.0, 200.0))
        .unwrap();
    let right = frames
        .create_frame(&FrameDraft::new(7300.0, 7000.0, 100.0, 100.0))
        .unwrap();
    let create = |frame_id: FrameId, x: f64, y: f64| {
        circles
            .create_circle(frame_id, &CircleDraft::new(x, y, 20.0))
            .unwrap()
            .id
    };

    let center = create(left.id, 7050.0, 7050.0);
    let on_boundary = create(left.id, 7090.0, 7050.0);
    let past_boundary = create(left.id, 7050.0, 7091.0);
    let right_circle = create(right.id, 7350.0, 7050.0);

    Fixture {
        conn,
        left_frame: left.id,
        right_frame: right.id,
        center,
        on_boundary,
        past_boundary,
        right_circle,
    }
}

fn params(x: &str, y: &str, radius: &str) -> SearchParams {
    SearchParams {
        center_x: Some(x.to_string()),
        center_y: Some(y.to_string()),
        radius: Some(radius.to_string()),
        frame_id: None,
    }
}

fn ids(circles: &[Circle]) -> HashSet<CircleId> {
    circles.iter().map(|circle| circle.id).collect()
}

fn validation_errors(err: ServiceError) -> Vec<ValidationError> {
    match err {
        ServiceError::Validation(errors) => errors.errors().to_vec(),
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn concentric_circle_is_found() {
    let fx = fixture();
    let found = CircleService::new(&fx.conn)
        .search_circles(&params("7050", "7050", "10"))
        .unwrap();
    assert_eq!(ids(&found), HashSet::from([fx.center]));
}

#[test]
fn boundary_is_inclusive() {
    let fx = fixture();
    let found = CircleService::new(&fx.conn)
        .search_circles(&params("7050", "7050", "50"))
        .unwrap();

    let found = ids(&found);
    assert!(found.contains(&fx.center));
    assert!(found.contains(&fx.on_boundary));
    assert!(!found.contains(&fx.past_boundary));
    assert!(!found.contains(&fx.right_circle));
}

#[test]
fn radius_one_ulp_short_of_boundary_excludes_circle() {
    let fx = fixture();
    let radius = f64::from_bits(50.0f64.to_bits() - 1);

    let found = CircleService::new(&fx.conn)
        .search_circles(&params("7050", "7050", &radius.to_string()))
        .unwrap();

    let found = ids(&found);
    assert!(found.contains(&fx.center));
    assert!(!found.contains(&fx.on_boundary));
}

#[test]
fn search_is_idempotent_on_unchanged_state() {
    let fx = fixture();
    let service = CircleService::new(&fx.conn);
    let query = params("7200", "7050", "200");

    let first = ids(&service.search_circles(&query).unwrap());
    let second = ids(&service.search_circles(&query).unwrap());

    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

#[test]
fn frame_scope_limits_results() {
    let fx = fixture();
    let service = CircleService::new(&fx.conn);

    let mut scoped = params("7200", "7050", "200");
    scoped.frame_id = Some(fx.right_frame.to_string());
    assert_eq!(
        ids(&service.search_circles(&scoped).unwrap()),
        HashSet::from([fx.right_circle])
    );

    scoped.frame_id = Some(fx.left_frame.to_string());
    assert_eq!(
        ids(&service.search_circles(&scoped).unwrap()),
        HashSet::from([fx.center, fx.on_boundary, fx.past_boundary])
    );
}

#[test]
fn unknown_frame_scope_is_empty_success() {
    let fx = fixture();
    let mut scoped = params("7200", "7050", "200");
    scoped.frame_id = Some(Uuid::new_v4().to_string());

    let found = CircleService::new(&fx.conn).search_circles(&scoped).unwrap();
    assert!(found.is_empty());
}

#[test]
fn empty_region_is_empty_success() {
    let fx = fixture();
    let found = CircleService::new(&fx.conn)
        .search_circles(&params("0", "0", "5"))
        .unwrap();
    assert!(found.is_empty());
}

#[test]
fn missing_parameters_are_all_reported() {
    let fx = fixture();
    let query = SearchParams {
        center_y: Some("  ".to_string()),
        ..SearchParams::default()
    };

    let errors = validation_errors(
        CircleService::new(&fx.conn)
            .search_circles(&query)
            .unwrap_err(),
    );

    assert_eq!(
        errors,
        vec![
            ValidationError::MissingParameter { name: "center_x" },
            ValidationError::MissingParameter { name: "center_y" },
            ValidationError::MissingParameter { name: "radius" },
        ]
    );
}

#[test]
fn invalid_values_are_rejected() {
    let fx = fixture();
    let service = CircleService::new(&fx.conn);

    let errors = validation_errors(
        service
            .search_circles(&params("abc", "7050", "0"))
            .unwrap_err(),
    );
    assert_eq!(
        errors,
        vec![
            ValidationError::InvalidArgument {
                field: "center_x",
                problem: ArgumentProblem::NotANumber
            },
            ValidationError::InvalidArgument {
                field: "radius",
                problem: ArgumentProblem::NotPositive
            },
        ]
    );

    let mut bad_scope = params("1", "1", "1");
    bad_scope.frame_id = Some("not-a-uuid".to_string());
    assert_eq!(
        validation_errors(service.search_circles(&bad_scope).unwrap_err()),
        vec![ValidationError::InvalidArgument {
            field: "frame_id",
            problem: ArgumentProblem::NotUuid
        }]
    );
}

#[test]
fn negative_radius_is_rejected() {
    let fx = fixture();
    let errors = validation_errors(
        CircleService::new(&fx.conn)
            .search_circles(&params("0", "0", "-1"))
            .unwrap_err(),
    );
    assert_eq!(
        errors,
        vec![ValidationError::InvalidArgument {
            field: "radius",
            problem: ArgumentProblem::NotPositive
        }]
    );
}
